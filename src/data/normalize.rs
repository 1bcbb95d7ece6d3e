use std::fmt;

use crate::{
    config::{SalaryColumns, TuitionColumns},
    data::table::RawTable,
};

/// A named group from the fixed allow-list (e.g. one institution).
///
/// Identity is the exact name string; order in the allow-list is display
/// order.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap an entity name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The entity name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One salary observation: a person employed by an allow-listed entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SalaryRecord {
    /// Employing entity.
    pub entity: EntityId,
    /// Person's name.
    pub name: String,
    /// Remuneration amount; the primary metric.
    pub salary: f64,
    /// Role, when the source provides one.
    pub position: Option<String>,
}

/// One tuition observation for an allow-listed entity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TuitionRecord {
    /// The entity itself.
    pub entity: EntityId,
    /// Tuition per student; the primary metric.
    pub tuition_per_student: f64,
    /// Total enrolled students.
    pub total_students: f64,
    /// Tuition fee amount.
    pub tuition_fees: f64,
    /// Derived at normalization: `total_students * tuition_fees`.
    pub total_revenue: f64,
}

/// One row-level observation belonging to exactly one entity.
///
/// Records are created once during normalization and never mutated; derived
/// views (aggregates, subsets) are recomputed, not patched in place.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Record {
    /// A salary observation.
    Salary(SalaryRecord),
    /// A tuition observation.
    Tuition(TuitionRecord),
}

impl Record {
    /// The owning entity.
    pub fn entity(&self) -> &EntityId {
        match self {
            Self::Salary(r) => &r.entity,
            Self::Tuition(r) => &r.entity,
        }
    }

    /// The primary numeric metric for this record kind.
    pub fn metric(&self) -> f64 {
        match self {
            Self::Salary(r) => r.salary,
            Self::Tuition(r) => r.tuition_per_student,
        }
    }

    /// Display label: the person's name for salaries, the entity name for
    /// tuition rows.
    pub fn label(&self) -> &str {
        match self {
            Self::Salary(r) => &r.name,
            Self::Tuition(r) => r.entity.as_str(),
        }
    }

    /// The role field, when the record kind carries one.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Salary(r) => r.position.as_deref(),
            Self::Tuition(_) => None,
        }
    }
}

/// Coerce an untyped cell to a number.
///
/// Strips `$` and thousands separators before parsing. Missing cells,
/// non-numeric text, and non-finite results all coerce to `0.0`; a malformed
/// cell never aborts the dataset.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Normalize a salary table: allow-list filter, numeric coercion, typing.
///
/// Rows whose entity column is not in `entities` are dropped; kept rows stay
/// in source order. Pure and idempotent.
#[tracing::instrument(skip(table, entities, columns), fields(rows = table.rows.len()))]
pub fn normalize_salaries(
    table: &RawTable,
    entities: &[EntityId],
    columns: &SalaryColumns,
) -> Vec<Record> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let entity = row.get(&columns.entity)?;
            let entity = entities.iter().find(|e| e.as_str() == entity)?;
            Some(Record::Salary(SalaryRecord {
                entity: entity.clone(),
                name: row.get(&columns.name).unwrap_or_default().to_string(),
                salary: coerce_number(row.get(&columns.amount)),
                position: row
                    .get(&columns.role)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            }))
        })
        .collect()
}

/// Normalize a tuition table, attaching the derived revenue field.
#[tracing::instrument(skip(table, entities, columns), fields(rows = table.rows.len()))]
pub fn normalize_tuition(
    table: &RawTable,
    entities: &[EntityId],
    columns: &TuitionColumns,
) -> Vec<Record> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let entity = row.get(&columns.entity)?;
            let entity = entities.iter().find(|e| e.as_str() == entity)?;
            let total_students = coerce_number(row.get(&columns.total_students));
            let tuition_fees = coerce_number(row.get(&columns.tuition_fees));
            Some(Record::Tuition(TuitionRecord {
                entity: entity.clone(),
                tuition_per_student: coerce_number(row.get(&columns.tuition_per_student)),
                total_students,
                tuition_fees,
                total_revenue: total_students * tuition_fees,
            }))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/normalize.rs"]
mod tests;
