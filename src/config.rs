use crate::{
    data::normalize::EntityId,
    foundation::core::{Canvas, Margins, Millis, PlotFrame},
    foundation::error::{NarravisError, NarravisResult},
};

/// Complete configuration for one narrated visualization session.
///
/// This is a pure data model deserializable from JSON; the surrounding shell
/// decides where it comes from (a config file, inline defaults). Everything
/// the engine treats as "externally supplied" lives here: canvas geometry,
/// the entity allow-list (display order), the reference individual, and the
/// column mappings for the tabular sources.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartConfig {
    /// Canvas dimensions in pixels.
    pub canvas: Canvas,
    /// Margins around the plot area.
    #[serde(default)]
    pub margin: Margins,
    /// Entity allow-list; order is display order and is never re-sorted.
    pub entities: Vec<String>,
    /// Exact name of the reference record used as a fixed comparison baseline.
    pub reference_name: String,
    /// Duration of animated axis/shape transitions.
    #[serde(default = "default_transition")]
    pub transition: Millis,
    /// Band padding for the categorical scale, in `[0, 1)`.
    #[serde(default = "default_band_padding")]
    pub band_padding: f64,
    /// How many records per entity the top-K filter step keeps.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Salary dataset source and column mapping.
    #[serde(default)]
    pub salary_columns: SalaryColumns,
    /// Tuition dataset source and column mapping.
    #[serde(default)]
    pub tuition_columns: TuitionColumns,
}

fn default_transition() -> Millis {
    Millis(1000)
}

fn default_band_padding() -> f64 {
    0.5
}

fn default_top_k() -> usize {
    10
}

/// Column names for the salary dataset.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SalaryColumns {
    /// Column holding the entity (institution) name.
    pub entity: String,
    /// Column holding the person's name.
    pub name: String,
    /// Column holding the remuneration amount.
    pub amount: String,
    /// Column holding the person's role/position.
    pub role: String,
}

impl Default for SalaryColumns {
    fn default() -> Self {
        Self {
            entity: "Agency".to_string(),
            name: "Name".to_string(),
            amount: "Remuneration".to_string(),
            role: "Position".to_string(),
        }
    }
}

/// Column names for the tuition dataset.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TuitionColumns {
    /// Column holding the entity (institution) name.
    pub entity: String,
    /// Column holding tuition per student.
    pub tuition_per_student: String,
    /// Column holding the total student count.
    pub total_students: String,
    /// Column holding the tuition fee amount.
    pub tuition_fees: String,
}

impl Default for TuitionColumns {
    fn default() -> Self {
        Self {
            entity: "Institutions".to_string(),
            tuition_per_student: "2022/23 Tuition For Each Student".to_string(),
            total_students: "2022/23 Total Students".to_string(),
            tuition_fees: "2022/23 Tuition Fees".to_string(),
        }
    }
}

impl ChartConfig {
    /// Validate configuration invariants.
    pub fn validate(&self) -> NarravisResult<()> {
        PlotFrame::new(self.canvas, self.margin)?;
        if self.entities.is_empty() {
            return Err(NarravisError::validation("entities must be non-empty"));
        }
        for entity in &self.entities {
            if entity.trim().is_empty() {
                return Err(NarravisError::validation("entity name must be non-empty"));
            }
        }
        if self.reference_name.trim().is_empty() {
            return Err(NarravisError::validation("reference_name must be non-empty"));
        }
        if !self.band_padding.is_finite() || !(0.0..1.0).contains(&self.band_padding) {
            return Err(NarravisError::validation("band_padding must be in [0, 1)"));
        }
        if self.top_k == 0 {
            return Err(NarravisError::validation("top_k must be > 0"));
        }
        Ok(())
    }

    /// The validated plot frame for this configuration.
    pub fn frame(&self) -> NarravisResult<PlotFrame> {
        PlotFrame::new(self.canvas, self.margin)
    }

    /// The allow-list as typed entity ids, in display order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .map(|name| EntityId::new(name.as_str()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
