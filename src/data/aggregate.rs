use crate::data::normalize::{EntityId, Record};

/// Per-entity aggregate over its records.
///
/// `mean` is `0.0` for entities with no records so consumers never
/// special-case empty groups; `max` is `None` in that case and callers must
/// handle it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupStat {
    /// The aggregated entity.
    pub entity: EntityId,
    /// Arithmetic mean of the entity's record metrics, `0.0` when empty.
    pub mean: f64,
    /// Index (into the record slice) of the record with the largest metric.
    pub max: Option<usize>,
}

impl GroupStat {
    /// Resolve the max record against the slice the stat was computed from.
    pub fn max_record<'a>(&self, records: &'a [Record]) -> Option<&'a Record> {
        self.max.map(|i| &records[i])
    }
}

/// Compute one [`GroupStat`] per allow-listed entity, in allow-list order.
///
/// Recomputed whenever the underlying record set changes; never cached
/// against a stale slice.
pub fn group_stats(records: &[Record], entities: &[EntityId]) -> Vec<GroupStat> {
    entities
        .iter()
        .map(|entity| {
            let mut sum = 0.0;
            let mut count = 0usize;
            let mut max: Option<usize> = None;
            for (i, record) in records.iter().enumerate() {
                if record.entity() != entity {
                    continue;
                }
                sum += record.metric();
                count += 1;
                let better = match max {
                    Some(j) => record.metric() > records[j].metric(),
                    None => true,
                };
                if better {
                    max = Some(i);
                }
            }
            GroupStat {
                entity: entity.clone(),
                mean: if count == 0 { 0.0 } else { sum / count as f64 },
                max,
            }
        })
        .collect()
}

/// Indices of up to `k` records for `entity`, sorted by metric descending.
///
/// The sort is stable: equal metrics keep their original row order, so
/// re-running reproduces the same sequence.
pub fn top_k(records: &[Record], entity: &EntityId, k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.entity() == entity)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| records[b].metric().total_cmp(&records[a].metric()));
    indices.truncate(k);
    indices
}

/// Top-K indices for every entity, flattened in allow-list order.
pub fn top_k_all(records: &[Record], entities: &[EntityId], k: usize) -> Vec<usize> {
    entities
        .iter()
        .flat_map(|entity| top_k(records, entity, k))
        .collect()
}

/// Look up the designated reference record by exact label match.
///
/// Absence is a reportable condition; callers turn `None` into a step error
/// rather than ignoring it.
pub fn find_reference(records: &[Record], name: &str) -> Option<usize> {
    records.iter().position(|r| r.label() == name)
}

/// Largest metric across the given record indices, `None` when empty.
pub fn max_metric(records: &[Record], indices: impl IntoIterator<Item = usize>) -> Option<f64> {
    indices
        .into_iter()
        .map(|i| records[i].metric())
        .max_by(f64::total_cmp)
}

#[cfg(test)]
#[path = "../../tests/unit/data/aggregate.rs"]
mod tests;
