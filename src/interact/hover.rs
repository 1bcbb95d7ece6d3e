use kurbo::Point;

use crate::{
    data::aggregate::GroupStat,
    data::normalize::Record,
    foundation::format::{NOT_AVAILABLE, money0, ratio2},
    render::surface::Surface,
};

/// Formatted tooltip content for one hovered record.
///
/// Ratios compare the hovered metric against the group mean, the group
/// maximum, and the fixed reference record, each formatted to two decimal
/// places. A missing denominator source renders as `N/A` rather than a
/// numeric error.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tooltip {
    /// Hovered record's display label.
    pub name: String,
    /// Formatted metric value.
    pub metric: String,
    /// Ratio against the record's group mean.
    pub vs_group_mean: String,
    /// Ratio against the record's group maximum.
    pub vs_group_max: String,
    /// Ratio against the reference record.
    pub vs_reference: String,
}

impl Tooltip {
    /// Render the tooltip as the multi-line text handed to the surface.
    pub fn to_text(&self) -> String {
        format!(
            "{}\nSalary: {}\nCompared to:\n- Group Avg: {}\n- Group Top: {}\n- Reference: {}",
            self.name, self.metric, self.vs_group_mean, self.vs_group_max, self.vs_reference
        )
    }
}

/// Compute the comparison tooltip for the hovered record.
///
/// `reference` is the index of the reference record, when present; `stats`
/// are the session's per-entity aggregates.
pub fn tooltip_for(
    records: &[Record],
    stats: &[GroupStat],
    reference: Option<usize>,
    hovered: usize,
) -> Tooltip {
    let record = &records[hovered];
    let metric = record.metric();
    let stat = stats.iter().find(|s| &s.entity == record.entity());

    let vs_group_mean = match stat {
        Some(s) if s.mean != 0.0 => ratio2(metric, s.mean),
        _ => NOT_AVAILABLE.to_string(),
    };
    let vs_group_max = match stat.and_then(|s| s.max_record(records)) {
        Some(max) => ratio2(metric, max.metric()),
        None => NOT_AVAILABLE.to_string(),
    };
    let vs_reference = match reference {
        Some(i) => ratio2(metric, records[i].metric()),
        None => NOT_AVAILABLE.to_string(),
    };

    Tooltip {
        name: record.label().to_string(),
        metric: money0(metric),
        vs_group_mean,
        vs_group_max,
        vs_reference,
    }
}

/// Hover-enter: show the tooltip at the pointer position.
pub fn hover_enter(tooltip: &Tooltip, at: Point, surface: &mut dyn Surface) {
    surface.show_tooltip(&tooltip.to_text(), at);
}

/// Hover-exit: hide the tooltip. Nothing persists between hovers.
pub fn hover_exit(surface: &mut dyn Surface) {
    surface.hide_tooltip();
}

#[cfg(test)]
#[path = "../../tests/unit/interact/hover.rs"]
mod tests;
