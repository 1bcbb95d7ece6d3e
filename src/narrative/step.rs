use crate::scene::model::ShapeTag;

/// Named states of the narrative step state machine.
///
/// Exactly one step is active at a time. Entering a step clears its declared
/// tag set, re-derives the active data subset and axis domain, and rebuilds
/// the step's shapes through the scene join, so any step is reachable from
/// any other, and re-entering the same step is idempotent.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum NarrativeStep {
    /// Baseline: one mean line per entity.
    AverageLines,
    /// Mean lines plus the emphasized reference record.
    HighlightReference,
    /// Every record as a point, with off-scale callouts and a clipping cap.
    AllEntries,
    /// Every record with the value scale re-fit to the full metric range.
    RescaleFull,
    /// Top-K records per entity only.
    FilterTopK,
    /// Terminal/reset state: no step-tagged shapes remain.
    Clear,
}

impl NarrativeStep {
    /// Every step, in narrative order.
    pub const ALL: [NarrativeStep; 6] = [
        NarrativeStep::AverageLines,
        NarrativeStep::HighlightReference,
        NarrativeStep::AllEntries,
        NarrativeStep::RescaleFull,
        NarrativeStep::FilterTopK,
        NarrativeStep::Clear,
    ];

    /// Stable step name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::AverageLines => "average-lines",
            Self::HighlightReference => "highlight-reference",
            Self::AllEntries => "all-entries",
            Self::RescaleFull => "rescale-full",
            Self::FilterTopK => "filter-top-k",
            Self::Clear => "clear",
        }
    }

    /// Tags unconditionally removed when this step is entered.
    ///
    /// Tags the step reconciles through the join are not listed; the join
    /// itself removes stale shapes while keeping still-bound data alive for
    /// animated updates. Everything else that is neither produced nor
    /// preserved by the step must appear here; that is the residue-freedom
    /// guarantee.
    pub fn cleared_tags(self) -> &'static [ShapeTag] {
        match self {
            Self::AverageLines => &[
                ShapeTag::ScatterPoint,
                ShapeTag::HighlightPoint,
                ShapeTag::HighlightLabel,
                ShapeTag::ArrowShaft,
                ShapeTag::CapRect,
                ShapeTag::Dot,
                ShapeTag::TopDot,
            ],
            Self::HighlightReference => &[
                ShapeTag::ScatterPoint,
                ShapeTag::HighlightPoint,
                ShapeTag::HighlightLabel,
                ShapeTag::ArrowShaft,
                ShapeTag::CapRect,
                ShapeTag::Dot,
                ShapeTag::TopDot,
            ],
            Self::AllEntries => &[
                ShapeTag::HighlightPoint,
                ShapeTag::HighlightLabel,
                ShapeTag::ArrowShaft,
                ShapeTag::CapRect,
                ShapeTag::Dot,
                ShapeTag::TopDot,
            ],
            Self::RescaleFull => &[
                ShapeTag::HighlightPoint,
                ShapeTag::HighlightLabel,
                ShapeTag::ArrowShaft,
                ShapeTag::CapRect,
                ShapeTag::Dot,
                ShapeTag::TopDot,
            ],
            Self::FilterTopK => &[
                ShapeTag::AverageLine,
                ShapeTag::HighlightPoint,
                ShapeTag::HighlightLabel,
                ShapeTag::ArrowShaft,
                ShapeTag::CapRect,
                ShapeTag::Dot,
                ShapeTag::TopDot,
            ],
            Self::Clear => &ShapeTag::ALL,
        }
    }

    /// Tags this step carries over from a previous step, when present.
    pub fn preserved_tags(self) -> &'static [ShapeTag] {
        match self {
            Self::HighlightReference | Self::AllEntries | Self::RescaleFull => {
                &[ShapeTag::AverageLine]
            }
            _ => &[],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/step.rs"]
mod tests;
