use crate::{
    data::normalize::Record,
    render::surface::Surface,
    scene::model::{DatumKey, Scene, ShapeAttrs, ShapeId, ShapeKind, ShapeTag},
};

/// Opacity every shape drops to while a match is emphasized.
const DIM_OPACITY: f64 = 0.2;
const MATCH_FILL: &str = "green";
const MATCH_RADIUS: f64 = 8.0;
const MATCH_LINE_STROKE: &str = "blue";

/// Re-derive highlight state for the whole scene from a live query string.
///
/// - Empty query: every shape is restored to its default appearance,
///   regardless of prior match state.
/// - No record matches: the scene stays at defaults; only a found match
///   triggers dim-and-highlight mode.
/// - Otherwise the first matching record in data order is emphasized (and
///   raised), its entity's average line is emphasized alongside it, and every
///   other shape dims.
///
/// Matching is a case-insensitive substring test against record labels. The
/// already-rendered scene is restyled in place; no data is re-fetched or
/// re-derived. Returns the matched record index, when any.
#[tracing::instrument(skip(scene, records, surface), fields(query = query))]
pub fn apply_search(
    scene: &mut Scene,
    records: &[Record],
    query: &str,
    surface: &mut dyn Surface,
) -> Option<usize> {
    // Every keystroke starts from a clean slate.
    scene.reset_appearance(surface);

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let matched = records
        .iter()
        .position(|r| r.label().to_lowercase().contains(&needle))?;
    let match_key = DatumKey::record(matched);
    let entity_key = DatumKey::entity(records[matched].entity());

    // Dim everything, then emphasize the match and its entity's average line.
    let mut dimmed: Vec<(ShapeId, ShapeAttrs)> = Vec::new();
    let mut match_point: Option<(ShapeId, ShapeKind, ShapeAttrs)> = None;
    let mut match_line: Option<(ShapeId, ShapeAttrs)> = None;
    for shape in scene.shapes() {
        if shape.key == match_key && matches!(shape.tag, ShapeTag::Dot | ShapeTag::ScatterPoint) {
            let kind = match shape.base_kind.clone() {
                ShapeKind::Circle { center, .. } => ShapeKind::Circle {
                    center,
                    radius: MATCH_RADIUS,
                },
                other => other,
            };
            let attrs = ShapeAttrs {
                fill: Some(MATCH_FILL.to_string()),
                opacity: 1.0,
                ..shape.base_attrs.clone()
            };
            match_point = Some((shape.id, kind, attrs));
        } else if shape.tag == ShapeTag::AverageLine && shape.key == entity_key {
            let attrs = ShapeAttrs {
                stroke: Some(MATCH_LINE_STROKE.to_string()),
                opacity: 1.0,
                ..shape.base_attrs.clone()
            };
            match_line = Some((shape.id, attrs));
        } else {
            dimmed.push((
                shape.id,
                ShapeAttrs {
                    opacity: DIM_OPACITY,
                    ..shape.attrs.clone()
                },
            ));
        }
    }

    for (id, attrs) in dimmed {
        scene.set_attrs(id, attrs, surface);
    }
    if let Some((id, attrs)) = match_line {
        scene.set_attrs(id, attrs, surface);
        scene.raise_shape(id, surface);
    }
    if let Some((id, kind, attrs)) = match_point {
        scene.set_kind(id, kind, surface);
        scene.set_attrs(id, attrs, surface);
        scene.raise_shape(id, surface);
    }

    Some(matched)
}

#[cfg(test)]
#[path = "../../tests/unit/interact/search.rs"]
mod tests;
