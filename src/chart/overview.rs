use kurbo::Point;

use crate::{
    data::aggregate::GroupStat,
    data::normalize::Record,
    render::surface::Surface,
    scale::axis::AxisController,
    scene::join::JoinStats,
    scene::model::{DatumKey, Scene, ShapeAttrs, ShapeKind, ShapeTag},
};

const DOT_FILL: &str = "steelblue";
const DOT_RADIUS: f64 = 5.0;
const DOT_OPACITY: f64 = 0.4;
const TOP_DOT_FILL: &str = "orange";
const TOP_DOT_STROKE: &str = "black";
const TOP_DOT_RADIUS: f64 = 7.0;
const AVG_STROKE: &str = "red";
const AVG_STROKE_WIDTH: f64 = 2.0;

/// Render the comparison overview: all records as dots, each entity's
/// maximum as an emphasized dot, and one average line per entity.
///
/// This is the static scene the hover and search layers operate on. It goes
/// through the same keyed join as the narrative steps, so search emphasis and
/// reset work on live shape identities.
pub fn render_overview(
    scene: &mut Scene,
    records: &[Record],
    stats: &[GroupStat],
    axes: &AxisController,
    surface: &mut dyn Surface,
) -> JoinStats {
    let indices: Vec<usize> = (0..records.len()).collect();
    let dots = scene.set_shapes(
        ShapeTag::Dot,
        &indices,
        |i| DatumKey::record(*i),
        |i| {
            let record = &records[*i];
            (
                ShapeKind::Circle {
                    center: point_for(record, axes),
                    radius: DOT_RADIUS,
                },
                ShapeAttrs::filled(DOT_FILL).with_opacity(DOT_OPACITY),
            )
        },
        None,
        surface,
    );

    let top: Vec<&GroupStat> = stats.iter().filter(|s| s.max.is_some()).collect();
    scene.set_shapes(
        ShapeTag::TopDot,
        &top,
        |stat| DatumKey::annotation("top", stat.entity.as_str()),
        |stat| {
            // Filtered to Some above.
            let record = stat.max_record(records);
            let center = record.map(|r| point_for(r, axes)).unwrap_or_default();
            (
                ShapeKind::Circle {
                    center,
                    radius: TOP_DOT_RADIUS,
                },
                ShapeAttrs {
                    stroke: Some(TOP_DOT_STROKE.to_string()),
                    ..ShapeAttrs::filled(TOP_DOT_FILL).with_opacity(DOT_OPACITY)
                },
            )
        },
        None,
        surface,
    );

    scene.set_shapes(
        ShapeTag::AverageLine,
        stats,
        |stat| DatumKey::entity(&stat.entity),
        |stat| {
            let x0 = axes.x().position(&stat.entity).unwrap_or_default();
            let y = axes.y().map(stat.mean);
            (
                ShapeKind::Segment {
                    from: Point::new(x0, y),
                    to: Point::new(x0 + axes.x().bandwidth(), y),
                },
                ShapeAttrs::stroked(AVG_STROKE, AVG_STROKE_WIDTH),
            )
        },
        None,
        surface,
    );

    dots
}

fn point_for(record: &Record, axes: &AxisController) -> Point {
    let cx = axes.x().center(record.entity()).unwrap_or_default();
    let cy = axes.y().map(record.metric());
    Point::new(cx, cy)
}

#[cfg(test)]
#[path = "../../tests/unit/chart/overview.rs"]
mod tests;
