use super::*;
use crate::{
    chart::overview::render_overview,
    data::aggregate::group_stats,
    data::normalize::{EntityId, SalaryRecord},
    foundation::core::{Canvas, Margins, Millis, PlotFrame},
    render::surface::RecordingSurface,
    scale::axis::AxisController,
};

fn rec(entity: &str, name: &str, salary: f64) -> Record {
    Record::Salary(SalaryRecord {
        entity: EntityId::new(entity),
        name: name.to_string(),
        salary,
        position: None,
    })
}

fn scene_fixture() -> (Scene, Vec<Record>) {
    let records = vec![
        rec("A", "Abel-Co, Karen", 100.0),
        rec("A", "Baker, June", 200.0),
        rec("B", "Carter, May", 300.0),
    ];
    let entities = vec![EntityId::new("A"), EntityId::new("B")];
    let stats = group_stats(&records, &entities);
    let frame = PlotFrame::new(
        Canvas {
            width: 900,
            height: 500,
        },
        Margins {
            top: 40.0,
            right: 50.0,
            bottom: 70.0,
            left: 100.0,
        },
    )
    .unwrap();
    let axes = AxisController::new(&frame, entities, 0.5, (0.0, 300.0), Millis(1000)).unwrap();
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    render_overview(&mut scene, &records, &stats, &axes, &mut surface);
    (scene, records)
}

#[test]
fn empty_query_restores_every_shape() {
    let (mut scene, records) = scene_fixture();
    let mut surface = RecordingSurface::new();

    apply_search(&mut scene, &records, "karen", &mut surface);
    assert!(
        scene
            .shapes()
            .iter()
            .any(|s| s.attrs != s.base_attrs || s.kind != s.base_kind)
    );

    let matched = apply_search(&mut scene, &records, "", &mut surface);
    assert_eq!(matched, None);
    for shape in scene.shapes() {
        assert_eq!(shape.attrs, shape.base_attrs);
        assert_eq!(shape.kind, shape.base_kind);
    }
}

#[test]
fn no_match_leaves_the_scene_at_defaults() {
    let (mut scene, records) = scene_fixture();
    let mut surface = RecordingSurface::new();

    let matched = apply_search(&mut scene, &records, "zzz", &mut surface);
    assert_eq!(matched, None);
    for shape in scene.shapes() {
        assert_eq!(shape.attrs, shape.base_attrs);
    }
}

#[test]
fn match_is_case_insensitive_substring() {
    let (mut scene, records) = scene_fixture();
    let mut surface = RecordingSurface::new();
    assert_eq!(
        apply_search(&mut scene, &records, "KAREN", &mut surface),
        Some(0)
    );
    assert_eq!(
        apply_search(&mut scene, &records, "er, ", &mut surface),
        Some(1)
    );
}

#[test]
fn first_match_in_data_order_wins() {
    let (mut scene, records) = scene_fixture();
    let mut surface = RecordingSurface::new();
    // "a" appears in every name; only the first record is emphasized.
    let matched = apply_search(&mut scene, &records, "a", &mut surface);
    assert_eq!(matched, Some(0));

    let emphasized: Vec<_> = scene
        .shapes()
        .iter()
        .filter(|s| s.tag == ShapeTag::Dot && s.attrs.fill.as_deref() == Some("green"))
        .collect();
    assert_eq!(emphasized.len(), 1);
    assert_eq!(emphasized[0].key, DatumKey::record(0));
}

#[test]
fn match_emphasizes_dot_and_entity_line_and_dims_the_rest() {
    let (mut scene, records) = scene_fixture();
    let mut surface = RecordingSurface::new();
    apply_search(&mut scene, &records, "june", &mut surface);

    for shape in scene.shapes() {
        let is_match_dot = shape.key == DatumKey::record(1) && shape.tag == ShapeTag::Dot;
        let is_match_line =
            shape.key == DatumKey::entity(&EntityId::new("A")) && shape.tag == ShapeTag::AverageLine;
        if is_match_dot {
            assert_eq!(shape.attrs.opacity, 1.0);
            assert_eq!(shape.attrs.fill.as_deref(), Some("green"));
            let ShapeKind::Circle { radius, .. } = shape.kind else {
                panic!("dot must stay a circle");
            };
            assert_eq!(radius, 8.0);
        } else if is_match_line {
            assert_eq!(shape.attrs.opacity, 1.0);
            assert_eq!(shape.attrs.stroke.as_deref(), Some("blue"));
        } else {
            assert_eq!(shape.attrs.opacity, 0.2, "{:?} must dim", shape.key);
        }
    }

    // The emphasized dot is raised above everything.
    let last = scene.shapes().last().unwrap();
    assert_eq!(last.key, DatumKey::record(1));
    assert_eq!(last.tag, ShapeTag::Dot);
}
