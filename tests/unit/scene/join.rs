use super::*;
use crate::render::surface::{RecordingSurface, SurfaceEvent};
use kurbo::Point;

fn circle(x: f64) -> (ShapeKind, ShapeAttrs) {
    (
        ShapeKind::Circle {
            center: Point::new(x, 0.0),
            radius: 5.0,
        },
        ShapeAttrs::default(),
    )
}

fn join(
    scene: &mut Scene,
    tag: ShapeTag,
    data: &[u32],
    surface: &mut RecordingSurface,
) -> JoinStats {
    scene.set_shapes(
        tag,
        data,
        |d| DatumKey::new(format!("d:{d}")),
        |d| circle(f64::from(*d)),
        None,
        surface,
    )
}

#[test]
fn join_enters_updates_and_exits() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();

    let stats = join(&mut scene, ShapeTag::Dot, &[1, 2, 3], &mut surface);
    assert_eq!((stats.entered, stats.updated, stats.exited), (3, 0, 0));
    assert_eq!(scene.len(), 3);

    let stats = join(&mut scene, ShapeTag::Dot, &[2, 3, 4], &mut surface);
    assert_eq!((stats.entered, stats.updated, stats.exited), (1, 2, 1));
    assert_eq!(scene.len(), 3);
}

#[test]
fn retained_data_keeps_shape_identity() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();

    join(&mut scene, ShapeTag::Dot, &[1, 2], &mut surface);
    let id_of = |scene: &Scene, key: &str| {
        scene
            .shapes()
            .iter()
            .find(|s| s.key.as_str() == key)
            .map(|s| s.id)
    };
    let id1 = id_of(&scene, "d:1").unwrap();

    // Same data set again: every id survives and nothing enters or exits.
    let stats = join(&mut scene, ShapeTag::Dot, &[1, 2], &mut surface);
    assert_eq!((stats.entered, stats.exited), (0, 0));
    assert_eq!(id_of(&scene, "d:1"), Some(id1));

    // Removal plus addition: the survivor keeps its id.
    join(&mut scene, ShapeTag::Dot, &[1, 9], &mut surface);
    assert_eq!(id_of(&scene, "d:1"), Some(id1));
    assert_eq!(id_of(&scene, "d:2"), None);
}

#[test]
fn duplicate_data_keys_keep_the_first_occurrence() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    let stats = join(&mut scene, ShapeTag::Dot, &[7, 7, 7], &mut surface);
    assert_eq!((stats.entered, stats.updated, stats.exited), (1, 0, 0));
    assert_eq!(scene.len(), 1);
}

#[test]
fn joins_are_scoped_to_their_tag() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();

    join(&mut scene, ShapeTag::Dot, &[1], &mut surface);
    join(&mut scene, ShapeTag::TopDot, &[1], &mut surface);
    assert_eq!(scene.len(), 2);

    // An empty join on one tag leaves the other tag alone.
    join(&mut scene, ShapeTag::Dot, &[], &mut surface);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.shapes_tagged(ShapeTag::TopDot).count(), 1);
}

#[test]
fn join_transition_animates_updates_but_not_entries() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    join(&mut scene, ShapeTag::Dot, &[1], &mut surface);

    surface.clear();
    let transition = Some(JoinTransition {
        duration: Millis(1000),
        ease: Ease::default(),
    });
    scene.set_shapes(
        ShapeTag::Dot,
        &[1u32, 2u32],
        |d| DatumKey::new(format!("d:{d}")),
        |d| circle(f64::from(*d)),
        transition,
        &mut surface,
    );
    let animated = surface
        .events()
        .iter()
        .filter(|e| matches!(e, SurfaceEvent::Animate(..)))
        .count();
    let appended = surface
        .events()
        .iter()
        .filter(|e| matches!(e, SurfaceEvent::Append(_)))
        .count();
    assert_eq!(animated, 1);
    assert_eq!(appended, 1);
}

#[test]
fn clear_tags_ignores_datum_identity() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    join(&mut scene, ShapeTag::Dot, &[1, 2], &mut surface);
    join(&mut scene, ShapeTag::TopDot, &[1], &mut surface);

    let removed = scene.clear_tags(&[ShapeTag::Dot, ShapeTag::AverageLine], &mut surface);
    assert_eq!(removed, 2);
    assert_eq!(scene.shapes_tagged(ShapeTag::Dot).count(), 0);
    assert_eq!(scene.shapes_tagged(ShapeTag::TopDot).count(), 1);
}

#[test]
fn raise_and_lower_reorder_whole_tags() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    join(&mut scene, ShapeTag::Dot, &[1, 2], &mut surface);
    join(&mut scene, ShapeTag::AverageLine, &[3], &mut surface);

    scene.lower(ShapeTag::AverageLine, &mut surface);
    assert_eq!(scene.shapes()[0].tag, ShapeTag::AverageLine);

    scene.raise(ShapeTag::AverageLine, &mut surface);
    assert_eq!(scene.shapes()[2].tag, ShapeTag::AverageLine);
    // Relative order within untouched tags is preserved.
    assert_eq!(scene.shapes()[0].key.as_str(), "d:1");
    assert_eq!(scene.shapes()[1].key.as_str(), "d:2");
}

#[test]
fn raise_shape_moves_one_shape_to_the_top() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    join(&mut scene, ShapeTag::Dot, &[1, 2, 3], &mut surface);
    let id = scene.shapes()[0].id;

    scene.raise_shape(id, &mut surface);
    assert_eq!(scene.shapes().last().unwrap().id, id);
}

#[test]
fn reset_appearance_restores_join_time_defaults() {
    let mut scene = Scene::new();
    let mut surface = RecordingSurface::new();
    join(&mut scene, ShapeTag::Dot, &[1], &mut surface);
    let id = scene.shapes()[0].id;

    scene.set_attrs(id, ShapeAttrs::filled("green"), &mut surface);
    scene.set_kind(
        id,
        ShapeKind::Circle {
            center: Point::new(1.0, 0.0),
            radius: 8.0,
        },
        &mut surface,
    );
    assert_ne!(scene.shapes()[0].attrs, scene.shapes()[0].base_attrs);

    scene.reset_appearance(&mut surface);
    let shape = &scene.shapes()[0];
    assert_eq!(shape.attrs, shape.base_attrs);
    assert_eq!(shape.kind, shape.base_kind);
}
