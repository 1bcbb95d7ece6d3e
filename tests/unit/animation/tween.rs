use super::*;

#[test]
fn samples_clamp_at_both_ends() {
    let tween = Tween::new(0.0, 10.0, Millis(1000), Ease::Linear);
    assert_eq!(tween.sample(Millis(0)), 0.0);
    assert_eq!(tween.sample(Millis(500)), 5.0);
    assert_eq!(tween.sample(Millis(1000)), 10.0);
    assert_eq!(tween.sample(Millis(9999)), 10.0);
    assert!(!tween.done(Millis(999)));
    assert!(tween.done(Millis(1000)));
}

#[test]
fn point_lerp_moves_both_axes() {
    let tween = Tween::new(
        Point::new(0.0, 100.0),
        Point::new(10.0, 0.0),
        Millis(100),
        Ease::Linear,
    );
    let mid = tween.sample(Millis(50));
    assert_eq!(mid, Point::new(5.0, 50.0));
}

#[test]
fn domain_pairs_lerp_componentwise() {
    let tween = Tween::new((0.0, 100.0), (0.0, 200.0), Millis(100), Ease::Linear);
    assert_eq!(tween.sample(Millis(50)), (0.0, 150.0));
}

#[test]
fn attr_lerp_interpolates_numeric_and_switches_discrete() {
    let from = ShapeAttrs {
        fill: Some("red".to_string()),
        opacity: 0.0,
        ..ShapeAttrs::default()
    };
    let to = ShapeAttrs {
        fill: Some("blue".to_string()),
        opacity: 1.0,
        marker_end: true,
        ..ShapeAttrs::default()
    };
    let mid = ShapeAttrs::lerp(&from, &to, 0.5);
    assert_eq!(mid.opacity, 0.5);
    // Discrete attributes take the target value immediately.
    assert_eq!(mid.fill.as_deref(), Some("blue"));
    assert!(mid.marker_end);
}
