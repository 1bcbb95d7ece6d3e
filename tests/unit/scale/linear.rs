use super::*;

#[test]
fn maps_linearly_into_inverted_range() {
    let scale = LinearScale::new((0.0, 100.0), (500.0, 100.0)).unwrap();
    assert_eq!(scale.map(0.0), 500.0);
    assert_eq!(scale.map(100.0), 100.0);
    assert_eq!(scale.map(50.0), 300.0);
}

#[test]
fn out_of_domain_values_extrapolate() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 100.0)).unwrap();
    assert_eq!(scale.map(200.0), 200.0);
    assert_eq!(scale.map(-50.0), -50.0);
}

#[test]
fn set_domain_refits() {
    let mut scale = LinearScale::new((0.0, 100.0), (0.0, 100.0)).unwrap();
    scale.set_domain((0.0, 200.0)).unwrap();
    assert_eq!(scale.map(200.0), 100.0);
    assert!(scale.set_domain((5.0, 5.0)).is_err());
    assert!(scale.set_domain((0.0, f64::NAN)).is_err());
}

#[test]
fn ticks_are_round_and_cover_the_domain() {
    let scale = LinearScale::new((0.0, 100.0), (0.0, 100.0)).unwrap();
    let ticks = scale.ticks(8);
    assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    let scale = LinearScale::new((70_000.0, 80_000.0), (0.0, 100.0)).unwrap();
    let ticks = scale.ticks(8);
    assert_eq!(ticks.first().copied(), Some(70_000.0));
    assert_eq!(ticks.last().copied(), Some(80_000.0));
    assert!(ticks.windows(2).all(|w| w[1] > w[0]));
}
