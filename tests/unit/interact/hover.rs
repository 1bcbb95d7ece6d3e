use super::*;
use crate::{
    data::aggregate::group_stats,
    data::normalize::{EntityId, SalaryRecord},
    render::surface::{RecordingSurface, SurfaceEvent},
};

fn rec(entity: &str, name: &str, salary: f64) -> Record {
    Record::Salary(SalaryRecord {
        entity: EntityId::new(entity),
        name: name.to_string(),
        salary,
        position: None,
    })
}

fn fixture() -> (Vec<Record>, Vec<GroupStat>) {
    let records = vec![
        rec("A", "a1", 100.0),
        rec("A", "a2", 200.0),
        rec("B", "b1", 300.0),
    ];
    let entities = vec![EntityId::new("A"), EntityId::new("B")];
    let stats = group_stats(&records, &entities);
    (records, stats)
}

#[test]
fn ratios_are_formatted_to_two_decimals() {
    let (records, stats) = fixture();
    let tip = tooltip_for(&records, &stats, Some(2), 0);

    assert_eq!(tip.name, "a1");
    assert_eq!(tip.metric, "$100");
    // 100 / 150 mean, 100 / 200 max, 100 / 300 reference.
    assert_eq!(tip.vs_group_mean, "0.67x");
    assert_eq!(tip.vs_group_max, "0.50x");
    assert_eq!(tip.vs_reference, "0.33x");
}

#[test]
fn missing_reference_renders_sentinel_not_error() {
    let (records, stats) = fixture();
    let tip = tooltip_for(&records, &stats, None, 0);
    assert_eq!(tip.vs_reference, NOT_AVAILABLE);
    // The other ratios still compute.
    assert_eq!(tip.vs_group_mean, "0.67x");
}

#[test]
fn absent_group_stat_renders_sentinel() {
    let (records, _) = fixture();
    // Stats computed over a disjoint entity list: no stat for the hovered
    // record's group.
    let stats = group_stats(&records, &[EntityId::new("C")]);
    let tip = tooltip_for(&records, &stats, None, 0);
    assert_eq!(tip.vs_group_mean, NOT_AVAILABLE);
    assert_eq!(tip.vs_group_max, NOT_AVAILABLE);
}

#[test]
fn hover_enter_and_exit_drive_the_tooltip_callbacks() {
    let (records, stats) = fixture();
    let tip = tooltip_for(&records, &stats, Some(2), 1);
    let mut surface = RecordingSurface::new();

    hover_enter(&tip, Point::new(400.0, 120.0), &mut surface);
    hover_exit(&mut surface);

    let [SurfaceEvent::ShowTooltip(text, at), SurfaceEvent::HideTooltip] = surface.events() else {
        panic!("expected show then hide");
    };
    assert!(text.contains("a2"));
    assert!(text.contains("$200"));
    assert_eq!(*at, Point::new(400.0, 120.0));
}
