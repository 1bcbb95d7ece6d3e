use super::*;

#[test]
fn step_names_are_stable() {
    let names: Vec<&str> = NarrativeStep::ALL.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "average-lines",
            "highlight-reference",
            "all-entries",
            "rescale-full",
            "filter-top-k",
            "clear",
        ]
    );
}

#[test]
fn cleared_and_preserved_tags_never_overlap() {
    for step in NarrativeStep::ALL {
        for tag in step.preserved_tags() {
            assert!(
                !step.cleared_tags().contains(tag),
                "{} both clears and preserves {:?}",
                step.name(),
                tag
            );
        }
    }
}

#[test]
fn clear_wipes_every_tag() {
    assert_eq!(NarrativeStep::Clear.cleared_tags(), ShapeTag::ALL.as_slice());
}

#[test]
fn filter_top_k_drops_the_average_lines() {
    assert!(
        NarrativeStep::FilterTopK
            .cleared_tags()
            .contains(&ShapeTag::AverageLine)
    );
    assert!(NarrativeStep::FilterTopK.preserved_tags().is_empty());
}

#[test]
fn middle_steps_preserve_the_average_lines() {
    for step in [
        NarrativeStep::HighlightReference,
        NarrativeStep::AllEntries,
        NarrativeStep::RescaleFull,
    ] {
        assert_eq!(step.preserved_tags(), &[ShapeTag::AverageLine]);
    }
}
