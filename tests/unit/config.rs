use super::*;
use crate::foundation::core::{Canvas, Margins, Millis};

fn base() -> ChartConfig {
    ChartConfig {
        canvas: Canvas {
            width: 900,
            height: 500,
        },
        margin: Margins {
            top: 40.0,
            right: 30.0,
            bottom: 80.0,
            left: 70.0,
        },
        entities: vec!["A".to_string(), "B".to_string()],
        reference_name: "Abel-Co, Karen".to_string(),
        transition: Millis(1000),
        band_padding: 0.5,
        top_k: 10,
        salary_columns: SalaryColumns::default(),
        tuition_columns: TuitionColumns::default(),
    }
}

#[test]
fn valid_config_passes() {
    base().validate().unwrap();
}

#[test]
fn invalid_configs_are_rejected() {
    let mut c = base();
    c.entities.clear();
    assert!(c.validate().is_err());

    let mut c = base();
    c.reference_name = "  ".to_string();
    assert!(c.validate().is_err());

    let mut c = base();
    c.band_padding = 1.0;
    assert!(c.validate().is_err());

    let mut c = base();
    c.top_k = 0;
    assert!(c.validate().is_err());
}

#[test]
fn json_defaults_fill_in() {
    let config: ChartConfig = serde_json::from_value(serde_json::json!({
        "canvas": { "width": 900, "height": 500 },
        "margin": { "top": 40.0, "bottom": 80.0, "left": 70.0 },
        "entities": ["A"],
        "reference_name": "Abel-Co, Karen",
    }))
    .unwrap();
    assert_eq!(config.transition, Millis(1000));
    assert_eq!(config.band_padding, 0.5);
    assert_eq!(config.top_k, 10);
    assert_eq!(config.salary_columns.entity, "Agency");
    assert_eq!(config.tuition_columns.entity, "Institutions");
    config.validate().unwrap();
}

#[test]
fn entity_ids_preserve_order() {
    let ids = base().entity_ids();
    assert_eq!(ids[0].as_str(), "A");
    assert_eq!(ids[1].as_str(), "B");
}
