use super::*;

#[test]
fn money_groups_thousands() {
    assert_eq!(money0(0.0), "$0");
    assert_eq!(money0(999.0), "$999");
    assert_eq!(money0(1000.0), "$1,000");
    assert_eq!(money0(150000.0), "$150,000");
    assert_eq!(money0(1234567.4), "$1,234,567");
}

#[test]
fn money_degrades_on_bad_input() {
    assert_eq!(money0(f64::NAN), "$0");
    assert_eq!(money0(f64::INFINITY), "$0");
    assert_eq!(money0(-2500.0), "-$2,500");
}

#[test]
fn ratio_is_two_decimals() {
    assert_eq!(ratio2(100.0, 150.0), "0.67x");
    assert_eq!(ratio2(300.0, 300.0), "1.00x");
}

#[test]
fn ratio_sentinel_on_missing_denominator() {
    assert_eq!(ratio2(100.0, 0.0), NOT_AVAILABLE);
    assert_eq!(ratio2(100.0, f64::NAN), NOT_AVAILABLE);
}
