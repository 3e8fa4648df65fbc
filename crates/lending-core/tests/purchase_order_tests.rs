use chrono::NaiveDate;
use lending_core::dates::{format_server_date, parse_server_date};
use lending_core::purchase_orders::{
    analyze_purchase_order, compute_due_date, is_due_date_valid, CutoffPolicy,
    FinancingCutoffPolicy, PurchaseOrderInput,
};
use pretty_assertions::assert_eq;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Cutoff supplied by an external policy service.
struct QuarterStart;

impl FinancingCutoffPolicy for QuarterStart {
    fn cutoff_date(&self) -> NaiveDate {
        d(2023, 4, 1)
    }
}

#[test]
fn test_due_date_edge_cases() {
    let order = parse_server_date("2023-01-01").ok();
    assert_eq!(compute_due_date(None, Some(30)), None);
    assert_eq!(compute_due_date(order, None), None);
    assert_eq!(compute_due_date(order, Some(0)).map(format_server_date).as_deref(), Some("2023-01-01"));
    assert_eq!(compute_due_date(order, Some(30)).map(format_server_date).as_deref(), Some("2023-01-31"));
}

#[test]
fn test_due_date_ignores_weekends_and_holidays() {
    // Net 3 from Friday Dec 22, 2023 lands on Christmas Day.
    assert_eq!(compute_due_date(Some(d(2023, 12, 22)), Some(3)), Some(d(2023, 12, 25)));
}

#[test]
fn test_custom_policy_is_honoured() {
    let valid = is_due_date_valid(Some(d(2023, 3, 1)), Some(31), &QuarterStart);
    assert!(valid.is_due_date_valid);
    let stale = is_due_date_valid(Some(d(2023, 3, 1)), Some(30), &QuarterStart);
    assert!(!stale.is_due_date_valid);
    assert_eq!(stale.due_date, Some(d(2023, 3, 31)));
}

#[test]
fn test_purchase_order_input_from_json() {
    let input: PurchaseOrderInput = serde_json::from_str(
        r#"{
            "order_date": "2023-05-10",
            "net_terms": 45,
            "cutoff": { "kind": "fixed", "cutoff_date": "2023-06-01" }
        }"#,
    )
    .unwrap();
    let out = analyze_purchase_order(&input.purchase_order, &input.cutoff).unwrap();
    assert_eq!(out.result.due_date, Some(d(2023, 6, 24)));
    assert!(out.result.is_due_date_valid);
    assert_eq!(out.result.days_until_due, None);
}

#[test]
fn test_missing_net_terms_is_invalid_with_warning() {
    let input: PurchaseOrderInput = serde_json::from_str(
        r#"{ "order_date": "2023-05-10", "cutoff": { "kind": "trailing_days", "as_of": "2023-05-10" } }"#,
    )
    .unwrap();
    let out = analyze_purchase_order(&input.purchase_order, &input.cutoff).unwrap();
    assert_eq!(out.result.due_date, None);
    assert!(!out.result.is_due_date_valid);
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(input.cutoff, CutoffPolicy::trailing(d(2023, 5, 10)));
}
