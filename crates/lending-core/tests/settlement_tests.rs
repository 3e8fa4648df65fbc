use chrono::NaiveDate;
use lending_core::calendar::{BankHolidayCalendar, BusinessCalendar};
use lending_core::contract::{ContractTerms, SettlementTimeline};
use lending_core::dates::add_business_days;
use lending_core::settlement::{self, TimelineSource};
use lending_core::{LendingError, PaymentMethod};
use lending_core::borrowing_base::{analyze_borrowing_base, BorrowingBaseInput};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn contract_json(timeline: &str) -> String {
    serde_json::json!({
        "product_type": "line_of_credit",
        "product_config": { "v1": { "fields": [
            { "internal_name": "repayment_type_settlement_timeline", "value": timeline }
        ] } }
    })
    .to_string()
}

// ===========================================================================
// Timeline resolution
// ===========================================================================

#[test]
fn test_contract_timeline_flows_into_settlement() {
    let cal = BankHolidayCalendar::new();
    let terms = ContractTerms::from_json(&contract_json(r#"{"ach": 1, "check": 4}"#)).unwrap();
    let timeline = settlement::settlement_timeline_config(Some(&terms));

    // Thursday Nov 23, 2023 is Thanksgiving.
    assert_eq!(
        settlement::compute_settlement_date(
            &cal,
            Some(PaymentMethod::Ach),
            Some(d(2023, 11, 22)),
            timeline.as_ref()
        ),
        Some(d(2023, 11, 24))
    );
    assert_eq!(
        settlement::compute_settlement_date(
            &cal,
            Some(PaymentMethod::Check),
            Some(d(2023, 11, 22)),
            timeline.as_ref()
        ),
        Some(d(2023, 11, 29))
    );
}

#[test]
fn test_empty_contract_timeline_matches_defaults() {
    let cal = BankHolidayCalendar::new();
    let terms = ContractTerms::from_json(&contract_json("{}")).unwrap();
    let timeline = settlement::settlement_timeline_config(Some(&terms));

    for method in PaymentMethod::ALL {
        let with_contract = settlement::compute_settlement_date(
            &cal,
            Some(method),
            Some(d(2024, 6, 18)),
            timeline.as_ref(),
        );
        let without = settlement::compute_settlement_date(&cal, Some(method), Some(d(2024, 6, 18)), None);
        assert_eq!(with_contract, without, "{method}");
    }
}

#[test]
fn test_malformed_timeline_propagates_config_error() {
    let err = ContractTerms::from_json(&contract_json("{\"ach\": \"two\"}")).unwrap_err();
    assert!(matches!(err, LendingError::ConfigError { .. }));
}

#[test]
fn test_timeline_with_unmodelled_method_keeps_contract_usable() {
    let raw = serde_json::json!({
        "product_type": "line_of_credit",
        "product_config": { "v1": { "fields": [
            { "internal_name": "borrowing_base_accounts_receivable_percentage", "value": 0.8 },
            { "internal_name": "repayment_type_settlement_timeline",
              "value": "{\"ach\": 1, \"electronic_transfer\": 3}" }
        ] } }
    });
    let terms = ContractTerms::from_json(&raw.to_string()).unwrap();
    assert_eq!(
        terms.settlement_timeline,
        [(PaymentMethod::Ach, 1)].into_iter().collect::<SettlementTimeline>()
    );

    let cal = BankHolidayCalendar::new();
    let timeline = settlement::settlement_timeline_config(Some(&terms));
    // Friday Jan 5, 2024 + 1 -> Monday Jan 8
    assert_eq!(
        settlement::compute_settlement_date(
            &cal,
            Some(PaymentMethod::Ach),
            Some(d(2024, 1, 5)),
            timeline.as_ref()
        ),
        Some(d(2024, 1, 8))
    );

    let input: BorrowingBaseInput = serde_json::from_value(serde_json::json!({
        "application": { "monthly_accounts_receivable": 1000 },
        "contract": raw,
    }))
    .unwrap();
    let out = analyze_borrowing_base(&input).unwrap();
    assert_eq!(out.result.result.amount, dec!(800));
}

#[test]
fn test_effective_timeline_marks_contract_entries() {
    let timeline: SettlementTimeline = [(PaymentMethod::Wire, 1)].into_iter().collect();
    let entries = settlement::effective_timeline(Some(&timeline));
    let wire = entries
        .iter()
        .find(|e| e.payment_method == PaymentMethod::Wire)
        .unwrap();
    assert_eq!(wire.business_days, 1);
    assert_eq!(wire.source, TimelineSource::Contract);
    assert!(entries
        .iter()
        .filter(|e| e.payment_method != PaymentMethod::Wire)
        .all(|e| e.source == TimelineSource::Fallback));
}

// ===========================================================================
// Settlement and deposit dates
// ===========================================================================

#[test]
fn test_wire_from_monday_default_timeline() {
    let cal = BankHolidayCalendar::new();
    let payment = d(2023, 1, 2);
    let expected = add_business_days(&cal, payment, 2);
    assert_eq!(
        settlement::compute_settlement_date(&cal, Some(PaymentMethod::Wire), Some(payment), None),
        Some(expected)
    );
    assert_eq!(expected, d(2023, 1, 4));
}

#[test]
fn test_reverse_draft_deposit_from_friday() {
    let cal = BankHolidayCalendar::new();
    assert_eq!(
        settlement::compute_deposit_date_for_reverse_draft_ach(&cal, Some(d(2023, 1, 6))),
        Some(d(2023, 1, 9))
    );
    // Friday before MLK Day -> Tuesday
    assert_eq!(
        settlement::compute_deposit_date_for_reverse_draft_ach(&cal, Some(d(2023, 1, 13))),
        Some(d(2023, 1, 17))
    );
}

#[test]
fn test_settlement_dates_are_business_days() {
    let cal = BankHolidayCalendar::new();
    let mut date = d(2024, 11, 1);
    while date <= d(2025, 1, 31) {
        for method in PaymentMethod::ALL {
            let settled =
                settlement::compute_settlement_date(&cal, Some(method), Some(date), None).unwrap();
            assert!(cal.is_business_day(settled), "{method} paid {date} settled {settled}");
        }
        date = date.succ_opt().unwrap();
    }
}
