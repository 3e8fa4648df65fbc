use lending_core::borrowing_base::{
    analyze_borrowing_base, calculate_borrowing_base, BorrowingBaseApplication,
    BorrowingBaseCategory, BorrowingBaseInput,
};
use lending_core::contract::ContractTerms;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn revolver_terms() -> ContractTerms {
    ContractTerms::from_json(
        r#"{
            "product_type": "line_of_credit",
            "product_config": { "v1": { "fields": [
                { "internal_name": "borrowing_base_accounts_receivable_percentage", "value": 0.8 },
                { "internal_name": "borrowing_base_inventory_percentage", "value": 0.5 },
                { "internal_name": "borrowing_base_cash_percentage", "value": 0 },
                { "internal_name": "maximum_amount", "value": "1000000" }
            ] } }
        }"#,
    )
    .unwrap()
}

#[test]
fn test_revolving_line_from_raw_contract() {
    let app = BorrowingBaseApplication {
        monthly_accounts_receivable: Some(dec!(1000)),
        monthly_inventory: Some(dec!(2000)),
        ..BorrowingBaseApplication::default()
    };
    let r = calculate_borrowing_base(&app, &revolver_terms());
    assert_eq!(r.amount, dec!(1800));
    assert!(r.is_ar_visible);
    assert!(r.is_inventory_visible);
    assert!(!r.is_cash_visible);
    assert!(!r.is_cash_in_daca_visible);
}

#[test]
fn test_all_zero_contract_yields_custom_amount() {
    let terms = ContractTerms::from_json(r#"{ "product_type": "line_of_credit" }"#).unwrap();
    let app = BorrowingBaseApplication {
        monthly_accounts_receivable: Some(dec!(50_000)),
        amount_custom: Some(dec!(7_500)),
        ..BorrowingBaseApplication::default()
    };
    let r = calculate_borrowing_base(&app, &terms);
    assert_eq!(r.amount, dec!(7_500));
    assert!(!r.is_ar_visible && !r.is_inventory_visible && !r.is_cash_visible && !r.is_cash_in_daca_visible);
}

#[test]
fn test_empty_application_is_zero() {
    let r = calculate_borrowing_base(&BorrowingBaseApplication::default(), &revolver_terms());
    assert_eq!(r.amount, Decimal::ZERO);
    assert!(r.is_ar_visible);
}

#[test]
fn test_negative_custom_amount_reduces_base() {
    let app = BorrowingBaseApplication {
        monthly_accounts_receivable: Some(dec!(10_000)),
        amount_custom: Some(dec!(-1_000)),
        ..BorrowingBaseApplication::default()
    };
    let r = calculate_borrowing_base(&app, &revolver_terms());
    assert_eq!(r.amount, dec!(7_000));
}

#[test]
fn test_analyze_reports_line_items_in_order() {
    let input: BorrowingBaseInput = serde_json::from_str(
        r#"{
            "application": { "monthly_accounts_receivable": 1000, "monthly_inventory": 2000, "amount_custom": "50" },
            "contract": {
                "product_type": "line_of_credit",
                "product_config": { "v1": { "fields": [
                    { "internal_name": "borrowing_base_accounts_receivable_percentage", "value": 0.8 },
                    { "internal_name": "borrowing_base_inventory_percentage", "value": 0.5 }
                ] } }
            }
        }"#,
    )
    .unwrap();
    let out = analyze_borrowing_base(&input).unwrap();
    let categories: Vec<BorrowingBaseCategory> =
        out.result.line_items.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            BorrowingBaseCategory::AccountsReceivable,
            BorrowingBaseCategory::Inventory,
            BorrowingBaseCategory::Cash,
            BorrowingBaseCategory::CashInDaca,
            BorrowingBaseCategory::Custom,
        ]
    );
    assert_eq!(out.result.result.amount, dec!(1850));
    assert_eq!(out.result.available_amount, dec!(1850));
    assert!(out.warnings.is_empty());

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["is_ar_visible"], serde_json::json!(true));
}
