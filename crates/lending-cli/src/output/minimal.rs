use serde_json::Value;

use super::{cell_text, result_object};

/// Fields that answer the question a command was asked, in priority order.
const PRIORITY_KEYS: [&str; 9] = [
    "settlement_date",
    "deposit_date",
    "due_date",
    "available_amount",
    "amount",
    "is_business_day",
    "date",
    "converted",
    "business_days",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let Some(map) = result_object(value) else {
        println!("{}", cell_text(value));
        return;
    };

    if let Some(val) = PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
    {
        println!("{}", cell_text(val));
        return;
    }

    match map.iter().next() {
        Some((key, val)) => println!("{key}: {}", cell_text(val)),
        None => println!("null"),
    }
}
