pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The object holding the answer: the `result` of a computation envelope,
/// or the value itself for plain outputs.
pub(crate) fn result_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => Some(result),
            _ => Some(map),
        },
        _ => None,
    }
}

/// Render a scalar for a single cell. Nested values fall back to compact JSON.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Split an object into scalar fields and arrays of objects (rendered as
/// their own tables).
pub(crate) fn split_fields(map: &Map<String, Value>) -> (Vec<(&str, &Value)>, Vec<(&str, &[Value])>) {
    let mut scalars = Vec::new();
    let mut tables = Vec::new();
    for (key, val) in map {
        match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                tables.push((key.as_str(), rows.as_slice()))
            }
            _ => scalars.push((key.as_str(), val)),
        }
    }
    (scalars, tables)
}

/// Column headers for a list of objects, in first-seen order.
pub(crate) fn headers(rows: &[Value]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !out.iter().any(|h| h == key) {
                    out.push(key.clone());
                }
            }
        }
    }
    out
}
