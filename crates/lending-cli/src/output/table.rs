use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell_text, headers, result_object, split_fields};

/// Format output as tables: scalar fields first, then one table per list
/// (e.g. borrowing base line items, holidays), then warnings.
pub fn print_table(value: &Value) {
    if let Value::Array(rows) = value {
        print_rows(rows);
        return;
    }
    let Some(map) = result_object(value) else {
        println!("{value}");
        return;
    };

    let (scalars, tables) = split_fields(map);
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.to_string(), cell_text(val)]);
        }
        println!("{}", Table::from(builder));
    }
    for (name, rows) in tables {
        println!("\n{name}:");
        print_rows(rows);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }
    if !rows.iter().all(Value::is_object) {
        for row in rows {
            println!("{}", cell_text(row));
        }
        return;
    }

    let columns = headers(rows);
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|c| row.get(c).map(cell_text).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
