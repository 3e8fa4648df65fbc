use serde_json::Value;
use std::io;

use super::{cell_text, headers, result_object, split_fields};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Scalar fields become `field,value` rows; each list of objects follows
/// as its own header + rows block, separated by a blank record.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    match value {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => match result_object(value) {
            Some(map) => {
                let (scalars, tables) = split_fields(map);
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in scalars {
                    let _ = wtr.write_record([key.to_string(), cell_text(val)]);
                }
                for (_, rows) in tables {
                    let _ = wtr.write_record([""]);
                    write_rows(&mut wtr, rows);
                }
            }
            None => {
                let _ = wtr.write_record([cell_text(value)]);
            }
        },
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut StdoutWriter<'_>, rows: &[Value]) {
    let columns = headers(rows);
    if columns.is_empty() {
        for row in rows {
            let _ = wtr.write_record([cell_text(row)]);
        }
        return;
    }
    let _ = wtr.write_record(&columns);
    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| row.get(c).map(cell_text).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
