pub mod borrowing_base;
pub mod calendar;
pub mod purchase_orders;
pub mod settlement;

use chrono::NaiveDate;
use lending_core::dates::{parse_client_date, parse_server_date};

/// Accept either `YYYY-MM-DD` or `MM/DD/YYYY` on the command line.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_server_date(s)
        .or_else(|_| parse_client_date(s))
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD or MM/DD/YYYY)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 6).unwrap();
        assert_eq!(parse_date_arg("2023-01-06").unwrap(), expected);
        assert_eq!(parse_date_arg("01/06/2023").unwrap(), expected);
        assert!(parse_date_arg("Jan 6").is_err());
    }
}
