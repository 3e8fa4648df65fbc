use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use lending_core::purchase_orders::{self, CutoffPolicy, PurchaseOrder, PurchaseOrderInput};

use super::parse_date_arg;
use crate::input;

/// Arguments for purchase order due date calculation
#[derive(Args)]
pub struct DueDateArgs {
    /// Order date
    #[arg(long, value_parser = parse_date_arg)]
    pub order_date: Option<NaiveDate>,

    /// Net payment terms in calendar days
    #[arg(long)]
    pub net_terms: Option<u32>,

    /// Fixed financing cutoff date (overrides --as-of/--cutoff-days)
    #[arg(long, value_parser = parse_date_arg)]
    pub cutoff_date: Option<NaiveDate>,

    /// Reference date for the trailing cutoff (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub as_of: Option<NaiveDate>,

    /// Length of the trailing cutoff window in calendar days
    #[arg(long, default_value_t = purchase_orders::DEFAULT_CUTOFF_DAYS)]
    pub cutoff_days: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_due_date(args: DueDateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let po_input: PurchaseOrderInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let cutoff = match args.cutoff_date {
            Some(cutoff_date) => CutoffPolicy::Fixed { cutoff_date },
            None => CutoffPolicy::TrailingDays {
                as_of: args
                    .as_of
                    .unwrap_or_else(|| chrono::Local::now().date_naive()),
                days: args.cutoff_days,
            },
        };
        PurchaseOrderInput {
            purchase_order: PurchaseOrder {
                order_date: args.order_date,
                net_terms: args.net_terms,
            },
            cutoff,
        }
    };
    let result = purchase_orders::analyze_purchase_order(&po_input.purchase_order, &po_input.cutoff)?;
    Ok(serde_json::to_value(result)?)
}
