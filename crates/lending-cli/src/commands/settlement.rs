use chrono::NaiveDate;
use clap::Args;
use serde_json::{json, Value};

use lending_core::calendar::BankHolidayCalendar;
use lending_core::contract::{Contract, ContractTerms};
use lending_core::dates::format_client_date;
use lending_core::settlement::{self, SettlementInput};
use lending_core::PaymentMethod;

use super::parse_date_arg;
use crate::input;

/// Arguments for settlement date calculation
#[derive(Args)]
pub struct SettlementDateArgs {
    /// Payment method (ach, reverse_draft_ach, wire, check, cash)
    #[arg(long)]
    pub method: Option<PaymentMethod>,

    /// Payment date
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Path to a contract JSON document (defaults apply without one)
    #[arg(long)]
    pub contract: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the reverse-draft ACH deposit date
#[derive(Args)]
pub struct DepositDateArgs {
    /// Payment date
    #[arg(long, value_parser = parse_date_arg)]
    pub date: NaiveDate,
}

/// Arguments for listing a contract's settlement timeline
#[derive(Args)]
pub struct SettlementTimelineArgs {
    /// Path to a contract JSON document (defaults apply without one)
    #[arg(long)]
    pub contract: Option<String>,
}

pub fn run_settlement_date(
    args: SettlementDateArgs,
    calendar: &BankHolidayCalendar,
) -> Result<Value, Box<dyn std::error::Error>> {
    let settlement_input: SettlementInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let contract: Option<Contract> = args
            .contract
            .as_deref()
            .map(input::file::read_json)
            .transpose()?;
        SettlementInput {
            payment_method: Some(args.method.ok_or("--method is required (or provide --input)")?),
            payment_date: Some(args.date.ok_or("--date is required (or provide --input)")?),
            contract,
        }
    };
    let result = settlement::calculate_settlement(&settlement_input, calendar)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_deposit_date(
    args: DepositDateArgs,
    calendar: &BankHolidayCalendar,
) -> Result<Value, Box<dyn std::error::Error>> {
    let deposit = settlement::compute_deposit_date_for_reverse_draft_ach(calendar, Some(args.date));
    Ok(json!({
        "payment_method": PaymentMethod::ReverseDraftAch,
        "payment_date": args.date,
        "deposit_date": deposit,
        "deposit_date_display": deposit.map(format_client_date),
    }))
}

pub fn run_settlement_timeline(args: SettlementTimelineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = match args.contract {
        Some(ref path) => Some(ContractTerms::from_json(&input::file::read_text(path)?)?),
        None => None,
    };
    let timeline = settlement::settlement_timeline_config(terms.as_ref());
    Ok(serde_json::to_value(settlement::effective_timeline(timeline.as_ref()))?)
}
