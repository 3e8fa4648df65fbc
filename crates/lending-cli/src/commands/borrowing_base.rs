use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use lending_core::borrowing_base::{self, BorrowingBaseApplication, BorrowingBaseInput};
use lending_core::contract::Contract;

use crate::input;

/// Arguments for borrowing base calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BorrowingBaseArgs {
    /// Path to the contract JSON document
    #[arg(long)]
    pub contract: Option<String>,

    /// Monthly accounts receivable balance
    #[arg(long, alias = "ar")]
    pub monthly_accounts_receivable: Option<Decimal>,

    /// Monthly inventory balance
    #[arg(long)]
    pub monthly_inventory: Option<Decimal>,

    /// Monthly cash balance
    #[arg(long)]
    pub monthly_cash: Option<Decimal>,

    /// Cash held in a deposit account control agreement (DACA) account
    #[arg(long)]
    pub amount_cash_in_daca: Option<Decimal>,

    /// Manually entered amount added to the base
    #[arg(long)]
    pub amount_custom: Option<Decimal>,

    /// Path to JSON input file with application and contract
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_borrowing_base(args: BorrowingBaseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bb_input: BorrowingBaseInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let path = args
            .contract
            .as_deref()
            .ok_or("--contract <file.json> is required (or provide --input)")?;
        let contract: Contract = input::file::read_json(path)?;
        BorrowingBaseInput {
            application: BorrowingBaseApplication {
                monthly_accounts_receivable: args.monthly_accounts_receivable,
                monthly_inventory: args.monthly_inventory,
                monthly_cash: args.monthly_cash,
                amount_cash_in_daca: args.amount_cash_in_daca,
                amount_custom: args.amount_custom,
            },
            contract,
        }
    };
    let result = borrowing_base::analyze_borrowing_base(&bb_input)?;
    Ok(serde_json::to_value(result)?)
}
