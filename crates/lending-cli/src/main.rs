mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use lending_core::calendar::{BankHolidayCalendar, CalendarConfig};

use commands::borrowing_base::BorrowingBaseArgs;
use commands::calendar::{
    AddBusinessDaysArgs, AddCalendarDaysArgs, ConvertDateArgs, HolidaysArgs, IsBusinessDayArgs,
};
use commands::purchase_orders::DueDateArgs;
use commands::settlement::{DepositDateArgs, SettlementDateArgs, SettlementTimelineArgs};

/// Lending date and amount calculations
#[derive(Parser)]
#[command(
    name = "lendcalc",
    version,
    about = "Lending date and amount calculations",
    long_about = "A CLI for the date and amount rules behind lending products: \
                  bank business days, payment settlement dates, purchase order \
                  due dates and borrowing base availability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Bank calendar configuration file (YAML or JSON)
    #[arg(long, global = true)]
    calendar: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a date is a bank business day
    IsBusinessDay(IsBusinessDayArgs),
    /// Add business days to a date
    AddBusinessDays(AddBusinessDaysArgs),
    /// Add calendar days to a date
    AddCalendarDays(AddCalendarDaysArgs),
    /// List bank holidays observed in a year
    Holidays(HolidaysArgs),
    /// Convert between MM/DD/YYYY and YYYY-MM-DD
    ConvertDate(ConvertDateArgs),
    /// Expected settlement date of a payment
    SettlementDate(SettlementDateArgs),
    /// Deposit date of a reverse-draft ACH payment
    DepositDate(DepositDateArgs),
    /// Business days to settlement for every payment method
    SettlementTimeline(SettlementTimelineArgs),
    /// Purchase order due date and financing cutoff check
    DueDate(DueDateArgs),
    /// Borrowing base from a borrower's reported figures
    BorrowingBase(BorrowingBaseArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lending_core=warn,lendcalc=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_calendar(path: Option<&str>) -> Result<BankHolidayCalendar, Box<dyn std::error::Error>> {
    let config: CalendarConfig = match path {
        Some(p) => input::file::read_config(p)?,
        None => CalendarConfig::default(),
    };
    tracing::debug!(?config, "bank calendar configured");
    Ok(BankHolidayCalendar::with_config(config))
}

fn run(cli: Cli) -> Result<Option<serde_json::Value>, Box<dyn std::error::Error>> {
    let calendar = load_calendar(cli.calendar.as_deref())?;

    let value = match cli.command {
        Commands::IsBusinessDay(args) => commands::calendar::run_is_business_day(args, &calendar)?,
        Commands::AddBusinessDays(args) => commands::calendar::run_add_business_days(args, &calendar)?,
        Commands::AddCalendarDays(args) => commands::calendar::run_add_calendar_days(args)?,
        Commands::Holidays(args) => commands::calendar::run_holidays(args, &calendar)?,
        Commands::ConvertDate(args) => commands::calendar::run_convert_date(args)?,
        Commands::SettlementDate(args) => commands::settlement::run_settlement_date(args, &calendar)?,
        Commands::DepositDate(args) => commands::settlement::run_deposit_date(args, &calendar)?,
        Commands::SettlementTimeline(args) => commands::settlement::run_settlement_timeline(args)?,
        Commands::DueDate(args) => commands::purchase_orders::run_due_date(args)?,
        Commands::BorrowingBase(args) => commands::borrowing_base::run_borrowing_base(args)?,
        Commands::Version => {
            println!("lendcalc {}", env!("CARGO_PKG_VERSION"));
            return Ok(None);
        }
    };
    Ok(Some(value))
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.output.clone();

    match run(cli) {
        Ok(Some(value)) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
