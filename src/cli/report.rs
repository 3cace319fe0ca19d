//! CLI commands for reports
//!
//! Period reports, vendor lookup and custom search over the ledger.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::LedgerResult;
use crate::models::Transaction;
use crate::reports::{local_today, parse_date, CustomSearch, ReportPeriod};
use crate::services::{LedgerService, VendorIndex};
use crate::storage::Storage;

/// Reference date for period reports
#[derive(Args, Debug)]
pub struct PeriodArgs {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    pub today: Option<String>,
}

impl PeriodArgs {
    pub fn today(&self) -> LedgerResult<NaiveDate> {
        match &self.today {
            Some(raw) => parse_date("today", raw),
            None => Ok(local_today()),
        }
    }
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Records from the first of this month through today
    #[command(alias = "mtd")]
    MonthToDate(PeriodArgs),

    /// Records from the whole previous month
    PreviousMonth(PeriodArgs),

    /// Records from January 1 through today
    #[command(alias = "ytd")]
    YearToDate(PeriodArgs),

    /// Records from the whole previous year
    PreviousYear(PeriodArgs),

    /// All records for one vendor
    Vendor {
        /// Vendor name (case-insensitive)
        name: String,
    },

    /// Narrow the ledger by any combination of fields
    Search {
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Description contains (case-insensitive)
        #[arg(short, long)]
        description: Option<String>,
        /// Vendor contains (case-insensitive)
        #[arg(short, long)]
        vendor: Option<String>,
        /// Signed amount, matched within one cent
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, settings: &Settings, cmd: ReportCommands) -> LedgerResult<()> {
    let records = LedgerService::new(storage).load();

    let selected = match cmd {
        ReportCommands::MonthToDate(args) => period_report(ReportPeriod::MonthToDate, &records, &args)?,
        ReportCommands::PreviousMonth(args) => period_report(ReportPeriod::PreviousMonth, &records, &args)?,
        ReportCommands::YearToDate(args) => period_report(ReportPeriod::YearToDate, &records, &args)?,
        ReportCommands::PreviousYear(args) => period_report(ReportPeriod::PreviousYear, &records, &args)?,
        ReportCommands::Vendor { name } => VendorIndex::build(&records).lookup(&name)?.to_vec(),
        ReportCommands::Search {
            start,
            end,
            description,
            vendor,
            amount,
        } => {
            let search = CustomSearch {
                start_date: start.unwrap_or_default(),
                end_date: end.unwrap_or_default(),
                description: description.unwrap_or_default(),
                vendor: vendor.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
            };
            search.run(&records)?
        }
    };

    print!("{}", format_transaction_table(&selected, settings));
    Ok(())
}

fn period_report(
    period: ReportPeriod,
    records: &[Transaction],
    args: &PeriodArgs,
) -> LedgerResult<Vec<Transaction>> {
    let today = args.today()?;
    println!("{} ({})", period, period.range(today));
    Ok(period.filter(records, today))
}
