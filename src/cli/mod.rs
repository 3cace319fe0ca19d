//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod ledger;
pub mod report;

pub use ledger::{handle_deposit_command, handle_list_command, handle_pay_command, EntryArgs, ListArgs};
pub use report::{handle_report_command, PeriodArgs, ReportCommands};
