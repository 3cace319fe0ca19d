//! Ledger CLI commands
//!
//! One-shot deposit, payment and listing commands.

use clap::Args;
use std::io;

use crate::config::Settings;
use crate::display::{console, format_amount_owed, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::services::{ledger_view, LedgerService, LedgerView};
use crate::storage::Storage;

/// Arguments shared by `deposit` and `pay`
#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Vendor name
    pub vendor: String,
    /// Description; for payments, matched against outstanding obligations
    pub description: String,
    /// Amount (e.g. 12.50)
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
}

/// Listing filters
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show deposits only
    #[arg(long, conflicts_with = "payments")]
    pub deposits: bool,
    /// Show outstanding payments only
    #[arg(long)]
    pub payments: bool,
}

impl ListArgs {
    pub fn view(&self) -> LedgerView {
        if self.deposits {
            LedgerView::Deposits
        } else if self.payments {
            LedgerView::Payments
        } else {
            LedgerView::All
        }
    }
}

/// Record a deposit
pub fn handle_deposit_command(storage: &Storage, settings: &Settings, args: EntryArgs) -> LedgerResult<()> {
    let amount = parse_amount(&args.amount)?;
    let txn = LedgerService::new(storage).deposit(&args.vendor, &args.description, amount)?;

    console::success(
        &mut io::stdout(),
        &format!(
            "Deposit of {} from {} recorded",
            txn.amount.format_with_symbol(&settings.currency_symbol),
            txn.vendor
        ),
    )?;
    Ok(())
}

/// Pay towards an outstanding obligation
pub fn handle_pay_command(storage: &Storage, settings: &Settings, args: EntryArgs) -> LedgerResult<()> {
    let payment = parse_amount(&args.amount)?;
    let (_, outcome) = LedgerService::new(storage).pay(&args.vendor, &args.description, payment)?;

    let mut stdout = io::stdout();
    println!("{}", format_amount_owed(&args.vendor, outcome.total_owed, settings));
    if outcome.is_settled() {
        console::success(&mut stdout, &format!("Balance with {} is settled", args.vendor))?;
    } else {
        console::success(
            &mut stdout,
            &format!(
                "Payment of {} recorded, {} still owed",
                outcome.payment.format_with_symbol(&settings.currency_symbol),
                outcome.remaining.abs().format_with_symbol(&settings.currency_symbol)
            ),
        )?;
    }
    Ok(())
}

/// Print the ledger, newest first
pub fn handle_list_command(storage: &Storage, settings: &Settings, args: ListArgs) -> LedgerResult<()> {
    let records = LedgerService::new(storage).load();
    let view = args.view();

    print!("{}", format_transaction_table(&ledger_view(&records, view), settings));
    Ok(())
}

fn parse_amount(raw: &str) -> LedgerResult<Money> {
    Money::parse(raw).map_err(|_| LedgerError::parse("amount", raw))
}
