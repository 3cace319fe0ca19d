//! Transaction table formatting
//!
//! Every listing uses the same four columns: Vendor, Description, Amount, Date.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Money, Transaction};

/// Shown instead of a table when a listing is empty
pub const NO_RESULTS: &str = "No results were found";

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
}

/// Render records as the four-column table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        vendor: txn.vendor.clone(),
        description: txn.description.clone(),
        amount: txn.amount.format_with_symbol(&settings.currency_symbol),
        date: format_date(txn.date, &settings.date_format),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()));

    format!("{}\n", table)
}

/// One-line summary of an amount owed
pub fn format_amount_owed(vendor: &str, owed: Money, settings: &Settings) -> String {
    format!(
        "Total amount owed for {}: {}",
        vendor,
        owed.format_with_symbol(&settings.currency_symbol)
    )
}

// Falls back to ISO when the configured format is not valid strftime.
fn format_date(date: NaiveDate, format: &str) -> String {
    let valid = StrftimeItems::new(format).all(|item| !matches!(item, Item::Error));
    if valid {
        date.format(format).to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
