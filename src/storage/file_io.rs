//! Row encoding for the pipe-delimited ledger file
//!
//! Each line holds five fields: `date|time|description|vendor|amount`, with
//! the date in ISO form and the amount with exactly two decimals.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{Money, Transaction};

/// Field delimiter of the ledger file
pub const DELIMITER: u8 = b'|';

/// Header line written at the top of a new ledger file
pub const HEADER: [&str; 5] = ["date", "time", "description", "vendor", "amount"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Why a row could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    FieldCount(usize),
    Date(String),
    Time(String),
    Amount(String),
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 5 fields, found {}", n),
            Self::Date(s) => write!(f, "invalid date '{}'", s),
            Self::Time(s) => write!(f, "invalid time '{}'", s),
            Self::Amount(s) => write!(f, "invalid amount '{}'", s),
        }
    }
}

/// Encode a record as the five stored fields
pub fn encode_row(txn: &Transaction) -> [String; 5] {
    [
        txn.date.format(DATE_FORMAT).to_string(),
        txn.time.format(TIME_FORMAT).to_string(),
        txn.description.clone(),
        txn.vendor.clone(),
        txn.amount.to_plain_string(),
    ]
}

/// Name of the first free-text field that would break the one-line row
/// layout, if any
pub fn unstorable_field(txn: &Transaction) -> Option<&'static str> {
    let breaks_row = |text: &str| text.contains(['|', '\n', '\r']);
    [("description", &txn.description), ("vendor", &txn.vendor)]
        .into_iter()
        .find(|(_, text)| breaks_row(text))
        .map(|(field, _)| field)
}

/// Decode one stored row
pub fn decode_row(row: &csv::StringRecord) -> Result<Transaction, RowError> {
    if row.len() != HEADER.len() {
        return Err(RowError::FieldCount(row.len()));
    }

    let date = NaiveDate::parse_from_str(&row[0], DATE_FORMAT)
        .map_err(|_| RowError::Date(row[0].to_string()))?;
    let time = parse_time(&row[1]).ok_or_else(|| RowError::Time(row[1].to_string()))?;
    let amount = Money::parse(&row[4]).map_err(|_| RowError::Amount(row[4].to_string()))?;

    Ok(Transaction::new(date, time, &row[2], &row[3], amount))
}

/// Check whether a row is the header line
pub fn is_header(row: &csv::StringRecord) -> bool {
    row.get(0)
        .map(|first| first.eq_ignore_ascii_case(HEADER[0]))
        .unwrap_or(false)
}

// Older files may omit zero seconds ("09:30") or carry fractions.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}
