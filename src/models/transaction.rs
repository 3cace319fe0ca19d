//! Transaction model
//!
//! A ledger record is immutable once written. Its amount sign decides whether
//! it is a deposit, an outstanding obligation or a settled payment.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Tag word appended to a description when a record is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityTag {
    Deposit,
    Payment,
    /// A payment that settled the obligation completely
    Paid,
}

impl ActivityTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Payment => "payment",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for ActivityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record is classified, derived from the sign of its amount only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Positive amount: money received
    Deposit,
    /// Negative amount: money still owed to the vendor
    Obligation,
    /// Zero amount: a payment that closed an obligation
    Settled,
}

/// A single ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,

    /// Wall-clock time of entry, second precision
    pub time: NaiveTime,

    /// Free text, usually ending in an activity tag word
    pub description: String,

    pub vendor: String,

    /// Positive for deposits, negative for obligations, zero when settled
    pub amount: Money,
}

impl Transaction {
    /// Create a record from its stored fields
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            time: truncate_to_seconds(time),
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    /// Create a record for a new activity, stamping it with `at` and appending
    /// the tag word to the description
    pub fn record(
        at: NaiveDateTime,
        description: &str,
        tag: ActivityTag,
        vendor: &str,
        amount: Money,
    ) -> Self {
        let description = description.trim();
        let description = if description.is_empty() {
            tag.to_string()
        } else {
            format!("{} {}", description, tag)
        };

        Self::new(at.date(), at.time(), description, vendor.trim(), amount)
    }

    pub fn classification(&self) -> Classification {
        if self.amount.is_positive() {
            Classification::Deposit
        } else if self.amount.is_negative() {
            Classification::Obligation
        } else {
            Classification::Settled
        }
    }

    pub fn is_deposit(&self) -> bool {
        self.classification() == Classification::Deposit
    }

    pub fn is_obligation(&self) -> bool {
        self.classification() == Classification::Obligation
    }

    pub fn is_settled(&self) -> bool {
        self.classification() == Classification::Settled
    }

    /// Case-insensitive exact vendor comparison
    pub fn vendor_is(&self, vendor: &str) -> bool {
        self.vendor.trim().to_lowercase() == vendor.trim().to_lowercase()
    }

    /// Case-insensitive substring match on the vendor
    pub fn vendor_contains(&self, fragment: &str) -> bool {
        self.vendor.to_lowercase().contains(&fragment.to_lowercase())
    }

    /// Case-insensitive substring match on the description
    pub fn description_contains(&self, fragment: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&fragment.to_lowercase())
    }
}

fn truncate_to_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.vendor,
            self.description,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_classification_by_sign() {
        let deposit = Transaction::new(date(2025, 1, 15), noon(), "pay deposit", "Job", Money::from_cents(1000));
        let owed = Transaction::new(date(2025, 1, 15), noon(), "rent payment", "Landlord", Money::from_cents(-1000));
        let settled = Transaction::new(date(2025, 1, 15), noon(), "rent paid", "Landlord", Money::zero());

        assert_eq!(deposit.classification(), Classification::Deposit);
        assert!(owed.is_obligation());
        assert!(settled.is_settled());
    }

    #[test]
    fn test_tag_word_does_not_classify() {
        // Legacy text tag disagrees with the sign; the sign wins
        let txn = Transaction::new(date(2025, 1, 15), noon(), "refund deposit", "Shop", Money::from_cents(-250));
        assert!(txn.is_obligation());
        assert!(!txn.is_deposit());
    }

    #[test]
    fn test_record_appends_tag() {
        let at = date(2024, 3, 9).and_hms_milli_opt(8, 30, 15, 250).unwrap();
        let txn = Transaction::record(at, " invoice ", ActivityTag::Paid, " Acme ", Money::zero());

        assert_eq!(txn.description, "invoice paid");
        assert_eq!(txn.vendor, "Acme");
        assert_eq!(txn.date, date(2024, 3, 9));
        assert_eq!(txn.time, NaiveTime::from_hms_opt(8, 30, 15).unwrap());
    }

    #[test]
    fn test_record_with_empty_description() {
        let at = date(2024, 3, 9).and_hms_opt(8, 30, 15).unwrap();
        let txn = Transaction::record(at, "", ActivityTag::Deposit, "Acme", Money::from_cents(100));
        assert_eq!(txn.description, "deposit");
    }

    #[test]
    fn test_matching_helpers() {
        let txn = Transaction::new(date(2025, 1, 15), noon(), "Invoice Payment", "Acme Corp", Money::from_cents(-100));

        assert!(txn.vendor_is("ACME CORP"));
        assert!(!txn.vendor_is("acme"));
        assert!(txn.vendor_contains("acme"));
        assert!(txn.description_contains("invoice"));
        assert!(!txn.description_contains("deposit"));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(date(2025, 1, 15), noon(), "groceries payment", "Store", Money::from_cents(-5000));
        assert_eq!(format!("{}", txn), "2025-01-15 Store groceries payment -$50.00");
    }
}
