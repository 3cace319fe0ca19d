//! Ledger service
//!
//! Records deposits and payments through the ledger file and builds the
//! All / Deposits / Payments views of a working set.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ActivityTag, Money, Transaction};
use crate::storage::Storage;

use super::reconciliation::{ongoing_obligations, total_owed, validate_payment, PaymentOutcome};

/// Which records a ledger listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerView {
    #[default]
    All,
    /// Positive amounts
    Deposits,
    /// Negative amounts (outstanding obligations)
    Payments,
}

impl LedgerView {
    pub fn includes(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Deposits => txn.is_deposit(),
            Self::Payments => txn.is_obligation(),
        }
    }
}

impl fmt::Display for LedgerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Deposits => write!(f, "Deposits"),
            Self::Payments => write!(f, "Payments"),
        }
    }
}

/// Records of a view, newest date first (same-day records keep file order)
pub fn ledger_view(records: &[Transaction], view: LedgerView) -> Vec<Transaction> {
    let mut selected: Vec<Transaction> = records
        .iter()
        .filter(|t| view.includes(t))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

/// Service for recording ledger activity
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Reload the working set from disk
    ///
    /// A missing or unreadable file yields an empty working set.
    pub fn load(&self) -> Vec<Transaction> {
        self.storage.ledger.load_or_empty()
    }

    /// Record a deposit stamped with the current local time
    pub fn deposit(&self, vendor: &str, description: &str, amount: Money) -> LedgerResult<Transaction> {
        self.deposit_at(now(), vendor, description, amount)
    }

    pub fn deposit_at(
        &self,
        at: NaiveDateTime,
        vendor: &str,
        description: &str,
        amount: Money,
    ) -> LedgerResult<Transaction> {
        validate_vendor(vendor)?;
        if !amount.is_positive() {
            return Err(LedgerError::Validation(
                "Deposit amount must be positive".into(),
            ));
        }

        let txn = Transaction::record(at, description, ActivityTag::Deposit, vendor, amount);
        self.storage.ledger.append(&txn)?;
        info!(vendor = %txn.vendor, amount = %txn.amount, "Recorded deposit");
        Ok(txn)
    }

    /// Amount owed to `vendor` for obligations matching `description` in a
    /// working set
    ///
    /// # Errors
    ///
    /// `NotFound` when no obligation matches.
    pub fn amount_owed(
        &self,
        records: &[Transaction],
        vendor: &str,
        description: &str,
    ) -> LedgerResult<Money> {
        total_owed(&ongoing_obligations(records), vendor, description)
            .ok_or_else(|| LedgerError::balance_not_found(vendor, description))
    }

    /// Reload the ledger, validate `payment` against what is owed and record
    /// the remaining balance
    pub fn pay(
        &self,
        vendor: &str,
        description: &str,
        payment: Money,
    ) -> LedgerResult<(Transaction, PaymentOutcome)> {
        self.pay_at(now(), vendor, description, payment)
    }

    pub fn pay_at(
        &self,
        at: NaiveDateTime,
        vendor: &str,
        description: &str,
        payment: Money,
    ) -> LedgerResult<(Transaction, PaymentOutcome)> {
        let records = self.storage.ledger.load()?;
        let owed = self.amount_owed(&records, vendor, description)?;
        let outcome = validate_payment(owed, payment)?;
        let txn = self.record_payment_at(at, vendor, description, &outcome)?;
        Ok((txn, outcome))
    }

    /// Append the record for an already validated payment
    pub fn record_payment_at(
        &self,
        at: NaiveDateTime,
        vendor: &str,
        description: &str,
        outcome: &PaymentOutcome,
    ) -> LedgerResult<Transaction> {
        validate_vendor(vendor)?;

        let txn = Transaction::record(at, description, outcome.tag(), vendor, outcome.remaining);
        self.storage.ledger.append(&txn)?;
        info!(
            vendor = %txn.vendor,
            payment = %outcome.payment,
            remaining = %outcome.remaining,
            "Recorded payment"
        );
        Ok(txn)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn validate_vendor(vendor: &str) -> LedgerResult<()> {
    if vendor.trim().is_empty() {
        return Err(LedgerError::Validation("Vendor name cannot be empty".into()));
    }
    Ok(())
}
