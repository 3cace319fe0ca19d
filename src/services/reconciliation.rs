//! Balance reconciliation
//!
//! Works out how much is owed to a vendor for a described obligation and
//! checks a proposed payment against it.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ActivityTag, Money, Transaction};

/// Result of a payment that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Amount owed before the payment
    pub total_owed: Money,
    /// The payment itself
    pub payment: Money,
    /// `payment - total_owed`; zero when settled, negative otherwise
    pub remaining: Money,
}

impl PaymentOutcome {
    pub fn is_settled(&self) -> bool {
        self.remaining.is_zero()
    }

    /// `paid` when the obligation is closed, `payment` otherwise
    pub fn tag(&self) -> ActivityTag {
        if self.is_settled() {
            ActivityTag::Paid
        } else {
            ActivityTag::Payment
        }
    }
}

/// Records with a negative amount
pub fn ongoing_obligations(records: &[Transaction]) -> Vec<Transaction> {
    records
        .iter()
        .filter(|t| t.is_obligation())
        .cloned()
        .collect()
}

/// Total owed to `vendor` for obligations whose description contains
/// `description`
///
/// Vendor matching is exact and case-insensitive; the description is a
/// case-insensitive substring. Returns `None` when nothing matches.
pub fn total_owed(obligations: &[Transaction], vendor: &str, description: &str) -> Option<Money> {
    let mut matched = obligations
        .iter()
        .filter(|t| t.is_obligation())
        .filter(|t| t.vendor_is(vendor) && t.description_contains(description))
        .peekable();

    matched.peek()?;
    Some(matched.map(|t| t.amount.abs()).sum())
}

/// Check a proposed payment against the amount owed
///
/// # Errors
///
/// `Validation` when the payment exceeds the amount owed.
pub fn validate_payment(total_owed: Money, payment: Money) -> LedgerResult<PaymentOutcome> {
    if payment > total_owed {
        return Err(LedgerError::Validation(format!(
            "Payment of {} exceeds the {} owed",
            payment, total_owed
        )));
    }

    Ok(PaymentOutcome {
        total_owed,
        payment,
        remaining: payment - total_owed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn txn(vendor: &str, description: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            description,
            vendor,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_total_owed_single_obligation() {
        let records = vec![txn("Acme", "invoice payment", -5000)];
        assert_eq!(
            total_owed(&records, "acme", "invoice"),
            Some(Money::from_cents(5000))
        );
    }

    #[test]
    fn test_total_owed_sums_matching_obligations() {
        let records = vec![
            txn("Acme", "Invoice 7 payment", -5000),
            txn("ACME", "invoice 8 payment", -2550),
            txn("Acme", "consulting payment", -10000),
            txn("Acme Corp", "invoice 9 payment", -999),
            txn("Acme", "invoice refund deposit", 700),
        ];

        assert_eq!(
            total_owed(&records, "acme", "INVOICE"),
            Some(Money::from_cents(7550))
        );
    }

    #[test]
    fn test_total_owed_without_match_is_none() {
        let records = vec![txn("Acme", "invoice payment", -5000)];

        assert_eq!(total_owed(&records, "Globex", "invoice"), None);
        assert_eq!(total_owed(&records, "Acme", "rent"), None);
        assert_eq!(total_owed(&[], "Acme", "invoice"), None);
    }

    #[test]
    fn test_settled_records_are_not_owed() {
        let records = vec![txn("Acme", "invoice paid", 0)];
        assert_eq!(total_owed(&records, "Acme", "invoice"), None);
    }

    #[test]
    fn test_ongoing_obligations() {
        let records = vec![
            txn("Acme", "invoice payment", -5000),
            txn("Job", "salary deposit", 100000),
            txn("Acme", "invoice paid", 0),
        ];

        let owed = ongoing_obligations(&records);
        assert_eq!(owed.len(), 1);
        assert_eq!(owed[0].vendor, "Acme");
    }

    #[test]
    fn test_exact_payment_settles() {
        let outcome = validate_payment(Money::from_cents(5000), Money::from_cents(5000)).unwrap();
        assert_eq!(outcome.remaining, Money::zero());
        assert!(outcome.is_settled());
        assert_eq!(outcome.tag(), ActivityTag::Paid);
    }

    #[test]
    fn test_partial_payment_leaves_balance() {
        let outcome = validate_payment(Money::from_cents(5000), Money::from_cents(2000)).unwrap();
        assert_eq!(outcome.remaining, Money::from_cents(-3000));
        assert_eq!(outcome.tag(), ActivityTag::Payment);
    }

    #[test]
    fn test_overpayment_is_rejected() {
        let err = validate_payment(Money::from_cents(5000), Money::from_cents(5001)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation error: Payment of $50.01 exceeds the $50.00 owed"
        );
    }
}
