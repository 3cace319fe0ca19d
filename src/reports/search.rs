//! Custom search
//!
//! Criteria are applied one after another in a fixed order (start date, end
//! date, description, vendor, amount), each narrowing the output of the
//! previous step. Blank input for a field leaves the list untouched.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::money::DecimalText;
use crate::models::{Money, Transaction};

/// Most decimal places an amount query may carry
const MAX_QUERY_DECIMALS: usize = 18;

/// The searchable fields, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchField {
    StartDate,
    EndDate,
    Description,
    Vendor,
    Amount,
}

impl SearchField {
    pub const ORDER: [SearchField; 5] = [
        Self::StartDate,
        Self::EndDate,
        Self::Description,
        Self::Vendor,
        Self::Amount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::StartDate => "start date",
            Self::EndDate => "end date",
            Self::Description => "description",
            Self::Vendor => "vendor",
            Self::Amount => "amount",
        }
    }
}

/// A validated, non-blank search criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriterion {
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    Description(String),
    Vendor(String),
    Amount(AmountQuery),
}

impl SearchCriterion {
    /// Validate raw input for a field
    ///
    /// Returns `Ok(None)` for blank input and a `Parse` error when a date or
    /// amount does not parse, so the caller can prompt again.
    pub fn parse(field: SearchField, raw: &str) -> LedgerResult<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let criterion = match field {
            SearchField::StartDate => Self::StartDate(parse_date(field.label(), raw)?),
            SearchField::EndDate => Self::EndDate(parse_date(field.label(), raw)?),
            SearchField::Description => Self::Description(raw.to_string()),
            SearchField::Vendor => Self::Vendor(raw.to_string()),
            SearchField::Amount => {
                Self::Amount(AmountQuery::parse(raw).ok_or_else(|| LedgerError::parse("amount", raw))?)
            }
        };
        Ok(Some(criterion))
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::StartDate(start) => txn.date >= *start,
            Self::EndDate(end) => txn.date <= *end,
            Self::Description(text) => txn.description_contains(text),
            Self::Vendor(text) => txn.vendor_contains(text),
            Self::Amount(query) => query.within_a_cent(txn.amount),
        }
    }

    /// Keep the records matching this criterion, preserving order
    pub fn apply(&self, records: Vec<Transaction>) -> Vec<Transaction> {
        records.into_iter().filter(|t| self.matches(t)).collect()
    }
}

/// A searched amount, kept at the precision it was typed with
///
/// `scaled` is the signed value times `10^scale`, with `scale` at least 2, so
/// "89.505" is held as 89505 at scale 3 rather than rounded to whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountQuery {
    scaled: i128,
    scale: u32,
}

impl AmountQuery {
    /// Parse the same syntax as [`Money::parse`], up to 18 decimal places
    pub fn parse(raw: &str) -> Option<Self> {
        let text = DecimalText::split(raw.trim())?;
        if text.fraction.len() > MAX_QUERY_DECIMALS {
            return None;
        }

        let scale = text.fraction.len().max(2);
        let digits = format!("{}{:0<width$}", text.whole, text.fraction, width = scale);
        let magnitude: i128 = digits.parse().ok()?;

        Some(Self {
            scaled: if text.negative { -magnitude } else { magnitude },
            scale: scale as u32,
        })
    }

    /// True when `|amount - query| < 0.01`
    pub fn within_a_cent(&self, amount: Money) -> bool {
        let cent = 10_i128.pow(self.scale - 2);
        i128::from(amount.cents())
            .checked_mul(cent)
            .and_then(|value| value.checked_sub(self.scaled))
            .and_then(i128::checked_abs)
            .map_or(false, |distance| distance < cent)
    }
}

/// Raw inputs of a custom search, one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomSearch {
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub vendor: String,
    pub amount: String,
}

impl CustomSearch {
    pub fn raw(&self, field: SearchField) -> &str {
        match field {
            SearchField::StartDate => &self.start_date,
            SearchField::EndDate => &self.end_date,
            SearchField::Description => &self.description,
            SearchField::Vendor => &self.vendor,
            SearchField::Amount => &self.amount,
        }
    }

    pub fn set(&mut self, field: SearchField, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            SearchField::StartDate => self.start_date = raw,
            SearchField::EndDate => self.end_date = raw,
            SearchField::Description => self.description = raw,
            SearchField::Vendor => self.vendor = raw,
            SearchField::Amount => self.amount = raw,
        }
    }

    /// Validate every field, in application order
    pub fn criteria(&self) -> LedgerResult<Vec<SearchCriterion>> {
        let mut criteria = Vec::new();
        for field in SearchField::ORDER {
            if let Some(criterion) = SearchCriterion::parse(field, self.raw(field))? {
                criteria.push(criterion);
            }
        }
        Ok(criteria)
    }

    /// Run the search over the working set
    ///
    /// Nothing is filtered if any field fails to validate.
    pub fn run(&self, records: &[Transaction]) -> LedgerResult<Vec<Transaction>> {
        let criteria = self.criteria()?;
        Ok(criteria
            .iter()
            .fold(records.to_vec(), |remaining, criterion| criterion.apply(remaining)))
    }
}

/// Apply `(field, raw)` pairs in the fixed field order, regardless of the
/// order they are given in
pub fn custom_search(
    records: &[Transaction],
    inputs: &[(SearchField, &str)],
) -> LedgerResult<Vec<Transaction>> {
    let mut ordered = inputs.to_vec();
    ordered.sort_by_key(|(field, _)| *field);

    let mut remaining = records.to_vec();
    for (field, raw) in ordered {
        if let Some(criterion) = SearchCriterion::parse(field, raw)? {
            remaining = criterion.apply(remaining);
        }
    }
    Ok(remaining)
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(field: &'static str, raw: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| LedgerError::parse(field, raw))
}
