//! Vendor index
//!
//! Groups a working set by normalized vendor name for case-insensitive
//! vendor lookups.

use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Normalize a vendor name for grouping and lookup
pub fn normalize_vendor(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Records grouped by normalized vendor name
#[derive(Debug, Clone, Default)]
pub struct VendorIndex {
    buckets: BTreeMap<String, Vec<Transaction>>,
}

impl VendorIndex {
    /// Build the index; every record lands in exactly one bucket, in input order
    pub fn build(records: &[Transaction]) -> Self {
        let mut buckets: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
        for txn in records {
            buckets
                .entry(normalize_vendor(&txn.vendor))
                .or_default()
                .push(txn.clone());
        }
        Self { buckets }
    }

    /// Look up a vendor by name, case-insensitively
    ///
    /// # Errors
    ///
    /// `NotFound` when no record carries this vendor.
    pub fn lookup(&self, vendor: &str) -> LedgerResult<&[Transaction]> {
        let key = normalize_vendor(vendor);
        self.buckets
            .get(&key)
            .map(Vec::as_slice)
            .ok_or_else(|| LedgerError::vendor_not_found(key))
    }

    pub fn contains(&self, vendor: &str) -> bool {
        self.buckets.contains_key(&normalize_vendor(vendor))
    }

    /// Normalized vendor names, sorted
    pub fn vendors(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Number of distinct vendors
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<Transaction>> {
        self.buckets
    }
}

/// Group records by normalized vendor name
pub fn group_by_vendor(records: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    VendorIndex::build(records).into_map()
}
