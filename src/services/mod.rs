//! Service layer for pocket-ledger
//!
//! Business logic on top of the storage layer: recording activity, grouping
//! by vendor and reconciling balances owed.

pub mod ledger;
pub mod reconciliation;
pub mod vendor;

pub use ledger::{ledger_view, LedgerService, LedgerView};
pub use reconciliation::{ongoing_obligations, total_owed, validate_payment, PaymentOutcome};
pub use vendor::{group_by_vendor, normalize_vendor, VendorIndex};
