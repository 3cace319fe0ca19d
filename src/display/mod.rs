//! Display formatting for terminal output
//!
//! Tables for record listings and colored status messages.

pub mod console;
pub mod transaction;

pub use console::Tone;
pub use transaction::{format_amount_owed, format_transaction_table, NO_RESULTS};
