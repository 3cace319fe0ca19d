//! Core data models for pocket-ledger
//!
//! Transaction records and the money type they carry.

pub mod money;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use transaction::{ActivityTag, Classification, Transaction};
