//! pocket-ledger - Terminal personal finance ledger
//!
//! Records deposits and payments in a pipe-delimited ledger file and reports
//! over the loaded records: fixed date ranges, per-vendor listings, an
//! incremental custom search, and reconciliation of payments against the
//! amount owed to a vendor.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money and transaction records
//! - `storage`: Ledger file reader/writer
//! - `reports`: Date-range reports and custom search
//! - `services`: Vendor index, balance reconciliation and recording
//! - `display`: Tables and colored console messages
//! - `menu`: Interactive session
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::{LedgerPaths, Settings};
//! use pocket_ledger::services::{total_owed, ongoing_obligations};
//! use pocket_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths, &settings)?;
//!
//! let records = storage.ledger.load_or_empty();
//! let owed = total_owed(&ongoing_obligations(&records), "Acme", "invoice");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod menu;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
