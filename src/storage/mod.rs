//! Storage layer for pocket-ledger
//!
//! A single append-only, pipe-delimited ledger file holds every record.

pub mod file_io;
pub mod ledger_file;

pub use ledger_file::LedgerFile;

use crate::config::{paths::LedgerPaths, settings::Settings};
use crate::error::LedgerError;

/// Main storage coordinator
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerFile,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: LedgerPaths, settings: &Settings) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerFile::new(paths.ledger_file(settings)),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }
}
