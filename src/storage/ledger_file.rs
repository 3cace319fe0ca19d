//! Append-only ledger file
//!
//! Reads are full scans of the file; writes append a single line and are
//! synced to disk before returning.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

use super::file_io::{decode_row, encode_row, is_header, unstorable_field, DELIMITER, HEADER};

/// Durable list of transaction records backed by a pipe-delimited file
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in file order
    ///
    /// A leading header line is skipped. Rows that cannot be decoded are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` if the file is missing or cannot be read.
    pub fn load(&self) -> LedgerResult<Vec<Transaction>> {
        let file = File::open(&self.path).map_err(|e| {
            LedgerError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, row) in reader.byte_records().enumerate() {
            let row = row.map_err(|e| {
                LedgerError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            let row = match csv::StringRecord::from_byte_record(row) {
                Ok(row) => row,
                Err(e) => {
                    warn!(path = %self.path.display(), line, "Skipping ledger row: {}", e.utf8_error());
                    continue;
                }
            };

            if index == 0 && is_header(&row) {
                continue;
            }

            match decode_row(&row) {
                Ok(txn) => records.push(txn),
                Err(e) => warn!(path = %self.path.display(), line, "Skipping ledger row: {}", e),
            }
        }

        debug!(path = %self.path.display(), count = records.len(), "Loaded ledger");
        Ok(records)
    }

    /// Load every record, degrading to an empty working set when the file
    /// cannot be read
    pub fn load_or_empty(&self) -> Vec<Transaction> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("{}; continuing with an empty ledger", e);
                Vec::new()
            }
        }
    }

    /// Append one record as a single line
    ///
    /// Creates the file (with its header) when missing. Fields are written
    /// verbatim, so a description or vendor holding the delimiter or a line
    /// break is rejected with a `Validation` error before the file is touched.
    pub fn append(&self, txn: &Transaction) -> LedgerResult<()> {
        if let Some(field) = unstorable_field(txn) {
            return Err(LedgerError::Validation(format!(
                "The {} cannot contain '|' or line breaks",
                field
            )));
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LedgerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let needs_header = file.metadata()?.len() == 0;
        if !needs_header && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);

        if needs_header {
            writer.write_record(HEADER)?;
        }
        writer.write_record(encode_row(txn))?;
        writer.flush()?;

        let file = writer
            .into_inner()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush ledger: {}", e)))?;
        file.sync_all()
            .map_err(|e| LedgerError::Storage(format!("Failed to sync ledger: {}", e)))?;

        debug!(path = %self.path.display(), record = %txn, "Appended record");
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> LedgerResult<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
