//! Profile store reader and writer
//!
//! Streams enrolled account profiles from a CSV file and appends newly
//! enrolled accounts to it. Delegates format concerns (hex decoding, field
//! validation) to the csv_format module.
//!
//! # Iterator interface
//!
//! ProfileReader implements Iterator, yielding Result<Account, String> per
//! CSV row so malformed rows can be reported and skipped while loading
//! continues.
//!
//! # Error handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_profile_record, profile_fields, ProfileRecord};
use crate::types::Account;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Streaming reader over enrolled account profiles
#[derive(Debug)]
pub struct ProfileReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl ProfileReader {
    /// Create a new ProfileReader from a file path
    ///
    /// The CSV reader trims whitespace from all fields and expects a header
    /// row with columns card, salt, key, balance.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the profile CSV file
    ///
    /// # Returns
    ///
    /// * `Ok(ProfileReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for ProfileReader {
    type Item = Result<Account, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<ProfileRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                // Line numbers are offset by one for the header row.
                Some(
                    convert_profile_record(record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

/// Load all well-formed profiles from a file
///
/// Malformed rows are reported through the `on_error` callback and skipped;
/// loading continues with the next row.
pub fn load_profiles(
    path: &Path,
    mut on_error: impl FnMut(&str),
) -> Result<Vec<Account>, String> {
    let mut accounts = Vec::new();
    for result in ProfileReader::new(path)? {
        match result {
            Ok(account) => accounts.push(account),
            Err(e) => on_error(&e),
        }
    }
    Ok(accounts)
}

/// Append a newly enrolled account to the profile file
///
/// Writes the header row first when the file is missing or empty; otherwise
/// appends a single row without touching existing rows.
///
/// # Arguments
///
/// * `path` - Path to the profile CSV file
/// * `account` - The account to persist
///
/// # Returns
///
/// * `Ok(())` if the row was written
/// * `Err(String)` if the file could not be opened or written
pub fn append_profile(path: &Path, account: &Account) -> Result<(), String> {
    // An existing zero-length file still needs the header, or the first
    // data row would be consumed as one on load.
    let needs_header = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len() == 0,
        Err(_) => true,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    if needs_header {
        writer
            .write_record(["card", "salt", "key", "balance"])
            .map_err(|e| format!("Failed to write profile header: {}", e))?;
    }

    writer
        .write_record(&profile_fields(account))
        .map_err(|e| format!("Failed to write profile record: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush profile file: {}", e))?;

    Ok(())
}
