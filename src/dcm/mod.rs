//! Reading and writing DCM files.
//!
//! [`read`] and [`write`] cover the common case of UTF-8 files with six array
//! values per line; [`read_with_options`] and [`write_with_options`] take the
//! text encoding and line width from [`ReadOptions`] and [`WriteOptions`].
//!
//! ```rust,no_run
//! use dcmreader::dcm;
//!
//! let result = dcm::read("calibration.dcm")?;
//! for warning in result.warnings_ref() {
//!     eprintln!("{warning}");
//! }
//! dcm::write(result.value(), "copy.dcm")?;
//! # Ok::<(), dcmreader::dcm::DcmError>(())
//! ```

pub mod cursor;
pub mod deserialize;
pub mod errors;
pub mod serialize;
pub mod validation;

pub use deserialize::parse_str;
pub use errors::{DcmError, ErrorContext};
pub use serialize::{DcmWriter, VALUES_PER_LINE};

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::model::Document;
use crate::types::{Diagnostic, WithWarnings};

/// Options for [`read_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Encoding of the file; a byte order mark takes precedence.
    pub encoding: &'static Encoding,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}

impl ReadOptions {
    /// Looks up the encoding by a WHATWG label such as `"latin1"` or `"utf-8"`.
    pub fn with_encoding_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(|encoding| Self { encoding })
    }
}

/// Options for [`write_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub encoding: &'static Encoding,
    /// Array values per line; 0 is treated as 1.
    pub values_per_line: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            values_per_line: VALUES_PER_LINE,
        }
    }
}

/// Reads and parses a UTF-8 DCM file.
///
/// # Errors
///
/// IO failures and fatal parse errors; parse errors carry the file path.
pub fn read<P: AsRef<Path>>(path: P) -> Result<WithWarnings<Document, Diagnostic>, DcmError> {
    read_with_options(path, ReadOptions::default())
}

/// Reads and parses a DCM file in the configured encoding.
///
/// # Errors
///
/// IO failures and fatal parse errors; parse errors carry the file path.
pub fn read_with_options<P: AsRef<Path>>(
    path: P,
    options: ReadOptions,
) -> Result<WithWarnings<Document, Diagnostic>, DcmError> {
    let path = path.as_ref();
    log::info!("Reading {}", path.display());

    let bytes = fs::read(path)?;
    let (text, encoding, had_errors) = options.encoding.decode(&bytes);
    if had_errors {
        log::warn!(
            "{}: invalid {} sequences replaced",
            path.display(),
            encoding.name()
        );
    }

    parse_str(&text).map_err(|err| err.in_file(path))
}

/// Writes a document as a UTF-8 DCM file.
///
/// # Errors
///
/// Returns [`DcmError::Io`] if the file cannot be written.
pub fn write<P: AsRef<Path>>(document: &Document, path: P) -> Result<(), DcmError> {
    write_with_options(document, path, WriteOptions::default())
}

/// Writes a document in the configured encoding and line width.
///
/// Characters the encoding cannot represent are written as numeric character
/// references.
///
/// # Errors
///
/// Returns [`DcmError::Io`] if the file cannot be written.
pub fn write_with_options<P: AsRef<Path>>(
    document: &Document,
    path: P,
    options: WriteOptions,
) -> Result<(), DcmError> {
    let path = path.as_ref();
    let text = document.to_dcm_string_with(options.values_per_line);
    let (bytes, encoding, had_errors) = options.encoding.encode(&text);
    if had_errors {
        log::warn!(
            "{}: characters not representable in {} were replaced",
            path.display(),
            encoding.name()
        );
    }

    fs::write(path, &bytes)?;
    log::info!("Wrote {} elements to {}", document.len(), path.display());
    Ok(())
}
