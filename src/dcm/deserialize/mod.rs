//! DCM deserialization module.
//!
//! The reader makes a single forward pass over the text with a shared
//! [`LineCursor`]: [`header`] consumes the comment header and the format
//! directive, then every top-level keyword is dispatched either to a
//! document-level section parser or to the element block parser in
//! [`blocks`].
//!
//! Fatal problems abort with a [`DcmError`]; recoverable ones are collected as
//! [`Diagnostic`]s and returned next to the document.

pub mod blocks;
pub mod fields;
pub mod header;
pub mod tokens;

pub use blocks::deserialize_element;
pub use header::{
    deserialize_functions, deserialize_header, deserialize_module_header,
    deserialize_variant_coding,
};

use std::str::FromStr;

use crate::dcm::cursor::LineCursor;
use crate::dcm::errors::DcmError;
use crate::dcm::validation::Diagnostics;
use crate::model::{Document, ElementKind};
use crate::types::{Diagnostic, DiagnosticKind, WithWarnings};
use fields::is_comment;
use tokens::split_keyword;

/// Parses a whole DCM document from text.
///
/// # Errors
///
/// Returns the first fatal [`DcmError`]; no partial document is produced.
///
/// # Examples
///
/// ```rust
/// use dcmreader::dcm::deserialize::parse_str;
///
/// let text = "KONSERVIERUNG_FORMAT 2.0\n\nFESTWERT p\n  WERT 5\nEND\n";
/// let result = parse_str(text).unwrap();
/// assert!(result.is_ok());
/// assert_eq!(result.value().len(), 1);
/// ```
pub fn parse_str(text: &str) -> Result<WithWarnings<Document, Diagnostic>, DcmError> {
    let mut cursor = LineCursor::new(text);
    let mut diagnostics = Diagnostics::new();
    let mut document = Document::new();

    document.format_version = deserialize_header(&mut cursor, &mut document.header)?;

    while let Some((line_number, line)) = cursor.next_line() {
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        match keyword {
            "FUNKTIONEN" => {
                let functions = deserialize_functions(&mut cursor, &mut diagnostics)?;
                document.functions.extend(functions);
            }
            "VARIANTENKODIERUNG" => {
                let criteria = deserialize_variant_coding(&mut cursor, &mut diagnostics)?;
                document.variant_coding.extend(criteria);
            }
            "MODULKOPF" => {
                if let Some(module_header) =
                    deserialize_module_header(rest, line_number, &mut diagnostics)
                {
                    document.module_headers.push(module_header);
                }
            }
            _ => match ElementKind::from_keyword(keyword) {
                Some(kind) => {
                    let element = deserialize_element(kind, rest, &mut cursor, &mut diagnostics)?;
                    document
                        .insert(element)
                        .map_err(|err| err.at_line(line_number))?;
                }
                None => diagnostics.report(
                    line_number,
                    DiagnosticKind::UnknownKeyword,
                    format!("'{keyword}' ignored"),
                ),
            },
        }
    }

    log::debug!(
        "Parsed {} elements with {} warnings",
        document.len(),
        diagnostics.len()
    );
    Ok(WithWarnings::new(document, diagnostics.into_vec()))
}

/// Parses a document, discarding diagnostics (they are still logged).
impl FromStr for Document {
    type Err = DcmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s).map(WithWarnings::unwrap)
    }
}
