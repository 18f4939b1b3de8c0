#![cfg(test)]

use crate::dcm::deserialize::parse_str;
use crate::model::{Document, Element};
use crate::types::Diagnostic;
use crate::value::Value;

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Assert that a value is numeric and approximately equal to `expected`.
pub fn assert_number_eq(value: Option<&Value>, expected: f64) {
    match value.and_then(Value::as_number) {
        Some(number) => assert_float_eq(number.as_f64(), expected, 1e-12),
        None => panic!("Expected a number near {}, got {:?}", expected, value),
    }
}

/// Wrap a block snippet in a minimal DCM document for parsing.
pub fn wrap_block(block: &str) -> String {
    format!(
        "* Test document\nKONSERVIERUNG_FORMAT 2.0\n\n{}\n",
        block.trim()
    )
}

/// Parse a single block snippet, returning its element and the diagnostics.
/// Block lines start at line 4 of the wrapped document.
pub fn parse_block_with_warnings(block: &str) -> (Element, Vec<Diagnostic>) {
    let text = wrap_block(block);
    let result = parse_str(&text).expect("Failed to parse DCM document");
    let (document, diagnostics): (Document, Vec<Diagnostic>) = result.into();
    let element = document
        .elements()
        .first()
        .cloned()
        .expect("No elements found in document");
    (element, diagnostics)
}

/// Parse a single block snippet and expect it to be free of warnings.
pub fn parse_block(block: &str) -> Element {
    let (element, diagnostics) = parse_block_with_warnings(block);
    assert!(
        diagnostics.is_empty(),
        "Expected no warnings, got {:?}",
        diagnostics
    );
    element
}
