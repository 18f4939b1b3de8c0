//! Validation functions for DCM structures

use crate::model::{Document, ElementKind};
use crate::types::{Diagnostic, DiagnosticKind};

/// Collects recoverable problems while reading, logging each as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(line, kind, message);
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Reports a dimension mismatch when `actual` differs from the declared size.
///
/// Returns whether the length was as declared.
pub fn validate_length(
    diagnostics: &mut Diagnostics,
    line: usize,
    element: &str,
    what: &str,
    expected: usize,
    actual: usize,
) -> bool {
    if actual == expected {
        return true;
    }
    diagnostics.report(
        line,
        DiagnosticKind::DimensionMismatch,
        format!("{element}: expected {expected} {what}, but received {actual}"),
    );
    false
}

/// Reports values beyond the last `ST/X` coordinate, which have no key to be
/// stored under.
pub fn validate_pairing(
    diagnostics: &mut Diagnostics,
    line: usize,
    element: &str,
    what: &str,
    coordinates: usize,
    values: usize,
) {
    if values > coordinates {
        diagnostics.report(
            line,
            DiagnosticKind::DimensionMismatch,
            format!(
                "{element}: {} {what} without an ST/X coordinate dropped",
                values - coordinates
            ),
        );
    }
}

/// Checks that every `x_mapping`/`y_mapping` names a distribution of the document.
pub fn validate_axis_mappings(document: &Document) -> Vec<String> {
    let mut errors = Vec::new();

    for element in document.elements() {
        let mappings = [
            ("x", element.attributes.x_mapping.as_deref()),
            ("y", element.attributes.y_mapping.as_deref()),
        ];
        for (axis, target) in mappings {
            let Some(target) = target else {
                continue;
            };
            match document.get(target).map(|e| e.kind()) {
                Some(ElementKind::Distribution) => {}
                Some(kind) => errors.push(format!(
                    "'{}' maps its {} axis to '{}', which is a {} and not a distribution",
                    element.name(),
                    axis,
                    target,
                    kind
                )),
                None => errors.push(format!(
                    "'{}' maps its {} axis to unknown distribution '{}'",
                    element.name(),
                    axis,
                    target
                )),
            }
        }
    }

    errors
}
