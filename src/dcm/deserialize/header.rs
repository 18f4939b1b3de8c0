//! Document-level sections: the comment header with the format directive,
//! `MODULKOPF` lines, the `FUNKTIONEN` list and `VARIANTENKODIERUNG` blocks.

use super::fields::{COMMENT_MARKERS, is_comment};
use super::tokens::{format_version, split_keyword, string_field, text_tokens};
use crate::dcm::cursor::LineCursor;
use crate::dcm::errors::{DcmError, ErrorContext};
use crate::dcm::validation::Diagnostics;
use crate::model::{FormatVersion, Function, ModuleHeader, VariantCriterion};
use crate::types::DiagnosticKind;

pub const FORMAT_KEYWORD: &str = "KONSERVIERUNG_FORMAT";

/// Reads up to and including the `KONSERVIERUNG_FORMAT` line.
///
/// Leading comment lines are appended to `header`, marker stripped and
/// trimmed, each followed by `\n`. Blank lines are skipped.
///
/// # Errors
///
/// [`DcmError::MalformedHeader`] if the first significant line is not a valid
/// format directive, or if there is none.
pub fn deserialize_header(
    cursor: &mut LineCursor<'_>,
    header: &mut String,
) -> Result<FormatVersion, DcmError> {
    let malformed = |message: String, line: usize| DcmError::MalformedHeader {
        message,
        context: ErrorContext::with_line(line).with_parsing(FORMAT_KEYWORD),
    };

    while let Some((line_number, line)) = cursor.next_line() {
        if line.is_empty() {
            continue;
        }
        if is_comment(line) {
            let content = line.strip_prefix(COMMENT_MARKERS).unwrap_or(line).trim();
            header.push_str(content);
            header.push('\n');
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        if keyword != FORMAT_KEYWORD {
            return Err(malformed(
                format!("expected {FORMAT_KEYWORD} as first entry, found '{keyword}'"),
                line_number,
            ));
        }
        let version = format_version(rest).ok_or_else(|| {
            malformed(format!("invalid format version '{rest}'"), line_number)
        })?;
        log::debug!("DCM format version {version}");
        return Ok(version);
    }

    Err(malformed(
        format!("missing {FORMAT_KEYWORD}"),
        cursor.line_number(),
    ))
}

/// Parses the rest of a `MODULKOPF <key> "<text>"` line.
pub fn deserialize_module_header(
    rest: &str,
    line: usize,
    diagnostics: &mut Diagnostics,
) -> Option<ModuleHeader> {
    let (key, text) = split_keyword(rest);
    if key.is_empty() {
        diagnostics.report(line, DiagnosticKind::MalformedField, "MODULKOPF without a key");
        return None;
    }
    Some(ModuleHeader {
        key: key.to_string(),
        text: string_field(text),
    })
}

/// Runs `on_entry` for each significant line of a keyword list up to `END`.
fn for_each_entry<'a>(
    section: &str,
    cursor: &mut LineCursor<'a>,
    mut on_entry: impl FnMut(usize, &'a str, &'a str),
) -> Result<(), DcmError> {
    loop {
        let Some((line_number, line)) = cursor.next_line() else {
            return Err(DcmError::UnexpectedEof {
                context: ErrorContext::with_line(cursor.line_number()).with_parsing(section),
            });
        };
        if line.is_empty() || is_comment(line) {
            continue;
        }
        let (keyword, rest) = split_keyword(line);
        if keyword == "END" {
            return Ok(());
        }
        on_entry(line_number, keyword, rest);
    }
}

/// Reads the body of a `FUNKTIONEN` block.
///
/// Each entry is `FKT <name> ["<version>" ["<description>"]]`; missing parts
/// are empty strings.
pub fn deserialize_functions(
    cursor: &mut LineCursor<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Function>, DcmError> {
    let mut functions = Vec::new();

    for_each_entry("FUNKTIONEN", cursor, |line, keyword, rest| {
        if keyword != "FKT" {
            diagnostics.report(
                line,
                DiagnosticKind::UnknownField,
                format!("'{keyword}' in FUNKTIONEN"),
            );
            return;
        }
        let mut tokens = text_tokens(rest).into_iter();
        match tokens.next() {
            Some(name) => functions.push(Function::new(
                name,
                tokens.next().unwrap_or_default(),
                tokens.next().unwrap_or_default(),
            )),
            None => diagnostics.report(line, DiagnosticKind::MalformedField, "FKT without a name"),
        }
    })?;

    log::debug!("Read {} functions", functions.len());
    Ok(functions)
}

/// Reads the body of a `VARIANTENKODIERUNG` block of `KRITERIUM` lines.
pub fn deserialize_variant_coding(
    cursor: &mut LineCursor<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<VariantCriterion>, DcmError> {
    let mut criteria = Vec::new();

    for_each_entry("VARIANTENKODIERUNG", cursor, |line, keyword, rest| {
        if keyword != "KRITERIUM" {
            diagnostics.report(
                line,
                DiagnosticKind::UnknownField,
                format!("'{keyword}' in VARIANTENKODIERUNG"),
            );
            return;
        }
        let mut tokens = text_tokens(rest).into_iter();
        match tokens.next() {
            Some(name) => criteria.push(VariantCriterion {
                name: name.to_string(),
                values: tokens.map(str::to_string).collect(),
            }),
            None => diagnostics.report(
                line,
                DiagnosticKind::MalformedField,
                "KRITERIUM without a name",
            ),
        }
    })?;

    Ok(criteria)
}
