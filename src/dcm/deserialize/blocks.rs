//! Element block parser.
//!
//! One state machine serves all nine element kinds: the opening line fixes the
//! kind, name and declared dimensions, body lines are dispatched on their
//! leading [`Field`] keyword, and at `END` the collected coordinates and values
//! are checked against the declared dimensions and assembled into the kind's
//! payload.

use indexmap::IndexMap;

use super::fields::{Field, apply_comment, is_comment};
use super::tokens::{BlockHeader, block_header, split_keyword, string_field, text_tokens, variant};
use crate::dcm::cursor::LineCursor;
use crate::dcm::errors::{DcmError, ErrorContext};
use crate::dcm::validation::{Diagnostics, validate_length, validate_pairing};
use crate::model::{
    Attributes, CharacteristicLine, CharacteristicMap, Distribution, Element, ElementData,
    ElementKind, Parameter, ParameterBlock,
};
use crate::types::DiagnosticKind;
use crate::value::{ConvertError, Number, Value, convert_value, convert_variant};

/// Name, declared shape and position of the block being read.
struct BlockScope<'a> {
    kind: ElementKind,
    name: &'a str,
    label: String,
    start_line: usize,
    x_dimension: usize,
    y_dimension: usize,
}

impl BlockScope<'_> {
    fn context(&self, line: usize) -> ErrorContext {
        ErrorContext::with_line(line).with_parsing(self.label.as_str())
    }

    fn not_numeric(&self, line: usize) -> impl Fn(ConvertError) -> DcmError + '_ {
        move |source| DcmError::not_numeric(source, line, &self.label)
    }

    fn numbers(&self, rest: &str, line: usize) -> Result<Vec<Number>, DcmError> {
        rest.split_whitespace()
            .map(|token| convert_value(token).map_err(self.not_numeric(line)))
            .collect()
    }
}

/// Values collected from the body, shaped by the element kind.
enum Body {
    Parameter {
        number: Option<Number>,
        text: Option<String>,
    },
    Block {
        rows: Vec<Vec<Value>>,
    },
    Line {
        x: Vec<Number>,
        values: Vec<Value>,
    },
    Map {
        x: Vec<Number>,
        rows: IndexMap<Number, Vec<Value>>,
        current_y: Option<Number>,
    },
    Distribution {
        x: Vec<Number>,
    },
}

impl Body {
    fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Parameter => Body::Parameter {
                number: None,
                text: None,
            },
            ElementKind::ParameterBlock => Body::Block { rows: Vec::new() },
            ElementKind::Distribution => Body::Distribution { x: Vec::new() },
            _ if kind.axes() == 1 => Body::Line {
                x: Vec::new(),
                values: Vec::new(),
            },
            _ => Body::Map {
                x: Vec::new(),
                rows: IndexMap::new(),
                current_y: None,
            },
        }
    }

    /// `WERT`: one scalar for parameters, a row of numbers otherwise.
    fn push_wert(
        &mut self,
        scope: &BlockScope<'_>,
        rest: &str,
        line: usize,
    ) -> Result<(), DcmError> {
        if let Body::Parameter { number, .. } = self {
            *number = Some(convert_value(rest).map_err(scope.not_numeric(line))?);
            return Ok(());
        }
        let row = scope.numbers(rest, line)?.into_iter().map(Value::Number).collect();
        self.push_row(scope, row, line)
    }

    /// `TEXT`: the scalar text for parameters, a row of text cells otherwise.
    fn push_text(
        &mut self,
        scope: &BlockScope<'_>,
        rest: &str,
        line: usize,
    ) -> Result<(), DcmError> {
        if let Body::Parameter { text, .. } = self {
            *text = Some(string_field(rest));
            return Ok(());
        }
        let row = text_tokens(rest).into_iter().map(Value::from).collect();
        self.push_row(scope, row, line)
    }

    fn push_row(
        &mut self,
        scope: &BlockScope<'_>,
        row: Vec<Value>,
        line: usize,
    ) -> Result<(), DcmError> {
        match self {
            Body::Block { rows } => match rows.last_mut() {
                Some(last) if last.len() < scope.x_dimension => last.extend(row),
                _ => rows.push(row),
            },
            Body::Line { values, .. } => values.extend(row),
            Body::Map {
                rows, current_y, ..
            } => {
                let Some(y) = *current_y else {
                    return Err(DcmError::ValueBeforeCoordinate {
                        element: scope.name.to_string(),
                        context: scope.context(line),
                    });
                };
                rows.entry(y).or_default().extend(row);
            }
            Body::Parameter { .. } | Body::Distribution { .. } => {}
        }
        Ok(())
    }

    fn push_x(&mut self, coordinates: Vec<Number>) {
        match self {
            Body::Line { x, .. } | Body::Map { x, .. } | Body::Distribution { x } => {
                x.extend(coordinates)
            }
            Body::Parameter { .. } | Body::Block { .. } => {}
        }
    }

    fn set_y(&mut self, y: Number) {
        if let Body::Map {
            rows, current_y, ..
        } = self
        {
            rows.entry(y).or_default();
            *current_y = Some(y);
        }
    }

    /// Checks the collected sizes and builds the payload.
    fn finish(self, scope: &BlockScope<'_>, diagnostics: &mut Diagnostics) -> ElementData {
        let axis = scope.kind.axis_type().unwrap_or_default();
        let (x_dimension, y_dimension) = (scope.x_dimension, scope.y_dimension);
        let check = |diagnostics: &mut Diagnostics, what: &str, expected: usize, actual: usize| {
            validate_length(diagnostics, scope.start_line, &scope.label, what, expected, actual);
        };

        match self {
            Body::Parameter { number, text } => Parameter {
                value: text.map(Value::Text).or(number.map(Value::Number)),
            }
            .into(),
            Body::Block { rows } => {
                check(diagnostics, "rows", y_dimension, rows.len());
                for (index, row) in rows.iter().enumerate() {
                    check(diagnostics, &format!("values in row {index}"), x_dimension, row.len());
                }
                ParameterBlock {
                    x_dimension,
                    y_dimension,
                    values: rows,
                }
                .into()
            }
            Body::Line { x, values } => {
                check(diagnostics, "ST/X values", x_dimension, x.len());
                check(diagnostics, "WERT values", x_dimension, values.len());
                validate_pairing(
                    diagnostics,
                    scope.start_line,
                    &scope.label,
                    "WERT values",
                    x.len(),
                    values.len(),
                );
                CharacteristicLine {
                    axis,
                    x_dimension,
                    values: x.into_iter().zip(values).collect(),
                }
                .into()
            }
            Body::Map { x, rows, .. } => {
                check(diagnostics, "ST/X values", x_dimension, x.len());
                check(diagnostics, "ST/Y rows", y_dimension, rows.len());
                let mut values: IndexMap<Number, IndexMap<Number, Value>> =
                    IndexMap::with_capacity(rows.len());
                for (y, row) in rows {
                    let what = format!("values at ST/Y {y}");
                    check(diagnostics, &what, x_dimension, row.len());
                    validate_pairing(
                        diagnostics,
                        scope.start_line,
                        &scope.label,
                        &what,
                        x.len(),
                        row.len(),
                    );
                    values.insert(y, x.iter().copied().zip(row).collect());
                }
                CharacteristicMap {
                    axis,
                    x_dimension,
                    y_dimension,
                    values,
                }
                .into()
            }
            Body::Distribution { x } => {
                check(diagnostics, "ST/X values", x_dimension, x.len());
                Distribution {
                    x_dimension,
                    values: x,
                }
                .into()
            }
        }
    }
}

/// Number of dimensions the opening line of `kind` may declare.
fn declared_dimensions(kind: ElementKind) -> usize {
    match kind {
        ElementKind::Parameter => 0,
        ElementKind::ParameterBlock => 2,
        kind => kind.axes(),
    }
}

/// Declared `(x, y)` dimensions of a block, or why the opening line is unusable.
fn dimensions(kind: ElementKind, header: &BlockHeader<'_>) -> Result<(usize, usize), &'static str> {
    match (kind, header.x, header.y) {
        (ElementKind::Parameter, _, _) => Ok((1, 1)),
        (_, None, _) => Err("missing x dimension"),
        (ElementKind::ParameterBlock, Some(x), y) => Ok((x, y.unwrap_or(1))),
        (kind, Some(x), _) if kind.axes() == 1 => Ok((x, 1)),
        (_, Some(_), None) => Err("missing y dimension"),
        (_, Some(x), Some(y)) => Ok((x, y)),
    }
}

/// Reads one element block.
///
/// `rest` is the opening line after its keyword; the cursor is positioned on
/// the opening line and is left on the block's `END`.
///
/// # Errors
///
/// - [`DcmError::MalformedBlockHeader`] if the opening line lacks the name or a
///   required dimension.
/// - [`DcmError::NotNumeric`] for a non-numeric `WERT`, `ST/X` or `ST/Y` token.
/// - [`DcmError::ValueBeforeCoordinate`] for map values before any `ST/Y`.
/// - [`DcmError::UnexpectedEof`] if the input ends before `END`.
pub fn deserialize_element(
    kind: ElementKind,
    rest: &str,
    cursor: &mut LineCursor<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<Element, DcmError> {
    let start_line = cursor.line_number();
    let malformed = |message: &str| DcmError::MalformedBlockHeader {
        message: message.to_string(),
        context: ErrorContext::with_line(start_line).with_parsing(format!("{kind} {rest}")),
    };

    let header = block_header(rest, declared_dimensions(kind))
        .ok_or_else(|| malformed("expected a name and dimensions"))?;
    let (x_dimension, y_dimension) = dimensions(kind, &header).map_err(malformed)?;
    let scope = BlockScope {
        kind,
        name: header.name,
        label: format!("{kind} {}", header.name),
        start_line,
        x_dimension,
        y_dimension,
    };
    log::debug!("Parsing {} at line {}", scope.label, start_line);
    if !header.trailing.is_empty() {
        diagnostics.report(
            start_line,
            DiagnosticKind::MalformedField,
            format!("'{}' after {} ignored", header.trailing, scope.label),
        );
    }

    let mut attributes = Attributes::default();
    let mut body = Body::new(kind);

    loop {
        let Some((line_number, line)) = cursor.next_line() else {
            return Err(DcmError::UnexpectedEof {
                context: scope.context(cursor.line_number()),
            });
        };
        if line.is_empty() {
            continue;
        }
        if is_comment(line) {
            apply_comment(&mut attributes, line);
            continue;
        }

        let (keyword, rest) = split_keyword(line);
        if keyword == "END" {
            break;
        }
        let Some(field) = Field::from_keyword(keyword).filter(|f| f.accepted_by(kind)) else {
            diagnostics.report(
                line_number,
                DiagnosticKind::UnknownField,
                format!("'{keyword}' in {}", scope.label),
            );
            continue;
        };

        match field {
            Field::Langname => attributes.description = Some(string_field(rest)),
            Field::Displayname => attributes.display_name = Some(string_field(rest)),
            Field::Funktion => attributes.function = Some(string_field(rest)),
            Field::EinheitW => attributes.units_value = Some(string_field(rest)),
            Field::EinheitX => attributes.units_x = Some(string_field(rest)),
            Field::EinheitY => attributes.units_y = Some(string_field(rest)),
            Field::Var => match variant(rest) {
                Some((name, value)) => {
                    attributes
                        .variants
                        .insert(name.to_string(), convert_variant(value));
                }
                None => diagnostics.report(
                    line_number,
                    DiagnosticKind::MalformedField,
                    format!("VAR without '<name>=<value>' in {}", scope.label),
                ),
            },
            Field::Wert => body.push_wert(&scope, rest, line_number)?,
            Field::Text => body.push_text(&scope, rest, line_number)?,
            Field::StX => body.push_x(scope.numbers(rest, line_number)?),
            Field::StY => {
                let y = convert_value(rest).map_err(scope.not_numeric(line_number))?;
                body.set_y(y);
            }
        }
    }

    let data = body.finish(&scope, diagnostics);
    Ok(Element::new(header.name, data).with_attributes(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_block(text: &str) -> (Result<Element, DcmError>, Vec<crate::types::Diagnostic>) {
        let mut cursor = LineCursor::new(text);
        let mut diagnostics = Diagnostics::new();
        let (_, first) = cursor.next_line().unwrap();
        let (keyword, rest) = split_keyword(first);
        let kind = ElementKind::from_keyword(keyword).unwrap();
        let result = deserialize_element(kind, rest, &mut cursor, &mut diagnostics);
        (result, diagnostics.into_vec())
    }

    #[test]
    fn test_parameter_number_and_text() {
        let (element, diagnostics) = parse_block("FESTWERT p\n  WERT 5\nEND");
        let element = element.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(element.as_parameter().unwrap().value(), Some(Number::Int(5)));

        let (element, _) = parse_block("FESTWERT p\n  TEXT \"X\"\nEND");
        let parameter = element.unwrap();
        let parameter = parameter.as_parameter().unwrap();
        assert_eq!(parameter.value(), None);
        assert_eq!(parameter.text_value(), Some("X"));
    }

    #[test]
    fn test_block_rows_continue_until_full() {
        let text = "FESTWERTEBLOCK b 3 @ 2\n  WERT 1 2\n  WERT 3\n  WERT 4 5 6\nEND";
        let (element, diagnostics) = parse_block(text);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let element = element.unwrap();
        let block = element.as_parameter_block().unwrap();
        assert_eq!(block.values.len(), 2);
        assert_eq!(block.get(2, 0), Some(&Value::from(3)));
        assert_eq!(block.get(0, 1), Some(&Value::from(4)));
    }

    #[test]
    fn test_line_dimension_mismatch_is_reported() {
        let text = "KENNLINIE foo 3\n  ST/X 1 2\n  WERT 0.5 0.6 0.7\nEND";
        let (element, diagnostics) = parse_block(text);
        let element = element.unwrap();
        assert_eq!(element.as_characteristic_line().unwrap().values.len(), 2);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::DimensionMismatch));
        assert!(diagnostics.iter().all(|d| d.line == 1));
        assert!(diagnostics[1].message.contains("dropped"));
    }

    #[test]
    fn test_trailing_opening_line_text_is_a_warning() {
        let (element, diagnostics) = parse_block("KENNLINIE l 2 3
  ST/X 1 2
  WERT 3 4
END");
        let element = element.unwrap();
        assert_eq!(element.as_characteristic_line().unwrap().x_dimension, 2);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::MalformedField);
        assert_eq!(diagnostics[0].message, "'3' after KENNLINIE l ignored");

        let (element, diagnostics) = parse_block("FESTWERT p 3
  WERT 1
END");
        assert_eq!(element.unwrap().name(), "p");
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_map_value_before_coordinate() {
        let text = "KENNFELD m 2 1\n  ST/X 1 2\n  WERT 1 2\nEND";
        let (result, _) = parse_block(text);
        match result {
            Err(DcmError::ValueBeforeCoordinate { element, context }) => {
                assert_eq!(element, "m");
                assert_eq!(context.line, Some(3));
            }
            other => panic!("expected ValueBeforeCoordinate, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_and_bad_variant_are_warnings() {
        let text = "FESTWERT p\n  ST/X 1\n  VAR broken\n  WERT 1\nEND";
        let (element, diagnostics) = parse_block(text);
        assert!(element.is_ok());
        let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnknownField, DiagnosticKind::MalformedField]
        );
        assert_eq!(diagnostics[0].line, 2);
    }

    #[test]
    fn test_missing_end_is_fatal() {
        let (result, _) = parse_block("KENNLINIE foo 2\n  ST/X 1 2\n");
        assert!(matches!(
            result,
            Err(DcmError::UnexpectedEof { ref context }) if context.line == Some(2)
        ));
    }

    #[test]
    fn test_malformed_opening_lines() {
        for text in ["KENNLINIE foo\nEND", "KENNFELD m 2\nEND", "FESTWERTEBLOCK b x\nEND"] {
            let (result, _) = parse_block(text);
            assert!(
                matches!(result, Err(DcmError::MalformedBlockHeader { .. })),
                "{text}: {result:?}"
            );
        }
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let (result, _) = parse_block("STUETZSTELLENVERTEILUNG d 2\n  ST/X 1 abc\nEND");
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot convert 'abc' from string to number at line 2, while parsing STUETZSTELLENVERTEILUNG d"
        );
    }
}
