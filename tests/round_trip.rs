//! Round-trip tests for DCM parsing and serialization.
//!
//! A document is parsed, written back to text and parsed again; both parses
//! must describe the same calibration data.

use dcmreader::{
    Attributes, AxisType, CharacteristicLine, CharacteristicMap, Document, Element, Number,
    ParameterBlock, Value, convert_value,
};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Helper function to perform a round-trip: parse → serialize → parse → compare
fn round_trip_test(text: &str, description: &str) -> Document {
    let first: Document = text
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", description, e));

    let serialized = first.to_string();

    let second: Document = serialized
        .parse()
        .unwrap_or_else(|e| panic!("Failed to re-parse {}: {}\n{}", description, e, serialized));

    assert_eq!(first, second, "Round-trip failed for {}", description);
    second
}

fn document_with(element: Element) -> Document {
    let mut document = Document::new();
    document.insert(element).unwrap();
    document
}

#[test]
fn test_round_trip_sample_file() {
    round_trip_test(include_str!("data/sample.dcm"), "sample file");
}

#[test]
fn test_round_trip_keeps_number_flavour() {
    let text = "\
KONSERVIERUNG_FORMAT 2.0
FESTWERTEBLOCK flags 4
  WERT 1 2.0 -3 1e-7
END
";
    let document = round_trip_test(text, "mixed numbers");
    let block = document
        .get("flags")
        .and_then(|e| e.as_parameter_block())
        .unwrap();
    let flavours: Vec<bool> = block.values[0]
        .iter()
        .map(|v| v.as_number().unwrap().is_integer())
        .collect();
    assert_eq!(flavours, vec![true, false, true, false]);
}

#[test]
fn test_round_trip_wrapped_arrays() {
    let text = "\
KONSERVIERUNG_FORMAT 2.0
FESTWERTEBLOCK wide 8 @ 2
  WERT 1 2 3 4 5 6 7 8
  WERT 9 10 11 12 13 14 15 16
END
";
    let document = round_trip_test(text, "wrapped block");
    let serialized = document.to_string();
    assert_eq!(serialized.matches("  WERT").count(), 4);
}

#[test]
fn test_round_trip_text_and_variants() {
    let text = "\
* Header with
*
* an empty line
KONSERVIERUNG_FORMAT 2.0
VARIANTENKODIERUNG
  KRITERIUM Market EU \"North America\"
END
FESTWERT mode
* Selected mode
  LANGNAME \"Operating mode\"
  TEXT \"Sport plus\"
  VAR Market=\"Eco\"
  VAR Level=3
END
";
    let document = round_trip_test(text, "text and variants");
    assert_eq!(document.header, "Header with\n\nan empty line\n");
    assert_eq!(
        document.variant_coding[0].values,
        vec!["EU".to_string(), "North America".to_string()]
    );
    let element = document.get("mode").unwrap();
    assert_eq!(element.attributes.variants["Market"], Value::from("Eco"));
    assert_eq!(element.attributes.variants["Level"], Value::from(3));
}

#[test]
fn test_round_trip_empty_comment_lines() {
    let text = "\
KONSERVIERUNG_FORMAT 2.0
FESTWERT noted
* note
*
  WERT 1
END
FESTWERT blank
!
  WERT 2
END
";
    let document = round_trip_test(text, "empty comment lines");
    let comment = |name: &str| document.get(name).unwrap().attributes.comment.clone();
    assert_eq!(comment("noted").as_deref(), Some("note\n"));
    assert_eq!(comment("blank").as_deref(), Some(""));
}

#[test]
fn test_round_trip_empty_document() {
    let document = round_trip_test("KONSERVIERUNG_FORMAT 1.0\n", "empty document");
    assert!(document.is_empty());
    assert!(!document.to_string().contains("FUNKTIONEN"));
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e12..1.0e12f64
}

fn comment_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9]([A-Za-z0-9 .,:-]{0,20}[A-Za-z0-9])?",
    ]
}

fn variant_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        finite().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "v_[a-z]{1,6}".prop_map(Value::from),
    ]
}

fn attributes() -> impl Strategy<Value = Attributes> {
    let texts = (
        prop::option::of("[A-Za-z]([A-Za-z ]{0,10}[A-Za-z])?"),
        prop::option::of("[A-Za-z][A-Za-z0-9_]{0,10}"),
        prop::option::of("[A-Z][A-Za-z]{0,8}"),
        prop::option::of("[a-z%/]{1,4}"),
        prop::option::of("[a-z%/]{1,4}"),
        prop::option::of("[a-z%/]{1,4}"),
    );
    let extras = (
        prop::collection::vec(("[A-Z][a-z]{0,6}", variant_value()), 0..3),
        prop::option::of(prop::collection::vec(comment_line(), 1..4)),
        prop::option::of("[a-z][a-z0-9_]{0,8}"),
        prop::option::of("[a-z][a-z0-9_]{0,8}"),
    );
    (texts, extras).prop_map(
        |(
            (description, display_name, function, units_value, units_x, units_y),
            (variants, comment, x_mapping, y_mapping),
        )| Attributes {
            description,
            display_name,
            function,
            units_value,
            units_x,
            units_y,
            variants: variants.into_iter().collect(),
            comment: comment.map(|lines| lines.join("\n")),
            x_mapping,
            y_mapping,
        },
    )
}

proptest! {
    #[test]
    fn prop_float_display_parses_back(value in finite()) {
        let written = Number::Float(value).to_string();
        let read = convert_value(&written).unwrap();
        prop_assert!(read.is_float(), "{} read back as {:?}", written, read);
        prop_assert_eq!(read.as_f64(), value);
    }

    #[test]
    fn prop_integer_display_parses_back(value in any::<i64>()) {
        let read = convert_value(&Number::Int(value).to_string()).unwrap();
        prop_assert_eq!(read, Number::Int(value));
        prop_assert!(read.is_integer());
    }

    #[test]
    fn prop_line_round_trip(values in prop::collection::vec(finite(), 1..20)) {
        let line = CharacteristicLine {
            axis: AxisType::Fixed,
            x_dimension: values.len(),
            values: values
                .iter()
                .enumerate()
                .map(|(x, v)| (Number::Int(x as i64 * 10), Value::from(*v)))
                .collect(),
        };
        let document = document_with(Element::new("line", line));
        let read: Document = document.to_string().parse().unwrap();
        prop_assert_eq!(read, document);
    }

    #[test]
    fn prop_map_round_trip(
        (x_dimension, cells) in (1usize..10, 1usize..5)
            .prop_flat_map(|(x, y)| (Just(x), prop::collection::vec(finite(), x * y)))
    ) {
        let x: Vec<Number> = (0..x_dimension).map(|i| Number::Float(i as f64 * 0.5)).collect();
        let values: IndexMap<Number, IndexMap<Number, Value>> = cells
            .chunks(x_dimension)
            .enumerate()
            .map(|(row, chunk)| {
                let row_values = x.iter().copied().zip(chunk.iter().map(|v| Value::from(*v)));
                (Number::Int(row as i64), row_values.collect())
            })
            .collect();
        let map = CharacteristicMap {
            axis: AxisType::Standard,
            x_dimension,
            y_dimension: values.len(),
            values,
        };
        let element = Element::new("map", map).with_attributes(Attributes {
            units_x: Some("rpm".to_string()),
            ..Attributes::default()
        });
        let document = document_with(element);
        let read: Document = document.to_dcm_string_with(4).parse().unwrap();
        prop_assert_eq!(read, document);
    }

    #[test]
    fn prop_attributes_round_trip(attributes in attributes()) {
        let mut map = CharacteristicMap::new(AxisType::Group, 2, 1);
        let row: IndexMap<Number, Value> =
            [(Number::Int(0), Value::from(1)), (Number::Int(5), Value::from(2))]
                .into_iter()
                .collect();
        map.values.insert(Number::Int(0), row);
        let document = document_with(Element::new("map", map).with_attributes(attributes));

        let text = document.to_string();
        let read: Document = text.parse().unwrap();
        prop_assert_eq!(read, document, "{}", text);
    }

    #[test]
    fn prop_block_round_trip(
        rows in prop::collection::vec(prop::collection::vec(any::<i32>(), 7), 1..4)
    ) {
        let block = ParameterBlock {
            x_dimension: 7,
            y_dimension: rows.len(),
            values: rows
                .iter()
                .map(|row| row.iter().map(|v| Value::from(*v)).collect())
                .collect(),
        };
        let document = document_with(Element::new("block", block));
        let read: Document = document.to_string().parse().unwrap();
        prop_assert_eq!(read, document);
    }
}
