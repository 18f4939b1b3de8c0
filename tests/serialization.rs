//! Layout of written DCM text.

use dcmreader::{
    Attributes, AxisType, CharacteristicLine, Distribution, Document, Element, Function, Number,
    Parameter, Value,
};
use pretty_assertions::assert_eq;

fn field(key: &str, value: &str) -> String {
    format!("  {key: <13} {value}\n")
}

fn element_names(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| line.starts_with("FESTWERT "))
        .filter_map(|line| line.split_whitespace().nth(1))
        .collect()
}

fn with_function(name: &str, function: Option<&str>, description: Option<&str>) -> Element {
    Element::new(name, Parameter::number(1)).with_attributes(Attributes {
        function: function.map(str::to_string),
        description: description.map(str::to_string),
        ..Attributes::default()
    })
}

#[test]
fn test_elements_sorted_by_function_description_name() {
    let mut document = Document::new();
    document.insert(with_function("z", Some("F2"), None)).unwrap();
    document.insert(with_function("y", Some("F1"), Some("b"))).unwrap();
    document.insert(with_function("x", Some("F1"), Some("a"))).unwrap();
    document.insert(with_function("w", None, None)).unwrap();
    document.insert(with_function("v", Some("F1"), Some("a"))).unwrap();

    let text = document.to_string();
    assert_eq!(element_names(&text), vec!["w", "v", "x", "y", "z"]);
    // Insertion order is untouched.
    let names: Vec<_> = document.elements().iter().map(Element::name).collect();
    assert_eq!(names, vec!["z", "y", "x", "w", "v"]);
}

#[test]
fn test_functions_sorted_and_omitted_when_empty() {
    let mut document = Document::new();
    assert!(!document.to_string().contains("FUNKTIONEN"));

    document.functions.push(Function::new("Speed", "2.0", "Speed control"));
    document.functions.push(Function::new("Idle", "1.0", ""));
    let text = document.to_string();
    let expected = "\nFUNKTIONEN\n  FKT Idle \"1.0\" \"\"\n  FKT Speed \"2.0\" \"Speed control\"\nEND\n";
    assert!(text.contains(expected), "{text}");
}

#[test]
fn test_attribute_order() {
    let mut variants = indexmap::IndexMap::new();
    variants.insert("Market".to_string(), Value::from("EU"));
    variants.insert("Gain".to_string(), Value::from(0.5));
    let attributes = Attributes {
        description: Some("Idle speed".to_string()),
        display_name: Some("n_idle".to_string()),
        function: Some("Idle".to_string()),
        units_value: Some("rpm".to_string()),
        units_x: Some("°C".to_string()),
        variants,
        comment: Some("Tuned\n\nby hand".to_string()),
        x_mapping: Some("temp_axis".to_string()),
        ..Attributes::default()
    };
    let mut line = CharacteristicLine::new(AxisType::Group, 2);
    line.values.insert(Number::Int(-10), Value::from(900));
    line.values.insert(Number::Int(80), Value::from(750));
    let element = Element::new("idle", line).with_attributes(attributes);

    let expected = [
        "GRUPPENKENNLINIE idle 2\n".to_string(),
        "* Tuned\n*\n* by hand\n".to_string(),
        field("LANGNAME", "\"Idle speed\""),
        field("FUNKTION", "\"Idle\""),
        field("DISPLAYNAME", "n_idle"),
        field("EINHEIT_X", "\"°C\""),
        field("EINHEIT_W", "\"rpm\""),
        "*SSTX temp_axis\n".to_string(),
        field("ST/X", "-10 80"),
        field("WERT", "900 750"),
        field("VAR", "Market=\"EU\""),
        field("VAR", "Gain=0.5"),
        "END\n".to_string(),
    ]
    .concat();
    assert_eq!(element.to_string(), expected);
}

#[test]
fn test_values_per_line() {
    let mut distribution = Distribution::new(5);
    distribution.values = (1..=5).map(Number::from).collect();
    let mut document = Document::new();
    document
        .insert(Element::new("axis", distribution))
        .unwrap();

    let default_width = document.to_string();
    assert!(default_width.contains(&field("ST/X", "1 2 3 4 5")));

    let narrow = document.to_dcm_string_with(2);
    let expected = [field("ST/X", "1 2"), field("ST/X", "3 4"), field("ST/X", "5")].concat();
    assert!(narrow.contains(&expected), "{narrow}");
}

#[test]
fn test_float_and_text_values() {
    let mut document = Document::new();
    document
        .insert(Element::new("f", Parameter::number(3.0)))
        .unwrap();
    document
        .insert(Element::new("big", Parameter::number(1e21)))
        .unwrap();
    document
        .insert(Element::new("t", Parameter::text("a b")))
        .unwrap();

    let text = document.to_string();
    assert!(text.contains(&field("WERT", "3.0")));
    assert!(text.contains(&field("WERT", "1.0e21")));
    assert!(text.contains(&field("TEXT", "\"a b\"")));
}

#[test]
fn test_header_is_written_as_comments() {
    let mut document = Document::new();
    document.header = "First\nSecond\n".to_string();
    let text = document.to_string();
    assert!(text.starts_with("* First\n* Second\n\nKONSERVIERUNG_FORMAT 2.0\n"));
}
