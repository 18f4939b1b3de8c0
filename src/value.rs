//! # DCM Field Values
//!
//! DCM files carry two kinds of field values: numbers and (usually quoted)
//! text. Numbers come in two flavours that are distinguished purely by how the
//! literal is spelled:
//!
//! | Token   | Result        |
//! |---------|---------------|
//! | `3`     | `Int(3)`      |
//! | `3.0`   | `Float(3.0)`  |
//! | `3.5`   | `Float(3.5)`  |
//! | `1e3`   | `Int(1000)`   |
//! | `-0.25` | `Float(-0.25)`|
//!
//! A token is an integer when it contains no decimal point and its value is
//! mathematically integral. The distinction is observable in written files:
//! integers print without a trailing `.0`, floats always print with one.
//!
//! ```rust
//! use dcmreader::value::{convert_value, convert_variant, Number, Value};
//!
//! assert_eq!(convert_value("3").unwrap(), Number::Int(3));
//! assert!(convert_value("3.0").unwrap().is_float());
//! assert_eq!(convert_variant("\"Gear\""), Value::Text("Gear".to_string()));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while converting a token to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The token is not a floating-point literal.
    #[error("Cannot convert '{0}' from string to number")]
    NotNumeric(String),
}

/// A numeric DCM value that remembers whether it was written as an integer.
///
/// Equality is numeric across the two flavours (`Int(1) == Float(1.0)`), and
/// NaN compares equal to itself so that numbers can be used as map keys.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as `f64`, possibly losing precision for large integers.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// The exact integer a float stands for, if any.
    fn integral_float(value: f64) -> Option<i64> {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            Some(value as i64)
        } else {
            None
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
                Number::integral_float(f) == Some(i) && i as f64 == f
            }
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integral floats hash like the integer they equal.
        match *self {
            Number::Int(v) => v.hash(state),
            Number::Float(v) => match Number::integral_float(v) {
                Some(int) => int.hash(state),
                None if v.is_nan() => f64::NAN.to_bits().hash(state),
                None => v.to_bits().hash(state),
            },
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.as_f64()
    }
}

impl FromStr for Number {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        convert_value(s)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => {
                // Debug formatting is the shortest representation that parses
                // back to the same f64, but drops the '.' for exponent forms.
                let text = format!("{v:?}");
                if !v.is_finite() || text.contains('.') {
                    return f.write_str(&text);
                }
                match text.split_once('e') {
                    Some((mantissa, exponent)) => write!(f, "{mantissa}.0e{exponent}"),
                    None => write!(f, "{text}.0"),
                }
            }
        }
    }
}

/// A field value that is either numeric or text.
///
/// Used for variant overrides (`VAR`), for scalar parameters, and for the
/// cells of arrays, which hold text when the row was given with `TEXT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(Number),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(t) => Some(t),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Text is written quoted, numbers bare.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(t) => write!(f, "\"{t}\""),
        }
    }
}

/// Converts a token to a number, inferring integer or float from its spelling.
///
/// # Errors
///
/// Returns [`ConvertError::NotNumeric`] when the token is not a
/// floating-point literal.
pub fn convert_value(token: &str) -> Result<Number, ConvertError> {
    let token = token.trim();
    let value: f64 = token
        .parse()
        .map_err(|_| ConvertError::NotNumeric(token.to_string()))?;

    if !token.contains('.') {
        if let Ok(int) = token.parse::<i64>() {
            return Ok(Number::Int(int));
        }
        if let Some(int) = Number::integral_float(value) {
            return Ok(Number::Int(int));
        }
    }

    Ok(Number::Float(value))
}

/// Converts the right-hand side of a `VAR` line.
///
/// Numbers are tried first; anything else becomes text with surrounding
/// quotes and spaces removed.
pub fn convert_variant(token: &str) -> Value {
    match convert_value(token) {
        Ok(number) => Value::Number(number),
        Err(_) => Value::Text(token.trim_matches(|c: char| c == '"' || c == ' ').to_string()),
    }
}
