//! # dcmreader
//!
//! Reader and writer for DCM calibration files, the line-oriented text format
//! automotive calibration tools use to exchange parameters, characteristic
//! lines and maps, and axis point distributions.
//!
//! ```rust
//! use dcmreader::{Document, Number};
//!
//! let text = "\
//! KONSERVIERUNG_FORMAT 2.0
//!
//! KENNLINIE idle_speed 2
//!   ST/X 0 40
//!   WERT 800 750
//! END
//! ";
//! let document: Document = text.parse()?;
//! let line = document.get("idle_speed").and_then(|e| e.as_characteristic_line()).unwrap();
//! assert_eq!(line.get(40).and_then(|v| v.as_number()), Some(Number::Int(750)));
//!
//! let written = document.to_string();
//! assert_eq!(written.parse::<Document>()?, document);
//! # Ok::<(), dcmreader::DcmError>(())
//! ```

pub mod dcm;
pub mod model;
pub mod types;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use crate::dcm::{
    DcmError, ErrorContext, ReadOptions, WriteOptions, parse_str, read, read_with_options, write,
    write_with_options,
};
pub use crate::model::{
    Attributes, AxisType, CharacteristicLine, CharacteristicMap, Distribution, Document, Element,
    ElementData, ElementKind, FormatVersion, Function, ModuleHeader, Parameter, ParameterBlock,
    VariantCriterion,
};
pub use crate::types::{Diagnostic, DiagnosticKind, WithWarnings};
pub use crate::value::{ConvertError, Number, Value, convert_value, convert_variant};
