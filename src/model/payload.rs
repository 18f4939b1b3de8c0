//! Kind-specific payloads of DCM elements.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::AxisType;
use crate::value::{Number, Value};

/// Scalar parameter (`FESTWERT`).
///
/// Holds either a number (`WERT`) or a text (`TEXT`), never both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Parameter {
    pub value: Option<Value>,
}

impl Parameter {
    pub fn number(value: impl Into<Number>) -> Self {
        Self {
            value: Some(Value::Number(value.into())),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            value: Some(Value::Text(text.into())),
        }
    }

    /// The numeric value, `None` for text parameters.
    pub fn value(&self) -> Option<Number> {
        self.value.as_ref().and_then(Value::as_number)
    }

    /// The text value, `None` for numeric parameters.
    pub fn text_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_text)
    }
}

/// Parameter block (`FESTWERTEBLOCK`), a 1-D or 2-D grid indexed `[y][x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBlock {
    pub x_dimension: usize,
    /// 1 when the opening line has no `@ y` suffix.
    pub y_dimension: usize,
    pub values: Vec<Vec<Value>>,
}

impl ParameterBlock {
    pub fn new(x_dimension: usize, y_dimension: usize) -> Self {
        Self {
            x_dimension,
            y_dimension,
            values: Vec::new(),
        }
    }

    pub fn is_two_dimensional(&self) -> bool {
        self.y_dimension > 1
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Value> {
        self.values.get(y).and_then(|row| row.get(x))
    }
}

/// Characteristic line (`KENNLINIE`, `FESTKENNLINIE`, `GRUPPENKENNLINIE`).
///
/// `values` pairs each `ST/X` coordinate with the `WERT` at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicLine {
    pub axis: AxisType,
    pub x_dimension: usize,
    pub values: IndexMap<Number, Value>,
}

impl CharacteristicLine {
    pub fn new(axis: AxisType, x_dimension: usize) -> Self {
        Self {
            axis,
            x_dimension,
            values: IndexMap::new(),
        }
    }

    pub fn get(&self, x: impl Into<Number>) -> Option<&Value> {
        self.values.get(&x.into())
    }

    pub fn x_coordinates(&self) -> impl Iterator<Item = Number> + '_ {
        self.values.keys().copied()
    }
}

/// Characteristic map (`KENNFELD`, `FESTKENNFELD`, `GRUPPENKENNFELD`).
///
/// `values[y][x]`: the outer keys are the `ST/Y` coordinates, each inner map
/// pairs the shared `ST/X` vector with one `WERT` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicMap {
    pub axis: AxisType,
    pub x_dimension: usize,
    pub y_dimension: usize,
    pub values: IndexMap<Number, IndexMap<Number, Value>>,
}

impl CharacteristicMap {
    pub fn new(axis: AxisType, x_dimension: usize, y_dimension: usize) -> Self {
        Self {
            axis,
            x_dimension,
            y_dimension,
            values: IndexMap::new(),
        }
    }

    /// Looks up the value at `(x, y)`.
    pub fn get(&self, x: impl Into<Number>, y: impl Into<Number>) -> Option<&Value> {
        self.values.get(&y.into()).and_then(|row| row.get(&x.into()))
    }

    /// The x axis, taken from the first row.
    pub fn x_coordinates(&self) -> Vec<Number> {
        self.values
            .values()
            .next()
            .map(|row| row.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn y_coordinates(&self) -> impl Iterator<Item = Number> + '_ {
        self.values.keys().copied()
    }
}

/// Axis point distribution (`STUETZSTELLENVERTEILUNG`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub x_dimension: usize,
    pub values: Vec<Number>,
}

impl Distribution {
    pub fn new(x_dimension: usize) -> Self {
        Self {
            x_dimension,
            values: Vec::new(),
        }
    }
}
