use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    CharacteristicLine, CharacteristicMap, Distribution, ElementKind, Parameter, ParameterBlock,
};
use crate::value::Value;

/// Attributes shared by every element kind.
///
/// Which unit fields are meaningful depends on the kind: scalars and blocks
/// only use `units_value`, lines add `units_x`, maps add `units_y`, and
/// distributions only use `units_x`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attributes {
    /// `LANGNAME`
    pub description: Option<String>,
    /// `DISPLAYNAME`
    pub display_name: Option<String>,
    /// `FUNKTION`
    pub function: Option<String>,
    /// `EINHEIT_W`
    pub units_value: Option<String>,
    /// `EINHEIT_X`
    pub units_x: Option<String>,
    /// `EINHEIT_Y`
    pub units_y: Option<String>,
    /// `VAR name=value`, in file order.
    pub variants: IndexMap<String, Value>,
    /// Block comment lines, joined with `\n`.
    pub comment: Option<String>,
    /// Distribution bound to the x axis (`*SSTX name`).
    pub x_mapping: Option<String>,
    /// Distribution bound to the y axis (`*SSTY name`).
    pub y_mapping: Option<String>,
}

impl Attributes {
    /// Appends one comment line.
    pub fn push_comment(&mut self, line: &str) {
        match self.comment.as_mut() {
            Some(comment) => {
                comment.push('\n');
                comment.push_str(line);
            }
            None => self.comment = Some(line.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementData {
    Parameter(Parameter),
    ParameterBlock(ParameterBlock),
    CharacteristicLine(CharacteristicLine),
    CharacteristicMap(CharacteristicMap),
    Distribution(Distribution),
}

impl From<Parameter> for ElementData {
    fn from(value: Parameter) -> Self {
        ElementData::Parameter(value)
    }
}

impl From<ParameterBlock> for ElementData {
    fn from(value: ParameterBlock) -> Self {
        ElementData::ParameterBlock(value)
    }
}

impl From<CharacteristicLine> for ElementData {
    fn from(value: CharacteristicLine) -> Self {
        ElementData::CharacteristicLine(value)
    }
}

impl From<CharacteristicMap> for ElementData {
    fn from(value: CharacteristicMap) -> Self {
        ElementData::CharacteristicMap(value)
    }
}

impl From<Distribution> for ElementData {
    fn from(value: Distribution) -> Self {
        ElementData::Distribution(value)
    }
}

/// One named record of a DCM document.
///
/// The name is the document-wide key and cannot be changed once the element
/// exists; everything else is freely mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    name: String,
    pub attributes: Attributes,
    pub data: ElementData,
}

impl Element {
    pub fn new(name: impl Into<String>, data: impl Into<ElementData>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::default(),
            data: data.into(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ElementKind {
        match &self.data {
            ElementData::Parameter(_) => ElementKind::Parameter,
            ElementData::ParameterBlock(_) => ElementKind::ParameterBlock,
            ElementData::CharacteristicLine(line) => ElementKind::line(line.axis),
            ElementData::CharacteristicMap(map) => ElementKind::map(map.axis),
            ElementData::Distribution(_) => ElementKind::Distribution,
        }
    }

    /// Key used to order elements when writing: `(function, description, name)`.
    pub fn sort_key(&self) -> (Option<&str>, Option<&str>, &str) {
        (
            self.attributes.function.as_deref(),
            self.attributes.description.as_deref(),
            &self.name,
        )
    }

    pub fn as_parameter(&self) -> Option<&Parameter> {
        match &self.data {
            ElementData::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_parameter_block(&self) -> Option<&ParameterBlock> {
        match &self.data {
            ElementData::ParameterBlock(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_characteristic_line(&self) -> Option<&CharacteristicLine> {
        match &self.data {
            ElementData::CharacteristicLine(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_characteristic_map(&self) -> Option<&CharacteristicMap> {
        match &self.data {
            ElementData::CharacteristicMap(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&Distribution> {
        match &self.data {
            ElementData::Distribution(d) => Some(d),
            _ => None,
        }
    }
}
