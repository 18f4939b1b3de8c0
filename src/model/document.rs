use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Element, ElementKind, Function, ModuleHeader, VariantCriterion};
use crate::dcm::errors::{DcmError, ErrorContext};

/// Version declared by `KONSERVIERUNG_FORMAT <major>.<minor>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self { major: 2, minor: 0 }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A parsed DCM document.
///
/// Elements keep file order and are indexed by name; names are unique within
/// a document. Function names live in their own namespace.
///
/// Equality is structural: two documents are equal when they hold the same
/// header, version, module headers, variant coding, the same set of functions
/// and the same elements by name, regardless of the order they appear in.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Leading comment block, one `\n`-terminated line per comment line.
    pub header: String,
    pub format_version: FormatVersion,
    pub module_headers: Vec<ModuleHeader>,
    pub functions: Vec<Function>,
    pub variant_coding: Vec<VariantCriterion>,
    elements: Vec<Element>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element at the end of the document.
    ///
    /// # Errors
    ///
    /// [`DcmError::DuplicateName`] if an element with the same name exists.
    pub fn insert(&mut self, element: Element) -> Result<(), DcmError> {
        if self.index.contains_key(element.name()) {
            return Err(DcmError::DuplicateName {
                name: element.name().to_string(),
                context: ErrorContext::new(),
            });
        }
        self.index
            .insert(element.name().to_string(), self.elements.len());
        self.elements.push(element);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Element> {
        let position = self.index.remove(name)?;
        let element = self.elements.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(element)
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.index.get(name).map(|&i| &self.elements[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.index.get(name).map(|&i| &mut self.elements[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.kind() == kind)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::Parameter)
    }

    pub fn parameter_blocks(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::ParameterBlock)
    }

    pub fn characteristic_lines(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::CharacteristicLine)
    }

    pub fn fixed_characteristic_lines(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::FixedCharacteristicLine)
    }

    pub fn group_characteristic_lines(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::GroupCharacteristicLine)
    }

    pub fn characteristic_maps(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::CharacteristicMap)
    }

    pub fn fixed_characteristic_maps(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::FixedCharacteristicMap)
    }

    pub fn group_characteristic_maps(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::GroupCharacteristicMap)
    }

    pub fn distributions(&self) -> impl Iterator<Item = &Element> {
        self.elements_of(ElementKind::Distribution)
    }

    /// Functions in write order.
    pub fn sorted_functions(&self) -> Vec<&Function> {
        let mut functions: Vec<&Function> = self.functions.iter().collect();
        functions.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        functions
    }

    /// Elements in write order: `(function, description, name)`.
    pub fn sorted_elements(&self) -> Vec<&Element> {
        let mut elements: Vec<&Element> = self.elements.iter().collect();
        elements.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        elements
    }

    /// Reports axis mappings that do not name a distribution of this document.
    pub fn validate(&self) -> Vec<String> {
        crate::dcm::validation::validate_axis_mappings(self)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.format_version == other.format_version
            && self.module_headers == other.module_headers
            && self.variant_coding == other.variant_coding
            && self.sorted_functions() == other.sorted_functions()
            && self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .all(|e| other.get(e.name()).is_some_and(|o| o == e))
    }
}
