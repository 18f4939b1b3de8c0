//! In-memory model of a DCM document.
//!
//! A [`Document`] holds the file header, the declared format version, the
//! `FUNKTIONEN` list and the named [`Element`]s. Every element shares one set
//! of [`Attributes`] and carries a kind-specific payload in [`ElementData`].

pub mod document;
pub mod element;
pub mod function;
pub mod payload;

use serde::{Deserialize, Serialize};

pub use document::{Document, FormatVersion};
pub use element::{Attributes, Element, ElementData};
pub use function::{Function, ModuleHeader, VariantCriterion};
pub use payload::{CharacteristicLine, CharacteristicMap, Distribution, Parameter, ParameterBlock};

/// How the axis points of a characteristic line or map are stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisType {
    /// Axis points stored with the characteristic (`KENNLINIE`, `KENNFELD`).
    #[default]
    Standard,
    /// Axis points computed from a fixed rule (`FESTKENNLINIE`, `FESTKENNFELD`).
    Fixed,
    /// Axis points shared with a distribution (`GRUPPENKENNLINIE`, `GRUPPENKENNFELD`).
    Group,
}

/// The nine element block kinds, one per opening keyword.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Parameter,
    ParameterBlock,
    CharacteristicLine,
    FixedCharacteristicLine,
    GroupCharacteristicLine,
    CharacteristicMap,
    FixedCharacteristicMap,
    GroupCharacteristicMap,
    Distribution,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Parameter,
        ElementKind::ParameterBlock,
        ElementKind::CharacteristicLine,
        ElementKind::FixedCharacteristicLine,
        ElementKind::GroupCharacteristicLine,
        ElementKind::CharacteristicMap,
        ElementKind::FixedCharacteristicMap,
        ElementKind::GroupCharacteristicMap,
        ElementKind::Distribution,
    ];

    /// The keyword that opens a block of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::Parameter => "FESTWERT",
            ElementKind::ParameterBlock => "FESTWERTEBLOCK",
            ElementKind::CharacteristicLine => "KENNLINIE",
            ElementKind::FixedCharacteristicLine => "FESTKENNLINIE",
            ElementKind::GroupCharacteristicLine => "GRUPPENKENNLINIE",
            ElementKind::CharacteristicMap => "KENNFELD",
            ElementKind::FixedCharacteristicMap => "FESTKENNFELD",
            ElementKind::GroupCharacteristicMap => "GRUPPENKENNFELD",
            ElementKind::Distribution => "STUETZSTELLENVERTEILUNG",
        }
    }

    /// Exact keyword lookup; `FESTWERTEBLOCK` never matches `FESTWERT`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Number of coordinate axes (0 for scalars and blocks).
    pub fn axes(self) -> usize {
        match self {
            ElementKind::Parameter | ElementKind::ParameterBlock => 0,
            ElementKind::CharacteristicLine
            | ElementKind::FixedCharacteristicLine
            | ElementKind::GroupCharacteristicLine
            | ElementKind::Distribution => 1,
            ElementKind::CharacteristicMap
            | ElementKind::FixedCharacteristicMap
            | ElementKind::GroupCharacteristicMap => 2,
        }
    }

    pub(crate) fn line(axis: AxisType) -> Self {
        match axis {
            AxisType::Standard => ElementKind::CharacteristicLine,
            AxisType::Fixed => ElementKind::FixedCharacteristicLine,
            AxisType::Group => ElementKind::GroupCharacteristicLine,
        }
    }

    pub(crate) fn map(axis: AxisType) -> Self {
        match axis {
            AxisType::Standard => ElementKind::CharacteristicMap,
            AxisType::Fixed => ElementKind::FixedCharacteristicMap,
            AxisType::Group => ElementKind::GroupCharacteristicMap,
        }
    }

    /// Axis storage of line and map kinds.
    pub fn axis_type(self) -> Option<AxisType> {
        match self {
            ElementKind::CharacteristicLine | ElementKind::CharacteristicMap => {
                Some(AxisType::Standard)
            }
            ElementKind::FixedCharacteristicLine | ElementKind::FixedCharacteristicMap => {
                Some(AxisType::Fixed)
            }
            ElementKind::GroupCharacteristicLine | ElementKind::GroupCharacteristicMap => {
                Some(AxisType::Group)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
