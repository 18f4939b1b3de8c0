//! Field keywords accepted inside element blocks, and the comment directives
//! that carry axis mappings.

use crate::model::{Attributes, ElementKind};

use super::tokens::split_keyword;

/// Characters that open a comment line.
pub const COMMENT_MARKERS: [char; 3] = ['!', '*', '.'];

/// A keyword that may start a line inside an element block.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Langname,
    Displayname,
    Funktion,
    EinheitW,
    EinheitX,
    EinheitY,
    Wert,
    Text,
    StX,
    StY,
    Var,
}

impl Field {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let field = match keyword {
            "LANGNAME" => Field::Langname,
            "DISPLAYNAME" => Field::Displayname,
            "FUNKTION" => Field::Funktion,
            "EINHEIT_W" => Field::EinheitW,
            "EINHEIT_X" => Field::EinheitX,
            "EINHEIT_Y" => Field::EinheitY,
            "WERT" => Field::Wert,
            "TEXT" => Field::Text,
            "ST/X" => Field::StX,
            "ST/Y" => Field::StY,
            "VAR" => Field::Var,
            _ => return None,
        };
        Some(field)
    }

    /// Whether a block of `kind` understands this field.
    pub fn accepted_by(self, kind: ElementKind) -> bool {
        match self {
            Field::Langname | Field::Displayname | Field::Funktion | Field::Var => true,
            Field::EinheitW | Field::Wert | Field::Text => kind != ElementKind::Distribution,
            Field::EinheitX | Field::StX => kind.axes() > 0,
            Field::EinheitY | Field::StY => kind.axes() == 2,
        }
    }
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKERS)
}

/// Handler of a comment directive; receives the trimmed argument.
pub type DirectiveHandler = fn(&mut Attributes, &str);

/// Comment sub-keywords that set attributes instead of adding comment text.
pub const COMMENT_DIRECTIVES: &[(&str, DirectiveHandler)] = &[
    ("SSTX", |attributes, name| {
        attributes.x_mapping = Some(name.to_string())
    }),
    ("SSTY", |attributes, name| {
        attributes.y_mapping = Some(name.to_string())
    }),
];

/// Applies one comment line to `attributes`.
///
/// The marker is stripped; a recognised directive with an argument sets its
/// attribute, anything else is appended to the block comment.
pub fn apply_comment(attributes: &mut Attributes, line: &str) {
    let content = line
        .strip_prefix(COMMENT_MARKERS)
        .unwrap_or(line)
        .trim();
    let (keyword, argument) = split_keyword(content);

    let directive = COMMENT_DIRECTIVES
        .iter()
        .find(|(name, _)| *name == keyword && !argument.is_empty());
    match directive {
        Some((_, handler)) => handler(attributes, argument),
        None => attributes.push_comment(content),
    }
}
