use serde::{Deserialize, Serialize};

/// Entry of the `FUNKTIONEN` list: `FKT <name> "<version>" "<description>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    pub(crate) fn sort_key(&self) -> (&str, &str, &str) {
        (&self.name, &self.version, &self.description)
    }
}

/// Module header line: `MODULKOPF <key> "<text>"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleHeader {
    pub key: String,
    pub text: String,
}

/// Variant criterion of a `VARIANTENKODIERUNG` block:
/// `KRITERIUM <name> <value...>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantCriterion {
    pub name: String,
    pub values: Vec<String>,
}
