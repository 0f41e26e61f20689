use serde::{Deserialize, Serialize};

use attrsync_catalog::Attribute;

/// A propagation rule: products of `source_family` that carry a value for
/// `key_attribute` push their shared attributes into `destination_family`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    key_attribute: Attribute,
    source_family: String,
    destination_family: String,
}

impl Rule {
    pub fn new(
        key_attribute: Attribute,
        source_family: impl Into<String>,
        destination_family: impl Into<String>,
    ) -> Self {
        Self {
            key_attribute,
            source_family: source_family.into(),
            destination_family: destination_family.into(),
        }
    }

    pub fn key_attribute(&self) -> &Attribute {
        &self.key_attribute
    }

    pub fn source_family(&self) -> &str {
        &self.source_family
    }

    pub fn destination_family(&self) -> &str {
        &self.destination_family
    }
}
