//! Source → destination attribute pairings.

use serde::{Deserialize, Serialize};

use attrsync_catalog::Attribute;
use attrsync_core::ValueObject;

/// Copy the values of `source` into `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMapping {
    source: Attribute,
    destination: Attribute,
}

impl ValueObject for AttributeMapping {}

impl AttributeMapping {
    pub fn new(source: Attribute, destination: Attribute) -> Self {
        Self { source, destination }
    }

    /// A mapping from an attribute onto itself (same attribute, different family).
    pub fn identity(attribute: Attribute) -> Self {
        Self::new(attribute.clone(), attribute)
    }

    pub fn source(&self) -> &Attribute {
        &self.source
    }

    pub fn destination(&self) -> &Attribute {
        &self.destination
    }
}

/// Ordered mappings. Insertion order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMappingCollection {
    mappings: Vec<AttributeMapping>,
}

impl AttributeMappingCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mapping: AttributeMapping) {
        self.mappings.push(mapping);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Destination attribute codes, in mapping order.
    pub fn destination_codes(&self) -> Vec<&str> {
        self.mappings.iter().map(|m| m.destination().code()).collect()
    }
}

impl FromIterator<AttributeMapping> for AttributeMappingCollection {
    fn from_iter<I: IntoIterator<Item = AttributeMapping>>(iter: I) -> Self {
        Self {
            mappings: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeMappingCollection {
    type Item = &'a AttributeMapping;
    type IntoIter = std::slice::Iter<'a, AttributeMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
