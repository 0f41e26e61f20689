//! Families and family variants.

use serde::{Deserialize, Serialize};

/// Attribute set of one variant level (1 = sub model, last = variant product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttributeSet {
    pub level: u8,
    pub axes: Vec<String>,
    pub attributes: Vec<String>,
}

impl VariantAttributeSet {
    pub fn new(level: u8, axes: Vec<String>, attributes: Vec<String>) -> Self {
        Self { level, axes, attributes }
    }

    fn contains(&self, code: &str) -> bool {
        self.axes.iter().chain(&self.attributes).any(|c| c == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyVariant {
    pub code: String,
    pub attribute_sets: Vec<VariantAttributeSet>,
}

impl FamilyVariant {
    pub fn new(code: impl Into<String>, attribute_sets: Vec<VariantAttributeSet>) -> Self {
        Self {
            code: code.into(),
            attribute_sets,
        }
    }

    pub fn number_of_levels(&self) -> u8 {
        self.attribute_sets.iter().map(|s| s.level).max().unwrap_or(0)
    }

    pub fn attribute_set(&self, level: u8) -> Option<&VariantAttributeSet> {
        self.attribute_sets.iter().find(|s| s.level == level)
    }

    /// Whether `code` is owned by any variant level (as opposed to the common
    /// attributes held by the root model).
    pub fn is_variant_attribute(&self, code: &str) -> bool {
        self.attribute_sets.iter().any(|s| s.contains(code))
    }

    /// Whether `code` belongs to the given level (axes included).
    pub fn is_attribute_of_level(&self, code: &str, level: u8) -> bool {
        self.attribute_set(level).is_some_and(|s| s.contains(code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub code: String,
    /// Attribute codes of the family, in family order.
    pub attributes: Vec<String>,
    /// Family variants, in declaration order.
    pub variants: Vec<FamilyVariant>,
}

impl Family {
    pub fn new(code: impl Into<String>, attributes: Vec<String>) -> Self {
        Self {
            code: code.into(),
            attributes,
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: FamilyVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn has_attribute(&self, code: &str) -> bool {
        self.attributes.iter().any(|c| c == code)
    }

    pub fn first_variant(&self) -> Option<&FamilyVariant> {
        self.variants.first()
    }

    pub fn variant(&self, code: &str) -> Option<&FamilyVariant> {
        self.variants.iter().find(|v| v.code == code)
    }
}
