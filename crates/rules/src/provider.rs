//! Resolution of the attributes a rule copies.

use std::sync::Arc;

use attrsync_catalog::{Attribute, AttributeRepository, CatalogError, CatalogResult, FamilyRepository};

pub trait RuleAttributeProvider: Send + Sync {
    /// Attributes present in both families, in the source family's order.
    fn attributes_for_families(&self, source_family: &str, destination_family: &str) -> CatalogResult<Vec<Attribute>>;

    fn attribute_by_code(&self, code: &str) -> CatalogResult<Option<Attribute>>;
}

/// Provider backed by the family and attribute catalogs.
pub struct FamilyRuleAttributeProvider {
    families: Arc<dyn FamilyRepository>,
    attributes: Arc<dyn AttributeRepository>,
}

impl FamilyRuleAttributeProvider {
    pub fn new(families: Arc<dyn FamilyRepository>, attributes: Arc<dyn AttributeRepository>) -> Self {
        Self { families, attributes }
    }
}

impl RuleAttributeProvider for FamilyRuleAttributeProvider {
    fn attributes_for_families(&self, source_family: &str, destination_family: &str) -> CatalogResult<Vec<Attribute>> {
        let source = self
            .families
            .find_family(source_family)?
            .ok_or_else(|| CatalogError::UnknownFamily(source_family.to_owned()))?;
        let destination = self
            .families
            .find_family(destination_family)?
            .ok_or_else(|| CatalogError::UnknownFamily(destination_family.to_owned()))?;

        let mut shared = Vec::new();
        for code in source.attributes.iter().filter(|c| destination.has_attribute(c)) {
            match self.attributes.find_attribute(code)? {
                Some(attribute) => shared.push(attribute),
                None => tracing::warn!(attribute = %code, "family attribute missing from attribute catalog"),
            }
        }
        Ok(shared)
    }

    fn attribute_by_code(&self, code: &str) -> CatalogResult<Option<Attribute>> {
        self.attributes.find_attribute(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrsync_catalog::{AttributeType, Family, InMemoryCatalog};

    fn codes(c: &[&str]) -> Vec<String> {
        c.iter().map(|s| s.to_string()).collect()
    }

    fn provider() -> FamilyRuleAttributeProvider {
        let catalog = Arc::new(
            InMemoryCatalog::new()
                .with_attribute(Attribute::new("brand", AttributeType::Text))
                .with_attribute(Attribute::new("name", AttributeType::Text))
                .with_attribute(Attribute::new("gtin", AttributeType::Identifier))
                .with_family(Family::new("source", codes(&["name", "gtin", "brand", "ghost"])))
                .with_family(Family::new("destination", codes(&["brand", "name", "ghost"]))),
        );
        FamilyRuleAttributeProvider::new(catalog.clone(), catalog)
    }

    #[test]
    fn shared_attributes_follow_source_family_order() {
        let shared = provider().attributes_for_families("source", "destination").unwrap();
        let codes: Vec<&str> = shared.iter().map(Attribute::code).collect();
        assert_eq!(codes, vec!["name", "brand"]);
    }

    #[test]
    fn unknown_family_is_an_error() {
        let err = provider().attributes_for_families("source", "nope").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFamily(code) if code == "nope"));
    }
}
