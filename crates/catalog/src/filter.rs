//! Attribute applicability filters.
//!
//! Given a normalized entity, drop every attribute that is not legal at the
//! entity's level of its family variant.

use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::family::{Family, FamilyVariant};
use crate::normalizer::NormalizedEntity;
use crate::repository::FamilyRepository;

pub trait AttributeFilter: Send + Sync {
    fn filter(&self, data: NormalizedEntity) -> CatalogResult<NormalizedEntity>;
}

fn load_family(families: &dyn FamilyRepository, code: &str) -> CatalogResult<Family> {
    families
        .find_family(code)?
        .ok_or_else(|| CatalogError::UnknownFamily(code.to_owned()))
}

fn load_variant<'f>(family: &'f Family, data: &NormalizedEntity) -> CatalogResult<&'f FamilyVariant> {
    let code = data
        .family_variant
        .as_deref()
        .ok_or_else(|| CatalogError::MissingFamilyVariant(data.code.clone()))?;
    family.variant(code).ok_or_else(|| CatalogError::UnknownFamilyVariant {
        family: family.code.clone(),
        variant: code.to_owned(),
    })
}

/// Products: a variant product keeps its family variant's last-level attributes;
/// a simple product keeps its family's attributes; a product without family keeps
/// everything.
pub struct ProductAttributeFilter {
    families: Arc<dyn FamilyRepository>,
}

impl ProductAttributeFilter {
    pub fn new(families: Arc<dyn FamilyRepository>) -> Self {
        Self { families }
    }
}

impl AttributeFilter for ProductAttributeFilter {
    fn filter(&self, mut data: NormalizedEntity) -> CatalogResult<NormalizedEntity> {
        let Some(family_code) = data.family.clone() else {
            return Ok(data);
        };
        let family = load_family(self.families.as_ref(), &family_code)?;

        if data.parent.is_none() {
            data.values.retain(|code, _| family.has_attribute(code));
            return Ok(data);
        }

        let variant = load_variant(&family, &data)?;
        let level = variant.number_of_levels();
        data.values.retain(|code, _| variant.is_attribute_of_level(code, level));
        Ok(data)
    }
}

/// Product models: a root model keeps the common attributes (family attributes
/// owned by no variant level); a sub model keeps its level-1 attributes.
pub struct ProductModelAttributeFilter {
    families: Arc<dyn FamilyRepository>,
}

impl ProductModelAttributeFilter {
    pub fn new(families: Arc<dyn FamilyRepository>) -> Self {
        Self { families }
    }
}

impl AttributeFilter for ProductModelAttributeFilter {
    fn filter(&self, mut data: NormalizedEntity) -> CatalogResult<NormalizedEntity> {
        let family_code = data
            .family
            .clone()
            .ok_or_else(|| CatalogError::UnknownFamily(format!("<none> for {}", data.code)))?;
        let family = load_family(self.families.as_ref(), &family_code)?;
        let variant = load_variant(&family, &data)?;

        if data.parent.is_none() {
            data.values
                .retain(|code, _| family.has_attribute(code) && !variant.is_variant_attribute(code));
        } else {
            data.values.retain(|code, _| variant.is_attribute_of_level(code, 1));
        }
        Ok(data)
    }
}
