//! In-memory catalog for tests/dev.
//!
//! Arena-style: entities are keyed by identity and hierarchy links are ordered
//! vectors of child identifiers, kept in insertion order.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use attrsync_core::ProductId;

use crate::attribute::Attribute;
use crate::entity::EntityWithValues;
use crate::error::{CatalogError, CatalogResult};
use crate::family::Family;
use crate::product::Product;
use crate::product_model::ProductModel;
use crate::repository::{
    AssociationRepository, AttributeRepository, ChannelRepository, EntitySaver, FamilyRepository,
    HierarchyRepository, LocaleRepository,
};

#[derive(Debug, Default)]
struct CatalogState {
    attributes: HashMap<String, Attribute>,
    families: HashMap<String, Family>,
    channels: Vec<String>,
    /// (locale code, activated)
    locales: Vec<(String, bool)>,
    products: HashMap<ProductId, Product>,
    product_models: HashMap<String, ProductModel>,
    sub_models: HashMap<String, Vec<String>>,
    variant_products: HashMap<String, Vec<ProductId>>,
    product_saves: usize,
    product_model_saves: usize,
}

impl CatalogState {
    fn put_product(&mut self, product: Product) {
        let id = product.id_typed();
        if let Some(parent) = product.parent() {
            let children = self.variant_products.entry(parent.to_owned()).or_default();
            if !children.contains(&id) {
                children.push(id);
            }
        }
        self.products.insert(id, product);
    }

    fn put_product_model(&mut self, model: ProductModel) {
        let code = model.code().to_owned();
        if let Some(parent) = model.parent() {
            let children = self.sub_models.entry(parent.to_owned()).or_default();
            if !children.contains(&code) {
                children.push(code.clone());
            }
        }
        self.product_models.insert(code, model);
    }
}

/// In-memory implementation of every catalog collaborator.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(self, attribute: Attribute) -> Self {
        self.add_attribute(attribute);
        self
    }

    pub fn with_family(self, family: Family) -> Self {
        self.add_family(family);
        self
    }

    pub fn with_channel(self, code: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.channels.push(code.into());
        }
        self
    }

    pub fn with_locale(self, code: impl Into<String>, activated: bool) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.locales.push((code.into(), activated));
        }
        self
    }

    pub fn add_attribute(&self, attribute: Attribute) {
        if let Ok(mut state) = self.state.write() {
            state.attributes.insert(attribute.code().to_owned(), attribute);
        }
    }

    pub fn add_family(&self, family: Family) {
        if let Ok(mut state) = self.state.write() {
            state.families.insert(family.code.clone(), family);
        }
    }

    /// Seed a product without counting it as a save.
    pub fn insert_product(&self, product: Product) {
        if let Ok(mut state) = self.state.write() {
            state.put_product(product);
        }
    }

    /// Seed a product model without counting it as a save.
    pub fn insert_product_model(&self, model: ProductModel) {
        if let Ok(mut state) = self.state.write() {
            state.put_product_model(model);
        }
    }

    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.state.read().ok()?.products.get(id).cloned()
    }

    pub fn product_by_identifier(&self, identifier: &str) -> Option<Product> {
        let state = self.state.read().ok()?;
        state.products.values().find(|p| p.identifier() == identifier).cloned()
    }

    pub fn product_model(&self, code: &str) -> Option<ProductModel> {
        self.state.read().ok()?.product_models.get(code).cloned()
    }

    /// Number of `save_product` calls so far.
    pub fn product_saves(&self) -> usize {
        self.state.read().map(|s| s.product_saves).unwrap_or(0)
    }

    /// Number of product models persisted through `save_product_models` so far.
    pub fn product_model_saves(&self) -> usize {
        self.state.read().map(|s| s.product_model_saves).unwrap_or(0)
    }

    fn read(&self) -> CatalogResult<RwLockReadGuard<'_, CatalogState>> {
        self.state
            .read()
            .map_err(|_| CatalogError::storage("in-memory catalog lock poisoned"))
    }
}

impl AttributeRepository for InMemoryCatalog {
    fn find_attribute(&self, code: &str) -> CatalogResult<Option<Attribute>> {
        Ok(self.read()?.attributes.get(code).cloned())
    }
}

impl FamilyRepository for InMemoryCatalog {
    fn find_family(&self, code: &str) -> CatalogResult<Option<Family>> {
        Ok(self.read()?.families.get(code).cloned())
    }
}

impl ChannelRepository for InMemoryCatalog {
    fn channel_codes(&self) -> CatalogResult<Vec<String>> {
        Ok(self.read()?.channels.clone())
    }
}

impl LocaleRepository for InMemoryCatalog {
    fn activated_locale_codes(&self) -> CatalogResult<Vec<String>> {
        Ok(self
            .read()?
            .locales
            .iter()
            .filter(|(_, activated)| *activated)
            .map(|(code, _)| code.clone())
            .collect())
    }
}

impl HierarchyRepository for InMemoryCatalog {
    fn sub_product_models(&self, parent_code: &str) -> CatalogResult<Vec<ProductModel>> {
        let state = self.read()?;
        let Some(children) = state.sub_models.get(parent_code) else {
            return Ok(Vec::new());
        };
        Ok(children
            .iter()
            .filter_map(|code| state.product_models.get(code).cloned())
            .collect())
    }

    fn variant_products(&self, model_code: &str) -> CatalogResult<Vec<Product>> {
        let state = self.read()?;
        let Some(children) = state.variant_products.get(model_code) else {
            return Ok(Vec::new());
        };
        Ok(children
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect())
    }
}

impl AssociationRepository for InMemoryCatalog {
    fn associated_product_models(&self, product: &Product) -> CatalogResult<Vec<ProductModel>> {
        let state = self.read()?;
        let mut models = Vec::new();
        for association in product.associations() {
            for code in &association.product_models {
                match state.product_models.get(code) {
                    Some(model) => models.push(model.clone()),
                    None => tracing::warn!(
                        product = product.identifier(),
                        association = %association.association_type,
                        model = %code,
                        "associated product model not found"
                    ),
                }
            }
        }
        Ok(models)
    }
}

impl EntitySaver for InMemoryCatalog {
    fn save_product(&self, product: &Product) -> CatalogResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| CatalogError::storage("in-memory catalog lock poisoned"))?;
        state.put_product(product.clone());
        state.product_saves += 1;
        Ok(())
    }

    fn save_product_models(&self, models: &[ProductModel]) -> CatalogResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| CatalogError::storage("in-memory catalog lock poisoned"))?;
        for model in models {
            state.put_product_model(model.clone());
            state.product_model_saves += 1;
        }
        Ok(())
    }
}
