//! Collaborator contracts for catalog lookups and persistence.
//!
//! The rule engine never assumes an in-memory tree: child lists are always
//! fetched through [`HierarchyRepository`], in the store's natural order.

use crate::attribute::Attribute;
use crate::error::CatalogResult;
use crate::family::Family;
use crate::product::Product;
use crate::product_model::ProductModel;

/// Attribute catalog.
pub trait AttributeRepository: Send + Sync {
    fn find_attribute(&self, code: &str) -> CatalogResult<Option<Attribute>>;
}

pub trait FamilyRepository: Send + Sync {
    fn find_family(&self, code: &str) -> CatalogResult<Option<Family>>;
}

/// Channel directory.
pub trait ChannelRepository: Send + Sync {
    fn channel_codes(&self) -> CatalogResult<Vec<String>>;
}

/// Locale directory.
pub trait LocaleRepository: Send + Sync {
    fn activated_locale_codes(&self) -> CatalogResult<Vec<String>>;
}

/// Read access to the product model hierarchy.
pub trait HierarchyRepository: Send + Sync {
    /// Direct child product models of `parent_code`, in natural order.
    fn sub_product_models(&self, parent_code: &str) -> CatalogResult<Vec<ProductModel>>;

    /// Products whose parent is `model_code`, in natural order.
    fn variant_products(&self, model_code: &str) -> CatalogResult<Vec<Product>>;
}

/// Association discovery.
pub trait AssociationRepository: Send + Sync {
    /// Product models linked from `product`, in association order.
    fn associated_product_models(&self, product: &Product) -> CatalogResult<Vec<ProductModel>>;
}

/// Persistence (idempotent upsert by identity).
pub trait EntitySaver: Send + Sync {
    fn save_product(&self, product: &Product) -> CatalogResult<()>;

    fn save_product_models(&self, models: &[ProductModel]) -> CatalogResult<()>;
}
