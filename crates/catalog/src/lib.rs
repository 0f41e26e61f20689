//! Catalog domain module.
//!
//! Products, product models, families and attribute values, plus the collaborator
//! contracts the rule engine talks to (attribute catalog, channel/locale directory,
//! hierarchy store, normalizer/filters, property copier, value comparator).
//!
//! The `in_memory` module provides reference implementations of every
//! collaborator for tests and local runs.

pub mod attribute;
pub mod compare;
pub mod copier;
pub mod entity;
pub mod error;
pub mod family;
pub mod filter;
pub mod in_memory;
pub mod normalizer;
pub mod product;
pub mod product_model;
pub mod repository;
pub mod value;

pub use attribute::{Attribute, AttributeType};
pub use compare::{Comparison, StandardValueComparator, ValueComparator};
pub use copier::{CopyOptions, PropertyCopier, StandardPropertyCopier};
pub use entity::{EntityKind, EntityWithValues};
pub use error::{CatalogError, CatalogResult};
pub use family::{Family, FamilyVariant, VariantAttributeSet};
pub use filter::{AttributeFilter, ProductAttributeFilter, ProductModelAttributeFilter};
pub use in_memory::InMemoryCatalog;
pub use normalizer::{NormalizedEntity, Normalizer, StandardNormalizer};
pub use product::{Association, Product};
pub use product_model::ProductModel;
pub use repository::{
    AssociationRepository, AttributeRepository, ChannelRepository, EntitySaver, FamilyRepository,
    HierarchyRepository, LocaleRepository,
};
pub use value::{TableRow, Value, ValueBuilder, ValueCollection, ValueData};
