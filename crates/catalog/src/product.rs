//! Product: the hierarchy leaf.

use serde::{Deserialize, Serialize};

use attrsync_core::{Entity, ProductId};

use crate::entity::{EntityKind, EntityWithValues};
use crate::value::ValueCollection;

/// A typed link from a product to other catalog nodes (e.g. "PACK").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub association_type: String,
    /// Codes of the associated product models, in association order.
    pub product_models: Vec<String>,
}

impl Association {
    pub fn new(association_type: impl Into<String>, product_models: Vec<String>) -> Self {
        Self {
            association_type: association_type.into(),
            product_models,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    identifier: String,
    family: Option<String>,
    family_variant: Option<String>,
    parent: Option<String>,
    values: ValueCollection,
    associations: Vec<Association>,
}

impl Product {
    /// A product with no family, parent or values.
    pub fn new(id: ProductId, identifier: impl Into<String>) -> Self {
        Self {
            id,
            identifier: identifier.into(),
            family: None,
            family_variant: None,
            parent: None,
            values: ValueCollection::new(),
            associations: Vec::new(),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_values(mut self, values: ValueCollection) -> Self {
        self.values = values;
        self
    }

    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn set_family_variant(&mut self, variant: impl Into<String>) {
        self.family_variant = Some(variant.into());
    }

    pub fn set_parent(&mut self, parent: impl Into<String>) {
        self.parent = Some(parent.into());
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl EntityWithValues for Product {
    fn kind(&self) -> EntityKind {
        EntityKind::Product
    }

    fn code(&self) -> &str {
        &self.identifier
    }

    fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    fn family_variant(&self) -> Option<&str> {
        self.family_variant.as_deref()
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    fn values(&self) -> &ValueCollection {
        &self.values
    }

    fn values_mut(&mut self) -> &mut ValueCollection {
        &mut self.values
    }
}
