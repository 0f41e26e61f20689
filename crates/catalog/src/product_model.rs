//! Product model: an internal hierarchy node grouping sub models or variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attrsync_core::Entity;

use crate::entity::{EntityKind, EntityWithValues};
use crate::value::ValueCollection;

/// Product model node.
///
/// Children are not owned here; the hierarchy store keeps the ordered child
/// lists and resolves them by parent code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    code: String,
    family: String,
    family_variant: Option<String>,
    parent: Option<String>,
    values: ValueCollection,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl ProductModel {
    pub fn new(code: impl Into<String>, family: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            code: code.into(),
            family: family.into(),
            family_variant: None,
            parent: None,
            values: ValueCollection::new(),
            created: now,
            updated: now,
        }
    }

    pub fn with_family_variant(mut self, variant: impl Into<String>) -> Self {
        self.family_variant = Some(variant.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_values(mut self, values: ValueCollection) -> Self {
        self.values = values;
        self
    }

    pub fn family_code(&self) -> &str {
        &self.family
    }

    pub fn set_family_variant(&mut self, variant: impl Into<String>) {
        self.family_variant = Some(variant.into());
    }

    pub fn set_parent(&mut self, parent: impl Into<String>) {
        self.parent = Some(parent.into());
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = now;
    }
}

impl Entity for ProductModel {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

impl EntityWithValues for ProductModel {
    fn kind(&self) -> EntityKind {
        EntityKind::ProductModel
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn family(&self) -> Option<&str> {
        Some(&self.family)
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
