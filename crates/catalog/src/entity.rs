//! Capability shared by products and product models.

use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueCollection};

/// Which kind of hierarchy node an entity is.
///
/// Consulted only where the two kinds genuinely differ: attribute filter choice,
/// save routing and change-event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    ProductModel,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::ProductModel => "product_model",
        }
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity that carries attribute values.
pub trait EntityWithValues: core::fmt::Debug {
    fn kind(&self) -> EntityKind;

    /// Business code (product identifier or product model code).
    fn code(&self) -> &str;

    /// Human-facing label used in diagnostics.
    fn label(&self) -> String {
        self.code().to_owned()
    }

    fn family(&self) -> Option<&str>;

    fn family_variant(&self) -> Option<&str>;

    /// Code of the parent product model, if any.
    fn parent(&self) -> Option<&str>;

    fn values(&self) -> &ValueCollection;

    fn values_mut(&mut self) -> &mut ValueCollection;

    fn value(&self, attribute_code: &str, locale: Option<&str>, channel: Option<&str>) -> Option<&Value> {
        self.values().get(attribute_code, locale, channel)
    }

    fn set_values(&mut self, values: Vec<Value>) {
        let collection = self.values_mut();
        for value in values {
            collection.upsert(value);
        }
    }

    fn remove_value(&mut self, attribute_code: &str, locale: Option<&str>, channel: Option<&str>) -> Option<Value> {
        self.values_mut().remove(attribute_code, locale, channel)
    }
}
