//! Generic property representation of an entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::entity::{EntityKind, EntityWithValues};
use crate::error::CatalogResult;

/// Standard-format view of an entity: identity, placement and values keyed by
/// attribute code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEntity {
    pub code: String,
    pub kind: EntityKind,
    pub family: Option<String>,
    pub family_variant: Option<String>,
    pub parent: Option<String>,
    pub values: BTreeMap<String, JsonValue>,
}

pub trait Normalizer: Send + Sync {
    fn normalize(&self, entity: &dyn EntityWithValues) -> CatalogResult<NormalizedEntity>;
}

/// Groups cells by attribute code as `[{locale, scope, data}, ...]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardNormalizer;

impl Normalizer for StandardNormalizer {
    fn normalize(&self, entity: &dyn EntityWithValues) -> CatalogResult<NormalizedEntity> {
        let mut values: BTreeMap<String, JsonValue> = BTreeMap::new();
        for value in entity.values().iter() {
            let cell = serde_json::json!({
                "locale": value.locale(),
                "scope": value.channel(),
                "data": serde_json::to_value(value.data())?,
            });
            match values.entry(value.attribute_code().to_owned()).or_insert_with(|| JsonValue::Array(Vec::new())) {
                JsonValue::Array(cells) => cells.push(cell),
                other => *other = JsonValue::Array(vec![cell]),
            }
        }

        Ok(NormalizedEntity {
            code: entity.code().to_owned(),
            kind: entity.kind(),
            family: entity.family().map(str::to_owned),
            family_variant: entity.family_variant().map(str::to_owned),
            parent: entity.parent().map(str::to_owned),
            values,
        })
    }
}
