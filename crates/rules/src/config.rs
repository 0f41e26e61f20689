//! Engine configuration: which attributes act as matching keys.

use serde::{Deserialize, Serialize};

use attrsync_core::{DomainError, DomainResult};

/// Axis attribute codes.
///
/// - `first_axis`: key shared by the source product and the destination sub
///   product model.
/// - `second_axis_source` / `second_axis_destination`: key read on the source
///   product and matched against the destination variant product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEngineConfig {
    pub first_axis: String,
    pub second_axis_source: String,
    pub second_axis_destination: String,
}

impl Default for RuleEngineConfig {
    fn default() -> Self {
        Self {
            first_axis: "GROUPING_KEY".to_string(),
            second_axis_source: "GTIN".to_string(),
            second_axis_destination: "KNOWN_GTIN".to_string(),
        }
    }
}

impl RuleEngineConfig {
    /// Read the axes from `ATTRSYNC_FIRST_AXIS`, `ATTRSYNC_SECOND_AXIS_SOURCE`
    /// and `ATTRSYNC_SECOND_AXIS_DESTINATION`, falling back to the defaults.
    pub fn from_env() -> DomainResult<Self> {
        let defaults = Self::default();
        let read = |key: &str, fallback: String| std::env::var(key).unwrap_or(fallback);

        let config = Self {
            first_axis: read("ATTRSYNC_FIRST_AXIS", defaults.first_axis),
            second_axis_source: read("ATTRSYNC_SECOND_AXIS_SOURCE", defaults.second_axis_source),
            second_axis_destination: read(
                "ATTRSYNC_SECOND_AXIS_DESTINATION",
                defaults.second_axis_destination,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid rule engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        for (name, code) in [
            ("first_axis", &self.first_axis),
            ("second_axis_source", &self.second_axis_source),
            ("second_axis_destination", &self.second_axis_destination),
        ] {
            if code.trim().is_empty() {
                return Err(DomainError::validation(format!("{name} cannot be empty")));
            }
        }
        Ok(())
    }
}
