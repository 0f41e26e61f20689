//! Change notifications emitted for every copied value cell.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attrsync_catalog::{Attribute, Value};
use attrsync_events::{Event, EventEnvelope};

/// Envelope type published on the bus.
pub type RuleEventEnvelope = EventEnvelope<RuleEvent>;

/// A value cell of a variant product changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChangedEvent {
    pub product: String,
    pub attribute: Attribute,
    pub locale: Option<String>,
    pub channel: Option<String>,
    pub previous_value: Option<Value>,
    pub new_value: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

/// A value cell of a product model changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModelChangedEvent {
    pub product_model: String,
    pub attribute: Attribute,
    pub locale: Option<String>,
    pub channel: Option<String>,
    pub previous_value: Option<Value>,
    pub new_value: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleEvent {
    ProductChanged(ProductChangedEvent),
    ProductModelChanged(ProductModelChangedEvent),
}

impl RuleEvent {
    pub fn attribute(&self) -> &Attribute {
        match self {
            RuleEvent::ProductChanged(e) => &e.attribute,
            RuleEvent::ProductModelChanged(e) => &e.attribute,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            RuleEvent::ProductChanged(e) => e.locale.as_deref(),
            RuleEvent::ProductModelChanged(e) => e.locale.as_deref(),
        }
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            RuleEvent::ProductChanged(e) => e.channel.as_deref(),
            RuleEvent::ProductModelChanged(e) => e.channel.as_deref(),
        }
    }
}

impl Event for RuleEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RuleEvent::ProductChanged(_) => "rules.product.changed",
            RuleEvent::ProductModelChanged(_) => "rules.product_model.changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            RuleEvent::ProductChanged(e) => e.occurred_at,
            RuleEvent::ProductModelChanged(e) => e.occurred_at,
        }
    }
}
