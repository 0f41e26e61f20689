use serde::{Deserialize, Serialize};

use attrsync_core::EventId;

/// Envelope for an event, carrying delivery metadata.
///
/// Notes:
/// - `entity_type`/`entity_code` identify the catalog node the event is about.
/// - `sequence_number` is monotonically increasing per producer, so consumers can
///   detect duplicates under at-least-once delivery.
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,

    entity_type: String,
    entity_code: String,

    /// Monotonically increasing position in the producer's stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: EventId,
        entity_type: impl Into<String>,
        entity_code: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            entity_type: entity_type.into(),
            entity_code: entity_code.into(),
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_code(&self) -> &str {
        &self.entity_code
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
