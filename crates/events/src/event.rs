use chrono::{DateTime, Utc};

/// A published fact about a catalog change.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable type name, e.g. `rules.product.changed`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version.
    fn version(&self) -> u32;

    fn occurred_at(&self) -> DateTime<Utc>;
}
