use thiserror::Error;

use attrsync_core::DomainError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures raised by catalog collaborators.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A value could not be copied because its shape does not fit the target
    /// attribute (logic-level fault, recoverable per cell).
    #[error("{0}")]
    Logic(String),

    #[error("attribute not found: {0}")]
    UnknownAttribute(String),

    #[error("family not found: {0}")]
    UnknownFamily(String),

    #[error("family variant {variant} not found in family {family}")]
    UnknownFamilyVariant { family: String, variant: String },

    #[error("{0} has no family variant")]
    MissingFamilyVariant(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CatalogError {
    pub fn logic(msg: impl Into<String>) -> Self {
        Self::Logic(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this is a per-cell logic fault (skipped by the copy engine)
    /// rather than a failure of the whole destination node.
    pub fn is_logic(&self) -> bool {
        matches!(self, Self::Logic(_))
    }
}
