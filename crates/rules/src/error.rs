use thiserror::Error;

use attrsync_catalog::CatalogError;
use attrsync_core::DomainError;

pub type RuleResult<T> = Result<T, RuleError>;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("attribute not found: {0}")]
    UnknownAttribute(String),

    #[error("family not found: {0}")]
    UnknownFamily(String),

    #[error("family {0} has no family variant")]
    MissingFamilyVariant(String),
}
