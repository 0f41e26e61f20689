//! Low-level property copy between two entities.

use std::sync::Arc;

use crate::entity::EntityWithValues;
use crate::error::{CatalogError, CatalogResult};
use crate::repository::AttributeRepository;
use crate::value::Value;

/// Source and target address of one cell copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    pub from_locale: Option<String>,
    pub to_locale: Option<String>,
    pub from_scope: Option<String>,
    pub to_scope: Option<String>,
}

impl CopyOptions {
    /// Same locale and scope on both sides.
    pub fn same_cell(locale: Option<&str>, scope: Option<&str>) -> Self {
        Self {
            from_locale: locale.map(str::to_owned),
            to_locale: locale.map(str::to_owned),
            from_scope: scope.map(str::to_owned),
            to_scope: scope.map(str::to_owned),
        }
    }
}

pub trait PropertyCopier: Send + Sync {
    /// Copy the cell `(from_code, from_locale, from_scope)` of `source` into
    /// `(to_code, to_locale, to_scope)` of `destination`.
    ///
    /// Returns [`CatalogError::Logic`] when the value cannot live under the
    /// destination attribute.
    fn copy_data(
        &self,
        source: &dyn EntityWithValues,
        destination: &mut dyn EntityWithValues,
        from_code: &str,
        to_code: &str,
        options: &CopyOptions,
    ) -> CatalogResult<()>;
}

/// Type-checked copier backed by the attribute catalog. An absent source cell
/// clears the destination cell.
pub struct StandardPropertyCopier {
    attributes: Arc<dyn AttributeRepository>,
}

impl StandardPropertyCopier {
    pub fn new(attributes: Arc<dyn AttributeRepository>) -> Self {
        Self { attributes }
    }
}

impl PropertyCopier for StandardPropertyCopier {
    fn copy_data(
        &self,
        source: &dyn EntityWithValues,
        destination: &mut dyn EntityWithValues,
        from_code: &str,
        to_code: &str,
        options: &CopyOptions,
    ) -> CatalogResult<()> {
        let to_attribute = self
            .attributes
            .find_attribute(to_code)?
            .ok_or_else(|| CatalogError::UnknownAttribute(to_code.to_owned()))?;
        let to_locale = options.to_locale.as_deref();
        let to_scope = options.to_scope.as_deref();

        let Some(source_value) =
            source.value(from_code, options.from_locale.as_deref(), options.from_scope.as_deref())
        else {
            destination.remove_value(to_code, to_locale, to_scope);
            return Ok(());
        };

        if !to_attribute.attribute_type().accepts(source_value.data()) {
            return Err(CatalogError::logic(format!(
                "attribute \"{to_code}\" of type {:?} does not accept the value of \"{from_code}\"",
                to_attribute.attribute_type()
            )));
        }

        destination.set_values(vec![Value::new(to_code, to_locale, to_scope, source_value.data().clone())]);
        Ok(())
    }
}
