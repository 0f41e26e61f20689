//! Hierarchy matching: locate or create the destination nodes of a rule.
//!
//! For each product model associated with the source product:
//!
//! 1. find the sub product model whose first-axis key equals the source's
//!    (first match wins), or create one;
//! 2. under it, find the variant product whose second-axis destination key
//!    equals the source's second-axis source key, or create one;
//! 3. copy the mapped attributes into every node visited and save the nodes
//!    the copy changed.
//!
//! Failures are contained per destination node: they are logged and the
//! remaining associations and nodes are still processed.

use std::ops::AddAssign;
use std::sync::{Arc, PoisonError};

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use attrsync_catalog::{
    AssociationRepository, CatalogResult, EntityKind, EntitySaver, EntityWithValues, Family, FamilyRepository,
    HierarchyRepository, Product, ProductModel, Value,
};
use attrsync_core::ProductId;
use attrsync_events::EventBus;

use crate::config::RuleEngineConfig;
use crate::copier::RuleProcessorCopier;
use crate::error::{RuleError, RuleResult};
use crate::event::RuleEventEnvelope;
use crate::locks::KeyedLocks;
use crate::mapping::{AttributeMapping, AttributeMappingCollection};
use crate::provider::RuleAttributeProvider;
use crate::rule::Rule;

/// Collaborators of the hierarchy matcher.
#[derive(Clone)]
pub struct ProcessorServices {
    pub attribute_provider: Arc<dyn RuleAttributeProvider>,
    pub hierarchy: Arc<dyn HierarchyRepository>,
    pub associations: Arc<dyn AssociationRepository>,
    pub families: Arc<dyn FamilyRepository>,
    pub saver: Arc<dyn EntitySaver>,
}

/// What one `process` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub associations: usize,
    pub matched_models: usize,
    pub created_models: usize,
    pub matched_products: usize,
    pub created_products: usize,
    pub saved_models: usize,
    pub saved_products: usize,
    pub failures: usize,
}

impl AddAssign for ProcessReport {
    fn add_assign(&mut self, other: Self) {
        self.associations += other.associations;
        self.matched_models += other.matched_models;
        self.created_models += other.created_models;
        self.matched_products += other.matched_products;
        self.created_products += other.created_products;
        self.saved_models += other.saved_models;
        self.saved_products += other.saved_products;
        self.failures += other.failures;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The source product has no value for the rule's key attribute.
    Inapplicable,
    Processed(ProcessReport),
}

/// Save routing per entity kind: variant products are saved one by one,
/// product models through the batch saver.
trait SaveRouting: EntityWithValues {
    fn save_with(&self, saver: &dyn EntitySaver) -> CatalogResult<()>;
}

impl SaveRouting for Product {
    fn save_with(&self, saver: &dyn EntitySaver) -> CatalogResult<()> {
        saver.save_product(self)
    }
}

impl SaveRouting for ProductModel {
    fn save_with(&self, saver: &dyn EntitySaver) -> CatalogResult<()> {
        saver.save_product_models(std::slice::from_ref(self))
    }
}

pub struct RuleProductProcessor<B> {
    services: ProcessorServices,
    copier: RuleProcessorCopier<B>,
    config: RuleEngineConfig,
    locks: KeyedLocks,
}

impl<B> RuleProductProcessor<B>
where
    B: EventBus<RuleEventEnvelope>,
{
    pub fn new(services: ProcessorServices, copier: RuleProcessorCopier<B>, config: RuleEngineConfig) -> Self {
        Self {
            services,
            copier,
            config,
            locks: KeyedLocks::new(),
        }
    }

    pub fn config(&self) -> &RuleEngineConfig {
        &self.config
    }

    pub fn copier(&self) -> &RuleProcessorCopier<B> {
        &self.copier
    }

    /// Apply `rule` to one source product.
    ///
    /// Errors are returned only when the rule cannot be prepared (attribute or
    /// association lookup failed); failures beneath an associated product model
    /// are logged and counted in the report.
    pub fn process(&self, rule: &Rule, source: &mut Product) -> RuleResult<ProcessOutcome> {
        if source.value(rule.key_attribute().code(), None, None).is_none() {
            debug!(
                source = %source.label(),
                key_attribute = rule.key_attribute().code(),
                "rule key value absent; rule does not apply"
            );
            return Ok(ProcessOutcome::Inapplicable);
        }

        let mapping = self.attribute_mapping(rule)?;
        let models = self.services.associations.associated_product_models(source)?;

        let mut report = ProcessReport::default();
        for model in models {
            report.associations += 1;
            debug!(source = %source.label(), destination = model.code(), "found product model association");

            let lock = self.locks.lock_for(model.code());
            let result = {
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                self.process_destination_product_model(&mapping, source, &model, &mut report)
            };
            drop(lock);
            self.locks.release(model.code());

            if let Err(err) = result {
                report.failures += 1;
                error!(
                    source = %source.label(),
                    destination = model.code(),
                    error = %err,
                    detail = ?err,
                    "error while processing product model association"
                );
            }
        }

        Ok(ProcessOutcome::Processed(report))
    }

    /// Shared attributes of the rule's families, each copied onto itself.
    fn attribute_mapping(&self, rule: &Rule) -> RuleResult<AttributeMappingCollection> {
        let attributes = self
            .services
            .attribute_provider
            .attributes_for_families(rule.source_family(), rule.destination_family())?;

        Ok(attributes.into_iter().map(AttributeMapping::identity).collect())
    }

    /// `mapping` plus second-axis source key → second-axis destination key.
    fn leaf_mapping(&self, mapping: &AttributeMappingCollection) -> RuleResult<AttributeMappingCollection> {
        let provider = &self.services.attribute_provider;
        let source_key = &self.config.second_axis_source;
        let destination_key = &self.config.second_axis_destination;

        let source_attribute = provider
            .attribute_by_code(source_key)?
            .ok_or_else(|| RuleError::UnknownAttribute(source_key.clone()))?;
        let destination_attribute = provider
            .attribute_by_code(destination_key)?
            .ok_or_else(|| RuleError::UnknownAttribute(destination_key.clone()))?;

        let mut leaf_mapping = mapping.clone();
        leaf_mapping.add(AttributeMapping::new(source_attribute, destination_attribute));
        Ok(leaf_mapping)
    }

    fn process_destination_product_model(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        model: &ProductModel,
        report: &mut ProcessReport,
    ) -> anyhow::Result<()> {
        let first_axis = &self.config.first_axis;
        let Some(source_key) = source.value(first_axis, None, None).cloned() else {
            warn!(
                source = %source.label(),
                attribute = %first_axis,
                "source product has no first-axis key value; skipping association"
            );
            return Ok(());
        };

        let sub_models = self
            .services
            .hierarchy
            .sub_product_models(model.code())
            .with_context(|| format!("listing sub product models of {}", model.code()))?;

        for mut sub_model in sub_models {
            if self.keys_match(sub_model.value(first_axis, None, None), &source_key) {
                debug!(destination = sub_model.code(), "matching sub product model exists, copying data");
                report.matched_models += 1;
                self.copy(mapping, source, &mut sub_model, report);
                return self.process_destination_sub_product_model(mapping, source, &sub_model, report);
            }
        }

        let Some(sub_model) = self.create_destination_product_model(mapping, source, model, report)? else {
            return Ok(());
        };
        self.process_destination_sub_product_model(mapping, source, &sub_model, report)
    }

    fn process_destination_sub_product_model(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        sub_model: &ProductModel,
        report: &mut ProcessReport,
    ) -> anyhow::Result<()> {
        let leaf_mapping = self
            .leaf_mapping(mapping)
            .context("resolving second-axis key attributes")?;

        let Some(source_key) = source.value(&self.config.second_axis_source, None, None).cloned() else {
            warn!(
                source = %source.label(),
                attribute = %self.config.second_axis_source,
                "source product has no second-axis key value; skipping variant"
            );
            return Ok(());
        };

        let products = self
            .services
            .hierarchy
            .variant_products(sub_model.code())
            .with_context(|| format!("listing variant products of {}", sub_model.code()))?;

        for mut product in products {
            if self.keys_match(product.value(&self.config.second_axis_destination, None, None), &source_key) {
                debug!(destination = product.identifier(), "matching variant exists, copying data");
                report.matched_products += 1;
                self.copy(&leaf_mapping, source, &mut product, report);
                return Ok(());
            }
        }

        self.create_destination_product(&leaf_mapping, source, sub_model, report)
    }

    fn create_destination_product_model(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        parent: &ProductModel,
        report: &mut ProcessReport,
    ) -> anyhow::Result<Option<ProductModel>> {
        let family = self.load_family(parent.family_code())?;
        let variant = family
            .first_variant()
            .ok_or_else(|| RuleError::MissingFamilyVariant(family.code.clone()))?;

        let mut sub_model = ProductModel::new(Uuid::new_v4().to_string(), parent.family_code(), Utc::now())
            .with_family_variant(&variant.code)
            .with_parent(parent.code());
        report.created_models += 1;
        info!(
            source = %source.label(),
            parent = parent.code(),
            created = sub_model.code(),
            "sub product model does not exist, created"
        );

        if !self.copy(mapping, source, &mut sub_model, report) {
            // Unsaved node: the store has no parent to attach variants to.
            warn!(
                source = %source.label(),
                destination = sub_model.code(),
                "created sub product model was not saved; skipping variant"
            );
            return Ok(None);
        }
        Ok(Some(sub_model))
    }

    fn create_destination_product(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        sub_model: &ProductModel,
        report: &mut ProcessReport,
    ) -> anyhow::Result<()> {
        let family = self.load_family(sub_model.family_code())?;
        let variant = family
            .first_variant()
            .ok_or_else(|| RuleError::MissingFamilyVariant(family.code.clone()))?;

        let mut product = Product::new(ProductId::new(), Uuid::new_v4().to_string()).with_family(sub_model.family_code());
        product.set_family_variant(&variant.code);
        product.set_parent(sub_model.code());
        report.created_products += 1;
        info!(
            source = %source.label(),
            parent = sub_model.code(),
            created = product.identifier(),
            "variant does not exist, created"
        );

        self.copy(mapping, source, &mut product, report);
        Ok(())
    }

    fn load_family(&self, code: &str) -> RuleResult<Family> {
        self.services
            .families
            .find_family(code)?
            .ok_or_else(|| RuleError::UnknownFamily(code.to_owned()))
    }

    fn keys_match(&self, candidate: Option<&Value>, source_key: &Value) -> bool {
        candidate.is_some_and(|value| self.copier.comparator().compare(value, Some(source_key)).is_equal())
    }

    /// Copy into one destination node and save it when the copy applied.
    /// Failures stop at this node. Returns whether the node was saved.
    fn copy<D: SaveRouting>(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        destination: &mut D,
        report: &mut ProcessReport,
    ) -> bool {
        match self.try_copy(mapping, source, destination) {
            Ok(true) => {
                match destination.kind() {
                    EntityKind::Product => report.saved_products += 1,
                    EntityKind::ProductModel => report.saved_models += 1,
                }
                true
            }
            Ok(false) => false,
            Err(err) => {
                report.failures += 1;
                error!(
                    source = %source.label(),
                    destination = destination.code(),
                    error = %err,
                    detail = ?err,
                    "error while copying {}: {}",
                    source.label(),
                    err
                );
                false
            }
        }
    }

    /// Returns whether the destination was saved.
    fn try_copy<D: SaveRouting>(
        &self,
        mapping: &AttributeMappingCollection,
        source: &mut Product,
        destination: &mut D,
    ) -> anyhow::Result<bool> {
        let applied = self
            .copier
            .copy(&mut *source, &mut *destination, mapping)
            .with_context(|| format!("copying {} into {}", source.label(), destination.code()))?;

        if !applied {
            return Ok(false);
        }

        destination
            .save_with(self.services.saver.as_ref())
            .with_context(|| format!("saving {} {}", destination.kind(), destination.code()))?;
        Ok(true)
    }
}
