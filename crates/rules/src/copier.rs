//! Attribute copy engine.
//!
//! Copies mapped attribute values from a source entity into a destination entity,
//! cell by cell over every relevant locale × channel combination, skipping
//! no-op cells and publishing one change event per written cell.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

use attrsync_catalog::{
    Attribute, AttributeFilter, ChannelRepository, Comparison, CopyOptions, EntityKind, EntityWithValues,
    InMemoryCatalog, LocaleRepository, Normalizer, ProductAttributeFilter, ProductModelAttributeFilter,
    PropertyCopier, StandardNormalizer, StandardPropertyCopier, StandardValueComparator, Value, ValueBuilder,
    ValueComparator,
};
use attrsync_core::EventId;
use attrsync_events::{EventBus, EventEnvelope};

use crate::error::RuleResult;
use crate::event::{ProductChangedEvent, ProductModelChangedEvent, RuleEvent, RuleEventEnvelope};
use crate::mapping::{AttributeMapping, AttributeMappingCollection};

pub const TABLE_NULL_WARNING: &str =
    "Suspected table attribute extension with null value problem detected, filling in more appropriate value";

/// Collaborators of the copy engine.
#[derive(Clone)]
pub struct CopierServices {
    pub property_copier: Arc<dyn PropertyCopier>,
    pub channels: Arc<dyn ChannelRepository>,
    pub locales: Arc<dyn LocaleRepository>,
    pub product_filter: Arc<dyn AttributeFilter>,
    pub product_model_filter: Arc<dyn AttributeFilter>,
    pub normalizer: Arc<dyn Normalizer>,
    pub comparator: Arc<dyn ValueComparator>,
}

impl CopierServices {
    /// Wire every collaborator to one in-memory catalog with the standard
    /// normalizer, filters, comparator and property copier.
    pub fn in_memory(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            property_copier: Arc::new(StandardPropertyCopier::new(catalog.clone())),
            channels: catalog.clone(),
            locales: catalog.clone(),
            product_filter: Arc::new(ProductAttributeFilter::new(catalog.clone())),
            product_model_filter: Arc::new(ProductModelAttributeFilter::new(catalog)),
            normalizer: Arc::new(StandardNormalizer),
            comparator: Arc::new(StandardValueComparator),
        }
    }
}

pub struct RuleProcessorCopier<B> {
    services: CopierServices,
    bus: B,
    sequence: AtomicU64,
}

impl<B> RuleProcessorCopier<B>
where
    B: EventBus<RuleEventEnvelope>,
{
    pub fn new(services: CopierServices, bus: B) -> Self {
        Self {
            services,
            bus,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn comparator(&self) -> &dyn ValueComparator {
        self.services.comparator.as_ref()
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Copy every mapped attribute that is legal for `destination`.
    ///
    /// Returns `false` (and touches nothing) when no mapped attribute survives
    /// the destination's attribute filter. Per-cell logic faults are logged and
    /// skipped; any other failure is returned.
    pub fn copy(
        &self,
        source: &mut dyn EntityWithValues,
        destination: &mut dyn EntityWithValues,
        mappings: &AttributeMappingCollection,
    ) -> RuleResult<bool> {
        let mut data = self.services.normalizer.normalize(&*destination)?;
        data.values = mappings
            .destination_codes()
            .into_iter()
            .map(|code| (code.to_owned(), serde_json::Value::from("value")))
            .collect();

        let filtered = match destination.kind() {
            EntityKind::Product => self.services.product_filter.filter(data)?,
            EntityKind::ProductModel => self.services.product_model_filter.filter(data)?,
        };

        if filtered.values.is_empty() {
            debug!(
                destination = destination.code(),
                kind = %destination.kind(),
                "no mapped attribute applies to destination"
            );
            return Ok(false);
        }

        for mapping in mappings {
            if filtered.values.contains_key(mapping.destination().code()) {
                self.copy_one_attribute(source, destination, mapping)?;
            }
        }

        Ok(true)
    }

    /// Copy one mapping over the locale × channel cross product (locale-major).
    /// Returns the number of cells written.
    fn copy_one_attribute(
        &self,
        source: &mut dyn EntityWithValues,
        destination: &mut dyn EntityWithValues,
        mapping: &AttributeMapping,
    ) -> RuleResult<usize> {
        let source_attribute = mapping.source();
        let channels: Vec<Option<String>> = if source_attribute.is_scopable() {
            self.services.channels.channel_codes()?.into_iter().map(Some).collect()
        } else {
            vec![None]
        };
        let locales: Vec<Option<String>> = if source_attribute.is_localizable() {
            self.services
                .locales
                .activated_locale_codes()?
                .into_iter()
                .map(Some)
                .collect()
        } else {
            vec![None]
        };

        let mut written = 0;
        for locale in &locales {
            for channel in &channels {
                let options = CopyOptions::same_cell(locale.as_deref(), channel.as_deref());
                match self.copy_one_attribute_cell(source, destination, mapping, &options) {
                    Ok(true) => written += 1,
                    Ok(false) => {}
                    Err(err) if err.is_logic() => {
                        warn!(
                            attribute = source_attribute.code(),
                            locale = ?locale,
                            channel = ?channel,
                            "Skipping copying attribute: {}, because {}",
                            source_attribute.code(),
                            err
                        );
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        Ok(written)
    }

    fn copy_one_attribute_cell(
        &self,
        source: &mut dyn EntityWithValues,
        destination: &mut dyn EntityWithValues,
        mapping: &AttributeMapping,
        options: &CopyOptions,
    ) -> attrsync_catalog::CatalogResult<bool> {
        let source_code = mapping.source().code();
        let destination_code = mapping.destination().code();
        let locale = options.to_locale.as_deref();
        let channel = options.to_scope.as_deref();
        let comparator = self.comparator();

        let previous_value = destination.value(destination_code, locale, channel).cloned();
        let mut new_value = source
            .value(source_code, options.from_locale.as_deref(), options.from_scope.as_deref())
            .cloned();

        // Table-structured values cannot be compared against an absent value;
        // substitute an empty value on the source so later reads agree.
        if let Some(previous) = &previous_value {
            if comparator.compare(previous, new_value.as_ref()) == Comparison::Incomparable {
                let empty = ValueBuilder::new().with_attribute_code(destination_code).build();
                source.set_values(vec![empty.clone()]);
                warn!(attribute = destination_code, value = ?empty, "{}", TABLE_NULL_WARNING);
                new_value = Some(empty);
            }
        }

        match (&previous_value, &new_value) {
            (None, None) => return Ok(false),
            (Some(previous), Some(new)) if comparator.compare(previous, Some(new)).is_equal() => {
                return Ok(false);
            }
            _ => {}
        }

        self.services
            .property_copier
            .copy_data(&*source, destination, source_code, destination_code, options)?;

        // The event carries what the cell holds now, not what was read from the source.
        let written = destination.value(destination_code, locale, channel).cloned();
        self.emit(&*destination, mapping.destination(), locale, channel, previous_value, written);
        Ok(true)
    }

    fn emit(
        &self,
        destination: &dyn EntityWithValues,
        attribute: &Attribute,
        locale: Option<&str>,
        channel: Option<&str>,
        previous_value: Option<Value>,
        new_value: Option<Value>,
    ) {
        let occurred_at = Utc::now();
        let event = match destination.kind() {
            EntityKind::Product => RuleEvent::ProductChanged(ProductChangedEvent {
                product: destination.code().to_owned(),
                attribute: attribute.clone(),
                locale: locale.map(str::to_owned),
                channel: channel.map(str::to_owned),
                previous_value,
                new_value,
                occurred_at,
            }),
            EntityKind::ProductModel => RuleEvent::ProductModelChanged(ProductModelChangedEvent {
                product_model: destination.code().to_owned(),
                attribute: attribute.clone(),
                locale: locale.map(str::to_owned),
                channel: channel.map(str::to_owned),
                previous_value,
                new_value,
                occurred_at,
            }),
        };

        let sequence_number = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let envelope = EventEnvelope::new(
            EventId::new(),
            destination.kind().as_str(),
            destination.code(),
            sequence_number,
            event,
        );

        if let Err(err) = self.bus.publish(envelope) {
            warn!(
                destination = destination.code(),
                attribute = attribute.code(),
                error = ?err,
                "failed to publish change event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use attrsync_catalog::{
        AttributeRepository, AttributeType, CatalogError, CatalogResult, Family, FamilyVariant, Product, ProductModel, TableRow,
        ValueCollection, ValueData, VariantAttributeSet,
    };
    use attrsync_core::ProductId;
    use attrsync_events::{InMemoryEventBus, Subscription};
    use proptest::prelude::*;

    type Bus = Arc<InMemoryEventBus<RuleEventEnvelope>>;

    /// Counts `copy_data` calls, delegating to the standard copier.
    struct CountingCopier {
        inner: StandardPropertyCopier,
        calls: AtomicUsize,
    }

    impl PropertyCopier for CountingCopier {
        fn copy_data(
            &self,
            source: &dyn EntityWithValues,
            destination: &mut dyn EntityWithValues,
            from_code: &str,
            to_code: &str,
            options: &CopyOptions,
        ) -> CatalogResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.copy_data(source, destination, from_code, to_code, options)
        }
    }

    struct Fixture {
        catalog: Arc<InMemoryCatalog>,
        copier: RuleProcessorCopier<Bus>,
        counter: Arc<CountingCopier>,
        events: Subscription<RuleEventEnvelope>,
    }

    fn codes(c: &[&str]) -> Vec<String> {
        c.iter().map(|s| s.to_string()).collect()
    }

    fn fixture() -> Fixture {
        fixture_with(
            &["ecommerce", "mobile"],
            &[("en_US", true), ("fr_FR", true), ("de_DE", false), ("sw_MW", true)],
        )
    }

    fn fixture_with(channels: &[&str], locales: &[(&str, bool)]) -> Fixture {
        let mut catalog = InMemoryCatalog::new()
            .with_attribute(Attribute::new("name", AttributeType::Text).localizable(true).scopable(true))
            .with_attribute(Attribute::new("brand", AttributeType::Text))
            .with_attribute(Attribute::new("weight", AttributeType::Number))
            .with_attribute(Attribute::new("composition", AttributeType::Table))
            .with_attribute(Attribute::new("nutrition", AttributeType::Table).localizable(true))
            .with_attribute(Attribute::new("alien", AttributeType::Text));
        for channel in channels {
            catalog = catalog.with_channel(*channel);
        }
        for (locale, activated) in locales {
            catalog = catalog.with_locale(*locale, *activated);
        }
        let catalog = Arc::new(
            catalog
                .with_family(
                    Family::new("drugs", codes(&["name", "brand", "weight", "composition", "nutrition", "pack"])).with_variant(
                        FamilyVariant::new(
                            "by_pack",
                            vec![
                                VariantAttributeSet::new(1, codes(&["pack"]), codes(&["brand"])),
                                VariantAttributeSet::new(2, codes(&[]), codes(&["weight"])),
                            ],
                        ),
                    ),
                ),
        );

        let counter = Arc::new(CountingCopier {
            inner: StandardPropertyCopier::new(catalog.clone()),
            calls: AtomicUsize::new(0),
        });
        let mut services = CopierServices::in_memory(catalog.clone());
        services.property_copier = counter.clone();

        let bus: Bus = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe();

        Fixture {
            catalog,
            copier: RuleProcessorCopier::new(services, bus),
            counter,
            events,
        }
    }

    fn attribute(f: &Fixture, code: &str) -> Attribute {
        f.catalog.find_attribute(code).unwrap().unwrap()
    }

    fn mappings(f: &Fixture, codes: &[&str]) -> AttributeMappingCollection {
        codes
            .iter()
            .map(|c| AttributeMapping::identity(attribute(f, c)))
            .collect()
    }

    fn simple_product(values: Vec<Value>) -> Product {
        Product::new(ProductId::new(), "dest")
            .with_family("drugs")
            .with_values(values.into_iter().collect::<ValueCollection>())
    }

    fn text(code: &str, data: &str) -> Value {
        Value::unscoped(code, ValueData::Text(data.into()))
    }

    #[test]
    fn nothing_applicable_returns_false_and_touches_nothing() {
        let f = fixture();
        let mut source = simple_product(vec![text("alien", "x")]);
        let mut destination = simple_product(vec![]);

        let applied = f
            .copier
            .copy(&mut source, &mut destination, &mappings(&f, &["alien"]))
            .unwrap();

        assert!(!applied);
        assert!(destination.values().is_empty());
        assert_eq!(f.counter.calls.load(Ordering::SeqCst), 0);
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn scoped_and_localized_attribute_expands_to_every_cell() {
        let f = fixture();
        let mut values = Vec::new();
        for locale in ["en_US", "fr_FR", "sw_MW"] {
            for channel in ["ecommerce", "mobile"] {
                values.push(Value::new(
                    "name",
                    Some(locale),
                    Some(channel),
                    ValueData::Text(format!("{locale}-{channel}")),
                ));
            }
        }
        let mut source = simple_product(values);
        let mut destination = simple_product(vec![]);

        let applied = f
            .copier
            .copy(&mut source, &mut destination, &mappings(&f, &["name"]))
            .unwrap();

        assert!(applied);
        assert_eq!(f.counter.calls.load(Ordering::SeqCst), 6);
        assert_eq!(destination.values().len(), 6);

        let cells: Vec<(Option<String>, Option<String>)> = f
            .events
            .drain()
            .iter()
            .map(|e| (e.payload().locale().map(str::to_owned), e.payload().channel().map(str::to_owned)))
            .collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], (Some("en_US".into()), Some("ecommerce".into())));
        assert_eq!(cells[1], (Some("en_US".into()), Some("mobile".into())));
        assert_eq!(cells[2], (Some("fr_FR".into()), Some("ecommerce".into())));
    }

    #[test]
    fn absent_on_both_sides_is_a_no_op() {
        let f = fixture();
        let mut source = simple_product(vec![]);
        let mut destination = simple_product(vec![]);

        let applied = f
            .copier
            .copy(&mut source, &mut destination, &mappings(&f, &["brand"]))
            .unwrap();

        assert!(applied);
        assert_eq!(f.counter.calls.load(Ordering::SeqCst), 0);
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn equal_values_are_a_no_op() {
        let f = fixture();
        let mut source = simple_product(vec![text("brand", "Acme")]);
        let mut destination = simple_product(vec![text("brand", "Acme")]);

        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["brand"]))
            .unwrap();

        assert_eq!(f.counter.calls.load(Ordering::SeqCst), 0);
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn second_copy_of_unchanged_values_writes_nothing() {
        let f = fixture();
        let mut source = simple_product(vec![
            text("brand", "Acme"),
            Value::unscoped("weight", ValueData::Number("12.5".into())),
        ]);
        let mut destination = simple_product(vec![text("brand", "Other")]);
        let mapping = mappings(&f, &["brand", "weight", "name"]);

        f.copier.copy(&mut source, &mut destination, &mapping).unwrap();
        let first_calls = f.counter.calls.load(Ordering::SeqCst);
        assert_eq!(first_calls, 2);
        assert_eq!(f.events.drain().len(), 2);

        f.copier.copy(&mut source, &mut destination, &mapping).unwrap();
        assert_eq!(f.counter.calls.load(Ordering::SeqCst), first_calls);
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn previous_value_is_cleared_when_source_lost_it() {
        let f = fixture();
        let mut source = simple_product(vec![]);
        let mut destination = simple_product(vec![text("brand", "Acme")]);

        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["brand"]))
            .unwrap();

        assert!(destination.value("brand", None, None).is_none());
        let events = f.events.drain();
        assert_eq!(events.len(), 1);
        match events[0].payload() {
            RuleEvent::ProductChanged(e) => {
                assert_eq!(e.previous_value, Some(text("brand", "Acme")));
                assert_eq!(e.new_value, None);
            }
            other => panic!("expected ProductChanged, got {other:?}"),
        }
    }

    #[test]
    fn table_value_against_absent_source_is_replaced_by_empty_value() {
        let f = fixture();
        let mut source = simple_product(vec![]);
        let table = Value::unscoped("composition", ValueData::Table(vec![TableRow::new()]));
        let mut destination = simple_product(vec![table.clone()]);

        let applied = f
            .copier
            .copy(&mut source, &mut destination, &mappings(&f, &["composition"]))
            .unwrap();

        assert!(applied);
        let empty = ValueBuilder::new().with_attribute_code("composition").build();
        assert_eq!(source.value("composition", None, None), Some(&empty));
        assert_eq!(destination.value("composition", None, None), Some(&empty));

        let events = f.events.drain();
        assert_eq!(events.len(), 1);
        match events[0].payload() {
            RuleEvent::ProductChanged(e) => {
                assert_eq!(e.previous_value.as_ref(), Some(&table));
                assert_eq!(e.new_value.as_ref(), Some(&empty));
            }
            other => panic!("expected ProductChanged, got {other:?}"),
        }

        // Substituted value is now stable.
        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["composition"]))
            .unwrap();
        assert!(f.events.drain().is_empty());
    }

    #[test]
    fn logic_fault_skips_only_the_faulty_cell() {
        let f = fixture();
        let mut source = simple_product(vec![text("alien", "not a number"), text("brand", "Acme")]);
        let mut destination = simple_product(vec![]);
        let mut mapping = AttributeMappingCollection::new();
        mapping.add(AttributeMapping::new(attribute(&f, "alien"), attribute(&f, "weight")));
        mapping.add(AttributeMapping::identity(attribute(&f, "brand")));

        let applied = f.copier.copy(&mut source, &mut destination, &mapping).unwrap();

        assert!(applied);
        assert!(destination.value("weight", None, None).is_none());
        assert_eq!(destination.value("brand", None, None), Some(&text("brand", "Acme")));
        assert_eq!(f.events.drain().len(), 1);
    }

    #[test]
    fn non_logic_failure_is_returned() {
        struct BrokenCopier;
        impl PropertyCopier for BrokenCopier {
            fn copy_data(
                &self,
                _: &dyn EntityWithValues,
                _: &mut dyn EntityWithValues,
                _: &str,
                _: &str,
                _: &CopyOptions,
            ) -> CatalogResult<()> {
                Err(CatalogError::storage("disk on fire"))
            }
        }

        let f = fixture();
        let mut services = CopierServices::in_memory(f.catalog.clone());
        services.property_copier = Arc::new(BrokenCopier);
        let copier = RuleProcessorCopier::new(services, Arc::new(InMemoryEventBus::new()));

        let mut source = simple_product(vec![text("brand", "Acme")]);
        let mut destination = simple_product(vec![]);
        let err = copier
            .copy(&mut source, &mut destination, &mappings(&f, &["brand"]))
            .unwrap_err();

        assert!(matches!(err, crate::RuleError::Catalog(CatalogError::Storage(_))));
    }

    #[test]
    fn product_model_destination_emits_product_model_event() {
        let f = fixture();
        let mut source = simple_product(vec![text("brand", "Acme")]);
        let mut sub_model = ProductModel::new("sub", "drugs", Utc::now())
            .with_family_variant("by_pack")
            .with_parent("root");

        let applied = f
            .copier
            .copy(&mut source, &mut sub_model, &mappings(&f, &["brand", "weight"]))
            .unwrap();

        assert!(applied);
        let events = f.events.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].entity_type(), "product_model");
        assert_eq!(events[0].entity_code(), "sub");
        match events[0].payload() {
            RuleEvent::ProductModelChanged(e) => {
                assert_eq!(e.product_model, "sub");
                assert_eq!(e.attribute.code(), "brand");
            }
            other => panic!("expected ProductModelChanged, got {other:?}"),
        }
    }

    #[test]
    fn envelopes_carry_increasing_sequence_numbers() {
        let f = fixture();
        let mut source = simple_product(vec![text("brand", "A"), Value::unscoped("weight", ValueData::Number("1".into()))]);
        let mut destination = simple_product(vec![]);

        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["brand", "weight"]))
            .unwrap();

        let sequence: Vec<u64> = f.events.drain().iter().map(|e| e.sequence_number()).collect();
        assert_eq!(sequence, vec![1, 2]);
    }

    #[test]
    fn localized_table_cell_cleared_by_substitution_reports_absent_new_value() {
        let f = fixture();
        let mut source = simple_product(vec![]);
        let table = Value::new("nutrition", Some("en_US"), None, ValueData::Table(vec![TableRow::new()]));
        let mut destination = simple_product(vec![table.clone()]);

        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["nutrition"]))
            .unwrap();

        // The substituted empty value is unlocalized, so the localized cell reads nothing.
        let empty = ValueBuilder::new().with_attribute_code("nutrition").build();
        assert_eq!(source.value("nutrition", None, None), Some(&empty));
        assert!(destination.value("nutrition", Some("en_US"), None).is_none());

        let events = f.events.drain();
        assert_eq!(events.len(), 1);
        match events[0].payload() {
            RuleEvent::ProductChanged(e) => {
                assert_eq!(e.locale.as_deref(), Some("en_US"));
                assert_eq!(e.previous_value.as_ref(), Some(&table));
                assert_eq!(e.new_value, None);
            }
            other => panic!("expected ProductChanged, got {other:?}"),
        }
    }

    #[test]
    fn event_new_value_matches_the_written_cell() {
        let f = fixture();
        let mut source = simple_product(vec![Value::new(
            "name",
            Some("fr_FR"),
            Some("mobile"),
            ValueData::Text("Aspirine".into()),
        )]);
        let mut destination = simple_product(vec![]);

        f.copier
            .copy(&mut source, &mut destination, &mappings(&f, &["name"]))
            .unwrap();

        for envelope in f.events.drain() {
            let payload = envelope.payload();
            let cell = destination.value("name", payload.locale(), payload.channel()).cloned();
            match payload {
                RuleEvent::ProductChanged(e) => assert_eq!(e.new_value, cell),
                other => panic!("expected ProductChanged, got {other:?}"),
            }
        }
    }

    fn cell_text() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[a-z]{1,6}")
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: only attributes legal for a variant product are copied, and
        /// `copy` reports whether any of them survived the filter.
        #[test]
        fn filter_decides_what_reaches_the_cells(picks in prop::collection::vec(0usize..4, 0..8)) {
            let f = fixture();
            let pool = ["brand", "weight", "name", "alien"];
            let chosen: Vec<&str> = picks.iter().map(|i| pool[*i]).collect();

            let mut source = simple_product(vec![
                text("brand", "Acme"),
                Value::unscoped("weight", ValueData::Number("3".into())),
                text("alien", "x"),
            ]);
            let mut variant = simple_product(vec![]);
            variant.set_parent("sub");
            variant.set_family_variant("by_pack");

            let applied = f.copier.copy(&mut source, &mut variant, &mappings(&f, &chosen)).unwrap();

            // Only "weight" lives at the variant level of "by_pack".
            prop_assert_eq!(applied, chosen.contains(&"weight"));
            for envelope in f.events.drain() {
                prop_assert_eq!(envelope.payload().attribute().code(), "weight");
            }
            prop_assert!(variant.value("brand", None, None).is_none());
        }

        /// Property: a scopable and localizable attribute is visited once per
        /// channel and activated locale, never for a deactivated locale.
        #[test]
        fn cells_follow_channels_and_activated_locales(
            channel_count in 1usize..4,
            activated_count in 1usize..4,
            deactivated_count in 0usize..3,
        ) {
            let channels: Vec<String> = (0..channel_count).map(|i| format!("channel_{i}")).collect();
            let mut locales: Vec<(String, bool)> = (0..activated_count).map(|i| (format!("on_{i}"), true)).collect();
            locales.extend((0..deactivated_count).map(|i| (format!("off_{i}"), false)));

            let channel_refs: Vec<&str> = channels.iter().map(String::as_str).collect();
            let locale_refs: Vec<(&str, bool)> = locales.iter().map(|(code, on)| (code.as_str(), *on)).collect();
            let f = fixture_with(&channel_refs, &locale_refs);

            let mut values = Vec::new();
            for (locale, _) in &locales {
                for channel in &channels {
                    values.push(Value::new(
                        "name",
                        Some(locale.as_str()),
                        Some(channel.as_str()),
                        ValueData::Text(format!("{locale}-{channel}")),
                    ));
                }
            }
            let mut source = simple_product(values);
            let mut destination = simple_product(vec![]);

            f.copier.copy(&mut source, &mut destination, &mappings(&f, &["name"])).unwrap();

            let expected = channel_count * activated_count;
            let events = f.events.drain();
            prop_assert_eq!(f.counter.calls.load(Ordering::SeqCst), expected);
            prop_assert_eq!(events.len(), expected);
            prop_assert_eq!(destination.values().len(), expected);
            for envelope in &events {
                prop_assert!(envelope.payload().locale().is_some_and(|l| l.starts_with("on_")));
            }
        }

        /// Property: copying the same source twice writes nothing the second time,
        /// whatever the source and destination held before.
        #[test]
        fn second_copy_is_always_a_no_op(
            brand in cell_text(),
            weight in prop::option::of(0u32..1000),
            names in prop::collection::vec(cell_text(), 6),
            stale_brand in cell_text(),
            stale_names in prop::collection::vec(cell_text(), 6),
        ) {
            let f = fixture();
            let cells: Vec<(&str, &str)> = ["en_US", "fr_FR", "sw_MW"]
                .into_iter()
                .flat_map(|l| ["ecommerce", "mobile"].into_iter().map(move |c| (l, c)))
                .collect();

            let mut source_values = Vec::new();
            if let Some(brand) = &brand {
                source_values.push(text("brand", brand));
            }
            if let Some(weight) = weight {
                source_values.push(Value::unscoped("weight", ValueData::Number(weight.to_string())));
            }
            let mut destination_values = Vec::new();
            if let Some(stale) = &stale_brand {
                destination_values.push(text("brand", stale));
            }
            for ((locale, channel), (name, stale)) in cells.iter().zip(names.iter().zip(stale_names.iter())) {
                if let Some(name) = name {
                    source_values.push(Value::new("name", Some(*locale), Some(*channel), ValueData::Text(name.clone())));
                }
                if let Some(stale) = stale {
                    destination_values.push(Value::new("name", Some(*locale), Some(*channel), ValueData::Text(stale.clone())));
                }
            }

            let mut source = simple_product(source_values);
            let mut destination = simple_product(destination_values);
            let mapping = mappings(&f, &["brand", "weight", "name"]);

            f.copier.copy(&mut source, &mut destination, &mapping).unwrap();
            let first_calls = f.counter.calls.load(Ordering::SeqCst);
            let first_events = f.events.drain().len();
            prop_assert_eq!(first_calls, first_events);

            f.copier.copy(&mut source, &mut destination, &mapping).unwrap();
            prop_assert_eq!(f.counter.calls.load(Ordering::SeqCst), first_calls);
            prop_assert!(f.events.drain().is_empty());
        }
    }
}
