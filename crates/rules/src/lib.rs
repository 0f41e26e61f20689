//! Attribute propagation rules.
//!
//! A rule pairs a source family with a destination family. For a changed source
//! product, [`RuleProductProcessor`] finds (or creates) the matching destination
//! sub product model and variant product under each associated product model,
//! and [`RuleProcessorCopier`] copies the shared attribute values into them.

pub mod config;
pub mod copier;
pub mod error;
pub mod event;
pub mod locks;
pub mod mapping;
pub mod processor;
pub mod provider;
pub mod rule;
pub mod runner;

pub use config::RuleEngineConfig;
pub use copier::{CopierServices, RuleProcessorCopier, TABLE_NULL_WARNING};
pub use error::{RuleError, RuleResult};
pub use event::{ProductChangedEvent, ProductModelChangedEvent, RuleEvent, RuleEventEnvelope};
pub use mapping::{AttributeMapping, AttributeMappingCollection};
pub use processor::{ProcessOutcome, ProcessReport, ProcessorServices, RuleProductProcessor};
pub use provider::{FamilyRuleAttributeProvider, RuleAttributeProvider};
pub use rule::Rule;
pub use runner::{CancellationToken, RunSummary};
