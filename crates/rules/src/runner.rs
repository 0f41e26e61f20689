//! Batch execution of a rule over many source products.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use attrsync_catalog::{EntityWithValues, Product};
use attrsync_events::EventBus;

use crate::event::RuleEventEnvelope;
use crate::processor::{ProcessOutcome, ProcessReport, RuleProductProcessor};
use crate::rule::Rule;

/// Cooperative cancellation flag, checked between source products.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source products the rule applied to.
    pub processed: usize,
    /// Source products without a rule key value.
    pub inapplicable: usize,
    /// Source products whose rule preparation failed.
    pub failed: usize,
    pub cancelled: bool,
    pub report: ProcessReport,
}

impl<B> RuleProductProcessor<B>
where
    B: EventBus<RuleEventEnvelope>,
{
    /// Process `sources` one at a time, stopping early once `cancel` fires.
    pub fn process_all<'a, I>(&self, rule: &Rule, sources: I, cancel: &CancellationToken) -> RunSummary
    where
        I: IntoIterator<Item = &'a mut Product>,
    {
        let mut summary = RunSummary::default();

        for source in sources {
            if cancel.is_cancelled() {
                info!(processed = summary.processed, "rule run cancelled");
                summary.cancelled = true;
                break;
            }

            match self.process(rule, source) {
                Ok(ProcessOutcome::Processed(report)) => {
                    summary.processed += 1;
                    summary.report += report;
                }
                Ok(ProcessOutcome::Inapplicable) => summary.inapplicable += 1,
                Err(err) => {
                    summary.failed += 1;
                    error!(source = %source.label(), error = %err, "rule could not be applied to source product");
                }
            }
        }

        summary
    }
}
