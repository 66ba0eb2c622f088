//! Batch orchestrator
//!
//! Runs one logical milestone operation against every resolved target and
//! collects exactly one outcome per target, in configuration order. A failing
//! repository is recorded and the batch moves on; nothing is retried or rolled
//! back.
//!
//! Targets run strictly one after another by default. With a concurrency above
//! one, up to that many targets are in flight at once; outcomes are still
//! reported in configuration order regardless of completion order.

use super::filter::FilterCriteria;
use super::gateway::{MilestoneGateway, UpdateOutcome};
use super::model::{Milestone, MilestonePatch, MilestoneSpec, MilestoneState};
use super::targets::RepositoryTarget;
use crate::github::Transport;
use crate::GhpmError;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::{debug, info, warn};

/// Terminal state of one target
#[derive(Debug)]
pub enum TargetOutcome {
    /// Milestones produced by the operation (one for create/update)
    Succeeded(Vec<Milestone>),
    /// Update target without a milestone of the requested title
    Skipped(String),
    Failed(GhpmError),
}

impl TargetOutcome {
    pub fn is_succeeded(&self) -> bool {
        matches!(self, TargetOutcome::Succeeded(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TargetOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TargetOutcome::Failed(_))
    }

    pub fn milestones(&self) -> &[Milestone] {
        match self {
            TargetOutcome::Succeeded(milestones) => milestones,
            _ => &[],
        }
    }
}

/// One target and its outcome
#[derive(Debug)]
pub struct BatchEntry {
    pub target: RepositoryTarget,
    pub outcome: TargetOutcome,
}

/// Per-target outcomes of one invocation, in resolution order
#[derive(Debug, Default)]
pub struct BatchResult {
    entries: Vec<BatchEntry>,
}

impl BatchResult {
    pub fn new(entries: Vec<BatchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn get(&self, target: &RepositoryTarget) -> Option<&TargetOutcome> {
        self.entries
            .iter()
            .find(|e| &e.target == target)
            .map(|e| &e.outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_succeeded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failed()).count()
    }

    /// At least one target ran and every one of them failed
    pub fn all_failed(&self) -> bool {
        !self.entries.is_empty() && self.failed() == self.entries.len()
    }

    /// Process exit status for this batch: 1 when every target failed, or
    /// when any failed and `strict` is set; 0 otherwise.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if self.all_failed() || (strict && self.failed() > 0) {
            1
        } else {
            0
        }
    }
}

pub struct BatchOrchestrator<T> {
    gateway: MilestoneGateway<T>,
    targets: Vec<RepositoryTarget>,
    concurrency: usize,
}

impl<T: Transport> BatchOrchestrator<T> {
    pub fn new(gateway: MilestoneGateway<T>, targets: Vec<RepositoryTarget>) -> Self {
        Self {
            gateway,
            targets,
            concurrency: 1,
        }
    }

    /// Maximum number of targets in flight; values below one mean one
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn gateway(&self) -> &MilestoneGateway<T> {
        &self.gateway
    }

    async fn run<'a, F, Fut>(&'a self, operation: F) -> BatchResult
    where
        F: Fn(&'a RepositoryTarget) -> Fut,
        Fut: Future<Output = TargetOutcome>,
    {
        // `buffered` yields in input order, so slot i always belongs to target i.
        let outcomes: Vec<TargetOutcome> = stream::iter(self.targets.iter())
            .map(operation)
            .buffered(self.concurrency)
            .collect()
            .await;

        let result = BatchResult::new(
            self.targets
                .iter()
                .cloned()
                .zip(outcomes)
                .map(|(target, outcome)| BatchEntry { target, outcome })
                .collect(),
        );

        info!(
            targets = result.len(),
            succeeded = result.succeeded(),
            skipped = result.skipped(),
            failed = result.failed(),
            "Batch complete"
        );
        result
    }

    /// Create the same milestone in every target.
    ///
    /// `spec.due_on` is already normalised, so every repository receives the
    /// identical timestamp.
    pub async fn create(&self, spec: &MilestoneSpec) -> BatchResult {
        self.run(move |target| async move {
            match self.gateway.create(target, spec).await {
                Ok(milestone) => TargetOutcome::Succeeded(vec![milestone]),
                Err(e) => {
                    warn!(repository = %target, error = %e, "Create failed");
                    TargetOutcome::Failed(e)
                }
            }
        })
        .await
    }

    /// List every milestone of every target and filter client-side against
    /// the single reference instant `now`.
    pub async fn get(&self, filter: FilterCriteria, now: DateTime<Utc>) -> BatchResult {
        self.run(move |target| async move {
            match self.gateway.list(target, MilestoneState::All).await {
                Ok(milestones) => {
                    let total = milestones.len();
                    let kept = filter.apply(milestones, now);
                    debug!(repository = %target, total, kept = kept.len(), "Milestones filtered");
                    TargetOutcome::Succeeded(kept)
                }
                Err(e) => {
                    warn!(repository = %target, error = %e, "List failed");
                    TargetOutcome::Failed(e)
                }
            }
        })
        .await
    }

    /// Apply the same patch to the milestone titled `title` in every target.
    /// Targets without that title are skipped.
    pub async fn update(&self, title: &str, patch: &MilestonePatch) -> BatchResult {
        self.run(move |target| async move {
            match self.gateway.update(target, title, patch).await {
                Ok(UpdateOutcome::Updated(milestone)) => TargetOutcome::Succeeded(vec![milestone]),
                Ok(UpdateOutcome::NotFound) => {
                    TargetOutcome::Skipped(format!("milestone '{}' not found", title))
                }
                Err(e) => {
                    warn!(repository = %target, error = %e, "Update failed");
                    TargetOutcome::Failed(e)
                }
            }
        })
        .await
    }
}
