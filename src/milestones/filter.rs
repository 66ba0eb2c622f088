//! Client-side milestone filters

use super::model::Milestone;
use chrono::{DateTime, Utc};

/// Post-retrieval filters; set flags combine as a conjunction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep milestones whose due date is strictly before the reference instant
    pub overdue_only: bool,
    /// Keep milestones that have a closed timestamp
    pub closed_only: bool,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        !self.overdue_only && !self.closed_only
    }

    pub fn matches(&self, milestone: &Milestone, now: DateTime<Utc>) -> bool {
        (!self.overdue_only || milestone.is_past_due(now))
            && (!self.closed_only || milestone.is_closed())
    }

    /// Order-preserving filter against a single reference instant
    pub fn apply(&self, milestones: Vec<Milestone>, now: DateTime<Utc>) -> Vec<Milestone> {
        if self.is_empty() {
            return milestones;
        }
        milestones
            .into_iter()
            .filter(|m| self.matches(m, now))
            .collect()
    }
}
