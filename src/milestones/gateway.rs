//! Milestone remote gateway
//!
//! Typed façade over the `/repos/{owner}/{repo}/milestones` REST endpoints.
//! Every operation is scoped to one [`RepositoryTarget`] and performs one
//! round trip, except [`MilestoneGateway::update`] which lists then edits.

use super::model::{Milestone, MilestonePatch, MilestoneSpec, MilestoneState};
use super::targets::RepositoryTarget;
use crate::github::Transport;
use crate::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Largest page the list endpoint serves
pub const LIST_PAGE_SIZE: u32 = 100;

/// Milestone as the REST API returns it
#[derive(Debug, Deserialize)]
struct RemoteMilestone {
    number: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    open_issues: u32,
    #[serde(default)]
    closed_issues: u32,
    #[serde(default)]
    due_on: Option<DateTime<Utc>>,
    #[serde(default)]
    closed_at: Option<DateTime<Utc>>,
}

impl From<RemoteMilestone> for Milestone {
    fn from(remote: RemoteMilestone) -> Self {
        Self {
            number: remote.number,
            title: remote.title,
            description: remote.description.unwrap_or_default(),
            state: remote.state.unwrap_or_else(|| "open".to_string()),
            open_issues: remote.open_issues,
            closed_issues: remote.closed_issues,
            due_on: remote.due_on,
            closed_at: remote.closed_at,
        }
    }
}

/// Result of an edit-by-title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Milestone),
    /// No milestone with that title exists in the repository
    NotFound,
}

pub struct MilestoneGateway<T> {
    transport: T,
}

impl<T: Transport> MilestoneGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn collection_path(target: &RepositoryTarget) -> String {
        format!(
            "/repos/{}/{}/milestones",
            urlencoding::encode(&target.owner),
            urlencoding::encode(&target.name)
        )
    }

    /// Create a milestone. The title is checked before any request is made.
    pub async fn create(&self, target: &RepositoryTarget, spec: &MilestoneSpec) -> Result<Milestone> {
        spec.validate()?;

        info!(owner = %target.owner, repo = %target.name, title = %spec.title, "Creating milestone");

        let body = serde_json::to_value(spec)?;
        let bytes = self
            .transport
            .send(Method::POST, &Self::collection_path(target), Some(body))
            .await?;
        let created: RemoteMilestone = serde_json::from_slice(&bytes)?;

        debug!(owner = %target.owner, repo = %target.name, number = created.number, "Milestone created");
        Ok(created.into())
    }

    /// List milestones sorted by due date ascending, as the remote orders them
    pub async fn list(&self, target: &RepositoryTarget, state: MilestoneState) -> Result<Vec<Milestone>> {
        let path = format!(
            "{}?state={}&sort=due_on&direction=asc&per_page={}",
            Self::collection_path(target),
            state,
            LIST_PAGE_SIZE
        );

        debug!(owner = %target.owner, repo = %target.name, state = %state, "Listing milestones");

        let bytes = self.transport.send(Method::GET, &path, None).await?;
        let remote: Vec<RemoteMilestone> = serde_json::from_slice(&bytes)?;

        debug!(owner = %target.owner, repo = %target.name, count = remote.len(), "Milestones listed");
        Ok(remote.into_iter().map(Milestone::from).collect())
    }

    /// Edit the milestone whose title matches exactly (case-sensitive).
    ///
    /// Only the fields present in `patch` are sent.
    pub async fn update(
        &self,
        target: &RepositoryTarget,
        title: &str,
        patch: &MilestonePatch,
    ) -> Result<UpdateOutcome> {
        patch.validate()?;

        let milestones = self.list(target, MilestoneState::All).await?;
        let mut matches = milestones.iter().filter(|m| m.title == title);

        let Some(existing) = matches.next() else {
            debug!(owner = %target.owner, repo = %target.name, title = %title, "Milestone not found");
            return Ok(UpdateOutcome::NotFound);
        };

        let duplicates = matches.count();
        if duplicates > 0 {
            warn!(
                owner = %target.owner,
                repo = %target.name,
                title = %title,
                duplicates,
                number = existing.number,
                "Several milestones share this title; editing the first"
            );
        }

        info!(owner = %target.owner, repo = %target.name, number = existing.number, title = %title, "Updating milestone");

        let path = format!("{}/{}", Self::collection_path(target), existing.number);
        let body = serde_json::to_value(patch)?;
        let bytes = self.transport.send(Method::PATCH, &path, Some(body)).await?;
        let updated: RemoteMilestone = serde_json::from_slice(&bytes)?;

        Ok(UpdateOutcome::Updated(updated.into()))
    }
}
