//! Milestone data model
//!
//! Input records ([`MilestoneSpec`], [`MilestonePatch`]) and the immutable
//! [`Milestone`] snapshot returned by the remote.

use crate::{GhpmError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar date format accepted on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A due date normalised to the end of the given calendar day (UTC).
///
/// GitHub treats `due_on` as start-of-day, while `--due-on 2024-01-01` means
/// "due by the end of January 1st", so the instant sent is the following
/// midnight: `2024-01-02T00:00:00Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(DateTime<Utc>);

impl DueDate {
    pub fn end_of_day(date: NaiveDate) -> Self {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        Self(midnight + chrono::Duration::hours(24))
    }

    /// Wire representation, e.g. `2024-01-02T00:00:00Z`
    pub fn to_api_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl FromStr for DueDate {
    type Err = GhpmError;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
            GhpmError::Validation(format!("Invalid due date '{}' (expected YYYY-MM-DD): {}", s, e))
        })?;
        Ok(Self::end_of_day(date))
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_api_string())
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_api_string())
    }
}

/// Milestone state filter understood by the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MilestoneState {
    #[default]
    All,
    Open,
    Closed,
}

impl MilestoneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneState::All => "all",
            MilestoneState::Open => "open",
            MilestoneState::Closed => "closed",
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneSpec {
    pub title: String,
    pub description: String,
    pub due_on: DueDate,
}

impl MilestoneSpec {
    pub fn new(title: impl Into<String>, description: impl Into<String>, due_on: DueDate) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_on,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GhpmError::Validation(
                "Milestone title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial milestone input for edits; only present fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MilestonePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<DueDate>,
}

impl MilestonePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due_on.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(GhpmError::Validation(
                "Nothing to update: provide a description, due date or new title".to_string(),
            ));
        }
        if matches!(self.title.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(GhpmError::Validation(
                "Milestone title cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Milestone snapshot as returned by the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Repository-scoped number used to address edits
    pub number: u64,
    pub title: String,
    pub description: String,
    pub state: String,
    pub open_issues: u32,
    pub closed_issues: u32,
    pub due_on: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn new(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            description: String::new(),
            state: "open".to_string(),
            open_issues: 0,
            closed_issues: 0,
            due_on: None,
            closed_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_issues(mut self, open: u32, closed: u32) -> Self {
        self.open_issues = open;
        self.closed_issues = closed;
        self
    }

    pub fn with_due_on(mut self, due_on: DateTime<Utc>) -> Self {
        self.due_on = Some(due_on);
        self
    }

    pub fn with_closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self.state = "closed".to_string();
        self
    }

    /// Has a due date strictly before `now`
    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        matches!(self.due_on, Some(due) if due < now)
    }

    pub fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}
