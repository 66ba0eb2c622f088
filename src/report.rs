//! Report rendering
//!
//! Pure formatting of a [`BatchResult`]: no filtering, no reordering. The text
//! layout is the user-facing contract:
//!
//! ```text
//! ##################################################
//! 		 Milestones
//! ##################################################
//! Repository: repo-a
//! 1. {"title":"v1","open_issues":3,"due_on":"02 Jan 24"}
//! --------------------------------------------------
//! ```

use crate::milestones::{BatchResult, Milestone, TargetOutcome};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

const BANNER_RULE: &str = "##################################################";
const BANNER_TITLE: &str = "\t\t Milestones";
const SEPARATOR: &str = "--------------------------------------------------";

/// Display format for dates in summaries (`02 Jan 24`)
pub const SUMMARY_DATE_FORMAT: &str = "%d %b %y";

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Milestone summary line; empty and zero fields are omitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneSummary {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub open_issues: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub closed_issues: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub closed_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due_on: String,
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format(SUMMARY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

impl From<&Milestone> for MilestoneSummary {
    fn from(milestone: &Milestone) -> Self {
        Self {
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            open_issues: milestone.open_issues,
            closed_issues: milestone.closed_issues,
            closed_at: format_date(milestone.closed_at),
            due_on: format_date(milestone.due_on),
        }
    }
}

/// Render the human-readable report
pub fn render_text(result: &BatchResult) -> Result<String> {
    let mut out = String::new();
    for line in [BANNER_RULE, BANNER_TITLE, BANNER_RULE] {
        out.push_str(line);
        out.push('\n');
    }

    for entry in result.entries() {
        out.push_str(&format!("Repository: {}\n", entry.target.name));
        match &entry.outcome {
            TargetOutcome::Succeeded(milestones) => {
                for (i, milestone) in milestones.iter().enumerate() {
                    let line = serde_json::to_string(&MilestoneSummary::from(milestone))?;
                    out.push_str(&format!("{}. {}\n", i + 1, line));
                }
            }
            TargetOutcome::Skipped(reason) => {
                out.push_str(&format!("1. skipped: {}\n", reason));
            }
            TargetOutcome::Failed(error) => {
                out.push_str(&format!("1. error: {}\n", error));
            }
        }
        out.push_str(SEPARATOR);
        out.push('\n');
    }

    Ok(out)
}

/// Machine-readable record for one target
#[derive(Debug, Serialize)]
struct TargetReport<'a> {
    repository: &'a str,
    owner: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    milestones: Vec<MilestoneSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Render the report as a pretty-printed JSON array, one record per target
pub fn render_json(result: &BatchResult) -> Result<String> {
    let reports: Vec<TargetReport<'_>> = result
        .entries()
        .iter()
        .map(|entry| {
            let (status, milestones, reason) = match &entry.outcome {
                TargetOutcome::Succeeded(milestones) => (
                    "succeeded",
                    milestones.iter().map(MilestoneSummary::from).collect::<Vec<_>>(),
                    None,
                ),
                TargetOutcome::Skipped(reason) => ("skipped", Vec::new(), Some(reason.clone())),
                TargetOutcome::Failed(error) => ("failed", Vec::new(), Some(error.to_string())),
            };
            TargetReport {
                repository: &entry.target.name,
                owner: &entry.target.owner,
                status,
                milestones,
                reason,
            }
        })
        .collect();

    Ok(serde_json::to_string_pretty(&reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milestones::{BatchEntry, RepositoryTarget};
    use crate::GhpmError;
    use chrono::TimeZone;

    fn sample() -> BatchResult {
        let due = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
        BatchResult::new(vec![
            BatchEntry {
                target: RepositoryTarget::new("org", "repo-a"),
                outcome: TargetOutcome::Succeeded(vec![
                    Milestone::new(1, "v1")
                        .with_description("first")
                        .with_issues(3, 0)
                        .with_due_on(due),
                    Milestone::new(2, "v2").with_closed_at(closed),
                ]),
            },
            BatchEntry {
                target: RepositoryTarget::new("other", "repo-b"),
                outcome: TargetOutcome::Failed(GhpmError::NotFound("/repos/other/repo-b".into())),
            },
            BatchEntry {
                target: RepositoryTarget::new("org", "repo-c"),
                outcome: TargetOutcome::Skipped("milestone 'v1' not found".to_string()),
            },
        ])
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&sample()).unwrap();
        let expected = "\
##################################################
\t\t Milestones
##################################################
Repository: repo-a
1. {\"title\":\"v1\",\"description\":\"first\",\"open_issues\":3,\"due_on\":\"02 Jan 24\"}
2. {\"title\":\"v2\",\"closed_at\":\"01 Feb 24\"}
--------------------------------------------------
Repository: repo-b
1. error: Not found: /repos/other/repo-b
--------------------------------------------------
Repository: repo-c
1. skipped: milestone 'v1' not found
--------------------------------------------------
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_empty_batch_has_banner_only() {
        let text = render_text(&BatchResult::default()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_render_text_target_without_milestones() {
        let result = BatchResult::new(vec![BatchEntry {
            target: RepositoryTarget::new("org", "empty"),
            outcome: TargetOutcome::Succeeded(Vec::new()),
        }]);
        let text = render_text(&result).unwrap();
        assert!(text.ends_with("Repository: empty\n--------------------------------------------------\n"));
    }

    #[test]
    fn test_summary_omits_empty_fields() {
        let summary = MilestoneSummary::from(&Milestone::new(9, "bare"));
        assert_eq!(serde_json::to_string(&summary).unwrap(), "{\"title\":\"bare\"}");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = value.as_array().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["repository"], "repo-a");
        assert_eq!(records[0]["status"], "succeeded");
        assert_eq!(records[0]["milestones"][1]["title"], "v2");
        assert_eq!(records[1]["owner"], "other");
        assert_eq!(records[1]["status"], "failed");
        assert!(records[1].get("milestones").is_none());
        assert_eq!(records[2]["status"], "skipped");
    }
}
