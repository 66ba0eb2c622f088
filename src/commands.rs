//! CLI command definitions
//!
//! All CLI structs and subcommand enums are defined here.

use clap::{Parser, Subcommand};
use ghpm::milestones::DueDate;

/// ghpm - manage GitHub milestones across many repositories
#[derive(Parser, Debug)]
#[command(name = "ghpm")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.config/ghpm/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// GitHub token (overrides the config file)
    #[arg(long, env = "GHPM_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// GitHub user or organization owning the repositories (overrides the config file)
    #[arg(long, env = "GHPM_USERNAME", global = true)]
    pub username: Option<String>,

    /// GitHub or GitHub Enterprise URL (overrides the config file)
    #[arg(long, env = "GHPM_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Maximum number of repositories processed at once
    #[arg(long, default_value_t = 1, global = true)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout: u64,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Exit non-zero if any repository failed
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage milestones
    #[command(subcommand)]
    Milestones(MilestoneCommands),

    /// Print version information
    Version,
}

#[derive(Subcommand, Debug)]
pub enum MilestoneCommands {
    /// Create a milestone in all the repositories in the configuration
    Create {
        /// Title of the milestone
        #[arg(long)]
        title: String,

        /// Description of the milestone
        #[arg(long, default_value = "")]
        description: String,

        /// Due date of the milestone (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due_date)]
        due_on: DueDate,
    },

    /// Get milestones from all the repositories in the configuration
    Get {
        /// Show only overdue milestones
        #[arg(long)]
        overdue: bool,

        /// Show only closed milestones
        #[arg(long)]
        closed: bool,
    },

    /// Update a milestone in all the repositories in the configuration.
    /// Repositories without a milestone of that title are skipped.
    Update {
        /// Title of the milestone to update (exact match)
        title: String,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due_date)]
        due_on: Option<DueDate>,

        /// New title
        #[arg(long)]
        rename: Option<String>,
    },
}

fn parse_due_date(s: &str) -> Result<DueDate, String> {
    s.parse::<DueDate>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "ghpm",
            "milestones",
            "create",
            "--title",
            "v1",
            "--due-on",
            "2024-01-01",
        ])
        .unwrap();

        match cli.command {
            Commands::Milestones(MilestoneCommands::Create {
                title,
                description,
                due_on,
            }) => {
                assert_eq!(title, "v1");
                assert_eq!(description, "");
                assert_eq!(due_on.to_api_string(), "2024-01-02T00:00:00Z");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_timeout_matches_transport() {
        let cli = Cli::try_parse_from(["ghpm", "milestones", "get"]).unwrap();
        assert_eq!(cli.timeout, ghpm::github::REQUEST_TIMEOUT.as_secs());
        assert_eq!(cli.concurrency, 1);
        assert!(!cli.strict);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "ghpm",
            "milestones",
            "create",
            "--title",
            "v1",
            "--due-on",
            "tomorrow",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_get_with_global_flags() {
        let cli = Cli::try_parse_from([
            "ghpm",
            "milestones",
            "get",
            "--closed",
            "--json",
            "--concurrency",
            "4",
            "--timeout",
            "30",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.timeout, 30);
        assert!(matches!(
            cli.command,
            Commands::Milestones(MilestoneCommands::Get {
                overdue: false,
                closed: true
            })
        ));
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "ghpm",
            "milestones",
            "update",
            "v1",
            "--description",
            "moved",
        ])
        .unwrap();

        match cli.command {
            Commands::Milestones(MilestoneCommands::Update {
                title,
                description,
                due_on,
                rename,
            }) => {
                assert_eq!(title, "v1");
                assert_eq!(description.as_deref(), Some("moved"));
                assert!(due_on.is_none());
                assert!(rename.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
