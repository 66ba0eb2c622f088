//! ghpm - GitHub project management
//!
//! Main entry point for the ghpm CLI.

mod commands;

use chrono::Utc;
use clap::Parser;
use commands::{Cli, Commands, MilestoneCommands};
use ghpm::config::{validate_config_result, ConfigOverrides, GhpmConfig};
use ghpm::github::HttpTransport;
use ghpm::milestones::{
    resolve, BatchOrchestrator, FilterCriteria, MilestoneGateway, MilestonePatch,
    MilestoneSpec,
};
use ghpm::report;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = ghpm::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config_path = cli
        .config
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(GhpmConfig::default_path);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_configuration() {
                eprintln!(
                    "Check {} or the --token/--username/--api-url flags",
                    config_path.display()
                );
            }
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> ghpm::Result<i32> {
    let command = match cli.command {
        Commands::Version => {
            println!("ghpm {}", env!("CARGO_PKG_VERSION"));
            return Ok(0);
        }
        Commands::Milestones(ref command) => command,
    };

    let config = match cli.config {
        Some(ref path) => GhpmConfig::load(path)?,
        None => GhpmConfig::load_default()?,
    }
    .apply_overrides(ConfigOverrides {
        token: cli.token.clone(),
        username: cli.username.clone(),
        api_url: cli.api_url.clone(),
    });
    validate_config_result(&config)?;

    let targets = resolve(&config.username, &config.repositories)?;
    tracing::info!(
        repositories = ?config.repository_names(),
        "Configuration loaded"
    );

    let transport = HttpTransport::new(&config.api_url, config.token.clone())?
        .with_timeout(Duration::from_secs(cli.timeout))?;
    tracing::debug!(api = transport.base_url(), "Using GitHub API");
    let orchestrator = BatchOrchestrator::new(MilestoneGateway::new(transport), targets)
        .with_concurrency(cli.concurrency);

    let result = match command {
        MilestoneCommands::Create {
            title,
            description,
            due_on,
        } => {
            let spec = MilestoneSpec::new(title.clone(), description.clone(), *due_on);
            spec.validate()?;
            orchestrator.create(&spec).await
        }
        MilestoneCommands::Get { overdue, closed } => {
            let filter = FilterCriteria {
                overdue_only: *overdue,
                closed_only: *closed,
            };
            orchestrator.get(filter, Utc::now()).await
        }
        MilestoneCommands::Update {
            title,
            description,
            due_on,
            rename,
        } => {
            let patch = MilestonePatch {
                title: rename.clone(),
                description: description.clone(),
                due_on: *due_on,
            };
            patch.validate()?;
            orchestrator.update(title, &patch).await
        }
    };

    let output = if cli.json {
        report::render_json(&result)?
    } else {
        report::render_text(&result)?
    };
    println!("{}", output.trim_end());

    let code = result.exit_code(cli.strict);
    if code != 0 {
        eprintln!(
            "{} of {} repositories failed",
            result.failed(),
            result.len()
        );
    }
    Ok(code)
}
