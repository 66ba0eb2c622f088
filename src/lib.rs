//! ghpm - GitHub project management across a fleet of repositories
//!
//! Creates, lists and updates milestones in every configured repository with a
//! single token, and reports the per-repository results in configuration order.
//!
//! # Architecture
//!
//! - **config**: YAML configuration with environment/flag overrides
//! - **github**: transport trait and the reqwest-backed implementation
//! - **milestones**: target resolution, remote gateway and batch orchestrator
//! - **report**: text and JSON rendering of batch results

pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod milestones;
pub mod report;

// Re-exports
pub use error::{GhpmError, Result};
