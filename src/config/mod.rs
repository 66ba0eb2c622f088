//! Configuration system
//!
//! Loads ~/.config/ghpm/config.yaml with:
//! - The GitHub token
//! - A global owner (user or organization)
//! - The repository fleet, each entry optionally overriding the owner
//!
//! Environment variables and command-line flags are layered on top of the file.

mod ghpm_config;
pub mod validation;

pub use ghpm_config::{ConfigOverrides, GhpmConfig, RepositoryEntry, FALLBACK_TOKEN_ENV};
pub use validation::{validate_config, validate_config_result, ValidationError};
