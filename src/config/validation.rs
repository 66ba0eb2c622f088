//! Configuration validation
//!
//! Checks the shape of a ghpm configuration only; whether repositories exist
//! remotely is never checked here:
//! - A token is present
//! - At least one repository is configured
//! - Every repository has a name and an owner
//! - No (owner, name) pair appears twice
//! - The API URL is http(s)

use super::ghpm_config::GhpmConfig;
use crate::GhpmError;
use std::collections::HashSet;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub repository: Option<String>,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            repository: None,
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref repo) = self.repository {
            write!(f, "[{}] {}: {}", repo, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a ghpm configuration, collecting every problem
pub fn validate_config(config: &GhpmConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.token.trim().is_empty() {
        errors.push(ValidationError::new(
            "token",
            "A GitHub token is required (config file, --token, GHPM_TOKEN or GITHUB_TOKEN)",
        ));
    }

    if !config.api_url.starts_with("http://") && !config.api_url.starts_with("https://") {
        errors.push(ValidationError::new(
            "api_url",
            format!("Invalid GitHub URL: {}", config.api_url),
        ));
    }

    if config.repositories.is_empty() {
        errors.push(ValidationError::new(
            "repositories",
            "At least one repository must be defined",
        ));
    }

    let global_owner = config.username.trim();
    let mut seen = HashSet::new();
    for (index, repo) in config.repositories.iter().enumerate() {
        let field = format!("repositories[{}]", index);
        let name = repo.name.trim();

        if name.is_empty() {
            errors.push(ValidationError::new(
                format!("{}.name", field),
                "Repository name cannot be empty",
            ));
            continue;
        }

        let owner = repo
            .username
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .unwrap_or(global_owner);
        if owner.is_empty() {
            errors.push(
                ValidationError::new(
                    format!("{}.username", field),
                    "No owner: set a global username or a per-repository username",
                )
                .with_repository(name),
            );
            continue;
        }

        if !seen.insert((owner.to_string(), name.to_string())) {
            errors.push(
                ValidationError::new(
                    field,
                    format!("Duplicate repository: {}/{}", owner, name),
                )
                .with_repository(name),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate configuration and return a Result
pub fn validate_config_result(config: &GhpmConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        GhpmError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepositoryEntry;

    fn valid_config() -> GhpmConfig {
        let mut config = GhpmConfig::new();
        config.token = "ghp_abc".to_string();
        config.username = "org".to_string();
        config.add_repository(RepositoryEntry::new("a"));
        config.add_repository(RepositoryEntry::new("b").with_owner("other"));
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_token() {
        let mut config = valid_config();
        config.token = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "token");
    }

    #[test]
    fn test_empty_repositories() {
        let mut config = valid_config();
        config.repositories.clear();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].message.contains("At least one repository"));
    }

    #[test]
    fn test_missing_owner() {
        let mut config = valid_config();
        config.username = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].repository.as_deref(), Some("a"));
    }

    #[test]
    fn test_duplicate_repository() {
        let mut config = valid_config();
        config.add_repository(RepositoryEntry::new("a").with_owner("org"));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.message.contains("Duplicate repository: org/a")));
    }

    #[test]
    fn test_same_name_different_owner_is_fine() {
        let mut config = valid_config();
        config.add_repository(RepositoryEntry::new("a").with_owner("someone-else"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = valid_config();
        config.api_url = "github.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_result_collects_all_messages() {
        let config = GhpmConfig::new();
        match validate_config_result(&config) {
            Err(GhpmError::Config(msg)) => {
                assert!(msg.contains("token"));
                assert!(msg.contains("repositories"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
