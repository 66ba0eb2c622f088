//! ghpm configuration file handling
//!
//! Loads ~/.config/ghpm/config.yaml and layers environment/flag overrides on
//! top of it.

use crate::github::DEFAULT_API_URL;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable consulted when neither the file nor the flags supply a token
pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// One configured repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Repository name
    pub name: String,

    /// Owner override; wins over the global username when non-empty
    #[serde(default, alias = "owner", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl RepositoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.username = Some(owner.into());
        self
    }
}

/// ghpm configuration
///
/// Represents the complete ~/.config/ghpm/config.yaml file: the token, the
/// default owner and the fleet of repositories every command runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhpmConfig {
    /// GitHub token
    #[serde(default)]
    pub token: String,

    /// GitHub user or organization used for repositories without an override
    #[serde(default, alias = "owner")]
    pub username: String,

    /// GitHub URL or REST API URL (GitHub Enterprise supported)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repositories, in report order
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Values from flags or the environment that override the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub username: Option<String>,
    pub api_url: Option<String>,
}

impl GhpmConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            token: String::new(),
            username: String::new(),
            api_url: default_api_url(),
            repositories: Vec::new(),
        }
    }

    /// Load configuration from the default path (~/.config/ghpm/config.yaml)
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::GhpmError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading ghpm configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            repositories = config.repositories.len(),
            api_url = %config.api_url,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving ghpm configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/ghpm/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("ghpm");
        path.push("config.yaml");
        path
    }

    /// Layer overrides on top of the file: non-empty override values win.
    /// `GITHUB_TOKEN` is used only when no token was configured at all.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(token) = overrides.token.filter(|t| !t.is_empty()) {
            self.token = token;
        }
        if let Some(username) = overrides.username.filter(|u| !u.is_empty()) {
            self.username = username;
        }
        if let Some(api_url) = overrides.api_url.filter(|u| !u.is_empty()) {
            self.api_url = api_url;
        }
        if self.token.is_empty() {
            if let Ok(token) = std::env::var(FALLBACK_TOKEN_ENV) {
                tracing::debug!("Using token from {}", FALLBACK_TOKEN_ENV);
                self.token = token;
            }
        }
        self
    }

    pub fn add_repository(&mut self, entry: RepositoryEntry) {
        self.repositories.push(entry);
    }

    pub fn repository_names(&self) -> Vec<&str> {
        self.repositories.iter().map(|r| r.name.as_str()).collect()
    }
}

impl Default for GhpmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_creation() {
        let config = GhpmConfig::new();
        assert!(config.repositories.is_empty());
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn test_parse_original_layout() {
        let yaml = r#"
token: ghp_abc
username: my-org
repositories:
  - name: repo-a
  - name: repo-b
    username: other-org
"#;
        let config: GhpmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.token, "ghp_abc");
        assert_eq!(config.username, "my-org");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.repository_names(), vec!["repo-a", "repo-b"]);
        assert_eq!(config.repositories[0].username, None);
        assert_eq!(config.repositories[1].username.as_deref(), Some("other-org"));
    }

    #[test]
    fn test_owner_alias() {
        let yaml = r#"
owner: my-org
repositories:
  - name: repo-a
    owner: someone
"#;
        let config: GhpmConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.username, "my-org");
        assert_eq!(config.repositories[0].username.as_deref(), Some("someone"));
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = GhpmConfig::new();
        config.token = "ghp_abc".to_string();
        config.username = "org".to_string();
        config.add_repository(RepositoryEntry::new("a"));
        config.add_repository(RepositoryEntry::new("b").with_owner("other"));

        config.save(path).unwrap();

        let loaded = GhpmConfig::load(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = GhpmConfig::load("/nonexistent/ghpm.yaml");
        assert!(matches!(result, Err(crate::GhpmError::Config(_))));
    }

    #[test]
    fn test_default_path() {
        let path = GhpmConfig::default_path();
        assert!(path.ends_with("ghpm/config.yaml"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = GhpmConfig::new();
        config.token = "from-file".to_string();
        config.username = "file-org".to_string();

        let config = config.apply_overrides(ConfigOverrides {
            token: Some("from-flag".to_string()),
            username: Some(String::new()),
            api_url: Some("https://github.example.com".to_string()),
        });

        assert_eq!(config.token, "from-flag");
        assert_eq!(config.username, "file-org");
        assert_eq!(config.api_url, "https://github.example.com");
    }
}
