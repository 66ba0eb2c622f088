//! Repository target resolution
//!
//! Expands the configured repository list into concrete (owner, name) pairs.

use crate::config::RepositoryEntry;
use crate::{GhpmError, Result};
use std::fmt;

/// One (owner, repository) pair a batch operation runs against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryTarget {
    pub owner: String,
    pub name: String,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Resolve configured entries against the global owner.
///
/// A non-empty per-entry owner wins over `global_owner`. Output order is the
/// configuration order.
pub fn resolve(global_owner: &str, entries: &[RepositoryEntry]) -> Result<Vec<RepositoryTarget>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(GhpmError::Config(format!(
                    "repositories[{}]: repository name cannot be empty",
                    index
                )));
            }

            let owner = match entry.username.as_deref().map(str::trim) {
                Some(owner) if !owner.is_empty() => owner,
                _ => global_owner.trim(),
            };
            if owner.is_empty() {
                return Err(GhpmError::Config(format!(
                    "repositories[{}] ({}): no owner; set a global username or a per-repository username",
                    index, name
                )));
            }

            Ok(RepositoryTarget::new(owner, name))
        })
        .collect()
}
