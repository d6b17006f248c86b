//! Engine configuration

use crate::error::Result;
use crate::policy::PolicyTable;
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming a JSON policy file
pub const POLICY_PATH_ENV: &str = "CLUB_AUTHZ_POLICY";

/// Authorization engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthzConfig {
    /// JSON policy file; the built-in club table is used when unset
    pub policy_path: Option<PathBuf>,
}

impl AuthzConfig {
    /// Read configuration from the environment
    ///
    /// - `CLUB_AUTHZ_POLICY` - path to a JSON policy table (optional)
    pub fn from_env() -> Self {
        let policy_path = env::var_os(POLICY_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self { policy_path }
    }

    /// Use the policy file at `path`
    pub fn with_policy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.policy_path = Some(path.into());
        self
    }

    /// Load the configured policy table
    pub fn load_policy(&self) -> Result<PolicyTable> {
        match &self.policy_path {
            Some(path) => {
                info!(path = %path.display(), "Loading policy table from file");
                PolicyTable::from_path(path)
            }
            None => Ok(PolicyTable::club_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_builtin_table() {
        let config = AuthzConfig::default();
        assert!(config.policy_path.is_none());
        assert_eq!(config.load_policy().unwrap(), PolicyTable::club_default());
    }

    #[test]
    fn test_with_policy_path() {
        let config = AuthzConfig::default().with_policy_path("/etc/club/policy.json");
        assert_eq!(config.policy_path, Some(PathBuf::from("/etc/club/policy.json")));
    }
}
