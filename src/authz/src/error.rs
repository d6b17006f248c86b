//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
///
/// Runtime checks never surface these: `is_authorized` folds every failure
/// into `false`. They describe broken policy tables and tooling failures.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A policy threshold names a role the hierarchy does not declare
    #[error("Unknown role '{role}' referenced by {context}")]
    UnknownRole {
        /// The undeclared role name
        role: String,
        /// Where the role was referenced (e.g. a policy path)
        context: String,
    },

    /// Invalid role declaration
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Invalid policy definition
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// The same capability is declared more than once
    #[error("Duplicate capability: {0}")]
    DuplicateCapability(String),

    /// The bound role may not perform the action
    #[error("Access denied: {action}")]
    AccessDenied {
        /// The action as supplied by the caller
        action: String,
    },

    /// Policy document could not be decoded
    #[error("Policy parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
