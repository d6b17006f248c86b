//! Declarative policy table
//!
//! The table lists `(resource path, verbs, minimum role)` rows. It is pure
//! data: the registry turns it into a resource tree and validates every row
//! against the role hierarchy.

use crate::error::Result;
use crate::role::names;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One row of the policy table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Dotted resource path (e.g., "semester.rankings")
    pub path: String,

    /// Verbs granted at that path
    pub verbs: Vec<String>,

    /// Least senior role allowed to use the verbs
    pub min_role: String,
}

impl PolicyEntry {
    /// Create a new policy entry
    pub fn new(path: impl Into<String>, verbs: &[&str], min_role: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verbs: verbs.iter().map(|verb| verb.to_string()).collect(),
            min_role: min_role.into(),
        }
    }
}

/// Ordered collection of policy entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyTable {
    entries: Vec<PolicyEntry>,
}

impl PolicyTable {
    /// Create a table from explicit entries
    pub fn new(entries: Vec<PolicyEntry>) -> Self {
        Self { entries }
    }

    /// The club's built-in policy
    pub fn club_default() -> Self {
        const CRUD: &[&str] = &["create", "get", "list", "edit", "delete"];

        Self::new(vec![
            PolicyEntry::new("login", CRUD, names::WEBMASTER),
            PolicyEntry::new("user", CRUD, names::EXECUTIVE),
            PolicyEntry::new("membership", &["create", "get", "list", "edit"], names::EXECUTIVE),
            PolicyEntry::new("semester", &["create"], names::VICE_PRESIDENT),
            PolicyEntry::new("semester", &["get", "list"], names::EXECUTIVE),
            PolicyEntry::new("semester.rankings", &["get", "list"], names::EXECUTIVE),
            PolicyEntry::new("semester.rankings", &["export"], names::SECRETARY),
            PolicyEntry::new("semester.transaction", CRUD, names::EXECUTIVE),
            PolicyEntry::new("structure", &["create", "get", "list", "edit"], names::EXECUTIVE),
            PolicyEntry::new(
                "event",
                &["create", "get", "list", "edit", "end", "restart", "rebuy"],
                names::EXECUTIVE,
            ),
            PolicyEntry::new(
                "event.participant",
                &["create", "get", "list", "signin", "signout", "delete"],
                names::EXECUTIVE,
            ),
        ])
    }

    /// Decode a table from a JSON array of entries
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a JSON policy file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.entries
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total verbs declared across all rows
    pub fn verb_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.verbs.len()).sum()
    }
}
