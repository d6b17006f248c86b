//! Authorizer registry
//!
//! The registry is the root of the resource tree together with the role
//! hierarchy it was validated against. It is built once at startup and is
//! read-only afterwards, so any number of threads may share it by reference.

use crate::action::{ActionPath, SEPARATOR};
use crate::authorizer::{NodeBuilder, ResourceAuthorizer};
use crate::config::AuthzConfig;
use crate::error::{AuthzError, Result};
use crate::policy::PolicyTable;
use crate::role::{Rank, RoleHierarchy};
use once_cell::sync::Lazy;
use tracing::{debug, info};

static GLOBAL_REGISTRY: Lazy<AuthorizerRegistry> = Lazy::new(|| {
    AuthorizerRegistry::build(RoleHierarchy::club(), &PolicyTable::club_default())
        .expect("built-in club policy table must be valid")
});

/// Process-wide resource tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizerRegistry {
    /// Seniority order used for every threshold in the tree
    hierarchy: RoleHierarchy,

    /// Composite root whose children are the top-level resources
    root: ResourceAuthorizer,
}

impl AuthorizerRegistry {
    /// Build a registry from a policy table
    ///
    /// The same table always yields an identical tree.
    ///
    /// # Errors
    ///
    /// - `AuthzError::UnknownRole` if a row names an undeclared role
    /// - `AuthzError::InvalidPolicy` if a path or verb is malformed
    /// - `AuthzError::DuplicateCapability` if a `(path, verb)` repeats
    pub fn build(hierarchy: RoleHierarchy, table: &PolicyTable) -> Result<Self> {
        let mut root = NodeBuilder::default();

        for entry in table.entries() {
            let path = ActionPath::parse(&entry.path).map_err(|e| {
                AuthzError::InvalidPolicy(format!("Resource path '{}': {}", entry.path, e))
            })?;
            let min_rank = hierarchy.require(&entry.min_role, &entry.path)?;

            if entry.verbs.is_empty() {
                return Err(AuthzError::InvalidPolicy(format!(
                    "Resource path '{}' declares no verbs",
                    entry.path
                )));
            }

            let node = root.descend(path.segments().iter().map(String::as_str));
            for verb in &entry.verbs {
                if verb.is_empty() || verb.contains(SEPARATOR) {
                    return Err(AuthzError::InvalidPolicy(format!(
                        "Verb '{}' on '{}' must be a single non-empty segment",
                        verb, entry.path
                    )));
                }

                if !node.insert_verb(verb, min_rank) {
                    return Err(AuthzError::DuplicateCapability(format!(
                        "{}.{}",
                        entry.path, verb
                    )));
                }
                debug!(path = %entry.path, verb = %verb, min_rank = %min_rank, "Declared capability");
            }
        }

        let registry = Self {
            hierarchy,
            root: root.build_root(),
        };

        info!(
            rows = table.len(),
            verbs = table.verb_count(),
            capabilities = registry.root.capability_count(),
            resources = ?registry.resources().collect::<Vec<_>>(),
            "AuthorizerRegistry built"
        );

        Ok(registry)
    }

    /// Build the club registry from the configured policy source
    pub fn from_config(config: &AuthzConfig) -> Result<Self> {
        let table = config.load_policy()?;
        Self::build(RoleHierarchy::club(), &table)
    }

    /// The shared registry built from the built-in club policy
    pub fn global() -> &'static AuthorizerRegistry {
        &GLOBAL_REGISTRY
    }

    /// Role hierarchy backing every threshold
    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Root node of the tree
    pub fn root(&self) -> &ResourceAuthorizer {
        &self.root
    }

    /// Top-level resource node by name
    pub fn resource(&self, name: &str) -> Option<&ResourceAuthorizer> {
        self.root.child(name)
    }

    /// Top-level resource names in order
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.root.children().map(|(name, _)| name)
    }

    /// Every declared `(dotted action, min rank)`, sorted by action
    pub fn capabilities(&self) -> Vec<(String, Rank)> {
        let mut out = Vec::with_capacity(self.root.capability_count());
        for (name, node) in self.root.children() {
            node.collect_capabilities(name, &mut out);
        }
        out
    }
}
