//! Per-request authorization facade
//!
//! An `AuthorizationService` binds one role to a registry. It is cheap to
//! create, holds no state beyond that pair, and never reports why a check
//! failed: malformed actions, unknown resources and insufficient rank all
//! look the same to the caller.

use crate::action::ActionPath;
use crate::error::{AuthzError, Result};
use crate::registry::AuthorizerRegistry;
use crate::snapshot::PermissionSnapshot;
use tracing::debug;

/// Authorization checks for one role
///
/// # Examples
///
/// ```
/// use clubhouse_authz::AuthorizationService;
///
/// let service = AuthorizationService::for_role("tournament_director");
/// assert!(service.is_authorized("structure.edit"));
/// assert!(!service.is_authorized("semester.create"));
/// assert!(!service.is_authorized("nonexistent.create"));
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizationService<'r> {
    /// Role as resolved by the caller
    role: String,

    /// Registry the role is checked against
    registry: &'r AuthorizerRegistry,
}

impl<'r> AuthorizationService<'r> {
    /// Bind `role` to `registry`
    pub fn new(role: impl Into<String>, registry: &'r AuthorizerRegistry) -> Self {
        Self {
            role: role.into(),
            registry,
        }
    }

    /// The bound role, unchanged
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Whether the bound role may perform `action`
    ///
    /// Never fails: every malformed or unknown action is `false`.
    pub fn is_authorized(&self, action: &str) -> bool {
        let path = match ActionPath::parse(action) {
            Ok(path) => path,
            Err(e) => {
                debug!(role = %self.role, action, error = %e, "Denied: malformed action");
                return false;
            }
        };

        let (resource, rest) = path.split_first();
        if rest.is_empty() {
            debug!(role = %self.role, action, "Denied: action has no verb");
            return false;
        }

        let Some(node) = self.registry.resource(resource) else {
            debug!(role = %self.role, action, "Denied: unknown resource");
            return false;
        };

        let allowed = node.resolve(rest, &self.role, self.registry.hierarchy());
        if !allowed {
            debug!(role = %self.role, action, "Denied: undeclared capability or insufficient rank");
        }
        allowed
    }

    /// Like `is_authorized`, but as a `Result` for `?`-style callers
    ///
    /// The error carries the action only, never the reason.
    pub fn require(&self, action: &str) -> Result<()> {
        if self.is_authorized(action) {
            Ok(())
        } else {
            Err(AuthzError::AccessDenied {
                action: action.to_string(),
            })
        }
    }

    /// Decision for every declared capability
    pub fn get_permissions(&self) -> PermissionSnapshot {
        self.registry
            .root()
            .snapshot(&self.role, self.registry.hierarchy())
    }
}

impl AuthorizationService<'static> {
    /// Bind `role` to the global club registry
    pub fn for_role(role: impl Into<String>) -> Self {
        Self::new(role, AuthorizerRegistry::global())
    }
}
