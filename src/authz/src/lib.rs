//! # Clubhouse Authorization Engine
//!
//! Hierarchical role-based access control for the club admin backend.
//!
//! ## Features
//!
//! - **Dotted actions** such as `event.participant.signin`, parsed once into
//!   an [`ActionPath`]
//! - **Role hierarchy** with a total seniority order (`bot` through
//!   `webmaster`)
//! - **Resource tree** built from a declarative [`PolicyTable`]
//! - **Fail-closed checks**: malformed input, unknown resources and unknown
//!   roles are all denied, indistinguishably
//! - **Permission snapshots** for driving client UI state
//!
//! ## Example
//!
//! ```rust
//! use clubhouse_authz::{AuthorizationService, AuthorizerRegistry};
//!
//! let registry = AuthorizerRegistry::global();
//! let service = AuthorizationService::new("secretary", registry);
//!
//! assert!(service.is_authorized("semester.rankings.export"));
//! assert!(!service.is_authorized("login.create"));
//!
//! let snapshot = service.get_permissions();
//! assert!(snapshot.is_allowed("event.participant.signin"));
//! ```

pub mod action;
pub mod authorizer;
pub mod config;
pub mod error;
pub mod policy;
pub mod registry;
pub mod role;
pub mod service;
pub mod snapshot;

// Re-export commonly used types
pub use action::{ActionPath, ActionPathError};
pub use authorizer::{PermissionEntry, ResourceAuthorizer};
pub use config::AuthzConfig;
pub use error::{AuthzError, Result};
pub use policy::{PolicyEntry, PolicyTable};
pub use registry::AuthorizerRegistry;
pub use role::{Rank, Role, RoleHierarchy};
pub use service::AuthorizationService;
pub use snapshot::PermissionSnapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
