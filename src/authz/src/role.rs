//! Role hierarchy
//!
//! Roles form a total seniority order. Every capability in the policy table
//! names a minimum role, and a principal passes when its own role is at
//! least that senior.

use crate::error::{AuthzError, Result};
use std::collections::HashMap;
use std::fmt;

/// Built-in club role names, most junior first
pub mod names {
    pub const BOT: &str = "bot";
    pub const EXECUTIVE: &str = "executive";
    pub const TOURNAMENT_DIRECTOR: &str = "tournament_director";
    pub const SECRETARY: &str = "secretary";
    pub const TREASURER: &str = "treasurer";
    pub const VICE_PRESIDENT: &str = "vice_president";
    pub const PRESIDENT: &str = "president";
    pub const WEBMASTER: &str = "webmaster";

    /// All built-in roles in ascending seniority
    pub const ALL: [&str; 8] = [
        BOT,
        EXECUTIVE,
        TOURNAMENT_DIRECTOR,
        SECRETARY,
        TREASURER,
        VICE_PRESIDENT,
        PRESIDENT,
        WEBMASTER,
    ];
}

/// Position of a role in the seniority order
///
/// Declared ranks are non-negative. `Rank::INVALID` sorts below all of them
/// and never satisfies a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(i32);

impl Rank {
    /// Sentinel for empty or unrecognized role names
    pub const INVALID: Rank = Rank(-1);

    /// Create a rank from its integer value
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Integer value of this rank
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this rank belongs to a declared role
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named role with its seniority rank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Unique role name (e.g., "treasurer")
    pub name: String,

    /// Seniority rank, higher is more privileged
    pub rank: Rank,
}

impl Role {
    /// Create a new role
    pub fn new(name: impl Into<String>, rank: i32) -> Self {
        Self {
            name: name.into(),
            rank: Rank::new(rank),
        }
    }
}

/// Total seniority order over role names
///
/// # Examples
///
/// ```
/// use clubhouse_authz::RoleHierarchy;
///
/// let roles = RoleHierarchy::club();
/// assert!(roles.at_least("executive", "treasurer"));
/// assert!(!roles.at_least("president", "secretary"));
/// assert!(!roles.at_least("bot", ""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    /// Roles sorted by ascending rank
    roles: Vec<Role>,

    /// Name to rank lookup
    ranks: HashMap<String, Rank>,
}

impl RoleHierarchy {
    /// Build a hierarchy from role declarations
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidRole` if a name is empty or repeated, or
    /// if a rank is negative or shared by two roles.
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Result<Self> {
        let mut roles: Vec<Role> = roles.into_iter().collect();
        let mut ranks = HashMap::with_capacity(roles.len());

        for role in &roles {
            if role.name.is_empty() {
                return Err(AuthzError::InvalidRole(
                    "Role name cannot be empty".to_string(),
                ));
            }

            if !role.rank.is_valid() {
                return Err(AuthzError::InvalidRole(format!(
                    "Role '{}' has negative rank {}",
                    role.name, role.rank
                )));
            }

            if ranks.insert(role.name.clone(), role.rank).is_some() {
                return Err(AuthzError::InvalidRole(format!(
                    "Role '{}' is declared more than once",
                    role.name
                )));
            }
        }

        roles.sort_by_key(|role| role.rank);
        if let Some(pair) = roles.windows(2).find(|pair| pair[0].rank == pair[1].rank) {
            return Err(AuthzError::InvalidRole(format!(
                "Roles '{}' and '{}' share rank {}",
                pair[0].name, pair[1].name, pair[0].rank
            )));
        }

        Ok(Self { roles, ranks })
    }

    /// The built-in club hierarchy, `bot` (0) through `webmaster` (7)
    pub fn club() -> Self {
        let roles = names::ALL
            .iter()
            .zip(0..)
            .map(|(name, rank)| Role::new(*name, rank))
            .collect();

        let ranks = names::ALL
            .iter()
            .zip(0..)
            .map(|(name, rank)| (name.to_string(), Rank::new(rank)))
            .collect();

        Self { roles, ranks }
    }

    /// Declared rank of `name`, or `Rank::INVALID` if empty or unknown
    pub fn rank_of(&self, name: &str) -> Rank {
        self.ranks.get(name).copied().unwrap_or(Rank::INVALID)
    }

    /// Construction-time lookup that rejects undeclared roles
    pub fn require(&self, name: &str, context: &str) -> Result<Rank> {
        self.ranks
            .get(name)
            .copied()
            .ok_or_else(|| AuthzError::UnknownRole {
                role: name.to_string(),
                context: context.to_string(),
            })
    }

    /// Whether `candidate` is at least as senior as `threshold`
    ///
    /// An unknown candidate never passes. An unknown threshold denies too,
    /// rather than admitting every declared role; tree leaves never reach
    /// this path because the registry validates thresholds when it is built
    /// and compares ranks through `admits`.
    pub fn at_least(&self, threshold: &str, candidate: &str) -> bool {
        let threshold = self.rank_of(threshold);
        threshold.is_valid() && self.admits(threshold, candidate)
    }

    /// Whether `candidate` meets an already validated minimum rank
    pub fn admits(&self, min_rank: Rank, candidate: &str) -> bool {
        let rank = self.rank_of(candidate);
        rank.is_valid() && rank >= min_rank
    }

    /// Name of the role holding `rank`, if declared
    pub fn name_of(&self, rank: Rank) -> Option<&str> {
        self.roles
            .iter()
            .find(|role| role.rank == rank)
            .map(|role| role.name.as_str())
    }

    /// Roles in ascending seniority
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// The most senior declared role
    pub fn most_senior(&self) -> Option<&Role> {
        self.roles.last()
    }

    /// Number of declared roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether no roles are declared
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleHierarchy {
    fn default() -> Self {
        Self::club()
    }
}
