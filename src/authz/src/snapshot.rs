//! Permission snapshots
//!
//! A snapshot answers every declared capability for one role at once, so a
//! client can enable or disable UI without issuing one check per control.

use crate::action::ActionPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nested verb → allowed mapping mirroring the resource tree
///
/// Verbs and sub-resources live in separate maps, the same way the tree
/// keeps them apart, so a verb and a child resource may share a name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// Verbs declared at this node
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub verbs: BTreeMap<String, bool>,

    /// Child resources
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, PermissionSnapshot>,
}

impl PermissionSnapshot {
    /// Look up a dotted action in the snapshot
    ///
    /// Absent or malformed actions are `false`, matching the live check.
    pub fn is_allowed(&self, action: &str) -> bool {
        let Ok(path) = ActionPath::parse(action) else {
            return false;
        };
        let (resource, rest) = path.split_first();
        if rest.is_empty() {
            return false;
        }

        self.resources
            .get(resource)
            .is_some_and(|node| node.lookup(rest))
    }

    fn lookup(&self, segments: &[String]) -> bool {
        match segments {
            [] => false,
            [verb] => self.verbs.get(verb).copied().unwrap_or(false),
            [child, rest @ ..] => self
                .resources
                .get(child)
                .is_some_and(|node| node.lookup(rest)),
        }
    }

    /// Number of verbs in this snapshot, including nested resources
    pub fn capability_count(&self) -> usize {
        self.verbs.len()
            + self
                .resources
                .values()
                .map(PermissionSnapshot::capability_count)
                .sum::<usize>()
    }

    /// Every dotted action in the snapshot with its decision, sorted
    pub fn flatten(&self) -> Vec<(String, bool)> {
        let mut out = Vec::with_capacity(self.capability_count());
        for (name, child) in &self.resources {
            child.flatten_into(name, &mut out);
        }
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, bool)>) {
        for (verb, allowed) in &self.verbs {
            out.push((format!("{prefix}.{verb}"), *allowed));
        }
        for (name, child) in &self.resources {
            child.flatten_into(&format!("{prefix}.{name}"), out);
        }
    }

    /// Whether every capability is granted
    pub fn all_allowed(&self) -> bool {
        self.verbs.values().all(|allowed| *allowed)
            && self.resources.values().all(PermissionSnapshot::all_allowed)
    }

    /// Whether no capability is granted
    pub fn none_allowed(&self) -> bool {
        self.verbs.values().all(|allowed| !*allowed)
            && self.resources.values().all(PermissionSnapshot::none_allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PermissionSnapshot {
        let participant = PermissionSnapshot {
            verbs: BTreeMap::from([("signin".to_string(), true), ("delete".to_string(), false)]),
            resources: BTreeMap::new(),
        };
        let event = PermissionSnapshot {
            verbs: BTreeMap::from([("create".to_string(), true)]),
            resources: BTreeMap::from([("participant".to_string(), participant)]),
        };
        PermissionSnapshot {
            verbs: BTreeMap::new(),
            resources: BTreeMap::from([("event".to_string(), event)]),
        }
    }

    #[test]
    fn test_is_allowed() {
        let snapshot = sample();
        assert!(snapshot.is_allowed("event.create"));
        assert!(snapshot.is_allowed("event.participant.signin"));
        assert!(!snapshot.is_allowed("event.participant.delete"));
    }

    #[test]
    fn test_is_allowed_fails_closed() {
        let snapshot = sample();
        assert!(!snapshot.is_allowed(""));
        assert!(!snapshot.is_allowed("event"));
        assert!(!snapshot.is_allowed("event.participant"));
        assert!(!snapshot.is_allowed("event..create"));
        assert!(!snapshot.is_allowed("event.restart"));
        assert!(!snapshot.is_allowed("user.create"));
        assert!(!snapshot.is_allowed("event.participant.signin.extra"));
    }

    #[test]
    fn test_counts_and_flatten() {
        let snapshot = sample();
        assert_eq!(snapshot.capability_count(), 3);
        assert_eq!(
            snapshot.flatten(),
            vec![
                ("event.create".to_string(), true),
                ("event.participant.delete".to_string(), false),
                ("event.participant.signin".to_string(), true),
            ]
        );
        assert!(!snapshot.all_allowed());
        assert!(!snapshot.none_allowed());
        assert!(PermissionSnapshot::default().all_allowed());
    }

    #[test]
    fn test_serializes_as_nested_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "resources": {
                    "event": {
                        "verbs": {"create": true},
                        "resources": {
                            "participant": {
                                "verbs": {"delete": false, "signin": true}
                            }
                        }
                    }
                }
            })
        );
    }
}
