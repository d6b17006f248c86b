//! Resource authorizer tree
//!
//! Each node owns the verbs declared directly on one resource and, for
//! composite resources, the nodes of its sub-resources. A single traversal
//! resolves every action, so the deny-on-unknown rule lives in one place.

use crate::role::{Rank, RoleHierarchy};
use crate::snapshot::PermissionSnapshot;
use std::collections::BTreeMap;

/// One declared capability: a verb and its minimum rank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionEntry<'a> {
    /// Verb name
    pub verb: &'a str,

    /// Minimum rank required
    pub min_rank: Rank,
}

/// A node in the resource tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAuthorizer {
    /// Resource with verbs only
    Leaf {
        /// Verb → minimum rank
        verbs: BTreeMap<String, Rank>,
    },

    /// Resource with sub-resources, and possibly verbs of its own
    Composite {
        /// Verb → minimum rank (may be empty)
        verbs: BTreeMap<String, Rank>,
        /// Sub-resource name → node
        children: BTreeMap<String, ResourceAuthorizer>,
    },
}

impl ResourceAuthorizer {
    /// Verbs declared directly on this node
    pub fn verbs(&self) -> &BTreeMap<String, Rank> {
        match self {
            Self::Leaf { verbs } | Self::Composite { verbs, .. } => verbs,
        }
    }

    /// Sub-resource node by name
    pub fn child(&self, name: &str) -> Option<&ResourceAuthorizer> {
        match self {
            Self::Leaf { .. } => None,
            Self::Composite { children, .. } => children.get(name),
        }
    }

    /// Sub-resources in name order
    pub fn children(&self) -> impl Iterator<Item = (&str, &ResourceAuthorizer)> {
        let children = match self {
            Self::Leaf { .. } => None,
            Self::Composite { children, .. } => Some(children),
        };
        children
            .into_iter()
            .flat_map(|map| map.iter().map(|(name, node)| (name.as_str(), node)))
    }

    /// Declared capabilities on this node, in verb order
    pub fn entries(&self) -> impl Iterator<Item = PermissionEntry<'_>> {
        self.verbs().iter().map(|(verb, min_rank)| PermissionEntry {
            verb: verb.as_str(),
            min_rank: *min_rank,
        })
    }

    /// Decide whether `role` may perform the remaining `segments`
    ///
    /// A single segment is a verb on this node; more than one walks into a
    /// child. Anything not declared is denied.
    pub fn resolve(&self, segments: &[String], role: &str, hierarchy: &RoleHierarchy) -> bool {
        match segments {
            [] => false,
            [verb] => self
                .verbs()
                .get(verb)
                .is_some_and(|min_rank| hierarchy.admits(*min_rank, role)),
            [child, rest @ ..] => self
                .child(child)
                .is_some_and(|node| node.resolve(rest, role, hierarchy)),
        }
    }

    /// Evaluate every capability in this subtree for `role`
    pub fn snapshot(&self, role: &str, hierarchy: &RoleHierarchy) -> PermissionSnapshot {
        PermissionSnapshot {
            verbs: self
                .verbs()
                .iter()
                .map(|(verb, min_rank)| (verb.clone(), hierarchy.admits(*min_rank, role)))
                .collect(),
            resources: self
                .children()
                .map(|(name, node)| (name.to_string(), node.snapshot(role, hierarchy)))
                .collect(),
        }
    }

    /// Number of verbs declared in this subtree
    pub fn capability_count(&self) -> usize {
        self.verbs().len()
            + self
                .children()
                .map(|(_, node)| node.capability_count())
                .sum::<usize>()
    }

    /// Append `(dotted action, min rank)` for every capability under `prefix`
    pub(crate) fn collect_capabilities(&self, prefix: &str, out: &mut Vec<(String, Rank)>) {
        for entry in self.entries() {
            out.push((format!("{prefix}.{}", entry.verb), entry.min_rank));
        }
        for (name, node) in self.children() {
            node.collect_capabilities(&format!("{prefix}.{name}"), out);
        }
    }
}

/// Mutable node used while the registry is assembled
#[derive(Debug, Default)]
pub(crate) struct NodeBuilder {
    verbs: BTreeMap<String, Rank>,
    children: BTreeMap<String, NodeBuilder>,
}

impl NodeBuilder {
    /// Walk to (creating as needed) the node at `path`
    pub(crate) fn descend<'a>(&mut self, path: impl IntoIterator<Item = &'a str>) -> &mut NodeBuilder {
        path.into_iter().fold(self, |node, segment| {
            node.children.entry(segment.to_string()).or_default()
        })
    }

    /// Declare a verb; returns false if it already exists
    pub(crate) fn insert_verb(&mut self, verb: &str, min_rank: Rank) -> bool {
        if self.verbs.contains_key(verb) {
            return false;
        }
        self.verbs.insert(verb.to_string(), min_rank);
        true
    }

    /// Freeze into a read-only node
    pub(crate) fn build(self) -> ResourceAuthorizer {
        if self.children.is_empty() {
            ResourceAuthorizer::Leaf { verbs: self.verbs }
        } else {
            ResourceAuthorizer::Composite {
                verbs: self.verbs,
                children: self
                    .children
                    .into_iter()
                    .map(|(name, node)| (name, node.build()))
                    .collect(),
            }
        }
    }

    /// Freeze as the registry root, which is always composite
    pub(crate) fn build_root(self) -> ResourceAuthorizer {
        ResourceAuthorizer::Composite {
            verbs: self.verbs,
            children: self
                .children
                .into_iter()
                .map(|(name, node)| (name, node.build()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::names;

    fn segments(action: &str) -> Vec<String> {
        action.split('.').map(str::to_string).collect()
    }

    /// event { create: executive, participant { signin: bot, delete: president } }
    fn event_node() -> ResourceAuthorizer {
        let mut root = NodeBuilder::default();
        let event = root.descend(["event"]);
        event.insert_verb("create", Rank::new(1));
        let participant = event.descend(["participant"]);
        participant.insert_verb("signin", Rank::new(0));
        participant.insert_verb("delete", Rank::new(6));

        root.build_root()
            .child("event")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_builder_produces_variants() {
        let event = event_node();
        assert!(matches!(event, ResourceAuthorizer::Composite { .. }));
        assert!(matches!(
            event.child("participant"),
            Some(ResourceAuthorizer::Leaf { .. })
        ));
        assert!(event.child("participant").unwrap().child("anything").is_none());
    }

    #[test]
    fn test_resolve_verb() {
        let roles = RoleHierarchy::club();
        let event = event_node();

        assert!(event.resolve(&segments("create"), names::EXECUTIVE, &roles));
        assert!(!event.resolve(&segments("create"), names::BOT, &roles));
    }

    #[test]
    fn test_resolve_delegates_to_child() {
        let roles = RoleHierarchy::club();
        let event = event_node();

        assert!(event.resolve(&segments("participant.signin"), names::BOT, &roles));
        assert!(!event.resolve(&segments("participant.delete"), names::SECRETARY, &roles));
        assert!(event.resolve(&segments("participant.delete"), names::PRESIDENT, &roles));
    }

    #[test]
    fn test_resolve_unknown_fails_closed() {
        let roles = RoleHierarchy::club();
        let event = event_node();

        assert!(!event.resolve(&[], names::WEBMASTER, &roles));
        assert!(!event.resolve(&segments("archive"), names::WEBMASTER, &roles));
        assert!(!event.resolve(&segments("sponsor.create"), names::WEBMASTER, &roles));
        assert!(!event.resolve(&segments("participant.signin.now"), names::WEBMASTER, &roles));
        // a child name used as a verb is not a verb
        assert!(!event.resolve(&segments("participant"), names::WEBMASTER, &roles));
        // a verb used as a sub-resource is not a sub-resource
        assert!(!event.resolve(&segments("create.signin"), names::WEBMASTER, &roles));
    }

    #[test]
    fn test_verb_and_child_may_share_a_name() {
        let roles = RoleHierarchy::club();
        let mut root = NodeBuilder::default();
        let node = root.descend(["semester"]);
        node.insert_verb("rankings", Rank::new(5));
        node.descend(["rankings"]).insert_verb("get", Rank::new(1));
        let semester = root.build_root().child("semester").cloned().unwrap();

        assert!(!semester.resolve(&segments("rankings"), names::EXECUTIVE, &roles));
        assert!(semester.resolve(&segments("rankings"), names::VICE_PRESIDENT, &roles));
        assert!(semester.resolve(&segments("rankings.get"), names::EXECUTIVE, &roles));
    }

    #[test]
    fn test_insert_verb_rejects_duplicates() {
        let mut node = NodeBuilder::default();
        assert!(node.insert_verb("get", Rank::new(1)));
        assert!(!node.insert_verb("get", Rank::new(2)));
    }

    #[test]
    fn test_snapshot_and_counts() {
        let roles = RoleHierarchy::club();
        let event = event_node();
        assert_eq!(event.capability_count(), 3);

        let snapshot = event.snapshot(names::SECRETARY, &roles);
        assert_eq!(snapshot.verbs.get("create"), Some(&true));
        let participant = &snapshot.resources["participant"];
        assert_eq!(participant.verbs.get("signin"), Some(&true));
        assert_eq!(participant.verbs.get("delete"), Some(&false));

        let mut capabilities = Vec::new();
        event.collect_capabilities("event", &mut capabilities);
        assert_eq!(
            capabilities,
            vec![
                ("event.create".to_string(), Rank::new(1)),
                ("event.participant.delete".to_string(), Rank::new(6)),
                ("event.participant.signin".to_string(), Rank::new(0)),
            ]
        );
    }
}
