//! The import graph: nodes, edges, and the walk that builds them
//!
//! A walk resolves seed locations into a [`NodeSet`]: one [`Node`] per
//! canonical location, with edges recorded only where an import's asserted
//! namespace matches the target document's actual target namespace.
//!
//! The registry (location string -> node) is the single source of node
//! identity for one [`Walker::resolve`] call. A node's entry is written
//! before its imports are queued, so a cyclic import chain revisits an
//! already-registered key and stops — termination needs no acyclicity
//! assumption. Edges reference nodes by registry key rather than by
//! pointer, which keeps cyclic graphs free of ownership knots.

use crate::error::{LinkageMismatch, Result};
use crate::locations::Location;
use crate::parser::SchemaParser;
use indexmap::IndexMap;
use std::collections::HashSet;

/// One schema document in the resolved graph
///
/// Identity is the canonical location; the target namespace is fixed at
/// creation and never reassigned.
#[derive(Debug, Clone)]
pub struct Node {
    location: Location,
    target_namespace: String,
    ins: Vec<String>,
    outs: Vec<String>,
}

impl Node {
    /// Create a fully-formed node
    ///
    /// Nodes are normally created by the walker's registry; this is public
    /// so classification and synthesis can be exercised on hand-built sets.
    pub fn new(location: Location, target_namespace: impl Into<String>) -> Self {
        Self {
            location,
            target_namespace: target_namespace.into(),
            ins: Vec::new(),
            outs: Vec::new(),
        }
    }

    /// Canonical location of this document
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Target namespace declared by this document (empty when absent)
    pub fn target_namespace(&self) -> &str {
        &self.target_namespace
    }

    /// Registry keys of the documents this one imports
    pub fn imports(&self) -> &[String] {
        &self.outs
    }

    /// Registry keys of the documents importing this one
    pub fn importers(&self) -> &[String] {
        &self.ins
    }

    /// A leaf has no incoming edges: nothing visited imports it
    pub fn is_leaf(&self) -> bool {
        self.ins.is_empty()
    }

    /// Whether this node is network-addressed
    pub fn is_remote(&self) -> bool {
        self.location.is_remote()
    }
}

/// A recorded import edge, by registry key
#[derive(Debug, Clone)]
pub struct Edge {
    /// Key of the importing node
    pub source: String,
    /// Key of the imported node
    pub target: String,
    /// Namespace asserted by the import declaration
    pub namespace: String,
}

/// The resolved graph: registry of nodes plus recorded edges
#[derive(Debug, Default)]
pub struct NodeSet {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl NodeSet {
    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by registry key (canonical location string)
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Whether a location is registered
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Nodes in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes sorted by canonical location
    pub fn sorted(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.location().cmp(b.location()));
        nodes
    }

    /// Recorded edges, in the order they were linked
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Nodes with no incoming edges, sorted by location
    pub fn leaf_nodes(&self) -> Vec<&Node> {
        let mut leaves: Vec<&Node> = self.nodes.values().filter(|n| n.is_leaf()).collect();
        leaves.sort_by(|a, b| a.location().cmp(b.location()));
        leaves
    }

    /// Network-addressed nodes, sorted by location
    pub fn remote_nodes(&self) -> Vec<&Node> {
        let mut remotes: Vec<&Node> = self.nodes.values().filter(|n| n.is_remote()).collect();
        remotes.sort_by(|a, b| a.location().cmp(b.location()));
        remotes
    }

    /// Drop local leaves whose namespace duplicates a remote node's
    ///
    /// A remote leaf is kept unconditionally. A local leaf is dropped when
    /// any remote node shares its target namespace — the remote copy is
    /// taken as authoritative. Deterministic given the same node set.
    pub fn prune_leaf_nodes<'a>(leaves: &[&'a Node], remotes: &[&'a Node]) -> Vec<&'a Node> {
        leaves
            .iter()
            .filter(|leaf| {
                leaf.is_remote()
                    || !remotes
                        .iter()
                        .any(|r| r.target_namespace() == leaf.target_namespace())
            })
            .copied()
            .collect()
    }

    /// Strict linkage pass: re-check every recorded edge
    ///
    /// The walk already drops mismatched edges, so this is a hard
    /// guarantee for callers who want an error rather than a warning.
    pub fn verify_linkage(&self) -> Result<()> {
        for edge in &self.edges {
            if let Some(target) = self.nodes.get(&edge.target) {
                if target.target_namespace() != edge.namespace {
                    return Err(LinkageMismatch::new(
                        edge.source.clone(),
                        edge.target.clone(),
                        edge.namespace.clone(),
                        target.target_namespace(),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Depth-first reachable-descendant listing from one node
    ///
    /// Returns `(depth, node)` pairs in visit order, each node at most
    /// once; safe on cyclic graphs via a per-call visited set. Used for
    /// hierarchy display in reports.
    pub fn hierarchy<'a>(&'a self, root: &Node) -> Vec<(usize, &'a Node)> {
        let mut listing = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(usize, &str)> = vec![(0, root.location().as_str())];
        while let Some((depth, key)) = stack.pop() {
            let Some(node) = self.nodes.get(key) else {
                continue;
            };
            if !visited.insert(key) {
                continue;
            }
            listing.push((depth, node));
            for out in node.imports().iter().rev() {
                if !visited.contains(out.as_str()) {
                    stack.push((depth + 1, out));
                }
            }
        }
        listing
    }

    fn register(&mut self, key: String, node: Node) {
        self.nodes.insert(key, node);
    }

    /// Link source -> target if the asserted namespace matches the
    /// target's actual one; otherwise warn and record nothing.
    fn try_link(&mut self, source: &str, target: &str, asserted: &str) {
        let Some(actual) = self.nodes.get(target).map(|n| n.target_namespace.clone()) else {
            return;
        };
        if actual != asserted {
            tracing::warn!(
                source,
                target,
                asserted,
                actual = actual.as_str(),
                "namespace mismatch, edge dropped"
            );
            return;
        }
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            namespace: asserted.to_string(),
        });
        if let Some(n) = self.nodes.get_mut(source) {
            n.outs.push(target.to_string());
        }
        if let Some(n) = self.nodes.get_mut(target) {
            n.ins.push(source.to_string());
        }
    }
}

/// Counters observed during one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Documents the walker attempted to parse (one per canonical location)
    pub parse_attempts: usize,
    /// Attempts that failed and contributed no node
    pub parse_failures: usize,
}

/// A location queued for visiting, with the import that led there
struct Pending {
    location: Location,
    /// `(source key, asserted namespace)` — absent for seeds
    referrer: Option<(String, String)>,
}

/// Builds an import graph from seed locations
///
/// Single-threaded and depth-first. The traversal uses an explicit stack
/// rather than call-stack recursion, so arbitrarily deep or cyclic import
/// chains cannot overflow.
#[derive(Debug, Default)]
pub struct Walker {
    parser: SchemaParser,
    stats: WalkStats,
}

impl Walker {
    /// Create a walker with a default parser
    pub fn new() -> Self {
        Self {
            parser: SchemaParser::new(),
            stats: WalkStats::default(),
        }
    }

    /// Create a walker with a custom parser (e.g. a loader with strict
    /// limits or remote fetching disabled)
    pub fn with_parser(parser: SchemaParser) -> Self {
        Self {
            parser,
            stats: WalkStats::default(),
        }
    }

    /// Counters from the most recent [`Walker::resolve`] call
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Resolve the seeds into a fully expanded, deduplicated graph
    ///
    /// The registry lives exactly as long as this call; nothing persists
    /// across invocations. Parse and resolution failures are logged and
    /// skipped, never fatal.
    pub fn resolve(&mut self, seeds: &[Location]) -> NodeSet {
        self.stats = WalkStats::default();
        let mut set = NodeSet::default();
        let mut pending: Vec<Pending> = seeds
            .iter()
            .rev()
            .map(|location| Pending {
                location: location.clone(),
                referrer: None,
            })
            .collect();
        while let Some(next) = pending.pop() {
            self.visit(next, &mut set, &mut pending);
        }
        set
    }

    fn visit(&mut self, pending: Pending, set: &mut NodeSet, worklist: &mut Vec<Pending>) {
        let key = pending.location.as_str().to_string();

        // Already registered: at most an edge to link, never a re-parse.
        if set.contains(&key) {
            if let Some((source, asserted)) = &pending.referrer {
                set.try_link(source, &key, asserted);
            }
            return;
        }

        tracing::info!(location = %pending.location, "visiting");
        self.stats.parse_attempts += 1;
        let info = match self.parser.parse(&pending.location) {
            Ok(info) => info,
            Err(failure) => {
                self.stats.parse_failures += 1;
                tracing::warn!(%failure, "parse failure, skipping");
                return;
            }
        };

        tracing::debug!(location = %pending.location, tns = %info.target_namespace, "registered");
        set.register(
            key.clone(),
            Node::new(pending.location.clone(), info.target_namespace),
        );
        if let Some((source, asserted)) = &pending.referrer {
            set.try_link(source, &key, asserted);
        }

        // Reverse push keeps the pop order matching document order.
        for import in info.imports.iter().rev() {
            match pending.location.resolve_reference(&import.schema_location) {
                Ok(target) => worklist.push(Pending {
                    location: target,
                    referrer: Some((key.clone(), import.namespace.clone())),
                }),
                Err(e) => {
                    tracing::warn!(reference = %import.schema_location, error = %e,
                        "unresolvable import reference, skipping");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn local(path: &str, tns: &str) -> Node {
        Node::new(Location::parse(&format!("file://{}", path)).unwrap(), tns)
    }

    fn remote(url: &str, tns: &str) -> Node {
        Node::new(Location::parse(url).unwrap(), tns)
    }

    #[test]
    fn test_leaf_is_indegree_zero() {
        let mut n = local("/a.xsd", "urn:a");
        assert!(n.is_leaf());
        n.ins.push("file:///b.xsd".to_string());
        assert!(!n.is_leaf());
    }

    #[test]
    fn test_prune_keeps_remote_leaf_drops_shadowed_locals() {
        // Two local leaves sharing a namespace with a remote leaf: only
        // the remote one survives pruning.
        let l1 = local("/l1.xsd", "urn:m");
        let l2 = local("/l2.xsd", "urn:m");
        let r = remote("http://h/r.xsd", "urn:m");
        let leaves = vec![&l1, &l2, &r];
        let remotes = vec![&r];
        let pruned = NodeSet::prune_leaf_nodes(&leaves, &remotes);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].location().as_str(), "http://h/r.xsd");
    }

    #[test]
    fn test_prune_keeps_local_leaf_with_unshadowed_namespace() {
        let l = local("/l.xsd", "urn:only-local");
        let r = remote("http://h/r.xsd", "urn:other");
        let leaves = vec![&l];
        let remotes = vec![&r];
        let pruned = NodeSet::prune_leaf_nodes(&leaves, &remotes);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].location().as_str(), "file:///l.xsd");
    }

    #[test]
    fn test_pruned_is_subset_of_leaves() {
        let l1 = local("/l1.xsd", "urn:a");
        let r1 = remote("http://h/r1.xsd", "urn:a");
        let r2 = remote("http://h/r2.xsd", "urn:b");
        let leaves = vec![&l1, &r1, &r2];
        let remotes = vec![&r1, &r2];
        let pruned = NodeSet::prune_leaf_nodes(&leaves, &remotes);
        for node in &pruned {
            assert!(leaves
                .iter()
                .any(|l| l.location() == node.location()));
        }
        // every remote leaf survives
        assert!(pruned.iter().any(|n| n.location().as_str() == "http://h/r1.xsd"));
        assert!(pruned.iter().any(|n| n.location().as_str() == "http://h/r2.xsd"));
        // the shadowed local leaf does not
        assert!(!pruned.iter().any(|n| n.location().as_str() == "file:///l1.xsd"));
    }

    #[test]
    fn test_verify_linkage_flags_mismatched_edge() {
        let mut set = NodeSet::default();
        set.register("file:///a.xsd".to_string(), local("/a.xsd", "urn:a"));
        set.register("file:///b.xsd".to_string(), local("/b.xsd", "urn:b"));
        set.edges.push(Edge {
            source: "file:///a.xsd".to_string(),
            target: "file:///b.xsd".to_string(),
            namespace: "urn:wrong".to_string(),
        });
        let err = set.verify_linkage().unwrap_err();
        assert!(err.to_string().contains("urn:wrong"));
    }

    #[test]
    fn test_try_link_drops_mismatch() {
        let mut set = NodeSet::default();
        set.register("file:///a.xsd".to_string(), local("/a.xsd", "urn:a"));
        set.register("file:///b.xsd".to_string(), local("/b.xsd", "urn:b"));
        set.try_link("file:///a.xsd", "file:///b.xsd", "urn:not-b");
        assert!(set.edges().is_empty());
        assert!(set.get("file:///b.xsd").unwrap().is_leaf());

        set.try_link("file:///a.xsd", "file:///b.xsd", "urn:b");
        assert_eq!(set.edges().len(), 1);
        assert!(!set.get("file:///b.xsd").unwrap().is_leaf());
        assert!(set.verify_linkage().is_ok());
    }

    #[test]
    fn test_hierarchy_cycle_safe() {
        let mut set = NodeSet::default();
        set.register("file:///a.xsd".to_string(), local("/a.xsd", "urn:a"));
        set.register("file:///b.xsd".to_string(), local("/b.xsd", "urn:b"));
        set.try_link("file:///a.xsd", "file:///b.xsd", "urn:b");
        set.try_link("file:///b.xsd", "file:///a.xsd", "urn:a");
        let root = set.get("file:///a.xsd").unwrap().clone();
        let listing = set.hierarchy(&root);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].0, 0);
        assert_eq!(listing[1].0, 1);
    }
}
