//! Extracted graph types.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// A graph vertex: one task of the template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within one graph.
    pub id: String,
    /// Display name.
    pub label: String,
}

impl Node {
    /// Creates a node.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A directed edge from a task to a task that waits for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Id of the upstream node.
    pub source: String,
    /// Id of the downstream node.
    pub target: String,
}

impl Link {
    /// Creates a link.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A dependency name that did not resolve to a task of its block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DanglingReference {
    /// Display name of the DAG block.
    pub block: String,
    /// The dependent task's name.
    pub task: String,
    /// Node id of the dependent task, the target of the flagged link.
    pub target: String,
    /// The unresolved dependency name, used verbatim as the link source.
    pub dependency: String,
}

/// The result of extracting a template's topology.
///
/// Nodes are in document order. Links are grouped by target in document
/// order, with sources in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyGraph {
    /// Graph vertices.
    pub nodes: Vec<Node>,
    /// Graph edges.
    pub links: Vec<Link>,
    /// Dependencies that were emitted as links despite not resolving.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<DanglingReference>,
}

impl TopologyGraph {
    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Returns true if any link was produced from an unresolved dependency.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Returns true if the link was emitted for a [`DanglingReference`].
    ///
    /// Such a link's source is a literal dependency name; it may coincide
    /// with the id of an unrelated node from another block.
    #[must_use]
    pub fn is_flagged(&self, link: &Link) -> bool {
        self.degraded
            .iter()
            .any(|d| d.dependency == link.source && d.target == link.target)
    }

    /// Links with an endpoint that is not a node id.
    #[must_use]
    pub fn unresolved_links(&self) -> Vec<&Link> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.links
            .iter()
            .filter(|l| !ids.contains(l.source.as_str()) || !ids.contains(l.target.as_str()))
            .collect()
    }

    /// Links that do not describe a real dependency: flagged links plus any
    /// link with an endpoint that is not a node id.
    #[must_use]
    pub fn dangling_links(&self) -> Vec<&Link> {
        let unresolved = self.unresolved_links();
        self.links
            .iter()
            .filter(|l| self.is_flagged(l) || unresolved.contains(l))
            .collect()
    }

    fn resolved_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |l| !self.is_flagged(l))
    }

    /// Ids of the nodes linking into `id`. Flagged links are skipped.
    #[must_use]
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.resolved_links()
            .filter(|l| l.target == id)
            .map(|l| l.source.as_str())
            .collect()
    }

    /// Ids of the nodes `id` links to. Flagged links are skipped.
    #[must_use]
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.resolved_links()
            .filter(|l| l.source == id)
            .map(|l| l.target.as_str())
            .collect()
    }

    /// Nodes without incoming links, in document order.
    #[must_use]
    pub fn roots(&self) -> Vec<&Node> {
        let targets: HashSet<&str> = self.resolved_links().map(|l| l.target.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .collect()
    }

    /// Nodes without outgoing links, in document order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Node> {
        let sources: HashSet<&str> = self.resolved_links().map(|l| l.source.as_str()).collect();
        self.nodes
            .iter()
            .filter(|n| !sources.contains(n.id.as_str()))
            .collect()
    }

    /// Content hash of the graph, stable across extractions of the same document.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&json);
        let result = hasher.finalize();
        hex::encode(&result[..16])
    }
}
