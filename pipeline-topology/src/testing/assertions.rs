//! Test assertions for extracted graphs.

use crate::topology::{Link, TopologyGraph};
use std::collections::{BTreeSet, HashSet};

/// Asserts that every link endpoint is a node id, ignoring links recorded
/// as degraded.
pub fn assert_referential_integrity(graph: &TopologyGraph) {
    let offending: Vec<&Link> = graph
        .unresolved_links()
        .into_iter()
        .filter(|l| !graph.is_flagged(l))
        .collect();

    assert!(
        offending.is_empty(),
        "Expected every link to reference existing nodes, found: {:?}",
        offending
    );
}

/// Asserts that node ids are unique.
pub fn assert_unique_node_ids(graph: &TopologyGraph) {
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        assert!(seen.insert(node.id.as_str()), "Duplicate node id '{}'", node.id);
    }
}

/// Asserts the link set equals `expected`, ignoring order.
pub fn assert_links_unordered_eq(graph: &TopologyGraph, expected: &[(&str, &str)]) {
    let actual: BTreeSet<(&str, &str)> = graph
        .links
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str()))
        .collect();
    let expected: BTreeSet<(&str, &str)> = expected.iter().copied().collect();

    assert_eq!(
        actual, expected,
        "Expected links {:?}, got {:?}",
        expected, actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{DanglingReference, Node};

    fn pair() -> TopologyGraph {
        TopologyGraph {
            nodes: vec![Node::new("A", "a"), Node::new("B", "b")],
            links: vec![Link::new("A", "B")],
            degraded: Vec::new(),
        }
    }

    #[test]
    fn test_assert_referential_integrity() {
        assert_referential_integrity(&pair());
    }

    #[test]
    #[should_panic(expected = "Expected every link")]
    fn test_assert_referential_integrity_fails() {
        let mut graph = pair();
        graph.links.push(Link::new("ghost", "B"));
        assert_referential_integrity(&graph);
    }

    #[test]
    fn test_assert_referential_integrity_allows_flagged() {
        let mut graph = pair();
        graph.links.push(Link::new("ghost", "B"));
        graph.degraded.push(DanglingReference {
            block: "block-0".to_string(),
            task: "B".to_string(),
            target: "B".to_string(),
            dependency: "ghost".to_string(),
        });
        assert_referential_integrity(&graph);
    }

    #[test]
    #[should_panic(expected = "Expected every link")]
    fn test_assert_referential_integrity_matches_flag_by_pair() {
        let mut graph = pair();
        graph.links.push(Link::new("ghost", "B"));
        graph.links.push(Link::new("ghost", "A"));
        graph.degraded.push(DanglingReference {
            block: "block-0".to_string(),
            task: "B".to_string(),
            target: "B".to_string(),
            dependency: "ghost".to_string(),
        });
        assert_referential_integrity(&graph);
    }

    #[test]
    #[should_panic(expected = "Duplicate node id")]
    fn test_assert_unique_node_ids_fails() {
        let mut graph = pair();
        graph.nodes.push(Node::new("A", "again"));
        assert_unique_node_ids(&graph);
    }

    #[test]
    fn test_assert_links_unordered_eq() {
        let mut graph = pair();
        graph.links.insert(0, Link::new("B", "A"));
        assert_links_unordered_eq(&graph, &[("A", "B"), ("B", "A")]);
    }
}
