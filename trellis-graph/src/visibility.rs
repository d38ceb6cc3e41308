//! Per-query visibility tracking.
//!
//! A query never deletes graph data; it marks nodes and edge pairs as
//! visible and the renderer dims everything else. The state lives for
//! exactly one query and is discarded with the response.

use std::collections::HashSet;

/// Canonical identifier for an edge: the unordered endpoint pair.
///
/// Parallel edges between the same pair share one key; relationship
/// filtering happens per edge, on top of the pair's visibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    a: String,
    b: String,
}

impl EdgeKey {
    /// Builds the canonical key for a pair of endpoint ids.
    pub fn new(x: &str, y: &str) -> Self {
        if x <= y {
            Self {
                a: x.to_string(),
                b: y.to_string(),
            }
        } else {
            Self {
                a: y.to_string(),
                b: x.to_string(),
            }
        }
    }

    /// The endpoints in canonical order.
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

/// The set of nodes and edge pairs revealed by one query.
#[derive(Debug, Default, Clone)]
pub struct VisibilityState {
    nodes: HashSet<String>,
    edges: HashSet<EdgeKey>,
}

impl VisibilityState {
    /// Creates an empty state. Every top-level query starts here.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a node visible.
    pub fn reveal_node(&mut self, id: &str) {
        self.nodes.insert(id.to_string());
    }

    /// Marks an edge pair visible.
    pub fn reveal_edge(&mut self, x: &str, y: &str) {
        self.edges.insert(EdgeKey::new(x, y));
    }

    /// Whether a node is visible.
    pub fn node_visible(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Whether an edge pair was marked, ignoring endpoint visibility.
    ///
    /// Expansion uses this raw membership when computing deltas.
    pub fn edge_marked(&self, x: &str, y: &str) -> bool {
        self.edges.contains(&EdgeKey::new(x, y))
    }

    /// Whether an edge is actually visible.
    ///
    /// An edge referencing a hidden endpoint is itself hidden, even if
    /// it was explicitly marked.
    pub fn edge_visible(&self, x: &str, y: &str) -> bool {
        self.nodes.contains(x) && self.nodes.contains(y) && self.edge_marked(x, y)
    }

    /// Number of visible nodes.
    pub fn visible_node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of marked edge pairs.
    pub fn marked_edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_unordered() {
        assert_eq!(EdgeKey::new("A", "B"), EdgeKey::new("B", "A"));
        assert_eq!(EdgeKey::new("A", "B").endpoints(), ("A", "B"));
        assert_eq!(EdgeKey::new("B", "A").endpoints(), ("A", "B"));
    }

    #[test]
    fn test_marked_edge_with_hidden_endpoint_is_not_visible() {
        let mut vis = VisibilityState::new();
        vis.reveal_node("A");
        vis.reveal_edge("A", "B");

        assert!(vis.edge_marked("A", "B"));
        assert!(!vis.edge_visible("A", "B"));

        vis.reveal_node("B");
        assert!(vis.edge_visible("A", "B"));
        assert!(vis.edge_visible("B", "A"));
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let vis = VisibilityState::new();
        assert_eq!(vis.visible_node_count(), 0);
        assert_eq!(vis.marked_edge_count(), 0);
        assert!(!vis.node_visible("A"));
    }
}
