//! Core graph data structure.
//!
//! The GraphStore wraps petgraph and adds an id index for fast lookups.
//! It is built once by the [`GraphBuilder`](crate::GraphBuilder) and
//! read-only afterwards, so it can be shared freely across queries.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef; // For edge_references
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use trellis_core::Node;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// A query referenced an id that was never registered.
///
/// Recoverable: the query is rejected and nothing is mutated.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown node `{0}`")]
    UnknownNode(String),
}

/// The hierarchy graph.
///
/// Nodes carry their id and kind; edge weights are relationship labels.
/// The graph is undirected, but the parent→child orientation of each
/// edge as loaded is preserved for output.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStore {
    /// The underlying petgraph graph.
    pub(crate) graph: UnGraph<Node, String>,

    /// Maps string ids to graph node indexes.
    id_index: HashMap<String, NodeId>,
}

impl GraphStore {
    /// Creates a new empty store. Only the builder constructs these.
    pub(crate) fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            id_index: HashMap::new(),
        }
    }

    /// Adds a node and indexes its id.
    pub(crate) fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.id_index.insert(id, index);
        index
    }

    /// Adds an edge, keeping the parent→child orientation.
    ///
    /// Parallel edges with different labels stay distinct.
    pub(crate) fn add_edge(&mut self, parent: NodeId, child: NodeId, relationship: String) {
        self.graph.add_edge(parent, child, relationship);
    }

    /// Gets a node by its string id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        let index = self.id_index.get(id)?;
        self.graph.node_weight(*index)
    }

    /// Returns whether an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Gets the node index for a string id.
    pub(crate) fn index_of(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Gets the node for an index known to be valid.
    pub(crate) fn node(&self, index: NodeId) -> &Node {
        &self.graph[index]
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Returns all node ids, sorted.
    ///
    /// Reflects the loaded store only, never any visibility state.
    /// UI controls use this to populate selection widgets.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.id_index.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns all relationship labels, sorted and deduplicated.
    pub fn relationship_types(&self) -> Vec<String> {
        let labels: BTreeSet<&String> = self.graph.edge_weights().collect();
        labels.into_iter().cloned().collect()
    }

    /// Returns the edges incident to a node, sorted for deterministic
    /// output, with their stored parent→child orientation.
    pub fn neighbors(&self, id: &str) -> Result<Vec<EdgeRecord>, QueryError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| QueryError::UnknownNode(id.to_string()))?;

        let mut records: Vec<EdgeRecord> = self
            .graph
            .edges(index)
            .map(|edge_ref| {
                // edges() reorients endpoints; recover the stored pair.
                let (source, target) = self
                    .graph
                    .edge_endpoints(edge_ref.id())
                    .expect("edge id from live iteration");
                EdgeRecord {
                    source: self.node(source).id.clone(),
                    target: self.node(target).id.clone(),
                    relationship: edge_ref.weight().clone(),
                }
            })
            .collect();

        records.sort();
        Ok(records)
    }

    /// Returns every edge with endpoint ids, sorted.
    pub fn edges(&self) -> Vec<EdgeRecord> {
        let mut records: Vec<EdgeRecord> = self
            .graph
            .edge_references()
            .map(|edge_ref| EdgeRecord {
                source: self.node(edge_ref.source()).id.clone(),
                target: self.node(edge_ref.target()).id.clone(),
                relationship: edge_ref.weight().clone(),
            })
            .collect();

        records.sort();
        records
    }

    /// Neighbor indexes sorted by node id, deduplicated.
    ///
    /// Sorting by id makes traversal order (and therefore path
    /// enumeration order) reproducible for identical input.
    pub(crate) fn sorted_neighbor_indexes(&self, index: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.graph.neighbors(index).collect();
        out.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
        out.dedup();
        out
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            relationship_types: self.relationship_types().len(),
        }
    }
}

/// An edge with resolved endpoint ids, as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub relationship: String,
}

/// Graph statistics for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub relationship_types: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::NodeKind;

    fn sample() -> GraphStore {
        let mut store = GraphStore::new();
        let team = store.add_node(Node::new("TeamA", NodeKind::Lead));
        let bob = store.add_node(Node::new("Bob", NodeKind::Member));
        let project = store.add_node(Node::new("Project1", NodeKind::Child));
        store.add_edge(team, bob, "reports_to".to_string());
        store.add_edge(bob, project, "manages".to_string());
        store
    }

    #[test]
    fn test_node_ids_sorted() {
        let store = sample();
        assert_eq!(store.node_ids(), vec!["Bob", "Project1", "TeamA"]);
    }

    #[test]
    fn test_relationship_types_sorted_and_deduped() {
        let mut store = sample();
        let team = store.index_of("TeamA").unwrap();
        let project = store.index_of("Project1").unwrap();
        store.add_edge(team, project, "manages".to_string());

        assert_eq!(store.relationship_types(), vec!["manages", "reports_to"]);
    }

    #[test]
    fn test_neighbors_keeps_stored_orientation() {
        let store = sample();
        let edges = store.neighbors("Bob").unwrap();

        assert_eq!(edges.len(), 2);
        // Loaded as parent→child; Bob is the target of one edge and the
        // source of the other.
        assert!(edges.contains(&EdgeRecord {
            source: "TeamA".to_string(),
            target: "Bob".to_string(),
            relationship: "reports_to".to_string(),
        }));
        assert!(edges.contains(&EdgeRecord {
            source: "Bob".to_string(),
            target: "Project1".to_string(),
            relationship: "manages".to_string(),
        }));
    }

    #[test]
    fn test_neighbors_unknown_node() {
        let store = sample();
        assert_eq!(
            store.neighbors("Nobody"),
            Err(QueryError::UnknownNode("Nobody".to_string()))
        );
    }

    #[test]
    fn test_parallel_edges_stay_distinct() {
        let mut store = sample();
        let team = store.index_of("TeamA").unwrap();
        let bob = store.index_of("Bob").unwrap();
        store.add_edge(team, bob, "mentors".to_string());

        let labels: Vec<String> = store
            .neighbors("Bob")
            .unwrap()
            .into_iter()
            .map(|e| e.relationship)
            .collect();
        assert!(labels.contains(&"reports_to".to_string()));
        assert!(labels.contains(&"mentors".to_string()));
    }
}
