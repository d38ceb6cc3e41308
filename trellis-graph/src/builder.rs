//! Graph builder for constructing the store from validated rows.
//!
//! The builder handles the two-pass process:
//! 1. Register every declared node
//! 2. Resolve parent references into edges
//!
//! A failed build leaves no partially usable store behind; the caller
//! gets the error and nothing else.

use crate::graph::GraphStore;
use thiserror::Error;
use tracing::debug;
use trellis_core::{Node, NodeKind, Row};

/// Malformed or inconsistent input discovered while building the graph.
///
/// Fatal to construction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    /// The same id was declared with two different kinds. Silent
    /// overwrite would corrupt identity, so this is always an error.
    #[error("node `{id}` declared as both `{first}` and `{second}`")]
    DuplicateNode {
        id: String,
        first: NodeKind,
        second: NodeKind,
    },

    /// A parent reference never resolves to a declared node.
    #[error("parent `{parent}` of node `{child}` is never declared")]
    MissingParent { parent: String, child: String },
}

/// Builds a [`GraphStore`] from validated rows.
pub struct GraphBuilder {
    rows: Vec<Row>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a builder seeded with rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Adds more rows before building.
    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    /// Builds the store.
    ///
    /// The first pass registers every id in the `node` column; declaring
    /// the same id twice with an identical kind is idempotent. The second
    /// pass turns each parented row into one edge, so every edge endpoint
    /// is guaranteed to resolve to a registered node.
    pub fn build(self) -> Result<GraphStore, LoadError> {
        let mut store = GraphStore::new();

        for row in &self.rows {
            match store.get(&row.id) {
                Some(existing) if existing.kind != row.kind => {
                    return Err(LoadError::DuplicateNode {
                        id: row.id.clone(),
                        first: existing.kind,
                        second: row.kind,
                    });
                }
                Some(_) => {}
                None => {
                    store.add_node(Node::new(row.id.clone(), row.kind));
                }
            }
        }

        for row in &self.rows {
            if let Some(link) = &row.parent {
                let parent = store.index_of(&link.id).ok_or_else(|| LoadError::MissingParent {
                    parent: link.id.clone(),
                    child: row.id.clone(),
                })?;
                // Registered in the first pass
                let child = store.index_of(&row.id).unwrap();
                store.add_edge(parent, child, link.relationship.clone());
            }
        }

        debug!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "graph built"
        );
        Ok(store)
    }
}
