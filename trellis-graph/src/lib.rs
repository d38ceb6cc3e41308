//! Trellis Graph - Queryable, filterable hierarchy graphs
//!
//! This crate builds an in-memory graph from validated tabular rows and
//! answers visibility queries over it: full graph, single-node
//! neighborhood, all simple paths between two nodes, and incremental
//! expansion, each composable with a relationship filter.
//!
//! # Architecture
//!
//! The graph uses petgraph internally with an id index for lookups.
//! Visibility is never stored on the graph itself; every query builds a
//! fresh [`VisibilityState`] and returns the complete universe of nodes
//! and edges with `visible` flags, so renderers can dim hidden elements
//! instead of dropping them.
//!
//! # Example
//!
//! ```no_run
//! use trellis_core::read_rows;
//! use trellis_graph::{GraphBuilder, QueryEngine, QueryOptions};
//!
//! let csv = "node,parent,type,relationship\n\
//!            TeamA,,lead,\n\
//!            Bob,TeamA,member,reports_to\n";
//! let rows = read_rows(csv.as_bytes()).unwrap();
//! let store = GraphBuilder::from_rows(rows).build().unwrap();
//!
//! let engine = QueryEngine::new(&store);
//! let options = QueryOptions {
//!     filter_node: Some("Bob".to_string()),
//!     ..Default::default()
//! };
//! let view = engine.query(&options).unwrap();
//! ```

mod builder;
mod graph;
mod paths;
mod query;
mod store;
mod visibility;

pub use builder::{GraphBuilder, LoadError};
pub use graph::{EdgeRecord, GraphStats, GraphStore, QueryError};
pub use paths::SimplePaths;
pub use query::{
    ExpandOptions, GraphDelta, GraphView, LinkView, NodeView, QueryEngine, QueryOptions,
};
pub use store::{SnapshotStore, StoreError};
pub use visibility::{EdgeKey, VisibilityState};
