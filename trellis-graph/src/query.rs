//! Query evaluation: filters, visibility, and expansion.
//!
//! The engine composes a read-only [`GraphStore`] with a fresh
//! [`VisibilityState`] per call. Every filter narrows the visible set;
//! the relationship filter is applied last, as a mask over edges that
//! are already visible (it never hides nodes).
//!
//! Results always contain the full universe of nodes and edges with a
//! `visible` flag, so a renderer can dim hidden elements instead of
//! removing them and keep its layout stable across filter changes.

use crate::graph::{GraphStore, QueryError};
use crate::visibility::VisibilityState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;
use trellis_core::{NodeKind, SizeMap};

/// Caller-owned options for one query.
///
/// There is no session state inside the engine; whatever the user has
/// selected travels here, explicitly, on every call.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Restrict visibility to this node and its direct neighbors.
    pub filter_node: Option<String>,

    /// Start of a path filter. Only takes effect together with
    /// `path_end`; the path filter wins over `filter_node`.
    pub path_start: Option<String>,

    /// End of a path filter.
    pub path_end: Option<String>,

    /// Relationship labels to keep. `None` keeps all of them.
    pub visible_relationships: Option<HashSet<String>>,

    /// Hop bound for path enumeration. `None` imposes no bound.
    pub max_path_hops: Option<usize>,
}

/// Caller-owned options for one expansion.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Relationship labels to expand along. `None` keeps all of them.
    pub visible_relationships: Option<HashSet<String>>,

    /// What the caller already shows. The delta is computed against
    /// this, which is what makes expansion idempotent.
    pub already_visible: VisibilityState,
}

/// One node in a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: String,
    pub kind: NodeKind,
    pub size: u32,
    pub visible: bool,
}

/// One edge in a query result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkView {
    pub source: String,
    pub target: String,
    pub relationship: String,
    pub visible: bool,
}

/// The full universe with visibility flags, ordered by identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

impl GraphView {
    pub fn visible_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visible).count()
    }

    pub fn visible_link_count(&self) -> usize {
        self.links.iter().filter(|l| l.visible).count()
    }
}

/// Newly revealed elements from one expansion. Everything in a delta
/// is visible by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDelta {
    pub nodes: Vec<NodeView>,
    pub links: Vec<LinkView>,
}

impl GraphDelta {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Evaluates queries and expansions against a store.
///
/// Stateless between calls; safe to share the underlying store across
/// engines for concurrent sessions.
pub struct QueryEngine<'a> {
    store: &'a GraphStore,
    sizes: SizeMap,
}

impl<'a> QueryEngine<'a> {
    /// Creates an engine with the default size mapping.
    pub fn new(store: &'a GraphStore) -> Self {
        Self {
            store,
            sizes: SizeMap::default(),
        }
    }

    /// Creates an engine with a custom size mapping.
    pub fn with_sizes(store: &'a GraphStore, sizes: SizeMap) -> Self {
        Self { store, sizes }
    }

    /// Answers one query.
    ///
    /// Evaluation order: path filter, else node filter, else the full
    /// graph; the relationship filter masks edges afterwards. Unknown
    /// ids fail with [`QueryError::UnknownNode`] before anything is
    /// computed; a path filter that finds no path yields an empty
    /// visible set, which is a valid result.
    pub fn query(&self, options: &QueryOptions) -> Result<GraphView, QueryError> {
        let mut vis = VisibilityState::new();

        if let (Some(start), Some(end)) = (&options.path_start, &options.path_end) {
            for path in self.store.simple_paths(start, end, options.max_path_hops)? {
                for id in &path {
                    vis.reveal_node(id);
                }
                for pair in path.windows(2) {
                    vis.reveal_edge(&pair[0], &pair[1]);
                }
            }
        } else if let Some(filter) = &options.filter_node {
            let incident = self.store.neighbors(filter)?;
            vis.reveal_node(filter);
            for edge in incident {
                vis.reveal_node(&edge.source);
                vis.reveal_node(&edge.target);
                vis.reveal_edge(&edge.source, &edge.target);
            }
        } else {
            for node in self.store.nodes() {
                vis.reveal_node(&node.id);
            }
            for edge in self.store.edges() {
                vis.reveal_edge(&edge.source, &edge.target);
            }
        }

        let view = self.render(&vis, options.visible_relationships.as_ref());
        debug!(
            visible_nodes = view.visible_node_count(),
            visible_links = view.visible_link_count(),
            "query evaluated"
        );
        Ok(view)
    }

    /// Reveals the direct neighborhood of one node.
    ///
    /// Returns only what the caller does not already show. Calling this
    /// twice with the same accumulated visible set yields an empty
    /// delta the second time.
    pub fn expand(&self, id: &str, options: &ExpandOptions) -> Result<GraphDelta, QueryError> {
        let incident = self.store.neighbors(id)?;
        let relationships = options.visible_relationships.as_ref();
        let already = &options.already_visible;

        // Neighborhood restricted to edges whose label passes the filter.
        let passing: Vec<_> = incident
            .into_iter()
            .filter(|edge| relationships.map_or(true, |set| set.contains(&edge.relationship)))
            .collect();

        let mut revealed: BTreeSet<&str> = BTreeSet::new();
        revealed.insert(id);
        for edge in &passing {
            revealed.insert(&edge.source);
            revealed.insert(&edge.target);
        }

        let nodes: Vec<NodeView> = revealed
            .into_iter()
            .filter(|node_id| !already.node_visible(node_id))
            .map(|node_id| {
                // Came from the store, so the lookup cannot miss.
                let node = self.store.get(node_id).unwrap();
                NodeView {
                    id: node.id.clone(),
                    kind: node.kind,
                    size: self.sizes.size_for(node.kind),
                    visible: true,
                }
            })
            .collect();

        let links: Vec<LinkView> = passing
            .into_iter()
            .filter(|edge| !already.edge_marked(&edge.source, &edge.target))
            .map(|edge| LinkView {
                source: edge.source,
                target: edge.target,
                relationship: edge.relationship,
                visible: true,
            })
            .collect();

        Ok(GraphDelta { nodes, links })
    }

    /// Single pass over the full collections, flagging visibility.
    fn render(&self, vis: &VisibilityState, relationships: Option<&HashSet<String>>) -> GraphView {
        let mut nodes: Vec<NodeView> = self
            .store
            .nodes()
            .map(|node| NodeView {
                id: node.id.clone(),
                kind: node.kind,
                size: self.sizes.size_for(node.kind),
                visible: vis.node_visible(&node.id),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        // store.edges() is already sorted by identifier.
        let links: Vec<LinkView> = self
            .store
            .edges()
            .into_iter()
            .map(|edge| {
                let label_passes =
                    relationships.map_or(true, |set| set.contains(&edge.relationship));
                LinkView {
                    visible: label_passes && vis.edge_visible(&edge.source, &edge.target),
                    source: edge.source,
                    target: edge.target,
                    relationship: edge.relationship,
                }
            })
            .collect();

        GraphView { nodes, links }
    }
}
