//! Simple-path enumeration between two nodes.
//!
//! A simple path visits no node twice. Enumeration is worst-case
//! exponential in the number of independent cycles, so callers working
//! with large graphs should pass a hop bound.

use crate::graph::{GraphStore, NodeId, QueryError};
use std::collections::HashSet;

impl GraphStore {
    /// Enumerates all simple paths between two nodes lazily.
    ///
    /// Paths are yielded as id sequences. Branches are explored in
    /// lexicographic id order, so the sequence is deterministic for
    /// identical input. `max_hops` bounds the path length in edges;
    /// `None` imposes no bound.
    ///
    /// When `start == end` the iterator yields exactly one single-node
    /// path. When no path exists it yields nothing; that is a valid
    /// empty result, not an error.
    pub fn simple_paths(
        &self,
        start: &str,
        end: &str,
        max_hops: Option<usize>,
    ) -> Result<SimplePaths<'_>, QueryError> {
        let start_index = self
            .index_of(start)
            .ok_or_else(|| QueryError::UnknownNode(start.to_string()))?;
        let end_index = self
            .index_of(end)
            .ok_or_else(|| QueryError::UnknownNode(end.to_string()))?;

        Ok(SimplePaths::new(self, start_index, end_index, max_hops))
    }
}

/// Lazy iterator over all simple paths from a start to an end node.
///
/// Depth-first with an explicit frame stack; each frame holds the
/// remaining neighbors of one node on the current path. Restart by
/// calling [`GraphStore::simple_paths`] again.
pub struct SimplePaths<'a> {
    store: &'a GraphStore,
    end: NodeId,
    max_hops: Option<usize>,
    /// Nodes on the current path, in order.
    path: Vec<NodeId>,
    /// Same nodes, for O(1) revisit checks.
    on_path: HashSet<NodeId>,
    /// One neighbor iterator per node on the path.
    frames: Vec<std::vec::IntoIter<NodeId>>,
    /// The single-node path for the start == end case.
    trivial: Option<Vec<String>>,
    done: bool,
}

impl<'a> SimplePaths<'a> {
    fn new(store: &'a GraphStore, start: NodeId, end: NodeId, max_hops: Option<usize>) -> Self {
        if start == end {
            return Self {
                store,
                end,
                max_hops,
                path: Vec::new(),
                on_path: HashSet::new(),
                frames: Vec::new(),
                trivial: Some(vec![store.node(start).id.clone()]),
                done: false,
            };
        }

        Self {
            store,
            end,
            max_hops,
            path: vec![start],
            on_path: HashSet::from([start]),
            frames: vec![store.sorted_neighbor_indexes(start).into_iter()],
            trivial: None,
            done: false,
        }
    }

    fn emit(&self, last: NodeId) -> Vec<String> {
        let mut ids: Vec<String> = self
            .path
            .iter()
            .map(|&index| self.store.node(index).id.clone())
            .collect();
        ids.push(self.store.node(last).id.clone());
        ids
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(path) = self.trivial.take() {
            self.done = true;
            return Some(path);
        }

        loop {
            let candidate = match self.frames.last_mut() {
                Some(frame) => frame.next(),
                None => break,
            };

            match candidate {
                Some(next) => {
                    if self.on_path.contains(&next) {
                        continue;
                    }

                    if next == self.end {
                        // Appending `next` gives a path of path.len() hops.
                        if self.max_hops.map_or(true, |max| self.path.len() <= max) {
                            return Some(self.emit(next));
                        }
                        continue;
                    }

                    // Descending through `next` needs at least
                    // path.len() + 1 hops to reach the end.
                    if self.max_hops.is_some_and(|max| self.path.len() >= max) {
                        continue;
                    }

                    self.on_path.insert(next);
                    self.path.push(next);
                    self.frames
                        .push(self.store.sorted_neighbor_indexes(next).into_iter());
                }
                None => {
                    self.frames.pop();
                    if let Some(last) = self.path.pop() {
                        self.on_path.remove(&last);
                    }
                }
            }
        }

        self.done = true;
        None
    }
}
