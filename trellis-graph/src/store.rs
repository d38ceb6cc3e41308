//! Snapshot persistence for a loaded graph.
//!
//! Loading a CSV is cheap enough, but the CLI wants to load once and
//! query many times across separate invocations. The snapshot store
//! keeps one serialized [`GraphStore`] under a fixed key.

use crate::graph::GraphStore;
use sled::Db;
use std::path::Path;
use thiserror::Error;

const SNAPSHOT_KEY: &str = "graph_snapshot";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// On-disk home for the current graph snapshot.
pub struct SnapshotStore {
    db: Db,
}

impl SnapshotStore {
    /// Opens or creates a snapshot store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Saves a graph, replacing any previous snapshot.
    pub fn save(&self, graph: &GraphStore) -> Result<(), StoreError> {
        let bytes = bincode::serialize(graph)?;
        self.db.insert(SNAPSHOT_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Loads the snapshot, if one was saved.
    pub fn load(&self) -> Result<Option<GraphStore>, StoreError> {
        match self.db.get(SNAPSHOT_KEY)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Drops the stored snapshot.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.db.remove(SNAPSHOT_KEY)?;
        self.db.flush()?;
        Ok(())
    }
}
