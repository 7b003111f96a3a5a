//! Per-thread logging context: indentation depth and attached metadata.
//!
//! State is keyed by [`ThreadId`], which stays stable for the life of a
//! thread. The table itself is not synchronized; the registry keeps it behind
//! its own lock.

use crate::entry::MapData;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::thread::ThreadId;

/// Metadata attached to one thread, in insertion order.
pub type Metadata = IndexMap<String, Value>;

/// Indent counters and metadata maps for every thread that has any.
///
/// Threads with depth 0 and no metadata have no entry at all.
#[derive(Debug, Default)]
pub struct ThreadContexts {
    indents: HashMap<ThreadId, usize>,
    metadata: HashMap<ThreadId, Metadata>,
}

impl ThreadContexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_indent(&mut self, tid: ThreadId) {
        *self.indents.entry(tid).or_insert(0) += 1;
    }

    /// Decrement the depth; a no-op at 0.
    pub fn remove_indent(&mut self, tid: ThreadId) {
        if let Some(depth) = self.indents.get_mut(&tid) {
            *depth = depth.saturating_sub(1);
            if *depth == 0 {
                self.indents.remove(&tid);
            }
        }
    }

    pub fn indent(&self, tid: ThreadId) -> usize {
        self.indents.get(&tid).copied().unwrap_or(0)
    }

    /// Insert or overwrite `key`. An overwritten key keeps its position.
    pub fn add_metadata(&mut self, tid: ThreadId, key: impl Into<String>, value: Value) {
        self.metadata
            .entry(tid)
            .or_default()
            .insert(key.into(), value);
    }

    /// Remove `key`; a missing key is a no-op.
    pub fn remove_metadata(&mut self, tid: ThreadId, key: &str) {
        if let Some(map) = self.metadata.get_mut(&tid) {
            map.shift_remove(key);
            if map.is_empty() {
                self.metadata.remove(&tid);
            }
        }
    }

    pub fn clear_metadata(&mut self, tid: ThreadId) {
        self.metadata.remove(&tid);
    }

    /// Snapshot of the thread's metadata.
    pub fn metadata(&self, tid: ThreadId) -> Metadata {
        self.metadata.get(&tid).cloned().unwrap_or_default()
    }

    /// Copy the thread's metadata into an entry map.
    pub fn merge_metadata_into(&self, tid: ThreadId, out: &mut MapData) {
        if let Some(map) = self.metadata.get(&tid) {
            for (key, value) in map {
                out.insert(key.clone(), value.clone());
            }
        }
    }

    /// Number of threads currently holding any context.
    pub fn active_threads(&self) -> usize {
        self.indents
            .keys()
            .chain(self.metadata.keys())
            .collect::<HashSet<_>>()
            .len()
    }
}
