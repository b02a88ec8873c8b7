use fxhash::FxHashMap;
use tracing::debug;

use crate::handle::{EdgeHandle, VertexHandle};
use super::Mesh;


/// Maps a directed vertex pair `(from, to)` to the half-edge running between
/// them.
///
/// The index is kept up to date by face insertion, boundary linking, edge
/// splitting and edge removal. Operations that renumber handles (compaction)
/// mark it as stale instead; it is rebuilt lazily the next time it is needed.
#[derive(Clone, Debug)]
pub(super) struct EdgeIndex {
    map: FxHashMap<(VertexHandle, VertexHandle), EdgeHandle>,
    fresh: bool,
}

impl Default for EdgeIndex {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
            fresh: true,
        }
    }
}

impl EdgeIndex {
    pub(super) fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub(super) fn invalidate(&mut self) {
        self.fresh = false;
    }

    pub(super) fn clear(&mut self) {
        self.map.clear();
        self.fresh = true;
    }

    pub(super) fn len(&self) -> usize {
        self.map.len()
    }

    pub(super) fn find(&self, from: VertexHandle, to: VertexHandle) -> Option<EdgeHandle> {
        self.map.get(&(from, to)).cloned()
    }

    pub(super) fn insert(&mut self, from: VertexHandle, to: VertexHandle, e: EdgeHandle) {
        self.map.insert((from, to), e);
    }

    /// Removes the entry `(from, to)`, but only if it refers to `e`.
    pub(super) fn remove(&mut self, from: VertexHandle, to: VertexHandle, e: EdgeHandle) {
        if self.map.get(&(from, to)) == Some(&e) {
            self.map.remove(&(from, to));
        }
    }
}

impl Mesh {
    /// Rebuilds the directed edge index from scratch.
    ///
    /// This is done automatically by the operations that need the index, so
    /// calling it is only useful to move the cost to a specific point in time.
    pub fn rebuild_edge_index(&mut self) {
        let mut map = FxHashMap::default();
        map.reserve(self.edges.num_elements() as usize);

        for e in self.edges.handles() {
            if let Some(to) = self.try_to(e) {
                // If two half-edges share a key (only possible with dangling
                // face-less ones), the one with the lower handle wins.
                map.entry((self.edges[e].origin, to)).or_insert(e);
            }
        }

        self.edge_index = EdgeIndex { map, fresh: true };
        debug!("rebuilt edge index with {} entries", self.edge_index.len());
    }

    pub(super) fn ensure_edge_index(&mut self) {
        if !self.edge_index.is_fresh() {
            self.rebuild_edge_index();
        }
    }

    /// Returns the half-edge from `from` to `to`, if it exists.
    ///
    /// Uses the directed edge index if it is up to date. Otherwise all
    /// half-edges are scanned.
    pub fn find_edge(&self, from: VertexHandle, to: VertexHandle) -> Option<EdgeHandle> {
        if self.edge_index.is_fresh() {
            return self.edge_index.find(from, to);
        }

        self.edges.iter()
            .find(|&(e, edge)| edge.origin == from && self.try_to(e) == Some(to))
            .map(|(e, _)| e)
    }
}
