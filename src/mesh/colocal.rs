//! Grouping vertices that share a position.
//!
//! Importers usually duplicate vertices at UV or normal seams. Those copies
//! are linked into a ring via `Vertex::colocal`, which lets sewing and the
//! edge checks treat them as one point while they keep separate attributes.

use std::collections::hash_map::Entry;

use cgmath::Point3;
use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    error::TopologyError,
    handle::{hsize, Handle, VertexHandle},
};
use super::Mesh;


impl Mesh {
    /// Links all vertices with bit-identical positions into colocal rings
    /// (`-0.0` and `0.0` are treated as equal). Existing rings are discarded
    /// first.
    pub fn link_colocals(&mut self) {
        let handles = self.vertices.handles().collect::<Vec<_>>();
        let groups = self.link_colocals_by(handles, |mesh, v| position_key(mesh.vertices[v].pos));
        debug!("linked {} vertices into {} colocal groups", self.vertices.num_elements(), groups);
    }

    /// Links vertices into colocal rings according to an externally computed
    /// map: vertices `a` and `b` become colocal iff
    /// `canonical[a] == canonical[b]`. The map must have one entry per vertex
    /// slot.
    pub fn link_colocals_with_canonical_map(
        &mut self,
        canonical: &[hsize],
    ) -> Result<(), TopologyError> {
        let expected = self.vertices.num_slots();
        if canonical.len() != expected {
            return Err(TopologyError::CanonicalMapLength {
                expected,
                actual: canonical.len(),
            });
        }

        let handles = self.vertices.handles().collect::<Vec<_>>();
        let groups = self.link_colocals_by(handles, |_, v| canonical[v.to_usize()]);
        debug!("linked colocals from canonical map: {} groups", groups);
        Ok(())
    }

    /// Resets all rings, then links every vertex to the first vertex with the
    /// same key. Returns the number of groups.
    fn link_colocals_by<K, F>(&mut self, handles: Vec<VertexHandle>, key_of: F) -> hsize
    where
        K: Eq + std::hash::Hash,
        F: Fn(&Mesh, VertexHandle) -> K,
    {
        for (vh, v) in self.vertices.iter_mut() {
            v.colocal = vh;
        }

        let mut first = FxHashMap::default();
        for v in handles {
            match first.entry(key_of(self, v)) {
                Entry::Occupied(o) => self.splice_colocal(*o.get(), v),
                Entry::Vacant(e) => {
                    e.insert(v);
                }
            }
        }

        let groups = first.len() as hsize;
        self.colocal_vertex_count = Some(groups);
        groups
    }

    /// Merges the colocal rings of `a` and `b`. Does nothing if they are
    /// already colocal.
    pub fn link_colocal(&mut self, a: VertexHandle, b: VertexHandle) {
        self.check_vertex(a);
        self.check_vertex(b);

        if self.is_colocal(a, b) {
            return;
        }

        self.splice_colocal(a, b);
        if let Some(count) = &mut self.colocal_vertex_count {
            *count -= 1;
        }
    }

    /// Returns `true` if `a` and `b` are in the same colocal ring (or are the
    /// same vertex).
    pub fn is_colocal(&self, a: VertexHandle, b: VertexHandle) -> bool {
        a == b || self.colocals(a).any(|c| c == b)
    }

    /// Swaps the `colocal` successors of `a` and `b`. If both are in
    /// different rings, the rings are merged.
    fn splice_colocal(&mut self, a: VertexHandle, b: VertexHandle) {
        let a_next = self.vertices[a].colocal;
        let b_next = self.vertices[b].colocal;
        self.vertices[a].colocal = b_next;
        self.vertices[b].colocal = a_next;
    }

    /// Takes `v` out of its colocal ring.
    pub(super) fn unlink_colocal(&mut self, v: VertexHandle) {
        let next = self.vertices[v].colocal;
        if next == v {
            return;
        }

        let pred = self.colocals(v).last().unwrap_or(v);
        self.vertices[pred].colocal = next;
        self.vertices[v].colocal = v;

        if let Some(count) = &mut self.colocal_vertex_count {
            *count += 1;
        }
    }

    /// For every vertex slot, the smallest handle in the vertex's colocal
    /// ring. Tombstone slots map to themselves.
    pub(super) fn colocal_canonicals(&self) -> Vec<VertexHandle> {
        let mut canonical = (0..self.vertices.num_slots())
            .map(VertexHandle::from_usize)
            .collect::<Vec<_>>();
        let mut done = vec![false; canonical.len()];

        for v in self.vertices.handles() {
            if done[v.to_usize()] {
                continue;
            }

            let ring = self.colocals(v).collect::<Vec<_>>();
            let min = ring.iter().cloned().min().unwrap_or(v);
            for c in ring {
                canonical[c.to_usize()] = min;
                done[c.to_usize()] = true;
            }
        }

        canonical
    }
}

/// Hashable key of a position: the bit patterns of the coordinates, with
/// negative zero mapped to positive zero.
fn position_key(pos: Point3<f32>) -> [u32; 3] {
    let bits = |x: f32| if x == 0.0 { 0u32 } else { x.to_bits() };
    [bits(pos.x), bits(pos.y), bits(pos.z)]
}
