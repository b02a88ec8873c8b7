//! Removing elements and compacting the storage afterwards.

use tracing::debug;

use crate::{
    handle::{EdgeHandle, FaceHandle, VertexHandle},
    map::Remap,
};
use super::{Edge, Mesh};


impl Mesh {
    /// Unlinks a half-edge from its neighbors.
    ///
    /// Afterwards `edge` has no `pair`, `next` or `prev`, and no neighbor
    /// links to it anymore. If the origin or the face referred to `edge`,
    /// they are pointed to another half-edge (or to nothing). The half-edge
    /// itself stays in the mesh until [`remove_edge`][Mesh::remove_edge].
    pub fn disconnect(&mut self, edge: EdgeHandle) {
        let e = *self.check_edge(edge);

        if let Some(to) = self.try_to(edge) {
            self.edge_index.remove(e.origin, to, edge);
        }

        // Repair the origin's outgoing half-edge: prefer the one clockwise
        // from `edge`, then the counter-clockwise one. If the fan is broken
        // on both sides, any other half-edge starting at the origin will do.
        // The vertex must only end up without edge if it's really isolated.
        if self.vertices.get(e.origin).map_or(false, |v| v.edge == Some(edge)) {
            let is_candidate = |c: &EdgeHandle| {
                *c != edge && self.edges.get(*c).map_or(false, |c| c.origin == e.origin)
            };
            let candidate = e.prev
                .and_then(|prev| self.edges[prev].pair)
                .filter(is_candidate)
                .or_else(|| e.pair.and_then(|pair| self.edges[pair].next).filter(is_candidate))
                .or_else(|| {
                    self.edges.iter()
                        .find(|&(h, other)| h != edge && other.origin == e.origin)
                        .map(|(h, _)| h)
                });
            self.vertices[e.origin].edge = candidate;
        }

        if let Some(f) = e.face {
            if self.faces.get(f).map_or(false, |face| face.edge == Some(edge)) {
                let candidate = e.next.filter(|&n| n != edge)
                    .or(e.prev.filter(|&p| p != edge));
                self.faces[f].edge = candidate;
            }
        }

        if let Some(pair) = e.pair {
            if let Some(pair) = self.edges.get_mut(pair).filter(|p| p.pair == Some(edge)) {
                pair.pair = None;
            }
        }
        self.edges[edge].pair = None;

        self.unlink_loop(edge);
    }

    /// Disconnects the half-edge and removes it.
    pub fn remove_edge(&mut self, edge: EdgeHandle) {
        self.disconnect(edge);
        self.edges.remove(edge);
    }

    /// Removes a face. Its half-edges stay in the mesh, but become face-less:
    /// they now bound a hole.
    pub fn remove_face(&mut self, face: FaceHandle) {
        let edges = self.face_edges(face).collect::<Vec<_>>();
        for e in edges {
            if self.edges[e].face == Some(face) {
                self.edges[e].face = None;
            }
        }

        self.faces.remove(face);
    }

    /// Removes an isolated vertex.
    ///
    /// Panics if the vertex still has an outgoing half-edge.
    pub fn remove_vertex(&mut self, v: VertexHandle) {
        if let Some(e) = self.check_vertex(v).edge {
            panic!(
                "{:?} was passed to `remove_vertex`, but it is not isolated (its edge is {:?})",
                v,
                e,
            );
        }

        self.unlink_colocal(v);
        self.vertices.remove(v);

        if let Some(count) = &mut self.colocal_vertex_count {
            *count -= 1;
        }
    }

    /// Removes all vertex tombstones and renumbers the remaining vertices
    /// (keeping their order). All stored vertex handles are updated.
    pub fn compact_vertices(&mut self) -> Remap<VertexHandle> {
        let remap = self.vertices.compact();
        if remap.is_identity() {
            return remap;
        }

        for v in self.vertices.values_mut() {
            v.colocal = remap.map(v.colocal);
        }
        for e in self.edges.values_mut() {
            e.origin = remap.map(e.origin);
        }

        self.edge_index.invalidate();
        debug!("compacted vertices, {} left", self.vertices.num_elements());
        remap
    }

    /// Removes all half-edge tombstones and renumbers the remaining
    /// half-edges (keeping their order). All stored edge handles are updated.
    pub fn compact_edges(&mut self) -> Remap<EdgeHandle> {
        let remap = self.edges.compact();
        if remap.is_identity() {
            return remap;
        }

        let map = |h: Option<EdgeHandle>| h.map(|h| remap.map(h));
        for v in self.vertices.values_mut() {
            v.edge = map(v.edge);
        }
        for e in self.edges.values_mut() {
            *e = Edge {
                pair: map(e.pair),
                next: map(e.next),
                prev: map(e.prev),
                ..*e
            };
        }
        for f in self.faces.values_mut() {
            f.edge = map(f.edge);
        }

        self.edge_index.invalidate();
        debug!("compacted half-edges, {} left", self.edges.num_elements());
        remap
    }

    /// Removes all face tombstones and renumbers the remaining faces
    /// (keeping their order). All stored face handles are updated.
    pub fn compact_faces(&mut self) -> Remap<FaceHandle> {
        let remap = self.faces.compact();
        if remap.is_identity() {
            return remap;
        }

        for e in self.edges.values_mut() {
            e.face = e.face.map(|f| remap.map(f));
        }

        debug!("compacted faces, {} left", self.faces.num_elements());
        remap
    }
}
