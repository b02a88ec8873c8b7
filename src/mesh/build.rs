//! Incremental construction: adding faces and the half-edges they need.

use std::ops::Range;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    error::TopologyError,
    handle::{hsize, EdgeHandle, FaceHandle, Handle, VertexHandle},
};
use super::{Edge, Face, Mesh};


impl Mesh {
    /// Adds a triangle. See [`add_face`][Mesh::add_face].
    pub fn add_triangle(
        &mut self,
        [a, b, c]: [VertexHandle; 3],
    ) -> Result<FaceHandle, TopologyError> {
        self.add_face(&[a, b, c])
    }

    /// Adds a quad. See [`add_face`][Mesh::add_face].
    pub fn add_quad(
        &mut self,
        [a, b, c, d]: [VertexHandle; 4],
    ) -> Result<FaceHandle, TopologyError> {
        self.add_face(&[a, b, c, d])
    }

    /// Adds a face with the vertex indices `indices[range]`. This is
    /// convenient for importers that store all faces in one flat index
    /// buffer.
    ///
    /// Panics if `range` is out of bounds of `indices`.
    pub fn add_face_from_indices(
        &mut self,
        indices: &[hsize],
        range: Range<usize>,
    ) -> Result<FaceHandle, TopologyError> {
        let vertices = indices[range].iter()
            .map(|&idx| VertexHandle::new(idx))
            .collect::<SmallVec<[_; 8]>>();
        self.add_face(&vertices)
    }

    /// Adds a face with the given corner vertices (counter-clockwise order).
    ///
    /// For each consecutive vertex pair `(i, j)` (wrapping around) the face
    /// gets a half-edge `i -> j`: an existing face-less half-edge `i -> j` is
    /// reused, otherwise a new one is created and paired with an existing
    /// half-edge `j -> i`, if any.
    ///
    /// The face is rejected (and the mesh left untouched) if:
    ///
    /// - it has fewer than 3 vertices,
    /// - one of the vertices does not exist,
    /// - two consecutive vertices are equal or colocal,
    /// - a half-edge `i -> j` already belongs to another face,
    /// - the same vertex pair occurs twice in the face.
    pub fn add_face(&mut self, vertices: &[VertexHandle]) -> Result<FaceHandle, TopologyError> {
        self.ensure_edge_index();

        if let Err(e) = self.can_add_face(vertices) {
            trace!("rejected face {:?}: {}", vertices, e);
            return Err(e);
        }

        let face = self.faces.push(Face { edge: None });

        let edges = (0..vertices.len())
            .map(|i| {
                let from = vertices[i];
                let to = vertices[(i + 1) % vertices.len()];
                self.add_edge(from, to)
            })
            .collect::<SmallVec<[_; 8]>>();

        for (i, &e) in edges.iter().enumerate() {
            self.edges[e].face = Some(face);
            self.link(e, edges[(i + 1) % edges.len()]);
        }
        self.faces[face].edge = Some(edges[0]);

        Ok(face)
    }

    /// Checks whether [`add_face`][Mesh::add_face] would accept this face,
    /// without changing anything.
    pub fn can_add_face(&self, vertices: &[VertexHandle]) -> Result<(), TopologyError> {
        if vertices.len() < 3 {
            return Err(TopologyError::TooFewVertices(vertices.len()));
        }

        for &v in vertices {
            self.ensure_vertex_exists(v)?;
        }

        let n = vertices.len();
        for i in 0..n {
            let from = vertices[i];
            let to = vertices[(i + 1) % n];
            self.can_add_edge(from, to)?;
        }

        // The same vertex pair must not appear twice, in either direction.
        for i in 0..n {
            let (a0, a1) = (vertices[i], vertices[(i + 1) % n]);
            for j in i + 1..n {
                let (b0, b1) = (vertices[j], vertices[(j + 1) % n]);
                if (a0 == b0 && a1 == b1) || (a0 == b1 && a1 == b0) {
                    return Err(TopologyError::DuplicateEdge { from: a0, to: a1 });
                }
            }
        }

        Ok(())
    }

    fn can_add_edge(&self, from: VertexHandle, to: VertexHandle) -> Result<(), TopologyError> {
        if from == to || self.is_colocal(from, to) {
            return Err(TopologyError::DegenerateEdge { from, to });
        }

        // An existing face-less half-edge can be claimed, anything else is
        // already taken.
        if let Some(e) = self.find_edge(from, to) {
            if self.edges[e].face.is_some() {
                return Err(TopologyError::NonManifoldEdge { from, to });
            }
        }

        Ok(())
    }

    /// Returns a face-less half-edge `from -> to`, creating it if necessary.
    /// Requires a fresh edge index.
    fn add_edge(&mut self, from: VertexHandle, to: VertexHandle) -> EdgeHandle {
        debug_assert!(self.edge_index.is_fresh());

        if let Some(e) = self.edge_index.find(from, to) {
            debug_assert!(self.edges[e].face.is_none());

            // The half-edge was part of a boundary loop (or a hole). It will
            // be linked into the new face loop.
            self.unlink_loop(e);
            if self.vertices[from].edge.is_none() {
                self.vertices[from].edge = Some(e);
            }
            return e;
        }

        let e = self.edges.push(Edge::dangling(from));
        self.edge_index.insert(from, to, e);

        if let Some(pair) = self.edge_index.find(to, from) {
            if self.edges[pair].pair.is_none() {
                self.edges[e].pair = Some(pair);
                self.edges[pair].pair = Some(e);
            } else {
                warn!(
                    "{:?} -> {:?} is already paired with {:?}, leaving new {:?} unpaired",
                    to,
                    from,
                    self.edges[pair].pair,
                    e,
                );
            }
        }

        if self.vertices[from].edge.is_none() {
            self.vertices[from].edge = Some(e);
        }

        e
    }

    /// Adds all faces of a flat index buffer, skipping the ones that are
    /// rejected. `face_sizes` contains the number of corners of each face.
    ///
    /// Returns the number of faces that were skipped.
    pub fn add_faces_lossy(&mut self, indices: &[hsize], face_sizes: &[usize]) -> usize {
        let mut start = 0;
        let mut skipped = 0;
        for &size in face_sizes {
            let range = start..start + size;
            start += size;

            if let Err(e) = self.add_face_from_indices(indices, range.clone()) {
                trace!("skipping face {:?}: {}", &indices[range], e);
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("skipped {} of {} faces", skipped, face_sizes.len());
        }

        skipped
    }
}
