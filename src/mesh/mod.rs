//! Everything related to the [`Mesh`].

// # Some notes for developers about this implementation
//
// - All half-edges live in one array, the face side as well as the boundary
//   side. Twins are *not* stored next to one another: boundary half-edges are
//   materialized late (`link_boundary`) and sewing pairs arbitrary half-edges,
//   so the `pair` link is stored explicitly.
// - Links are plain handles. The only owner of elements is the mesh itself,
//   so the cyclic `pair`/`next`/`prev` structure never keeps anything alive.
// - `next` and `prev` are always set together through `Mesh::link`.

use std::{fmt, ops};

use boolinator::Boolinator;
use cgmath::{Point3, Vector2, Vector3};

use crate::{
    error::TopologyError,
    handle::{hsize, EdgeHandle, FaceHandle, VertexHandle},
    map::{DenseMap, Handles, Iter},
};
use self::{
    adj::{ColocalCirculator, EdgeLoop, FaceVertices, VertexCirculator},
    edge_index::EdgeIndex,
};

pub(crate) mod adj;
mod boundary;
mod build;
mod check;
mod colocal;
mod edge_index;
mod remove;
mod triangulate;
#[cfg(test)]
mod tests;

pub use self::boundary::SPLIT_EPSILON;



// ===============================================================================================
// ===== Definition of the elements stored inside the mesh
// ===============================================================================================

/// Data stored per vertex.
///
/// The attributes (`pos`, `nor`, `tex`) are public and can be changed freely
/// through [`Mesh::vertex_mut`]. The topological links can only be read.
#[derive(Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<f32>,
    pub nor: Vector3<f32>,
    pub tex: Vector2<f32>,

    /// One outgoing half-edge.
    ///
    /// - If the vertex is isolated, this is `None`.
    /// - After `link_boundary`, boundary vertices point to one of their
    ///   boundary half-edges.
    pub(crate) edge: Option<EdgeHandle>,

    /// Next vertex in the ring of vertices at the same position. Points to
    /// the vertex itself if it is alone.
    pub(crate) colocal: VertexHandle,
}

impl Vertex {
    /// One half-edge starting at this vertex, if any.
    pub fn edge(&self) -> Option<EdgeHandle> {
        self.edge
    }

    /// The next vertex in the colocal ring.
    pub fn colocal(&self) -> VertexHandle {
        self.colocal
    }

    pub fn is_isolated(&self) -> bool {
        self.edge.is_none()
    }
}

/// Data stored per half-edge.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The vertex this half-edge starts at.
    pub(crate) origin: VertexHandle,

    /// The half-edge running in the opposite direction. `None` for a face
    /// half-edge on an open boundary that was not linked yet.
    pub(crate) pair: Option<EdgeHandle>,

    /// The next half-edge around the face or hole.
    pub(crate) next: Option<EdgeHandle>,

    /// The previous half-edge around the face or hole.
    pub(crate) prev: Option<EdgeHandle>,

    /// The adjacent face. `None` for boundary half-edges.
    pub(crate) face: Option<FaceHandle>,
}

impl Edge {
    fn dangling(origin: VertexHandle) -> Self {
        Self {
            origin,
            pair: None,
            next: None,
            prev: None,
            face: None,
        }
    }

    pub fn origin(&self) -> VertexHandle {
        self.origin
    }

    pub fn pair(&self) -> Option<EdgeHandle> {
        self.pair
    }

    pub fn next(&self) -> Option<EdgeHandle> {
        self.next
    }

    pub fn prev(&self) -> Option<EdgeHandle> {
        self.prev
    }

    pub fn face(&self) -> Option<FaceHandle> {
        self.face
    }
}

/// Data stored per face.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// One (arbitrary) half-edge of the face loop.
    pub(crate) edge: Option<EdgeHandle>,
}

impl Face {
    pub fn edge(&self) -> Option<EdgeHandle> {
        self.edge
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Vertex {{ pos: ({}, {}, {}), edge: {:?}, colocal: {:?} }}",
            self.pos.x,
            self.pos.y,
            self.pos.z,
            self.edge,
            self.colocal,
        )
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Edge {{ origin: {:5} pair: {:10} next: {:10} prev: {:10} face: {:?} }}",
            format!("{:?},", self.origin),
            format!("{:?},", self.pair),
            format!("{:?},", self.next),
            format!("{:?},", self.prev),
            self.face,
        )
    }
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Face {{ edge: {:?} }}", self.edge)
    }
}



// ===============================================================================================
// ===== The mesh
// ===============================================================================================

/// A half-edge mesh designed for dynamic manipulation: incremental
/// construction with manifold checks, boundary linking and sewing, colocal
/// vertex grouping and compaction after removals.
///
/// Elements are referred to by handles. Removing an element leaves a
/// tombstone; the matching `compact_*` method reclaims the slots and
/// renumbers the remaining elements.
///
/// # Example
///
/// ```
/// use cgmath::Point3;
/// use hemesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
/// let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
///
/// mesh.add_triangle([a, b, c]).unwrap();
/// mesh.add_triangle([a, c, d]).unwrap();
/// assert_eq!(mesh.num_edges(), 6);
///
/// // The same directed edge can't be used twice
/// assert!(mesh.add_triangle([a, b, d]).is_err());
///
/// mesh.link_boundary();
/// assert!(mesh.is_valid());
/// ```
///
/// Cloning a mesh creates a deep copy with identical handles.
#[derive(Clone, Default)]
pub struct Mesh {
    vertices: DenseMap<VertexHandle, Vertex>,
    edges: DenseMap<EdgeHandle, Edge>,
    faces: DenseMap<FaceHandle, Face>,

    edge_index: EdgeIndex,

    /// `None` until colocals were linked.
    colocal_vertex_count: Option<hsize>,
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.vertices)
            .field("faces", &self.faces)
            .field("edges", &self.edges)
            .finish()
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
        self.edge_index.clear();
        self.colocal_vertex_count = None;
    }

    /// Reserves memory for the given number of additional vertices and
    /// faces.
    pub fn reserve(&mut self, vertices: usize, faces: usize) {
        self.vertices.reserve(vertices);
        self.faces.reserve(faces);
        // We have at least three half edges per face
        self.edges.reserve(faces * 3);
    }

    /// Adds an isolated vertex at the given position. Normal and texture
    /// coordinate are zero.
    pub fn add_vertex(&mut self, pos: Point3<f32>) -> VertexHandle {
        let vh = self.vertices.next_push_handle();
        self.vertices.push(Vertex {
            pos,
            nor: Vector3::new(0.0, 0.0, 0.0),
            tex: Vector2::new(0.0, 0.0),
            edge: None,
            colocal: vh,
        });

        // A new vertex is alone in its ring.
        if let Some(count) = &mut self.colocal_vertex_count {
            *count += 1;
        }

        vh
    }

    pub fn num_vertices(&self) -> hsize {
        self.vertices.num_elements()
    }

    /// Number of half-edges (face side and boundary side).
    pub fn num_edges(&self) -> hsize {
        self.edges.num_elements()
    }

    pub fn num_faces(&self) -> hsize {
        self.faces.num_elements()
    }

    /// Number of distinct positions, as computed by
    /// [`link_colocals`][Mesh::link_colocals] or
    /// [`link_colocals_with_canonical_map`][Mesh::link_colocals_with_canonical_map].
    /// `None` if colocals were never linked.
    pub fn colocal_vertex_count(&self) -> Option<hsize> {
        self.colocal_vertex_count
    }

    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.contains_handle(v)
    }

    pub fn contains_edge(&self, e: EdgeHandle) -> bool {
        self.edges.contains_handle(e)
    }

    pub fn contains_face(&self, f: FaceHandle) -> bool {
        self.faces.contains_handle(f)
    }

    pub fn vertex(&self, v: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    /// Mutable access to the attributes of a vertex.
    pub fn vertex_mut(&mut self, v: VertexHandle) -> Option<&mut Vertex> {
        self.vertices.get_mut(v)
    }

    pub fn edge(&self, e: EdgeHandle) -> Option<&Edge> {
        self.edges.get(e)
    }

    pub fn face(&self, f: FaceHandle) -> Option<&Face> {
        self.faces.get(f)
    }

    /// Iterates over all vertices in handle order.
    pub fn vertices(&self) -> Iter<'_, VertexHandle, Vertex> {
        self.vertices.iter()
    }

    /// Iterates over all half-edges in handle order.
    pub fn edges(&self) -> Iter<'_, EdgeHandle, Edge> {
        self.edges.iter()
    }

    /// Iterates over all faces in handle order.
    pub fn faces(&self) -> Iter<'_, FaceHandle, Face> {
        self.faces.iter()
    }

    pub fn vertex_handles(&self) -> Handles<'_, VertexHandle, Vertex> {
        self.vertices.handles()
    }

    pub fn edge_handles(&self) -> Handles<'_, EdgeHandle, Edge> {
        self.edges.handles()
    }

    pub fn face_handles(&self) -> Handles<'_, FaceHandle, Face> {
        self.faces.handles()
    }


    // ----- Adjacency queries ---------------------------------------------------------------

    /// The vertex the half-edge starts at.
    pub fn from(&self, e: EdgeHandle) -> VertexHandle {
        self.check_edge(e).origin
    }

    /// The vertex the half-edge points to.
    ///
    /// For face half-edges this is the origin of `next`, for boundary
    /// half-edges the origin of `pair`. Panics if the half-edge was
    /// disconnected.
    pub fn to(&self, e: EdgeHandle) -> VertexHandle {
        self.check_edge(e);
        match self.try_to(e) {
            Some(v) => v,
            None => panic!("{:?} is disconnected: neither `pair` nor `next` is set", e),
        }
    }

    /// Iterates over the half-edges of the face, starting at its stored
    /// half-edge.
    pub fn face_edges(&self, f: FaceHandle) -> EdgeLoop<'_> {
        EdgeLoop::new(self, self.check_face(f).edge)
    }

    /// Iterates over the corner vertices of the face in loop order.
    pub fn face_vertices(&self, f: FaceHandle) -> FaceVertices<'_> {
        FaceVertices::new(self, self.face_edges(f))
    }

    /// Number of half-edges in the face loop.
    pub fn num_sides(&self, f: FaceHandle) -> hsize {
        self.face_edges(f).count() as hsize
    }

    /// Iterates over the outgoing half-edges of `v`.
    ///
    /// If the fan around `v` is open (e.g. before `link_boundary`), the
    /// circulator first rotates in one direction until it hits the open
    /// side, then continues from the start in the other direction.
    pub fn vertex_edges(&self, v: VertexHandle) -> VertexCirculator<'_> {
        VertexCirculator::new(self, v, self.check_vertex(v).edge)
    }

    /// Walks the loop `e` belongs to by following `next` (works for face and
    /// boundary loops).
    pub fn boundary_loop(&self, e: EdgeHandle) -> EdgeLoop<'_> {
        self.check_edge(e);
        EdgeLoop::new(self, Some(e))
    }

    /// Iterates over the colocal ring of `v`, starting with `v` itself.
    pub fn colocals(&self, v: VertexHandle) -> ColocalCirculator<'_> {
        self.check_vertex(v);
        ColocalCirculator::new(self, v)
    }

    /// Returns `true` if the half-edge has no face, or if it is a face
    /// half-edge without pair (an open boundary that is not linked yet).
    pub fn is_boundary_edge(&self, e: EdgeHandle) -> bool {
        let edge = self.check_edge(e);
        edge.face.is_none() || edge.pair.is_none()
    }

    /// Returns `true` if `v` has an adjacent boundary half-edge. Isolated
    /// vertices are not boundary vertices.
    pub fn is_boundary_vertex(&self, v: VertexHandle) -> bool {
        self.vertex_edges(v).any(|e| {
            let edge = &self.edges[e];
            edge.face.is_none()
                || edge.pair.is_none()
                || edge.prev.map_or(false, |prev| self.edges[prev].pair.is_none())
        })
    }


    // ----- Internal helpers ----------------------------------------------------------------

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_vertex(&self, v: VertexHandle) -> &Vertex {
        match self.vertices.get(v) {
            Some(vertex) => vertex,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this vertex does not exist in this mesh",
                v,
            ),
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_edge(&self, e: EdgeHandle) -> &Edge {
        match self.edges.get(e) {
            Some(edge) => edge,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this edge does not exist in this mesh",
                e,
            ),
        }
    }

    /// Makes sure the given handle points to an existing element. If that's
    /// not the case, this method panics.
    fn check_face(&self, f: FaceHandle) -> &Face {
        match self.faces.get(f) {
            Some(face) => face,
            None => panic!(
                "{:?} was passed to a half edge mesh, but this face does not exist in this mesh",
                f,
            ),
        }
    }

    fn ensure_vertex_exists(&self, v: VertexHandle) -> Result<(), TopologyError> {
        self.vertices.contains_handle(v).ok_or(TopologyError::UnknownVertex(v))
    }

    /// Like `to`, but returns `None` for a disconnected half-edge.
    fn try_to(&self, e: EdgeHandle) -> Option<VertexHandle> {
        let edge = &self.edges[e];
        let via_next = edge.next.map(|n| self.edges[n].origin);
        let via_pair = edge.pair.map(|p| self.edges[p].origin);

        if edge.face.is_some() {
            via_next.or(via_pair)
        } else {
            via_pair.or(via_next)
        }
    }

    /// Sets `a.next = b` and `b.prev = a`. These two always have to be set
    /// together.
    fn link(&mut self, a: EdgeHandle, b: EdgeHandle) {
        self.edges[a].next = Some(b);
        self.edges[b].prev = Some(a);
    }

    /// Removes `e` from the loop it is part of. The neighbors' links pointing
    /// to `e` are cleared; the loop is left open.
    fn unlink_loop(&mut self, e: EdgeHandle) {
        let Edge { prev, next, .. } = self.edges[e];

        if let Some(prev) = prev {
            if let Some(prev) = self.edges.get_mut(prev).filter(|p| p.next == Some(e)) {
                prev.next = None;
            }
        }
        if let Some(next) = next {
            if let Some(next) = self.edges.get_mut(next).filter(|n| n.prev == Some(e)) {
                next.prev = None;
            }
        }

        self.edges[e].prev = None;
        self.edges[e].next = None;
    }
}

macro_rules! impl_index {
    ($handle:ident, $field:ident, $out:ident) => {
        impl ops::Index<$handle> for Mesh {
            type Output = $out;

            #[inline(always)]
            fn index(&self, idx: $handle) -> &Self::Output {
                &self.$field[idx]
            }
        }
    }
}

impl_index!(VertexHandle, vertices, Vertex);
impl_index!(FaceHandle, faces, Face);
impl_index!(EdgeHandle, edges, Edge);

// Only vertex attributes may be changed from outside. Topology is changed
// through the mesh operations.
impl ops::IndexMut<VertexHandle> for Mesh {
    #[inline(always)]
    fn index_mut(&mut self, idx: VertexHandle) -> &mut Self::Output {
        &mut self.vertices[idx]
    }
}
