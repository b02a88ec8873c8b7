//! Error types.

use failure::Fail;

use crate::handle::{EdgeHandle, FaceHandle, VertexHandle};


/// Reasons why a topological operation on a [`Mesh`][crate::Mesh] was
/// rejected.
///
/// A rejected operation never leaves the mesh half-modified. Importers
/// usually log the error and skip the offending face; the colliding vertex
/// pair is available through [`TopologyError::vertices`].
#[derive(Debug, Clone, Copy, PartialEq, Fail)]
pub enum TopologyError {
    #[fail(display = "face has only {} vertices, but at least 3 are required", _0)]
    TooFewVertices(usize),

    #[fail(display = "{:?} does not exist in this mesh", _0)]
    UnknownVertex(VertexHandle),

    /// Both ends of an edge are the same vertex (or colocal vertices).
    #[fail(display = "degenerate edge {:?} -> {:?}", from, to)]
    DegenerateEdge {
        from: VertexHandle,
        to: VertexHandle,
    },

    /// The same vertex pair (in any direction) occurs twice in one face.
    #[fail(display = "edge {:?} -> {:?} occurs more than once in the face", from, to)]
    DuplicateEdge {
        from: VertexHandle,
        to: VertexHandle,
    },

    /// The half-edge `from -> to` already belongs to a face.
    #[fail(display = "new face would add a non-manifold edge {:?} -> {:?}", from, to)]
    NonManifoldEdge {
        from: VertexHandle,
        to: VertexHandle,
    },

    #[fail(display = "{:?} is not a boundary edge", _0)]
    NotABoundaryEdge(EdgeHandle),

    #[fail(display = "edge split parameter {} is not inside (0, 1)", _0)]
    InvalidSplitParameter(f32),

    #[fail(display = "canonical map has {} entries, but the mesh has {} vertex slots", actual, expected)]
    CanonicalMapLength {
        expected: usize,
        actual: usize,
    },
}

impl TopologyError {
    /// Returns the two vertices involved in a rejected edge, if the error is
    /// about an edge.
    pub fn vertices(&self) -> Option<(VertexHandle, VertexHandle)> {
        match *self {
            TopologyError::DegenerateEdge { from, to }
            | TopologyError::DuplicateEdge { from, to }
            | TopologyError::NonManifoldEdge { from, to } => Some((from, to)),
            _ => None,
        }
    }
}

/// The first inconsistency found by
/// [`Mesh::check_validity`][crate::Mesh::check_validity].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum ValidityError {
    #[fail(display = "[{:?}].edge = {:?}, but that half-edge does not exist", vertex, edge)]
    MissingVertexEdge {
        vertex: VertexHandle,
        edge: EdgeHandle,
    },

    #[fail(display = "[{:?}].edge = {:?}, but that half-edge starts at {:?}", vertex, edge, origin)]
    VertexEdgeOrigin {
        vertex: VertexHandle,
        edge: EdgeHandle,
        origin: VertexHandle,
    },

    #[fail(display = "colocal ring of {:?} is broken at {:?}", vertex, at)]
    BrokenColocalRing {
        vertex: VertexHandle,
        at: VertexHandle,
    },

    #[fail(display = "[{:?}].origin = {:?}, but that vertex does not exist", edge, origin)]
    MissingOrigin {
        edge: EdgeHandle,
        origin: VertexHandle,
    },

    #[fail(display = "[{:?}] links to {:?}, but that half-edge does not exist", edge, target)]
    MissingEdge {
        edge: EdgeHandle,
        target: EdgeHandle,
    },

    #[fail(display = "[{:?}].face = {:?}, but that face does not exist", edge, face)]
    MissingFace {
        edge: EdgeHandle,
        face: FaceHandle,
    },

    #[fail(display = "[{:?}].pair = {:?}, but [{:?}].pair is not {:?}", edge, pair, pair, edge)]
    AsymmetricPair {
        edge: EdgeHandle,
        pair: EdgeHandle,
    },

    #[fail(display = "{:?} and its pair {:?} do not connect the same vertices", edge, pair)]
    MismatchedPair {
        edge: EdgeHandle,
        pair: EdgeHandle,
    },

    #[fail(display = "[{:?}].next/prev links are not mutual", edge)]
    BrokenNextPrev {
        edge: EdgeHandle,
    },

    #[fail(display = "{:?} has no boundary half-edge", face)]
    FaceWithoutEdge {
        face: FaceHandle,
    },

    #[fail(display = "walking around {:?} reached {:?}, which is not part of the face", face, edge)]
    BrokenFaceLoop {
        face: FaceHandle,
        edge: EdgeHandle,
    },
}
