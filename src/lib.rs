//! A half-edge mesh for building, repairing and editing polygon meshes.
//!
//! The central type is [`Mesh`]. It stores vertices, half-edges and faces in
//! handle-indexed arrays and supports:
//!
//! - incremental face insertion with manifold checks,
//! - linking the boundary loops of open meshes,
//! - grouping vertices that share a position ("colocals"),
//! - fixing T-junctions and sewing boundaries shut across colocals,
//! - removal of elements with later compaction, and
//! - fan triangulation of polygons.
//!
//! Operations that can be rejected because of the mesh topology return a
//! [`TopologyError`]. Passing a handle that does not exist in the mesh is a
//! programming error and panics.

pub mod error;
pub mod handle;
pub mod map;
mod mesh;
pub mod prelude;

pub use self::{
    error::{TopologyError, ValidityError},
    handle::{hsize, EdgeHandle, FaceHandle, Handle, VertexHandle},
    mesh::{
        Edge, Face, Mesh, Vertex, SPLIT_EPSILON,
    },
};

/// Iterator types returned by the adjacency queries of [`Mesh`].
pub mod iter {
    pub use crate::mesh::adj::{ColocalCirculator, EdgeLoop, FaceVertices, VertexCirculator};
}
