//! Reexports of the most important items of this library for convenience.
//!
//! As with every prelude, the main usage is to glob import everything from
//! this module:
//!
//! ```
//! use hemesh::prelude::*;
//! ```

pub use crate::{
    Handle, Mesh, TopologyError, ValidityError,
    EdgeHandle, FaceHandle, VertexHandle,
};
