//! Handles to refer to mesh elements.
//!
//! A handle is a small, `Copy` index into one of the element arrays of a
//! [`Mesh`][crate::Mesh]. Handles do not borrow the mesh: they stay valid
//! until the element is removed or the array is compacted (see
//! [`Mesh::compact_vertices`][crate::Mesh::compact_vertices] and friends).

use std::{fmt, hash::Hash};

use static_assertions::const_assert;


/// The integer type used as index in all handles.
///
/// This is `u32` by default. If you need to store more than 2³² elements of
/// one kind, enable the `large-handle` feature to make this `u64`.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// The integer type used as index in all handles.
#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;

// We convert between `usize` and `hsize` in a lot of places.
const_assert!(std::mem::size_of::<hsize>() <= std::mem::size_of::<usize>());


/// Types that can be used to refer to some element (e.g. vertices or faces).
///
/// A handle is basically an index; the element lives somewhere else.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// Create a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Return the index of the current handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from a `usize`.
    ///
    /// If `raw` cannot be represented by `hsize`, this function panics.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw <= hsize::max_value() as usize,
            "handle index {} does not fit into `hsize` (enable the `large-handle` feature)",
            raw,
        );
        Self::new(raw as hsize)
    }

    /// Helper method to get the index as `usize` directly from a handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

make_handle_type! {
    /// A handle that is associated with a face.
    FaceHandle = "F";
}
make_handle_type! {
    /// A handle that is associated with a directed half-edge.
    EdgeHandle = "E";
}
make_handle_type! {
    /// A handle that is associated with a vertex.
    VertexHandle = "V";
}
