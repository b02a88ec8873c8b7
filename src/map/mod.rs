//! Handle-indexed storage for mesh elements.
//!
//! The mesh keeps its vertices, half-edges and faces in [`DenseMap`]s. A
//! removed element leaves a tombstone behind, so handles of the remaining
//! elements stay valid. Compacting a map produces a [`Remap`], which is then
//! used to rewrite every stored handle.

use std::marker::PhantomData;

use crate::handle::Handle;

mod dense;

pub use self::dense::{DenseMap, Handles, Iter, IterMut, Values, ValuesMut};


/// Describes how handles changed when a [`DenseMap`] was compacted.
#[derive(Clone, Debug)]
pub struct Remap<H: Handle> {
    /// `None` if nothing moved: every handle maps to itself.
    table: Option<Vec<Option<H>>>,
    len: usize,
    _dummy: PhantomData<H>,
}

impl<H: Handle> Remap<H> {
    pub(crate) fn identity(len: usize) -> Self {
        Self {
            table: None,
            len,
            _dummy: PhantomData,
        }
    }

    pub(crate) fn from_table(table: Vec<Option<H>>) -> Self {
        Self {
            len: table.len(),
            table: Some(table),
            _dummy: PhantomData,
        }
    }

    /// Returns `true` if compaction did not move any element.
    pub fn is_identity(&self) -> bool {
        self.table.is_none()
    }

    /// Returns the new handle of the element formerly referred to by `old`,
    /// or `None` if `old` was a tombstone (or out of range).
    pub fn get(&self, old: H) -> Option<H> {
        let idx = old.to_usize();
        if idx >= self.len {
            return None;
        }

        match &self.table {
            None => Some(old),
            Some(table) => table[idx],
        }
    }

    /// Like `get`, but panics if `old` did not survive the compaction. Used
    /// for references that must point to live elements.
    pub(crate) fn map(&self, old: H) -> H {
        match self.get(old) {
            Some(new) => new,
            None => panic!(
                "bug: reference to {:?} survived, but the element was removed",
                old,
            ),
        }
    }
}
