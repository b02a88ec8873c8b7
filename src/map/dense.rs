use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
};

use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{
        Indices, Iter as SvIter, IterMut as SvIterMut, Values as SvValues,
        ValuesMut as SvValuesMut,
    },
};

use crate::handle::{hsize, Handle};
use super::Remap;


/// Storage for mesh elements that uses a simple contiguous vector and the
/// handle as index into it.
///
/// Removing an element does not shift the following ones: the slot is left
/// empty (a tombstone) and all other handles stay valid. Tombstones are only
/// reclaimed by [`DenseMap::compact`], which returns a [`Remap`] describing
/// how handles changed.
///
/// # Example
///
/// ```
/// use hemesh::{
///     FaceHandle,
///     handle::Handle,
///     map::DenseMap,
/// };
///
/// let mut map = DenseMap::new();
/// let a: FaceHandle = map.push("anna");
/// let b = map.push("bob");
/// map.remove(a);
///
/// assert_eq!(map.get(a), None);
/// assert_eq!(map.get(b), Some(&"bob"));
/// assert_eq!(map.num_elements(), 1);
///
/// let remap = map.compact();
/// assert_eq!(remap.get(b), Some(FaceHandle::new(0)));
/// ```
#[derive(Clone)]
pub struct DenseMap<H: Handle, T> {
    vec: StableVec<T>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> DenseMap<H, T> {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self {
            vec: StableVec::new(),
            _dummy: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vec: StableVec::with_capacity(capacity),
            _dummy: PhantomData,
        }
    }

    /// Appends the element and returns its handle. Handles are never reused
    /// until the map is compacted.
    pub fn push(&mut self, elem: T) -> H {
        H::from_usize(self.vec.push(elem))
    }

    /// The handle the next call to `push` will return.
    pub fn next_push_handle(&self) -> H {
        H::from_usize(self.vec.next_push_index())
    }

    /// Number of slots, including tombstones.
    pub fn num_slots(&self) -> usize {
        self.vec.next_push_index()
    }

    /// Number of live elements.
    pub fn num_elements(&self) -> hsize {
        self.vec.num_elements() as hsize
    }

    pub fn is_empty(&self) -> bool {
        self.vec.num_elements() == 0
    }

    pub fn contains_handle(&self, handle: H) -> bool {
        let idx = handle.to_usize();
        idx < self.vec.next_push_index() && self.vec.has_element_at(idx)
    }

    pub fn get(&self, handle: H) -> Option<&T> {
        if self.contains_handle(handle) {
            self.vec.get(handle.to_usize())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        if self.contains_handle(handle) {
            self.vec.get_mut(handle.to_usize())
        } else {
            None
        }
    }

    /// Removes the element, leaving a tombstone in its slot.
    pub fn remove(&mut self, handle: H) -> Option<T> {
        if self.contains_handle(handle) {
            self.vec.remove(handle.to_usize())
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.vec.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.vec.reserve(additional);
    }

    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter::new(self)
    }
    pub fn iter_mut(&mut self) -> IterMut<'_, H, T> {
        IterMut::new(self)
    }
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles::new(self)
    }
    pub fn values(&self) -> Values<'_, H, T> {
        Values::new(self)
    }
    pub fn values_mut(&mut self) -> ValuesMut<'_, H, T> {
        ValuesMut::new(self)
    }
}

impl<H: Handle, T: Clone> DenseMap<H, T> {
    /// Removes all tombstones. Live elements keep their relative order.
    ///
    /// The returned [`Remap`] maps every old handle to its new handle (or to
    /// `None` if the slot was a tombstone). Any handle stored elsewhere has to
    /// be translated with it.
    pub fn compact(&mut self) -> Remap<H> {
        let slots = self.vec.next_push_index();
        if self.vec.num_elements() == slots {
            return Remap::identity(slots);
        }

        let cap = self.vec.num_elements();
        let old = mem::replace(&mut self.vec, StableVec::with_capacity(cap));
        let mut table = vec![None; slots];
        for (idx, elem) in old.iter() {
            let new_idx = self.vec.push(elem.clone());
            table[idx] = Some(H::from_usize(new_idx));
        }

        Remap::from_table(table)
    }
}

impl<H: Handle, T> Default for DenseMap<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T> Index<H> for DenseMap<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T> IndexMut<H> for DenseMap<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            None => panic!("no element found for handle '{:?}'", handle),
            Some(r) => r,
        }
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for DenseMap<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.iter())
            .finish()
    }
}


// ===== Iterator wrappers =======================================================================

/// This macro generates an iterator wrapper. The usage is kinda awkward, but
/// this way we can avoid duplicate code.
macro_rules! gen_iter_wrapper {
    (
        $name:ident, $sv_name:ident, $iter_method:ident, [$($mutable:ident)?], [$($clone:ident)?],
        |$lt:tt, $h:ident, $t:ident| $item:ty,
        [$($mapping:tt)*] $(,)?
    ) => {
        #[derive(Debug, $($clone)?)]
        pub struct $name<$lt, $h: Handle, $t> {
            iter: $sv_name<$lt, $t, DefaultCore<$t>>,
            _dummy: PhantomData<&$lt $h>,
        }

        impl<$lt, $h: Handle, $t> $name<$lt, $h, $t> {
            fn new(map: &$lt $($mutable)? DenseMap<$h, $t>) -> Self {
                Self {
                    iter: map.vec.$iter_method(),
                    _dummy: PhantomData,
                }
            }
        }

        impl<$lt, $h: Handle, $t> Iterator for $name<$lt, $h, $t> {
            type Item = $item;
            fn next(&mut self) -> Option<Self::Item> {
                self.iter.next() $($mapping)*
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.iter.size_hint()
            }
        }

        impl<$lt, $h: Handle, $t> FusedIterator for $name<$lt, $h, $t> {}
    };
}

gen_iter_wrapper!(
    Iter, SvIter, iter, [], [Clone],
    |'map, H, T| (H, &'map T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(
    IterMut, SvIterMut, iter_mut, [mut], [],
    |'map, H, T| (H, &'map mut T),
    [.map(|(i, e)| (H::from_usize(i), e))],
);
gen_iter_wrapper!(Handles, Indices, indices, [], [Clone], |'map, H, T| H, [.map(H::from_usize)]);
gen_iter_wrapper!(Values, SvValues, values, [], [Clone], |'map, H, T| &'map T, []);
gen_iter_wrapper!(ValuesMut, SvValuesMut, values_mut, [mut], [], |'map, H, T| &'map mut T, []);
