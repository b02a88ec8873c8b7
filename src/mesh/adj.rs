//! Circulators over adjacent elements.
//!
//! All circulators stop after visiting as many elements as the mesh has
//! slots, so a corrupted mesh can't make them loop forever.

use std::iter::FusedIterator;

use crate::handle::{EdgeHandle, VertexHandle};
use super::Mesh;


/// Follows `next` links starting at one half-edge until the start is reached
/// again (or a `next` link is missing).
#[derive(Clone)]
pub struct EdgeLoop<'a> {
    mesh: &'a Mesh,
    start: Option<EdgeHandle>,
    current: Option<EdgeHandle>,
    remaining: usize,
}

impl<'a> EdgeLoop<'a> {
    pub(super) fn new(mesh: &'a Mesh, start: Option<EdgeHandle>) -> Self {
        Self {
            mesh,
            start,
            current: start,
            remaining: mesh.edges.num_slots(),
        }
    }
}

impl Iterator for EdgeLoop<'_> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;

        self.current = self.mesh.edges[out].next.filter(|&next| Some(next) != self.start);
        Some(out)
    }
}

impl FusedIterator for EdgeLoop<'_> {}


/// The origins of the half-edges of a face loop.
#[derive(Clone)]
pub struct FaceVertices<'a> {
    mesh: &'a Mesh,
    edges: EdgeLoop<'a>,
}

impl<'a> FaceVertices<'a> {
    pub(super) fn new(mesh: &'a Mesh, edges: EdgeLoop<'a>) -> Self {
        Self { mesh, edges }
    }
}

impl Iterator for FaceVertices<'_> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let mesh = self.mesh;
        self.edges.next().map(|e| mesh.edges[e].origin)
    }
}

impl FusedIterator for FaceVertices<'_> {}


/// Iterates over the outgoing half-edges of a vertex.
///
/// ```text
///                ^   /
///           out  |  /  <- prev(out)
///                | v
///   <----------- V <-----------
///                ^ \
///                |  \
/// ```
///
/// The circulator first rotates from `out` to `pair(prev(out))`. If a link
/// on that path is missing (the fan is open), it returns to the start and
/// rotates the other way via `next(pair(out))` until that path ends, too.
#[derive(Clone)]
pub struct VertexCirculator<'a> {
    mesh: &'a Mesh,
    center: VertexHandle,
    start: Option<EdgeHandle>,
    current: Option<EdgeHandle>,
    reversed: bool,
    remaining: usize,
}

impl<'a> VertexCirculator<'a> {
    pub(super) fn new(mesh: &'a Mesh, center: VertexHandle, start: Option<EdgeHandle>) -> Self {
        Self {
            mesh,
            center,
            start,
            current: start,
            reversed: false,
            remaining: mesh.edges.num_slots(),
        }
    }

    /// Returns `e` if it is a valid next step of the rotation.
    fn accept(&self, e: Option<EdgeHandle>) -> Option<EdgeHandle> {
        e.filter(|&e| Some(e) != self.start && self.mesh.edges[e].origin == self.center)
    }

    fn forward(&self, out: EdgeHandle) -> Option<EdgeHandle> {
        let edges = &self.mesh.edges;
        edges[out].prev.and_then(|prev| edges[prev].pair)
    }

    fn backward(&self, out: EdgeHandle) -> Option<EdgeHandle> {
        let edges = &self.mesh.edges;
        edges[out].pair.and_then(|pair| edges[pair].next)
    }
}

impl Iterator for VertexCirculator<'_> {
    type Item = EdgeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;

        let next = if self.reversed {
            self.accept(self.backward(out))
        } else {
            let forward = self.forward(out);
            if forward.is_some() && forward == self.start {
                // Went full circle
                None
            } else {
                match self.accept(forward) {
                    Some(e) => Some(e),
                    None => {
                        self.reversed = true;
                        self.start.and_then(|start| self.accept(self.backward(start)))
                    }
                }
            }
        };
        self.current = next;

        Some(out)
    }
}

impl FusedIterator for VertexCirculator<'_> {}


/// Iterates over the colocal ring of a vertex, starting with the vertex
/// itself.
#[derive(Clone)]
pub struct ColocalCirculator<'a> {
    mesh: &'a Mesh,
    start: VertexHandle,
    current: Option<VertexHandle>,
    remaining: usize,
}

impl<'a> ColocalCirculator<'a> {
    pub(super) fn new(mesh: &'a Mesh, start: VertexHandle) -> Self {
        Self {
            mesh,
            start,
            current: Some(start),
            remaining: mesh.vertices.num_slots(),
        }
    }
}

impl Iterator for ColocalCirculator<'_> {
    type Item = VertexHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;

        self.current = self.mesh.vertices.get(out)
            .map(|v| v.colocal)
            .filter(|&next| next != self.start);
        Some(out)
    }
}

impl FusedIterator for ColocalCirculator<'_> {}
