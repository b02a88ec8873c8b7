//! Boundary handling: linking boundary loops, splitting boundary edges at
//! T-junctions and sewing boundaries shut across colocal vertices.

use boolinator::Boolinator;
use cgmath::{Point3, prelude::*};
use fxhash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    error::TopologyError,
    handle::{hsize, EdgeHandle, Handle, VertexHandle},
};
use super::{Edge, Mesh};


/// Default tolerance of [`Mesh::split_boundary_edges`]: a boundary vertex is
/// considered to lie on a boundary edge if its distance to the edge is at
/// most this value, and the edge is only split if the split parameter is at
/// least this far from both ends.
pub const SPLIT_EPSILON: f32 = 1e-4;


impl Mesh {
    /// Creates the boundary side of the mesh.
    ///
    /// Every face half-edge without a pair gets a new face-less pair running
    /// in the opposite direction. Afterwards all face-less half-edges with a
    /// face on the other side are linked into boundary loops and every
    /// boundary vertex points to one of its boundary half-edges.
    ///
    /// Half-edges without a face on either side (left behind when a face
    /// next to a linked boundary is removed) are not part of any boundary
    /// loop. Their links to boundary half-edges are cut; they can be removed
    /// with [`remove_edge`][Mesh::remove_edge].
    ///
    /// Returns the number of created half-edges. Calling this again on an
    /// already linked mesh creates nothing.
    pub fn link_boundary(&mut self) -> hsize {
        let open = self.edges.iter()
            .filter(|(_, e)| e.face.is_some() && e.pair.is_none())
            .map(|(h, _)| h)
            .collect::<Vec<_>>();

        for &fe in &open {
            let from = self.to(fe);
            let to = self.edges[fe].origin;

            let be = self.edges.push(Edge {
                pair: Some(fe),
                ..Edge::dangling(from)
            });
            self.edges[fe].pair = Some(be);
            self.edge_index.insert(from, to, be);
        }

        let boundary = self.edges.handles()
            .filter(|&h| self.is_linked_boundary(h))
            .collect::<Vec<_>>();
        for &be in &boundary {
            self.relink_boundary_edge(be);
        }

        debug!(
            "linked boundary: {} new half-edges, {} boundary half-edges in total",
            open.len(),
            boundary.len(),
        );

        open.len() as hsize
    }

    /// Links the face-less half-edge `edge` to the boundary half-edge that
    /// follows it and makes its origin point to it.
    ///
    /// Fails if `edge` is not a face-less half-edge whose pair has a face.
    pub fn link_boundary_edge(&mut self, edge: EdgeHandle) -> Result<(), TopologyError> {
        self.check_edge(edge);
        if !self.is_linked_boundary(edge) {
            return Err(TopologyError::NotABoundaryEdge(edge));
        }

        self.relink_boundary_edge(edge);
        Ok(())
    }

    /// Rotates around the destination of `edge` until the next face-less
    /// half-edge is found:
    ///
    /// ```text
    ///              next?
    ///   ------> B ------>
    ///    edge  ^ \
    ///   <----  |  \  keep rotating via prev(pair(..))
    ///          |   v
    /// ```
    fn relink_boundary_edge(&mut self, edge: EdgeHandle) {
        let mut next = edge;
        for _ in 0..self.edges.num_slots() {
            let pair = match self.edges[next].pair {
                Some(pair) => pair,
                None => break,
            };

            if self.edges[pair].face.is_none() {
                self.cut_stale_links(edge, pair);
                self.link(edge, pair);
                let origin = self.edges[edge].origin;
                self.vertices[origin].edge = Some(edge);
                return;
            }

            next = match self.edges[pair].prev {
                Some(prev) => prev,
                None => break,
            };
        }

        warn!("found no successor for boundary half-edge {:?} (non-manifold vertex?)", edge);
    }

    /// Before `a` and `b` are linked: clears the links of the old neighbors
    /// that still point back to `a` or `b`.
    fn cut_stale_links(&mut self, a: EdgeHandle, b: EdgeHandle) {
        if let Some(old) = self.edges[a].next.filter(|&n| n != b) {
            if self.edges[old].prev == Some(a) {
                self.edges[old].prev = None;
            }
        }
        if let Some(old) = self.edges[b].prev.filter(|&p| p != a) {
            if self.edges[old].next == Some(b) {
                self.edges[old].next = None;
            }
        }
    }

    /// Returns the face side and the boundary side (if linked already) of a
    /// boundary edge. `edge` may be either of the two.
    fn boundary_sides(
        &self,
        edge: EdgeHandle,
    ) -> Result<(EdgeHandle, Option<EdgeHandle>), TopologyError> {
        let e = self.check_edge(edge);
        match (e.face, e.pair) {
            (Some(_), None) => Ok((edge, None)),
            (Some(_), Some(pair)) if self.edges[pair].face.is_none() => Ok((edge, Some(pair))),
            (None, Some(pair)) if self.edges[pair].face.is_some() => Ok((pair, Some(edge))),
            _ => Err(TopologyError::NotABoundaryEdge(edge)),
        }
    }

    /// Returns `true` if `e` is an existing face-less half-edge whose pair
    /// has a face.
    fn is_linked_boundary(&self, e: EdgeHandle) -> bool {
        self.edges.get(e).map_or(false, |e| {
            e.face.is_none() && e.pair.map_or(false, |p| self.edges[p].face.is_some())
        })
    }

    /// Face half-edges whose pair is missing or face-less.
    fn boundary_face_edges(&self) -> Vec<EdgeHandle> {
        self.edges.iter()
            .filter(|(_, e)| {
                e.face.is_some() && e.pair.map_or(true, |p| self.edges[p].face.is_none())
            })
            .map(|(h, _)| h)
            .collect()
    }

    /// Splits a boundary edge by inserting a new vertex at `pos`. Normal and
    /// texture coordinate of the new vertex are interpolated with `t` between
    /// the edge's endpoints.
    ///
    /// `edge` may be the face side or the boundary side of the edge; `t` is
    /// measured from the origin of the face side and has to be inside
    /// `(0, 1)`.
    pub fn split_boundary_edge(
        &mut self,
        edge: EdgeHandle,
        t: f32,
        pos: Point3<f32>,
    ) -> Result<VertexHandle, TopologyError> {
        (t > 0.0 && t < 1.0).ok_or(TopologyError::InvalidSplitParameter(t))?;

        let (fe, _) = self.boundary_sides(edge)?;
        let a = &self.vertices[self.edges[fe].origin];
        let b = &self.vertices[self.to(fe)];
        let nor = a.nor.lerp(b.nor, t);
        let tex = a.tex.lerp(b.tex, t);

        let v = self.add_vertex(pos);
        self.vertices[v].nor = nor;
        self.vertices[v].tex = tex;
        self.split_boundary_edge_with_vertex(edge, v)?;

        Ok(v)
    }

    /// Splits a boundary edge `A -> B` at the existing vertex `vertex` (`M`):
    ///
    /// ```text
    ///        face                     face
    ///   A -----fe----> B      A --fe--> M --fe2--> B
    ///   A <----be----- B      A <-be2-- M <--be--- B
    ///       (hole)                  (hole)
    /// ```
    ///
    /// Both sides are split if the boundary side was linked already.
    pub fn split_boundary_edge_with_vertex(
        &mut self,
        edge: EdgeHandle,
        vertex: VertexHandle,
    ) -> Result<(), TopologyError> {
        self.check_vertex(vertex);
        let (fe, be) = self.boundary_sides(edge)?;

        let a = self.edges[fe].origin;
        let b = self.to(fe);
        let fe_next = self.edges[fe].next;

        let fe2 = self.edges.push(Edge {
            face: self.edges[fe].face,
            ..Edge::dangling(vertex)
        });
        self.link(fe, fe2);
        if let Some(next) = fe_next {
            self.link(fe2, next);
        }
        self.edge_index.remove(a, b, fe);
        self.edge_index.insert(a, vertex, fe);
        self.edge_index.insert(vertex, b, fe2);

        match be {
            Some(be) => {
                let be_next = self.edges[be].next;
                let be2 = self.edges.push(Edge {
                    pair: Some(fe),
                    ..Edge::dangling(vertex)
                });
                self.edges[fe].pair = Some(be2);
                self.edges[fe2].pair = Some(be);
                self.edges[be].pair = Some(fe2);

                self.link(be, be2);
                if let Some(next) = be_next {
                    self.link(be2, next);
                }
                self.edge_index.remove(b, a, be);
                self.edge_index.insert(b, vertex, be);
                self.edge_index.insert(vertex, a, be2);

                self.vertices[vertex].edge = Some(be2);
            }
            None => {
                if self.vertices[vertex].edge.is_none() {
                    self.vertices[vertex].edge = Some(fe2);
                }
            }
        }

        trace!("split boundary edge {:?} -> {:?} at {:?}", a, b, vertex);
        Ok(())
    }

    /// Fixes T-junctions with [`SPLIT_EPSILON`] as tolerance. See
    /// [`split_boundary_edges_with_epsilon`][Mesh::split_boundary_edges_with_epsilon].
    pub fn split_boundary_edges(&mut self) -> bool {
        self.split_boundary_edges_with_epsilon(SPLIT_EPSILON)
    }

    /// Fixes T-junctions: every boundary vertex that lies on the interior of
    /// a boundary edge (distance at most `epsilon`) splits that edge. The new
    /// vertex gets the position of the boundary vertex and is linked as its
    /// colocal, so that the boundary can be sewn afterwards.
    ///
    /// Returns `true` if any edge was split.
    pub fn split_boundary_edges_with_epsilon(&mut self, epsilon: f32) -> bool {
        let mut boundary_vertices = Vec::new();
        for fe in self.boundary_face_edges() {
            boundary_vertices.push(self.edges[fe].origin);
            boundary_vertices.push(self.to(fe));
        }
        boundary_vertices.sort();
        boundary_vertices.dedup();

        let mut split_count = 0;
        for v in boundary_vertices {
            let x0 = self.vertices[v].pos;

            for fe in self.boundary_face_edges() {
                let from = self.edges[fe].origin;
                let to = self.to(fe);
                if from == v || to == v {
                    continue;
                }

                let x1 = self.vertices[from].pos;
                let x2 = self.vertices[to].pos;
                let v01 = x0 - x1;
                let v21 = x2 - x1;

                let len = v21.magnitude();
                if len <= epsilon {
                    continue;
                }

                let distance = v01.cross(v21).magnitude() / len;
                if distance > epsilon {
                    continue;
                }

                let t = v01.dot(v21) / (len * len);
                if t > epsilon && t < 1.0 - epsilon {
                    match self.split_boundary_edge(fe, t, x0) {
                        Ok(split) => {
                            self.link_colocal(v, split);
                            split_count += 1;
                        }
                        Err(e) => warn!("failed to split {:?} at {:?}: {}", fe, v, e),
                    }
                }
            }
        }

        debug!("split {} boundary edges", split_count);
        split_count != 0
    }

    /// Sews the boundary loop of `start` shut.
    ///
    /// Two face-less half-edges are counterparts if they connect the same two
    /// colocal groups in opposite directions. For each counterpart pair, the
    /// two face half-edges on the other side are paired with each other and
    /// both boundary half-edges are removed. The surrounding boundary loops
    /// are reconnected, and sewing continues on the loops that result.
    ///
    /// Returns a surviving boundary half-edge if some edges had no
    /// counterpart, or `None` if everything reachable from `start` was sewn
    /// shut.
    pub fn sew_boundary(
        &mut self,
        start: EdgeHandle,
    ) -> Result<Option<EdgeHandle>, TopologyError> {
        self.check_edge(start);
        if !self.is_linked_boundary(start) {
            return Err(TopologyError::NotABoundaryEdge(start));
        }

        let canonical = self.colocal_canonicals();
        let key_of = |mesh: &Mesh, e: EdgeHandle| {
            let from = canonical[mesh.edges[e].origin.to_usize()];
            mesh.try_to(e).map(|to| (from, canonical[to.to_usize()]))
        };

        let mut buckets: FxHashMap<_, SmallVec<[EdgeHandle; 2]>> = FxHashMap::default();
        for h in self.edges.handles() {
            if self.is_linked_boundary(h) {
                if let Some(key) = key_of(self, h) {
                    buckets.entry(key).or_default().push(h);
                }
            }
        }

        let mut seeds = vec![start];
        let mut unsewn = Vec::new();
        let mut sewn = 0;
        while let Some(seed) = seeds.pop() {
            if !self.is_linked_boundary(seed) {
                continue;
            }

            let ring = self.boundary_loop(seed).collect::<SmallVec<[_; 16]>>();
            let counterpart = ring.iter().find_map(|&e| {
                let (from, to) = key_of(self, e)?;
                if from == to {
                    return None;
                }

                buckets.get(&(to, from))?
                    .iter()
                    .cloned()
                    .find(|&c| c != e && self.is_linked_boundary(c))
                    .map(|c| (e, c))
            });

            match counterpart {
                Some((e, c)) => {
                    seeds.extend(self.sew_pair(e, c));
                    sewn += 1;
                }
                None => unsewn.push(seed),
            }
        }

        debug!("sewed {} edge pairs starting at {:?}", sewn, start);
        Ok(unsewn.into_iter().find(|&e| self.is_linked_boundary(e)))
    }

    /// Pairs the face sides of the counterpart boundary half-edges `e` and
    /// `c`, removes `e` and `c` and reconnects their loops:
    ///
    /// ```text
    ///   --ep--> A --e--> B --en-->        --ep--\     /--en-->
    ///                                            A = A'
    ///   <--cn-- A' <--c-- B' <--cp--      <--cn--/     \--cp--
    /// ```
    ///
    /// Returns the surviving neighbors, which are used as new seeds.
    fn sew_pair(&mut self, e: EdgeHandle, c: EdgeHandle) -> SmallVec<[EdgeHandle; 4]> {
        let Edge { pair: fe, prev: ep, next: en, .. } = self.edges[e];
        let Edge { pair: fc, prev: cp, next: cn, .. } = self.edges[c];

        self.remove_edge(e);
        self.remove_edge(c);

        if let (Some(fe), Some(fc)) = (fe, fc) {
            self.edges[fe].pair = Some(fc);
            self.edges[fc].pair = Some(fe);
        }

        let alive = |h: Option<EdgeHandle>| h.filter(|&h| h != e && h != c);
        if let (Some(prev), Some(next)) = (alive(ep), alive(cn)) {
            self.link(prev, next);
        }
        if let (Some(prev), Some(next)) = (alive(cp), alive(en)) {
            self.link(prev, next);
        }

        trace!("sewed {:?} with {:?}", e, c);
        [ep, en, cp, cn].iter().filter_map(|&h| alive(h)).collect()
    }
}
