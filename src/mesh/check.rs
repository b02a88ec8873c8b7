use tracing::debug;

use crate::{
    error::ValidityError,
    handle::{EdgeHandle, FaceHandle},
};
use super::Mesh;


impl Mesh {
    /// Checks all structural invariants and returns the first violation
    /// found.
    ///
    /// This walks all elements, so it's mainly useful for tests and
    /// debugging.
    pub fn check_validity(&self) -> Result<(), ValidityError> {
        self.check_vertices()?;
        self.check_edges()?;
        self.check_faces()
    }

    /// Like [`check_validity`][Mesh::check_validity], but only returns
    /// whether the mesh is valid. The violation is logged.
    pub fn is_valid(&self) -> bool {
        match self.check_validity() {
            Ok(()) => true,
            Err(e) => {
                debug!("mesh is invalid: {}", e);
                false
            }
        }
    }

    fn check_vertices(&self) -> Result<(), ValidityError> {
        for (vh, v) in self.vertices.iter() {
            if let Some(edge) = v.edge {
                match self.edges.get(edge) {
                    None => return Err(ValidityError::MissingVertexEdge { vertex: vh, edge }),
                    Some(e) if e.origin != vh => {
                        return Err(ValidityError::VertexEdgeOrigin {
                            vertex: vh,
                            edge,
                            origin: e.origin,
                        });
                    }
                    _ => {}
                }
            }

            // The colocal ring has to lead back to the vertex
            let mut at = v.colocal;
            let mut closed = false;
            for _ in 0..self.vertices.num_slots() {
                if at == vh {
                    closed = true;
                    break;
                }
                match self.vertices.get(at) {
                    Some(next) => at = next.colocal,
                    None => break,
                }
            }
            if !closed {
                return Err(ValidityError::BrokenColocalRing { vertex: vh, at });
            }
        }

        Ok(())
    }

    fn check_edges(&self) -> Result<(), ValidityError> {
        for (eh, e) in self.edges.iter() {
            if !self.vertices.contains_handle(e.origin) {
                return Err(ValidityError::MissingOrigin { edge: eh, origin: e.origin });
            }

            for &target in [e.pair, e.next, e.prev].iter().flatten() {
                if !self.edges.contains_handle(target) {
                    return Err(ValidityError::MissingEdge { edge: eh, target });
                }
            }

            if let Some(face) = e.face {
                if !self.faces.contains_handle(face) {
                    return Err(ValidityError::MissingFace { edge: eh, face });
                }
            }

            if let Some(pair) = e.pair {
                let p = &self.edges[pair];
                if p.pair != Some(eh) {
                    return Err(ValidityError::AsymmetricPair { edge: eh, pair });
                }

                let connects_back = p.origin != e.origin
                    && self.try_to(eh).map_or(true, |to| {
                        self.vertices.contains_handle(to) && self.is_colocal(to, p.origin)
                    });
                if !connects_back {
                    return Err(ValidityError::MismatchedPair { edge: eh, pair });
                }
            }

            if e.next.map_or(false, |n| self.edges[n].prev != Some(eh))
                || e.prev.map_or(false, |p| self.edges[p].next != Some(eh))
            {
                return Err(ValidityError::BrokenNextPrev { edge: eh });
            }
        }

        Ok(())
    }

    fn check_faces(&self) -> Result<(), ValidityError> {
        for (fh, f) in self.faces.iter() {
            let start = match f.edge {
                Some(start) => start,
                None => return Err(ValidityError::FaceWithoutEdge { face: fh }),
            };

            self.check_face_loop(fh, start)?;
        }

        Ok(())
    }

    /// Walks the loop starting at `start`: every half-edge has to belong to
    /// `face`, and the walk has to return to `start` after at least three
    /// steps.
    fn check_face_loop(&self, face: FaceHandle, start: EdgeHandle) -> Result<(), ValidityError> {
        let broken = |edge| Err(ValidityError::BrokenFaceLoop { face, edge });

        let mut e = start;
        let mut sides = 0;
        loop {
            match self.edges.get(e) {
                Some(edge) if edge.face == Some(face) => {}
                _ => return broken(e),
            }

            sides += 1;
            if sides > self.edges.num_slots() {
                return broken(e);
            }

            e = match self.edges[e].next {
                Some(next) => next,
                None => return broken(e),
            };
            if e == start {
                break;
            }
        }

        if sides < 3 {
            return broken(start);
        }

        Ok(())
    }
}
