use smallvec::SmallVec;
use tracing::debug;

use crate::handle::{hsize, EdgeHandle, FaceHandle};
use super::{Edge, Face, Mesh};


impl Mesh {
    /// Splits every face with more than three sides into a triangle fan
    /// around its first corner (the origin of the face's stored half-edge).
    ///
    /// The polygon's face handle is kept for the first triangle. Returns the
    /// number of newly created faces.
    ///
    /// ```text
    ///   v3 ------- v2           v3 ------- v2
    ///    |         |             | new   / |
    ///    |    f    |     =>      |     /   |
    ///    |         |             |   /   f |
    ///   v0 ------- v1           v0 ------- v1
    /// ```
    pub fn triangulate(&mut self) -> hsize {
        let polygons = self.faces.handles()
            .filter(|&f| self.num_sides(f) > 3)
            .collect::<Vec<_>>();

        let mut created = 0;
        for f in polygons {
            created += self.fan_triangulate(f);
        }

        if created > 0 {
            debug!("triangulated mesh: {} new faces", created);
        }
        created
    }

    fn fan_triangulate(&mut self, f: FaceHandle) -> hsize {
        let sides = self.face_edges(f).collect::<SmallVec<[_; 8]>>();
        let corners = sides.iter()
            .map(|&e| self.edges[e].origin)
            .collect::<SmallVec<[_; 8]>>();
        let n = sides.len();
        let center = corners[0];

        // `out[k - 2]` runs from the center to corner `k`, `back[k - 2]` the
        // other way.
        let mut out = SmallVec::<[EdgeHandle; 8]>::new();
        let mut back = SmallVec::<[EdgeHandle; 8]>::new();
        for k in 2..n - 1 {
            let d = self.edges.push(Edge::dangling(center));
            let r = self.edges.push(Edge {
                pair: Some(d),
                ..Edge::dangling(corners[k])
            });
            self.edges[d].pair = Some(r);
            self.edge_index.insert(center, corners[k], d);
            self.edge_index.insert(corners[k], center, r);

            out.push(d);
            back.push(r);
        }

        self.make_triangle(f, [sides[0], sides[1], back[0]]);
        for k in 2..n - 2 {
            let face = self.faces.push(Face { edge: None });
            self.make_triangle(face, [out[k - 2], sides[k], back[k - 1]]);
        }
        let face = self.faces.push(Face { edge: None });
        self.make_triangle(face, [out[n - 4], sides[n - 2], sides[n - 1]]);

        (n - 3) as hsize
    }

    fn make_triangle(&mut self, face: FaceHandle, [a, b, c]: [EdgeHandle; 3]) {
        self.link(a, b);
        self.link(b, c);
        self.link(c, a);
        for &e in &[a, b, c] {
            self.edges[e].face = Some(face);
        }
        self.faces[face].edge = Some(a);
    }
}
