use cgmath::Point3;

use crate::{EdgeHandle, FaceHandle, Mesh, VertexHandle};


/// Asserts that the mesh passes all validity checks. Prints the whole mesh
/// if it doesn't.
macro_rules! check_valid {
    ($mesh:expr) => {{
        let mesh = &$mesh;
        if let Err(e) = mesh.check_validity() {
            panic!("mesh is invalid: {}\n{:#?}", e, mesh);
        }
    }};
}

/// Creates a mesh with isolated vertices at the given positions.
pub(crate) fn mesh_with(positions: &[[f32; 3]]) -> (Mesh, Vec<VertexHandle>) {
    let mut mesh = Mesh::new();
    let vertices = positions.iter()
        .map(|&[x, y, z]| mesh.add_vertex(Point3::new(x, y, z)))
        .collect();
    (mesh, vertices)
}

/// Adds all faces and panics if one is rejected.
pub(crate) fn add_faces(mesh: &mut Mesh, faces: &[&[VertexHandle]]) -> Vec<FaceHandle> {
    faces.iter()
        .map(|face| match mesh.add_face(face) {
            Ok(f) => f,
            Err(e) => panic!("face {:?} was rejected: {}", face, e),
        })
        .collect()
}

/// The unit square in the XY plane as one quad.
///
/// ```text
///   (D) ----- (C)
///    |         |
///    |    F    |
///    |         |
///   (A) ----- (B)
/// ```
pub(crate) fn unit_quad() -> (Mesh, [VertexHandle; 4], FaceHandle) {
    let (mut mesh, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let f = add_faces(&mut mesh, &[&[v[0], v[1], v[2], v[3]]])[0];
    (mesh, [v[0], v[1], v[2], v[3]], f)
}

/// Handles of all face-less half-edges.
pub(crate) fn faceless_edges(mesh: &Mesh) -> Vec<EdgeHandle> {
    mesh.edges()
        .filter(|(_, e)| e.face().is_none())
        .map(|(h, _)| h)
        .collect()
}

/// Returns the half-edge `from -> to` or panics.
pub(crate) fn edge(mesh: &Mesh, from: VertexHandle, to: VertexHandle) -> EdgeHandle {
    match mesh.find_edge(from, to) {
        Some(e) => e,
        None => panic!("no half-edge {:?} -> {:?}", from, to),
    }
}

pub(crate) fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}
