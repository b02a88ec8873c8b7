use super::util::*;


/// Builds a fan of four triangles around a center vertex:
///
/// ```text
///   (D) ---- (C)
///    | \    / |
///    |  (V)   |
///    | /    \ |
///   (A) ---- (B)
/// ```
fn fan() -> (crate::Mesh, Vec<crate::VertexHandle>) {
    let (mut m, v) = mesh_with(&[
        [0.5, 0.5, 0.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let (vv, va, vb, vc, vd) = (v[0], v[1], v[2], v[3], v[4]);
    add_faces(&mut m, &[
        &[vv, va, vb],
        &[vv, vb, vc],
        &[vv, vc, vd],
        &[vv, vd, va],
    ]);
    (m, v)
}

#[test]
fn closed_fan() {
    let (mut m, v) = fan();
    let center = v[0];

    let out = m.vertex_edges(center).collect::<Vec<_>>();
    assert_eq!(out.len(), 4);
    let targets = sorted(out.iter().map(|&e| m.to(e)).collect());
    assert_eq!(targets, vec![v[1], v[2], v[3], v[4]]);
    assert!(!m.is_boundary_vertex(center));

    m.link_boundary();
    assert_eq!(m.vertex_edges(center).count(), 4);
    assert!(!m.is_boundary_vertex(center));

    // Corners have two faces and one boundary edge going out
    for &corner in &v[1..] {
        assert!(m.is_boundary_vertex(corner));
        assert_eq!(m.vertex_edges(corner).count(), 3);
    }
}

#[test]
fn open_fan_is_walked_in_both_directions() {
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let (vv, va, vb, vc) = (v[0], v[1], v[2], v[3]);

    // Start the fan in the middle so that both directions are needed
    add_faces(&mut m, &[&[vv, vb, vc], &[vv, va, vb]]);
    assert_eq!(m[vv].edge(), m.find_edge(vv, vb));

    // `C -> V` comes in, but there is no half-edge `V -> C`
    let targets = sorted(m.vertex_edges(vv).map(|e| m.to(e)).collect());
    assert_eq!(targets, vec![va, vb]);
    assert_eq!(m.find_edge(vc, vv).map(|e| m.to(e)), Some(vv));
    assert!(m.is_boundary_vertex(vv));
}

#[test]
fn face_and_colocal_circulators() {
    let (m, v) = fan();
    for (f, _) in m.faces() {
        let corners = m.face_vertices(f).collect::<Vec<_>>();
        assert_eq!(corners.len(), 3);
        assert_eq!(corners[0], v[0]);
        assert_eq!(m.face_edges(f).count(), 3);
    }

    assert_eq!(m.colocals(v[2]).collect::<Vec<_>>(), vec![v[2]]);
}

#[test]
fn isolated_vertex() {
    let (m, v) = mesh_with(&[[0.0, 0.0, 0.0]]);
    assert_eq!(m.vertex_edges(v[0]).count(), 0);
    assert!(!m.is_boundary_vertex(v[0]));
    assert!(m[v[0]].is_isolated());
}
