use crate::{
    Mesh, TopologyError,
    handle::{Handle, VertexHandle},
};
use super::util::*;


#[test]
fn empty() {
    let m = Mesh::new();
    assert_eq!(m.num_vertices(), 0);
    assert_eq!(m.num_edges(), 0);
    assert_eq!(m.num_faces(), 0);
    assert_eq!(m.colocal_vertex_count(), None);
    check_valid!(m);
}

#[test]
fn single_triangle() {
    //
    //         (C)
    //        /   \
    //       /     \
    //      /       \
    //    (A) ----- (B)
    //
    let (mut m, v) = mesh_with(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let (va, vb, vc) = (v[0], v[1], v[2]);
    let f = m.add_triangle([va, vb, vc]).unwrap();

    assert_eq!(m.num_vertices(), 3);
    assert_eq!(m.num_edges(), 3);
    assert_eq!(m.num_faces(), 1);
    assert_eq!(m.num_sides(f), 3);
    assert_eq!(m.face_vertices(f).collect::<Vec<_>>(), vec![va, vb, vc]);

    let ab = edge(&m, va, vb);
    assert_eq!(m.from(ab), va);
    assert_eq!(m.to(ab), vb);
    assert_eq!(m[ab].face(), Some(f));
    assert_eq!(m[ab].pair(), None);
    assert_eq!(m.find_edge(vb, va), None);

    for e in m.face_edges(f) {
        assert!(m.is_boundary_edge(e));
    }
    for &v in &[va, vb, vc] {
        assert!(m.is_boundary_vertex(v));
        assert_eq!(m.vertex_edges(v).count(), 1);
    }
    check_valid!(m);
}

#[test]
fn two_triangles_are_paired() {
    //
    //         (C) ----- (D)
    //        /   \  Y  /
    //       /  X  \   /
    //      /       \ /
    //    (A) ----- (B)
    //
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [3.0, 1.0, 0.0],
    ]);
    let (va, vb, vc, vd) = (v[0], v[1], v[2], v[3]);
    let fx = m.add_triangle([va, vb, vc]).unwrap();
    let fy = m.add_triangle([vb, vd, vc]).unwrap();

    assert_eq!(m.num_edges(), 6);
    let bc = edge(&m, vb, vc);
    let cb = edge(&m, vc, vb);
    assert_eq!(m[bc].pair(), Some(cb));
    assert_eq!(m[cb].pair(), Some(bc));
    assert_eq!(m[bc].face(), Some(fx));
    assert_eq!(m[cb].face(), Some(fy));
    assert!(!m.is_boundary_edge(bc));

    // B has two outgoing half-edges: B -> C and B -> D
    assert_eq!(sorted(m.vertex_edges(vb).collect()), sorted(vec![bc, edge(&m, vb, vd)]));
    check_valid!(m);
}

#[test]
fn quad_with_linked_boundary() {
    let (mut m, [va, vb, vc, vd], f) = unit_quad();
    assert_eq!(m.num_edges(), 4);
    assert_eq!(m.num_sides(f), 4);

    assert_eq!(m.link_boundary(), 4);
    assert_eq!(m.num_edges(), 8);

    // The boundary loop runs in the opposite direction of the face.
    let ba = edge(&m, vb, va);
    assert_eq!(m[ba].face(), None);
    let origins = m.boundary_loop(ba).map(|e| m.from(e)).collect::<Vec<_>>();
    assert_eq!(origins, vec![vb, va, vd, vc]);

    for &v in &[va, vb, vc, vd] {
        let out = m[v].edge().unwrap();
        assert_eq!(m[out].face(), None, "{:?} does not point to a boundary edge", v);
        assert_eq!(m.vertex_edges(v).count(), 2);
    }
    check_valid!(m);
}

#[test]
fn non_manifold_edge_is_rejected() {
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ]);
    m.add_triangle([v[0], v[1], v[2]]).unwrap();
    let before = m.clone();

    let res = m.add_triangle([v[0], v[1], v[3]]);
    assert_eq!(res, Err(TopologyError::NonManifoldEdge { from: v[0], to: v[1] }));
    assert_eq!(res.unwrap_err().vertices(), Some((v[0], v[1])));

    assert_eq!(m.num_faces(), before.num_faces());
    assert_eq!(m.num_edges(), before.num_edges());
    assert!(m.edges().map(|(_, e)| *e).eq(before.edges().map(|(_, e)| *e)));
    check_valid!(m);
}

#[test]
fn invalid_faces_are_rejected() {
    let (mut m, v) = mesh_with(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    assert_eq!(m.add_face(&[v[0], v[1]]), Err(TopologyError::TooFewVertices(2)));
    assert_eq!(
        m.add_triangle([v[0], v[0], v[1]]),
        Err(TopologyError::DegenerateEdge { from: v[0], to: v[0] }),
    );

    let unknown = VertexHandle::new(17);
    assert_eq!(
        m.add_triangle([v[0], v[1], unknown]),
        Err(TopologyError::UnknownVertex(unknown)),
    );

    assert_eq!(m.num_faces(), 0);
    assert_eq!(m.num_edges(), 0);
}

#[test]
fn repeated_vertex_pair_is_rejected() {
    let (mut m, v) = mesh_with(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

    // A -> B -> C -> B -> A uses the pair (B, C) in both directions
    let res = m.add_face(&[v[0], v[1], v[2], v[1]]);
    assert_eq!(res, Err(TopologyError::DuplicateEdge { from: v[0], to: v[1] }));
    assert_eq!(m.num_edges(), 0);
}

#[test]
fn colocal_endpoints_are_rejected() {
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
    ]);
    m.link_colocals();

    assert_eq!(
        m.add_triangle([v[0], v[1], v[2]]),
        Err(TopologyError::DegenerateEdge { from: v[0], to: v[1] }),
    );
    assert_eq!(m.num_faces(), 0);
}

#[test]
fn face_reuses_linked_boundary_edge() {
    //
    //    (C)
    //     | \
    //     |  \
    //     |   \
    //    (A) - (B)
    //     \    /
    //      (D)
    //
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, -1.0, 0.0],
    ]);
    let (va, vb, vc, vd) = (v[0], v[1], v[2], v[3]);
    m.add_triangle([va, vb, vc]).unwrap();
    assert_eq!(m.link_boundary(), 3);

    let ba = edge(&m, vb, va);
    let f = m.add_triangle([vb, va, vd]).unwrap();
    assert_eq!(m[ba].face(), Some(f));
    assert_eq!(m.num_edges(), 8);

    assert_eq!(m.link_boundary(), 2);
    assert_eq!(m.num_edges(), 10);

    let loop_len = m.boundary_loop(edge(&m, va, vc)).count();
    assert_eq!(loop_len, 4);
    assert_eq!(faceless_edges(&m).len(), 4);
    check_valid!(m);
}

#[test]
fn faces_from_index_buffer() {
    let (mut m, _) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [2.0, 0.0, 0.0],
    ]);

    let indices = [0, 1, 2, 3, 1, 4, 2, 0, 1, 3];
    let f = m.add_face_from_indices(&indices, 0..4).unwrap();
    assert_eq!(m.num_sides(f), 4);

    // The second face is fine, the third one reuses the half-edge 0 -> 1
    let skipped = m.add_faces_lossy(&indices[4..], &[3, 3]);
    assert_eq!(skipped, 1);
    assert_eq!(m.num_faces(), 2);
    check_valid!(m);
}

#[test]
fn find_edge_after_compaction() {
    let (mut m, v) = mesh_with(&[
        [9.0, 9.0, 9.0],
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    m.remove_vertex(v[0]);
    m.add_triangle([v[1], v[2], v[3]]).unwrap();

    m.compact_vertices();
    let (a, b) = (VertexHandle::new(0), VertexHandle::new(1));

    // Lookup without the index scans all half-edges
    let e = m.find_edge(a, b).unwrap();
    m.rebuild_edge_index();
    assert_eq!(m.find_edge(a, b), Some(e));
    assert_eq!(m.find_edge(b, a), None);
    check_valid!(m);
}

#[test]
fn quad_from_two_triangles() {
    //
    //   (3) ----- (2)
    //    |     /   |
    //    |   /     |
    //   (0) ----- (1)
    //
    let (mut m, _, _) = unit_quad();
    m.clear();
    assert_eq!(m.num_vertices(), 0);

    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    add_faces(&mut m, &[&[v[0], v[1], v[2]], &[v[0], v[2], v[3]]]);

    assert_eq!(m.num_edges(), 6);
    assert_eq!(m.num_faces(), 2);

    let paired = m.edges().filter(|(_, e)| e.pair().is_some()).count();
    assert_eq!(paired, 2);
    assert_eq!(m[edge(&m, v[0], v[2])].pair(), m.find_edge(v[2], v[0]));
    for &(a, b) in &[(0, 1), (1, 2), (2, 3), (3, 0)] {
        assert_eq!(m[edge(&m, v[a], v[b])].pair(), None);
    }
    check_valid!(m);
}
