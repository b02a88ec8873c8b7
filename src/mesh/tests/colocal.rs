use cgmath::Point3;

use crate::TopologyError;
use super::util::*;


#[test]
fn link_by_position() {
    let (mut m, v) = mesh_with(&[
        [1.0, 2.0, 3.0],
        [0.0, 0.0, 0.0],
        [1.0, 2.0, 3.0],
        [-0.0, 0.0, -0.0],
        [1.0, 2.0, 3.0001],
    ]);
    assert_eq!(m.colocal_vertex_count(), None);

    m.link_colocals();
    assert_eq!(m.colocal_vertex_count(), Some(3));

    assert!(m.is_colocal(v[0], v[2]));
    assert!(m.is_colocal(v[1], v[3]));
    assert!(!m.is_colocal(v[0], v[4]));
    assert!(m.is_colocal(v[4], v[4]));
    assert_eq!(sorted(m.colocals(v[2]).collect()), vec![v[0], v[2]]);
    assert_eq!(m.colocals(v[4]).collect::<Vec<_>>(), vec![v[4]]);

    // Linking again starts from scratch
    m.link_colocals();
    assert_eq!(m.colocal_vertex_count(), Some(3));
    assert_eq!(m.colocals(v[0]).count(), 2);
    check_valid!(m);
}

#[test]
fn link_with_canonical_map() {
    let (mut m, v) = mesh_with(&[[0.0, 0.0, 0.0]; 4]);

    assert_eq!(
        m.link_colocals_with_canonical_map(&[0, 1, 2]),
        Err(TopologyError::CanonicalMapLength { expected: 4, actual: 3 }),
    );

    // Same positions, but the caller decides what is colocal
    m.link_colocals_with_canonical_map(&[0, 1, 0, 3]).unwrap();
    assert_eq!(m.colocal_vertex_count(), Some(3));
    assert!(m.is_colocal(v[0], v[2]));
    assert!(!m.is_colocal(v[0], v[1]));
    assert!(!m.is_colocal(v[1], v[3]));
    check_valid!(m);
}

#[test]
fn explicit_links_keep_count() {
    let (mut m, v) = mesh_with(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
    ]);
    m.link_colocals();
    assert_eq!(m.colocal_vertex_count(), Some(3));

    m.link_colocal(v[0], v[1]);
    assert_eq!(m.colocal_vertex_count(), Some(2));

    // Already linked: no change
    m.link_colocal(v[1], v[0]);
    assert_eq!(m.colocal_vertex_count(), Some(2));

    m.link_colocal(v[2], v[1]);
    assert_eq!(m.colocal_vertex_count(), Some(1));
    assert_eq!(m.colocals(v[0]).count(), 3);

    let new = m.add_vertex(Point3::new(5.0, 5.0, 5.0));
    assert_eq!(m.colocal_vertex_count(), Some(2));

    // Removing a vertex from a bigger ring doesn't change the count
    m.remove_vertex(v[1]);
    assert_eq!(m.colocal_vertex_count(), Some(2));
    assert_eq!(sorted(m.colocals(v[0]).collect()), vec![v[0], v[2]]);

    m.remove_vertex(new);
    assert_eq!(m.colocal_vertex_count(), Some(1));
    check_valid!(m);
}

#[test]
fn three_identical_and_one_distinct() {
    let (mut m, v) = mesh_with(&[
        [0.5, 0.5, 0.5],
        [0.5, 0.5, 0.5],
        [1.0, 0.0, 0.0],
        [0.5, 0.5, 0.5],
    ]);
    m.link_colocals();
    assert_eq!(m.colocal_vertex_count(), Some(2));

    for &start in &[v[0], v[1], v[3]] {
        let ring = m.colocals(start).collect::<Vec<_>>();
        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], start);
        assert_eq!(sorted(ring), vec![v[0], v[1], v[3]]);
        assert_eq!(m[m[m[start].colocal()].colocal()].colocal(), start);
    }
    assert_eq!(m.colocals(v[2]).count(), 1);
}
