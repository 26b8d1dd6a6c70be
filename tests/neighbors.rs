use nodegrid::{NodeCollection, NodeGridError};
use rand::Rng;
use std::collections::BTreeSet;

/// Pairs within `cut_off` found by checking every combination.
fn brute_force_pairs<const D: usize>(locations: &[[f64; D]], cut_off: f64) -> BTreeSet<(usize, usize)> {
    let mut pairs = BTreeSet::new();
    for i in 0..locations.len() {
        for j in (i + 1)..locations.len() {
            let d2: f64 = locations[i].iter().zip(locations[j].iter()).map(|(a, b)| (a - b) * (a - b)).sum();
            if d2 <= cut_off * cut_off {
                pairs.insert((i, j));
            }
        }
    }
    pairs
}

#[test]
fn test_two_close_pairs_2d() {
    let mut mesh = NodeCollection::<2>::new();
    let locations = [[0.0, 0.0], [0.0, 0.4], [5.0, 5.0], [5.0, 5.3]];
    mesh.construct_nodes_without_mesh(&locations, 1.0).unwrap();

    let result = mesh.calculate_node_pairs().unwrap();
    let expected: BTreeSet<(usize, usize)> = [(0, 1), (2, 3)].into_iter().collect();
    assert_eq!(result.pairs, expected);

    assert_eq!(result.neighbours[&0], BTreeSet::from([1]));
    assert_eq!(result.neighbours[&3], BTreeSet::from([2]));
}

#[test]
fn test_isolated_nodes_have_empty_neighbour_sets() {
    let mut mesh = NodeCollection::<3>::new();
    mesh.construct_nodes_without_mesh(&[[0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 3.0, 0.0]], 1.0).unwrap();
    let result = mesh.calculate_node_pairs().unwrap();
    assert!(result.is_empty());
    assert_eq!(result.neighbours.len(), 3);
    assert!(result.neighbours.values().all(|n| n.is_empty()));
}

#[test]
fn test_pairs_match_brute_force_random_3d() {
    let mut rng = rand::thread_rng();
    for &cut_off in &[0.5, 1.0, 2.5] {
        let locations: Vec<[f64; 3]> = (0..200)
            .map(|_| [rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)])
            .collect();

        let mut mesh = NodeCollection::<3>::new();
        mesh.construct_nodes_without_mesh(&locations, cut_off).unwrap();
        let result = mesh.calculate_node_pairs().unwrap();

        assert_eq!(result.pairs, brute_force_pairs(&locations, cut_off), "cut-off {}", cut_off);
    }
}

#[test]
fn test_neighbour_reciprocity_random_2d() {
    let mut rng = rand::thread_rng();
    let locations: Vec<[f64; 2]> = (0..300)
        .map(|_| [rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0)])
        .collect();

    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&locations, 0.8).unwrap();
    let result = mesh.calculate_node_pairs().unwrap();

    for (&i, neighbours) in &result.neighbours {
        for &j in neighbours {
            assert!(
                result.neighbours[&j].contains(&i),
                "Node {} claims neighbour {}, but {} does not claim {}",
                i, j, j, i
            );
            assert!(result.contains(i, j));
        }
    }
    let total: usize = result.neighbours.values().map(|n| n.len()).sum();
    assert_eq!(total, 2 * result.len());
}

#[test]
fn test_pairs_follow_moving_nodes() {
    let mut rng = rand::thread_rng();
    let mut locations: Vec<[f64; 2]> = (0..100)
        .map(|_| [rng.gen_range(0.0..4.0), rng.gen_range(0.0..4.0)])
        .collect();

    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&locations, 0.7).unwrap();

    for _step in 0..10 {
        for (i, loc) in locations.iter_mut().enumerate() {
            loc[0] += rng.gen_range(-0.7..0.7);
            loc[1] += rng.gen_range(-0.7..0.7);
            mesh.set_node_location(i, *loc).unwrap();
        }
        assert_eq!(mesh.calculate_node_pairs(), Err(NodeGridError::SpatialIndexStale));

        mesh.update_spatial_index().unwrap();
        let result = mesh.calculate_node_pairs().unwrap();
        assert_eq!(result.pairs, brute_force_pairs(&locations, 0.7));
    }
}

#[test]
fn test_added_nodes_join_after_update() {
    let mut mesh = NodeCollection::<1>::new();
    mesh.construct_nodes_without_mesh(&[[0.0], [5.0]], 1.0).unwrap();
    let id = mesh.add_node([5.5]).unwrap();

    mesh.update_spatial_index().unwrap();
    let result = mesh.calculate_node_pairs().unwrap();
    assert!(result.contains(1, id));
    assert_eq!(result.len(), 1);
}

#[test]
fn test_deleted_nodes_leave_pairs_after_update() {
    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&[[0.0, 0.0], [0.5, 0.0], [1.0, 0.0]], 1.0).unwrap();
    assert_eq!(mesh.calculate_node_pairs().unwrap().len(), 3);

    mesh.delete_node(1).unwrap();
    mesh.update_spatial_index().unwrap();
    let result = mesh.calculate_node_pairs().unwrap();
    assert_eq!(result.pairs.iter().copied().collect::<Vec<_>>(), vec![(0, 2)]);
}

#[test]
fn test_query_after_clearing_index_is_precondition_error() {
    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&[[0.0, 0.0]], 1.0).unwrap();
    mesh.clear_spatial_index();
    assert_eq!(mesh.calculate_node_pairs(), Err(NodeGridError::SpatialIndexMissing));

    // A refresh builds a new index from scratch.
    mesh.update_spatial_index().unwrap();
    assert!(mesh.calculate_node_pairs().is_ok());
}
