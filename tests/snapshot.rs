use nodegrid::{NodeCollection, NodeCollectionSnapshot, NodeGridConfig, NodeGridError, ProcessRank};

#[test]
fn test_snapshot_json_roundtrip_rebuilds_grid() {
    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&[[0.0, 0.0], [0.0, 0.4], [5.0, 5.0], [5.0, 5.3]], 1.0).unwrap();
    mesh.set_minimum_node_domain_boundary_separation(2.0).unwrap();
    mesh.set_node_radius(2, 0.7).unwrap();
    mesh.delete_node(3).unwrap();
    mesh.add_node([0.3, 0.0]).unwrap();

    let json = serde_json::to_string(&mesh.snapshot()).unwrap();
    let snapshot: NodeCollectionSnapshot = serde_json::from_str(&json).unwrap();
    let mut restored: NodeCollection<2> = NodeCollection::from_snapshot(&snapshot).unwrap();

    assert_eq!(restored.num_nodes(), mesh.num_nodes());
    assert_eq!(restored.boundary_separation(), 2.0);
    assert_eq!(restored.interaction_distance(), 1.0);
    assert_eq!(restored.node(2).unwrap().radius(), 0.7);
    assert!(restored.spatial_index().is_current());

    // The restored grid answers queries straight away, while the source collection needs a refresh.
    mesh.update_spatial_index().unwrap();
    assert_eq!(restored.calculate_node_pairs().unwrap(), mesh.calculate_node_pairs().unwrap());

    // Pending deletions and the id stream survive the round trip.
    assert_eq!(restored.delete_node(3), Err(nodegrid::NodeGridError::AlreadyDeleted { index: 3 }));
    assert_eq!(restored.add_node([9.0, 9.0]).unwrap(), 5);
}

#[test]
fn test_config_from_json_defaults() {
    let config: NodeGridConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, NodeGridConfig::default());

    let config: NodeGridConfig = serde_json::from_str(
        r#"{"interaction_distance": 2.0, "process": {"num_procs": 4, "rank": 3}}"#,
    )
    .unwrap();
    assert_eq!(config.boundary_separation(), 2.0);
    assert_eq!(config.process, ProcessRank { num_procs: 4, rank: 3 });
    assert!(config.validate().is_ok());

    let config: NodeGridConfig = serde_json::from_str(r#"{"interaction_distance": -1.0}"#).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_restore_reports_growth_limit() {
    let mut mesh = NodeCollection::<2>::new();
    mesh.construct_nodes_without_mesh(&[[0.0, 0.0], [3.0, 1.0]], 1.0).unwrap();
    mesh.set_minimum_node_domain_boundary_separation(10.0).unwrap();

    let mut snap = mesh.snapshot();
    snap.config.max_growth_iterations = 1;
    let restored: Result<NodeCollection<2>, _> = NodeCollection::from_snapshot(&snap);
    assert_eq!(restored.err(), Some(NodeGridError::DomainGrowthExceeded { iterations: 1, limit: 1 }));

    snap.config.max_growth_iterations = 0;
    let restored: Result<NodeCollection<2>, _> = NodeCollection::from_snapshot(&snap);
    assert_eq!(restored.err(), Some(NodeGridError::InvalidGrowthLimit { value: 0 }));
}
