use crate::algorithm::SpatialAlgorithm;
use crate::allocator::GlobalIndexAllocator;
use crate::collection::NodeCollection;
use crate::config::NodeGridConfig;
use crate::error::{self, NodeGridError};
use crate::index_map::NodeIndexMap;
use crate::node::Node;
use crate::spatial_index::SpatialIndex;
use serde::{Deserialize, Serialize};

/// Persisted form of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub index: usize,
    pub location: Vec<f64>,
    pub radius: f64,
    pub deleted: bool,
}

/// Persisted state of a node collection. The spatial grid is not part of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeCollectionSnapshot {
    pub dimension: usize,
    pub config: NodeGridConfig,
    pub index_counter: usize,
    pub changed_since_loading: bool,
    pub nodes: Vec<NodeRecord>,
}

impl<const D: usize, A: SpatialAlgorithm<D>> NodeCollection<D, A> {
    pub fn snapshot(&self) -> NodeCollectionSnapshot {
        let mut config = self.config.clone();
        config.boundary_separation = Some(self.boundary_separation());
        NodeCollectionSnapshot {
            dimension: D,
            config,
            index_counter: self.allocator.counter(),
            changed_since_loading: self.changed_since_loading,
            nodes: self
                .nodes
                .iter()
                .map(|n| NodeRecord {
                    index: n.index(),
                    location: n.location().to_vec(),
                    radius: n.radius(),
                    deleted: n.is_deleted(),
                })
                .collect(),
        }
    }

    /// Restores a collection and rebuilds its spatial index.
    pub fn from_snapshot(snapshot: &NodeCollectionSnapshot) -> Result<Self, NodeGridError> {
        if snapshot.dimension != D {
            return Err(NodeGridError::InvalidSnapshot {
                reason: format!("dimension {} does not match {}", snapshot.dimension, D),
            });
        }
        let config = snapshot.config.clone();
        config.validate()?;

        let mut nodes = Vec::with_capacity(snapshot.nodes.len());
        let mut deleted_slots = Vec::new();
        let mut index_map = NodeIndexMap::new();
        for (slot, record) in snapshot.nodes.iter().enumerate() {
            let location: [f64; D] = record.location.as_slice().try_into().map_err(|_| {
                NodeGridError::InvalidSnapshot {
                    reason: format!("node {} has {} coordinates", record.index, record.location.len()),
                }
            })?;
            error::check_position(&location)?;
            error::check_radius(record.radius)?;

            if record.deleted {
                deleted_slots.push(slot);
            } else {
                if index_map.contains(record.index) {
                    return Err(NodeGridError::InvalidSnapshot {
                        reason: format!("duplicate node id {}", record.index),
                    });
                }
                index_map.insert(record.index, slot);
            }
            nodes.push(Node::restore(record.index, location, record.radius, record.deleted));
        }

        let mut spatial_index = SpatialIndex::new(
            config.interaction_distance,
            config.boundary_separation(),
            config.max_growth_iterations,
        );
        spatial_index.set_up(&nodes)?;
        spatial_index.update(&nodes)?;

        Ok(Self {
            allocator: GlobalIndexAllocator::with_counter(config.process, snapshot.index_counter),
            config,
            nodes,
            deleted_slots,
            index_map,
            spatial_index,
            changed_since_loading: snapshot.changed_since_loading,
        })
    }
}
