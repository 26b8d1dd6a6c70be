use crate::algorithm::SpatialAlgorithm;
use crate::collection::NodeCollection;
use crate::error::NodeGridError;
use crate::node_map::NodeMap;
use tracing::{debug, warn};

impl<const D: usize, A: SpatialAlgorithm<D>> NodeCollection<D, A> {
    /// Compacts the node store after deletions and renumbers the survivors.
    ///
    /// Deleted nodes are dropped, the remaining nodes keep their relative order
    /// and receive the ids `0..n`. The returned [`NodeMap`] records, for every id
    /// held before the call, either its new id or that it was deleted.
    ///
    /// The spatial index is rebuilt afterwards. If that rebuild fails the map is
    /// still returned, since the nodes have already been renumbered; the index is
    /// then left stale and [`update_spatial_index`](Self::update_spatial_index)
    /// reports the cause.
    pub fn remesh(&mut self) -> Result<NodeMap, NodeGridError> {
        let mut map = NodeMap::new();
        let removed = self.remove_deleted_nodes(&mut map);
        self.deleted_slots.clear();
        self.update_node_indices(&mut map);
        debug_assert!(self.index_map.is_consistent_with(&self.nodes));

        self.set_changed_since_loading();
        debug!(removed, remaining = self.nodes.len(), "remeshed node collection");

        if let Err(error) = self.rebuild_spatial_index() {
            warn!(%error, "spatial index left stale after remesh");
        }
        Ok(map)
    }

    fn remove_deleted_nodes(&mut self, map: &mut NodeMap) -> usize {
        let before = self.nodes.len();
        let index_map = &mut self.index_map;
        self.nodes.retain(|node| {
            if node.is_deleted() {
                map.set_deleted(node.index());
                index_map.remove(node.index());
                false
            } else {
                true
            }
        });
        before - self.nodes.len()
    }

    fn update_node_indices(&mut self, map: &mut NodeMap) {
        self.index_map.clear();
        for (slot, node) in self.nodes.iter_mut().enumerate() {
            let old_index = node.index();
            node.set_index(slot);
            map.set_new_index(old_index, slot);
            self.index_map.insert(slot, slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collection::NodeCollection;
    use crate::node_map::NodeTranslation;

    #[test]
    fn test_remesh_without_deletions_is_identity() {
        let mut mesh = NodeCollection::<2>::new();
        mesh.construct_nodes_without_mesh(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], 1.0).unwrap();
        let map = mesh.remesh().unwrap();
        assert!(map.is_identity());
        assert!(map.deleted_indices().is_empty());
        assert!(mesh.has_changed_since_loading());
    }

    #[test]
    fn test_remesh_after_add_and_delete() {
        let mut mesh = NodeCollection::<1>::new();
        mesh.construct_nodes_without_mesh(&[[0.0], [1.0], [2.0]], 1.0).unwrap();
        let new_id = mesh.add_node([3.0]).unwrap();
        assert_eq!(new_id, 3);
        mesh.delete_node(0).unwrap();

        let map = mesh.remesh().unwrap();
        assert_eq!(map.get(0), Some(NodeTranslation::Deleted));
        assert_eq!(map.new_index(1), Some(0));
        assert_eq!(map.new_index(2), Some(1));
        assert_eq!(map.new_index(3), Some(2));
        assert_eq!(mesh.node_indices(), vec![0, 1, 2]);
        assert_eq!(mesh.node(2).unwrap().location(), &[3.0]);
        assert!(mesh.spatial_index().is_current());
        assert!(mesh.index_map_is_consistent());

        // Ids are never reused by the allocator.
        assert_eq!(mesh.add_node([4.0]).unwrap(), 4);
    }
}
