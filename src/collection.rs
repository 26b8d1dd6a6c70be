use crate::algorithm::SpatialAlgorithm;
use crate::algorithm::box_grid::BoxGrid;
use crate::allocator::{GlobalIndexAllocator, ProcessRank};
use crate::bounds::BoundingBox;
use crate::config::NodeGridConfig;
use crate::error::{self, NodeGridError};
use crate::index_map::NodeIndexMap;
use crate::node::Node;
use crate::spatial_index::{NodePairs, SpatialIndex};
use tracing::debug;

/// A mesh made of nodes only: point particles with stable global ids and a grid
/// for finding the pairs that lie within the interaction distance.
///
/// This struct manages:
/// - The **node store**, where deleted nodes keep their slot until [`remesh`](Self::remesh).
/// - The **index map** from global node id to storage slot.
/// - The **allocator** issuing new global ids for this process.
/// - The **spatial index** that answers neighbor-pair queries.
///
/// Changes to nodes (add, delete, move) leave the spatial index stale until
/// [`update_spatial_index`](Self::update_spatial_index) or a remesh refreshes it.
pub struct NodeCollection<const D: usize, A: SpatialAlgorithm<D> = BoxGrid<D>> {
    pub(crate) config: NodeGridConfig,
    pub(crate) nodes: Vec<Node<D>>,
    pub(crate) deleted_slots: Vec<usize>,
    pub(crate) index_map: NodeIndexMap,
    pub(crate) allocator: GlobalIndexAllocator,
    pub(crate) spatial_index: SpatialIndex<D, A>,
    pub(crate) changed_since_loading: bool,
}

impl<const D: usize> NodeCollection<D> {
    /// Creates an empty collection with the default configuration.
    pub fn new() -> Self {
        Self::from_config(NodeGridConfig::default())
    }
}

impl<const D: usize> Default for NodeCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize, A: SpatialAlgorithm<D>> NodeCollection<D, A> {
    /// Creates an empty collection. No spatial index exists until nodes are constructed.
    pub fn with_config(config: NodeGridConfig) -> Result<Self, NodeGridError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: NodeGridConfig) -> Self {
        let allocator = GlobalIndexAllocator::new(config.process);
        let spatial_index = SpatialIndex::new(
            config.interaction_distance,
            config.boundary_separation(),
            config.max_growth_iterations,
        );
        Self {
            config,
            nodes: Vec::new(),
            deleted_slots: Vec::new(),
            index_map: NodeIndexMap::new(),
            allocator,
            spatial_index,
            changed_since_loading: false,
        }
    }

    /// Replaces the contents of the collection with nodes at `locations`.
    ///
    /// Nodes get the contiguous ids `0..n` and the default radius. The boundary
    /// separation is reset to the interaction distance and the spatial index is
    /// built and refreshed. On error the collection is left empty.
    pub fn construct_nodes_without_mesh(
        &mut self,
        locations: &[[f64; D]],
        interaction_distance: f64,
    ) -> Result<(), NodeGridError> {
        self.clear();
        error::check_interaction_distance(interaction_distance)?;
        for location in locations {
            error::check_position(location)?;
        }

        self.config.interaction_distance = interaction_distance;
        self.config.boundary_separation = Some(interaction_distance);
        self.spatial_index = SpatialIndex::new(
            interaction_distance,
            interaction_distance,
            self.config.max_growth_iterations,
        );

        for (i, &location) in locations.iter().enumerate() {
            let mut node = Node::new(i, location);
            node.set_radius(self.config.default_radius);
            self.nodes.push(node);
            self.index_map.insert(i, i);
        }
        self.allocator.advance(locations.len());

        if let Err(e) = self.rebuild_spatial_index() {
            self.clear();
            return Err(e);
        }
        debug!(nodes = locations.len(), interaction_distance, "constructed nodes without mesh");
        Ok(())
    }

    /// Constructs from the live nodes of another collection, in its storage order.
    pub fn construct_from_collection<B: SpatialAlgorithm<D>>(
        &mut self,
        other: &NodeCollection<D, B>,
        interaction_distance: f64,
    ) -> Result<(), NodeGridError> {
        let locations: Vec<[f64; D]> = other.nodes().map(|n| *n.location()).collect();
        self.construct_nodes_without_mesh(&locations, interaction_distance)
    }

    /// Removes all nodes, the index map and the spatial index, and restarts the id stream.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.deleted_slots.clear();
        self.index_map.clear();
        self.allocator.reset();
        self.spatial_index.clear();
    }

    /// Number of live nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len() - self.deleted_slots.len()
    }

    /// Number of stored nodes, including deleted ones awaiting a remesh.
    pub fn num_all_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn interaction_distance(&self) -> f64 {
        self.config.interaction_distance
    }

    pub fn boundary_separation(&self) -> f64 {
        self.spatial_index.boundary_separation()
    }

    /// Sets the minimum distance kept between any node and the grid boundary.
    pub fn set_minimum_node_domain_boundary_separation(&mut self, separation: f64) -> Result<(), NodeGridError> {
        error::check_boundary_separation(separation)?;
        self.config.boundary_separation = Some(separation);
        self.spatial_index.set_boundary_separation(separation);
        Ok(())
    }

    pub fn config(&self) -> &NodeGridConfig {
        &self.config
    }

    pub fn process(&self) -> ProcessRank {
        self.allocator.process()
    }

    /// Local storage slot of the node with global id `index`.
    pub fn solve_node_mapping(&self, index: usize) -> Result<usize, NodeGridError> {
        self.index_map.solve(index, self.allocator.process().rank)
    }

    pub fn node(&self, index: usize) -> Result<&Node<D>, NodeGridError> {
        let slot = self.solve_node_mapping(index)?;
        Ok(&self.nodes[slot])
    }

    /// Live nodes in storage order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<D>> + '_ {
        self.nodes.iter().filter(|n| !n.is_deleted())
    }

    /// Global ids of the live nodes in storage order.
    pub fn node_indices(&self) -> Vec<usize> {
        self.nodes().map(|n| n.index()).collect()
    }

    /// Moves a node. The spatial index is stale until the next refresh.
    pub fn set_node_location(&mut self, index: usize, location: [f64; D]) -> Result<(), NodeGridError> {
        error::check_position(&location)?;
        let slot = self.solve_node_mapping(index)?;
        self.nodes[slot].set_location(location);
        self.spatial_index.mark_stale();
        Ok(())
    }

    pub fn set_node_radius(&mut self, index: usize, radius: f64) -> Result<(), NodeGridError> {
        error::check_radius(radius)?;
        let slot = self.solve_node_mapping(index)?;
        self.nodes[slot].set_radius(radius);
        Ok(())
    }

    /// Draws the next id from this process's id stream.
    pub fn next_available_index(&mut self) -> usize {
        self.allocator.next_index()
    }

    /// Adds a node at `location` and returns its new global id.
    ///
    /// The node is only placed in the spatial index at the next refresh.
    pub fn add_node(&mut self, location: [f64; D]) -> Result<usize, NodeGridError> {
        error::check_position(&location)?;
        let index = self.allocator.next_index();
        let mut node = Node::new(index, location);
        node.set_radius(self.config.default_radius);

        let slot = self.nodes.len();
        self.nodes.push(node);
        self.index_map.insert(index, slot);
        self.spatial_index.mark_stale();
        Ok(index)
    }

    /// Marks the node with global id `index` as deleted.
    ///
    /// The node keeps its storage slot until the next remesh.
    pub fn delete_node(&mut self, index: usize) -> Result<(), NodeGridError> {
        let Some(slot) = self.index_map.get(index) else {
            if self.deleted_slots.iter().any(|&s| self.nodes[s].index() == index) {
                return Err(NodeGridError::AlreadyDeleted { index });
            }
            return Err(NodeGridError::NotOwned { index, rank: self.allocator.process().rank });
        };

        self.nodes[slot].mark_as_deleted();
        self.deleted_slots.push(slot);
        self.index_map.remove(index);
        self.spatial_index.mark_stale();
        Ok(())
    }

    /// Whether a remesh changed the collection since it was constructed or loaded.
    pub fn has_changed_since_loading(&self) -> bool {
        self.changed_since_loading
    }

    pub(crate) fn set_changed_since_loading(&mut self) {
        self.changed_since_loading = true;
    }

    pub fn index_map_is_consistent(&self) -> bool {
        self.index_map.is_consistent_with(&self.nodes)
    }

    /// Bounding box of the live nodes.
    pub fn bounding_box(&self) -> BoundingBox<D> {
        BoundingBox::from_points(self.nodes().map(|n| n.location()))
    }

    pub fn spatial_index(&self) -> &SpatialIndex<D, A> {
        &self.spatial_index
    }

    /// Region currently covered by the spatial index, if one exists.
    pub fn domain_bounds(&self) -> Option<BoundingBox<D>> {
        self.spatial_index.domain_bounds()
    }

    /// Builds a fresh, empty spatial index over the bounding box of the live nodes.
    pub fn set_up_spatial_index(&mut self) -> Result<(), NodeGridError> {
        self.spatial_index.set_up(&self.nodes)
    }

    /// Builds a fresh, empty spatial index over explicit bounds.
    pub fn set_up_spatial_index_with_bounds(&mut self, bounds: &BoundingBox<D>) -> Result<(), NodeGridError> {
        self.spatial_index.set_up_with_bounds(bounds)
    }

    /// Builds a grid over the live nodes from scratch and refreshes it.
    pub(crate) fn rebuild_spatial_index(&mut self) -> Result<usize, NodeGridError> {
        self.spatial_index.set_up(&self.nodes)?;
        self.spatial_index.update(&self.nodes)
    }

    /// Grows the spatial index one step on each side some node is too close to.
    pub fn enlarge_spatial_index(&mut self) -> Result<(), NodeGridError> {
        let sides = self.spatial_index.violated_sides(&self.nodes)?;
        self.spatial_index.enlarge(&sides)
    }

    pub fn is_a_node_close_to_domain_boundary(&self) -> Result<bool, NodeGridError> {
        self.spatial_index.is_a_node_close_to_domain_boundary(&self.nodes)
    }

    pub fn clear_spatial_index(&mut self) {
        self.spatial_index.clear();
    }

    /// Refreshes the spatial index for the current node locations, growing it as needed.
    ///
    /// Returns the number of growth iterations.
    pub fn update_spatial_index(&mut self) -> Result<usize, NodeGridError> {
        self.spatial_index.update(&self.nodes)
    }

    /// Pairs of live nodes within the interaction distance and the neighbors of every node.
    ///
    /// Requires a spatial index refreshed since the last change to the nodes.
    pub fn calculate_node_pairs(&self) -> Result<NodePairs, NodeGridError> {
        self.spatial_index.calculate_node_pairs(&self.nodes)
    }
}
