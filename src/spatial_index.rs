//! Lifecycle of the grid that backs neighbor-pair queries.
//!
//! The grid is set up once over the bounding box of the nodes and afterwards
//! only grows. Each refresh empties the boxes, pushes the domain outwards one
//! cut-off length at a time on every side that some node has come too close to,
//! and then re-inserts the live nodes. Growth is bounded: a node that moved a
//! distance `s` past the safe margin costs `ceil(s / cut_off)` iterations, and
//! the loop gives up with an error after a configurable number of iterations.

use crate::algorithm::SpatialAlgorithm;
use crate::algorithm::box_grid::BoxGrid;
use crate::bounds::{BoundingBox, Sides};
use crate::error::NodeGridError;
use crate::node::Node;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

/// Default cap on the number of growth iterations in one refresh.
pub const DEFAULT_MAX_GROWTH_ITERATIONS: usize = 10_000;

/// Result of a neighbor query, expressed in global node ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePairs {
    /// Unordered pairs within the interaction distance, stored as `(smaller, larger)`.
    pub pairs: BTreeSet<(usize, usize)>,
    /// Neighbors of every live node; nodes without neighbors map to an empty set.
    pub neighbours: BTreeMap<usize, BTreeSet<usize>>,
}

impl NodePairs {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&(a.min(b), a.max(b)))
    }
}

/// Owns the spatial grid of a node collection and keeps it valid for the nodes.
pub struct SpatialIndex<const D: usize, A: SpatialAlgorithm<D> = BoxGrid<D>> {
    cut_off: f64,
    boundary_separation: f64,
    max_growth_iterations: usize,
    grid: Option<A>,
    current: bool,
}

impl<const D: usize, A: SpatialAlgorithm<D>> SpatialIndex<D, A> {
    pub fn new(cut_off: f64, boundary_separation: f64, max_growth_iterations: usize) -> Self {
        Self {
            cut_off,
            boundary_separation,
            max_growth_iterations,
            grid: None,
            current: false,
        }
    }

    pub fn cut_off(&self) -> f64 {
        self.cut_off
    }

    pub fn boundary_separation(&self) -> f64 {
        self.boundary_separation
    }

    pub(crate) fn set_boundary_separation(&mut self, separation: f64) {
        self.boundary_separation = separation;
        self.current = false;
    }

    pub fn max_growth_iterations(&self) -> usize {
        self.max_growth_iterations
    }

    pub fn grid(&self) -> Option<&A> {
        self.grid.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.grid.is_some()
    }

    /// True when the boxes reflect the nodes as of the last refresh.
    pub fn is_current(&self) -> bool {
        self.grid.is_some() && self.current
    }

    pub(crate) fn mark_stale(&mut self) {
        self.current = false;
    }

    pub fn domain_bounds(&self) -> Option<BoundingBox<D>> {
        self.grid.as_ref().map(|g| *g.domain_bounds())
    }

    pub fn clear(&mut self) {
        self.grid = None;
        self.current = false;
    }

    /// Builds an empty grid over the bounding box of the live nodes.
    pub fn set_up(&mut self, nodes: &[Node<D>]) -> Result<(), NodeGridError> {
        let bounds = BoundingBox::from_points(nodes.iter().filter(|n| !n.is_deleted()).map(|n| n.location()));
        self.set_up_with_bounds(&bounds)
    }

    /// Builds an empty grid over explicit bounds.
    ///
    /// On error the previous grid is kept but marked stale.
    pub fn set_up_with_bounds(&mut self, bounds: &BoundingBox<D>) -> Result<(), NodeGridError> {
        self.current = false;
        let grid = A::build(self.cut_off, bounds)?;
        self.grid = Some(grid);
        Ok(())
    }

    fn grid_or_missing(&self) -> Result<&A, NodeGridError> {
        self.grid.as_ref().ok_or(NodeGridError::SpatialIndexMissing)
    }

    /// Sides of the domain that some live node is closer to than the boundary separation.
    pub fn violated_sides(&self, nodes: &[Node<D>]) -> Result<Sides<D>, NodeGridError> {
        let bounds = *self.grid_or_missing()?.domain_bounds();
        let sep = self.boundary_separation;
        let mut sides = Sides::none();
        for node in nodes.iter().filter(|n| !n.is_deleted()) {
            let loc = node.location();
            for d in 0..D {
                if loc[d] < bounds.min[d] + sep { sides.lower[d] = true; }
                if loc[d] > bounds.max[d] - sep { sides.upper[d] = true; }
            }
        }
        Ok(sides)
    }

    pub fn is_a_node_close_to_domain_boundary(&self, nodes: &[Node<D>]) -> Result<bool, NodeGridError> {
        let bounds = self.grid_or_missing()?.domain_bounds();
        let sep = self.boundary_separation;
        Ok(nodes
            .iter()
            .filter(|n| !n.is_deleted())
            .any(|n| !bounds.contains_with_margin(n.location(), sep)))
    }

    /// Grows the domain by one cut-off length on each of `sides` and rebuilds the boxes.
    pub fn enlarge(&mut self, sides: &Sides<D>) -> Result<(), NodeGridError> {
        let grown = sides.grow(self.grid_or_missing()?.domain_bounds(), self.cut_off);
        trace!(min = ?grown.min, max = ?grown.max, "enlarging spatial index");
        self.set_up_with_bounds(&grown)
    }

    pub fn add_nodes_to_boxes(&mut self, nodes: &[Node<D>]) -> Result<(), NodeGridError> {
        let grid = self.grid.as_mut().ok_or(NodeGridError::SpatialIndexMissing)?;
        for (slot, node) in nodes.iter().enumerate().filter(|(_, n)| !n.is_deleted()) {
            let b = grid.containing_box(node.location());
            grid.add_to_box(b, slot);
        }
        Ok(())
    }

    /// Refreshes the grid for the current node locations.
    ///
    /// Returns the number of growth iterations that were needed.
    pub fn update(&mut self, nodes: &[Node<D>]) -> Result<usize, NodeGridError> {
        self.current = false;
        if self.grid.is_none() {
            self.set_up(nodes)?;
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.empty_boxes();
        }

        let mut iterations = 0;
        loop {
            let sides = self.violated_sides(nodes)?;
            if !sides.any() {
                break;
            }
            if iterations >= self.max_growth_iterations {
                warn!(iterations, "spatial index growth did not converge");
                return Err(NodeGridError::DomainGrowthExceeded {
                    iterations,
                    limit: self.max_growth_iterations,
                });
            }
            self.enlarge(&sides)?;
            iterations += 1;
        }

        self.add_nodes_to_boxes(nodes)?;
        self.current = true;
        debug!(
            iterations,
            boxes = self.grid.as_ref().map_or(0, |g| g.num_boxes()),
            "spatial index updated"
        );
        Ok(iterations)
    }

    /// Pairs of live nodes within the cut-off, keyed by global id.
    pub fn calculate_node_pairs(&self, nodes: &[Node<D>]) -> Result<NodePairs, NodeGridError> {
        let grid = self.grid_or_missing()?;
        if !self.current {
            return Err(NodeGridError::SpatialIndexStale);
        }

        let mut result = NodePairs::default();
        for node in nodes.iter().filter(|n| !n.is_deleted()) {
            result.neighbours.insert(node.index(), BTreeSet::new());
        }

        grid.visit_pairs(
            |slot| *nodes[slot].location(),
            |a, b| {
                let (ia, ib) = (nodes[a].index(), nodes[b].index());
                result.pairs.insert((ia.min(ib), ia.max(ib)));
                result.neighbours.entry(ia).or_default().insert(ib);
                result.neighbours.entry(ib).or_default().insert(ia);
            },
        );
        Ok(result)
    }
}
