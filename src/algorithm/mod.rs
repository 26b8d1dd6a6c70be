use crate::bounds::BoundingBox;
use crate::error::NodeGridError;

pub mod box_grid;

/// Trait defining a spatial acceleration structure for neighbor-pair search.
///
/// The structure stores only non-owning keys (storage slots); the locations
/// themselves stay with the node store and are looked up through a closure.
pub trait SpatialAlgorithm<const D: usize>: Send + Sync {
    /// Build an empty structure with boxes of side `cut_off` covering `bounds`.
    fn build(cut_off: f64, bounds: &BoundingBox<D>) -> Result<Self, NodeGridError>
    where
        Self: Sized;

    /// The region currently covered by the boxes.
    fn domain_bounds(&self) -> &BoundingBox<D>;

    /// The cut-off length, which is also the box side.
    fn cut_off(&self) -> f64;

    fn num_boxes(&self) -> usize;

    /// Index of the box containing `location`.
    fn containing_box(&self, location: &[f64; D]) -> usize;

    /// Register `key` as lying inside box `box_index`.
    fn add_to_box(&mut self, box_index: usize, key: usize);

    /// The keys currently registered in a box.
    fn box_contents(&self, box_index: usize) -> &[usize];

    /// Remove all keys from all boxes, keeping the boxes themselves.
    fn empty_boxes(&mut self);

    /// Visit every unordered pair of registered keys whose locations are within the cut-off.
    ///
    /// # Arguments
    /// * `location_of` - Resolves a key to its current location.
    /// * `visitor` - Called once per pair.
    fn visit_pairs<L, F>(&self, location_of: L, visitor: F)
    where
        L: Fn(usize) -> [f64; D],
        F: FnMut(usize, usize);
}
