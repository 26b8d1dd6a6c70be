/// Radius given to every node that enters a collection.
pub const DEFAULT_NODE_RADIUS: f64 = 0.5;

/// A point particle: global id, location, interaction radius and a deletion flag.
///
/// Nodes are owned by their collection. A deleted node keeps its slot until the
/// next remesh compacts the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<const D: usize> {
    index: usize,
    location: [f64; D],
    radius: f64,
    deleted: bool,
}

impl<const D: usize> Node<D> {
    pub fn new(index: usize, location: [f64; D]) -> Self {
        Self {
            index,
            location,
            radius: DEFAULT_NODE_RADIUS,
            deleted: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn location(&self) -> &[f64; D] {
        &self.location
    }

    pub(crate) fn set_location(&mut self, location: [f64; D]) {
        self.location = location;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub(crate) fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub(crate) fn mark_as_deleted(&mut self) {
        self.deleted = true;
    }

    pub(crate) fn restore(index: usize, location: [f64; D], radius: f64, deleted: bool) -> Self {
        Self { index, location, radius, deleted }
    }

    /// Squared Euclidean distance to another location.
    pub fn distance_sq(&self, other: &[f64; D]) -> f64 {
        self.location
            .iter()
            .zip(other.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}
