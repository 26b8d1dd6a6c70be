use crate::error::NodeGridError;
use crate::node::Node;
use rustc_hash::{FxHashMap, FxHashSet};

/// Map from global node id to local storage slot.
///
/// Holds exactly the ids of the non-deleted nodes owned by this process.
#[derive(Clone, Debug, Default)]
pub struct NodeIndexMap {
    slots: FxHashMap<usize, usize>,
}

impl NodeIndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a global id to its slot, failing if this process does not own it.
    pub fn solve(&self, index: usize, rank: usize) -> Result<usize, NodeGridError> {
        self.slots
            .get(&index)
            .copied()
            .ok_or(NodeGridError::NotOwned { index, rank })
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.slots.get(&index).copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    pub fn insert(&mut self, index: usize, slot: usize) {
        self.slots.insert(index, slot);
    }

    pub fn remove(&mut self, index: usize) -> Option<usize> {
        self.slots.remove(&index)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checks the map against the node store: every live node appears once with
    /// its own slot, no deleted node appears, and no two ids share a slot.
    pub fn is_consistent_with<const D: usize>(&self, nodes: &[Node<D>]) -> bool {
        let live = nodes.iter().filter(|n| !n.is_deleted()).count();
        if live != self.slots.len() {
            return false;
        }
        let mut seen = FxHashSet::default();
        for (&index, &slot) in &self.slots {
            match nodes.get(slot) {
                Some(node) if node.index() == index && !node.is_deleted() => {}
                _ => return false,
            }
            if !seen.insert(slot) {
                return false;
            }
        }
        true
    }
}
