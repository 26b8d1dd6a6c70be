use std::collections::BTreeMap;

/// Fate of one pre-remesh node id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTranslation {
    Deleted,
    NewIndex(usize),
}

/// Translation record produced by a remesh.
///
/// Maps every node id that existed before the remesh either to its new id or to
/// [`NodeTranslation::Deleted`]. Ids not present in the record were not owned by
/// the collection when it was remeshed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMap {
    entries: BTreeMap<usize, NodeTranslation>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_deleted(&mut self, old_index: usize) {
        self.entries.insert(old_index, NodeTranslation::Deleted);
    }

    pub fn set_new_index(&mut self, old_index: usize, new_index: usize) {
        self.entries.insert(old_index, NodeTranslation::NewIndex(new_index));
    }

    pub fn get(&self, old_index: usize) -> Option<NodeTranslation> {
        self.entries.get(&old_index).copied()
    }

    /// New id of a surviving node, `None` if it was deleted or never recorded.
    pub fn new_index(&self, old_index: usize) -> Option<usize> {
        match self.entries.get(&old_index) {
            Some(NodeTranslation::NewIndex(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn is_deleted(&self, old_index: usize) -> bool {
        matches!(self.entries.get(&old_index), Some(NodeTranslation::Deleted))
    }

    /// Old ids of the nodes removed by the remesh, ascending.
    pub fn deleted_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|(_, t)| **t == NodeTranslation::Deleted)
            .map(|(&old, _)| old)
            .collect()
    }

    /// True when nothing was deleted and every id kept its value.
    pub fn is_identity(&self) -> bool {
        self.entries
            .iter()
            .all(|(&old, t)| *t == NodeTranslation::NewIndex(old))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeTranslation)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut map = NodeMap::new();
        map.set_new_index(0, 0);
        map.set_deleted(1);
        map.set_new_index(2, 1);

        assert_eq!(map.len(), 3);
        assert!(map.is_deleted(1));
        assert_eq!(map.new_index(2), Some(1));
        assert_eq!(map.new_index(1), None);
        assert_eq!(map.get(9), None);
        assert_eq!(map.deleted_indices(), vec![1]);
        assert!(!map.is_identity());
    }

    #[test]
    fn test_identity() {
        let mut map = NodeMap::new();
        assert!(map.is_identity());
        map.set_new_index(0, 0);
        map.set_new_index(1, 1);
        assert!(map.is_identity());
        map.set_new_index(5, 2);
        assert!(!map.is_identity());
    }
}
