use std::collections::{BTreeMap, HashMap};

use shared::domain::ArtworkId;

/// Session-wide set of selected artwork ids.
///
/// Membership is independent of whichever page is loaded. Iteration follows
/// insertion order; an id removed and selected again moves to the end.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    positions: HashMap<ArtworkId, u64>,
    order: BTreeMap<u64, ArtworkId>,
    next_seq: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id was already selected.
    pub fn insert(&mut self, id: ArtworkId) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.positions.insert(id, seq);
        self.order.insert(seq, id);
        true
    }

    /// Returns `false` when the id was not selected.
    pub fn remove(&mut self, id: ArtworkId) -> bool {
        match self.positions.remove(&id) {
            Some(seq) => {
                self.order.remove(&seq);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.order.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.order.values().copied()
    }

    pub fn to_vec(&self) -> Vec<ArtworkId> {
        self.iter().collect()
    }
}

impl Extend<ArtworkId> for SelectionSet {
    fn extend<T: IntoIterator<Item = ArtworkId>>(&mut self, iter: T) {
        for id in iter {
            self.insert(id);
        }
    }
}

impl FromIterator<ArtworkId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = ArtworkId>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
