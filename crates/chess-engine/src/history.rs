//! Stack of prior positions for undo.

use crate::Position;

/// Snapshots of earlier positions, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    positions: Vec<Position>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot.
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Removes and returns the most recent snapshot, or `None` when empty.
    pub fn pop(&mut self) -> Option<Position> {
        self.positions.pop()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// Iterates from the oldest snapshot to the newest.
    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.positions.iter()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
