//! Bounded undo history of full-grid snapshots

use std::collections::VecDeque;

use crate::{Cell, LayerKind};

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A deep copy of both layers at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    ground: Vec<Option<Cell>>,
    decoration: Vec<Option<Cell>>,
}

impl Snapshot {
    pub(crate) fn new(ground: Vec<Option<Cell>>, decoration: Vec<Option<Cell>>) -> Self {
        Self { ground, decoration }
    }

    /// Row-major cells of one layer as captured
    pub fn layer(&self, kind: LayerKind) -> &[Option<Cell>] {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Decoration => &self.decoration,
        }
    }
}

/// Snapshot stack, most recent last. Pushing past capacity drops the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    /// Create a history holding at most `capacity` snapshots (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Append a snapshot, evicting the oldest one if over capacity
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
    }

    /// Remove and return the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
