use crate::board::Position;

/// Linear undo/redo history of board snapshots.
///
/// A fresh history holds one empty snapshot and the cursor always points at
/// the snapshot matching the live board. Committing after an undo discards
/// the redo tail, as a linear history must.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Vec<Position>>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            cursor: 0,
        }
    }

    /// Start over with `initial` as the only snapshot.
    pub fn reset_to(&mut self, initial: Vec<Position>) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Record a new board state, dropping any redo entries.
    ///
    /// Snapshots are owned copies; later board mutations never reach back
    /// into the history.
    pub fn commit(&mut self, snapshot: Vec<Position>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back one snapshot, returning the new current one.
    pub fn undo(&mut self) -> Option<&[Position]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot, returning the new current one.
    pub fn redo(&mut self) -> Option<&[Position]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Snapshot the cursor points at
    pub fn current(&self) -> &[Position] {
        &self.snapshots[self.cursor]
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
