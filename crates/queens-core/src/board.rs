use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Smallest board size the application offers
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest board size the application offers
pub const MAX_BOARD_SIZE: usize = 12;

/// A cell on the board, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on an n×n board
    pub fn in_bounds(&self, n: usize) -> bool {
        self.row < n && self.col < n
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Whether `pos` shares a row, column, or diagonal with any placement.
///
/// A queen attacks its own cell too (same row), so callers interested in
/// *other* pieces must exclude the occupied cell themselves.
pub fn is_attacked<I>(pos: Position, placements: I) -> bool
where
    I: IntoIterator<Item = Position>,
{
    placements.into_iter().any(|q| {
        q.row == pos.row || q.col == pos.col || q.row.abs_diff(pos.row) == q.col.abs_diff(pos.col)
    })
}

/// Every cell of an n×n board attacked by at least one placement.
///
/// Recomputed from scratch on each call; at n ≤ 12 that is cheaper than
/// keeping an incremental cache correct across undo/redo.
pub fn attacked_cells(n: usize, placements: &[Position]) -> HashSet<Position> {
    let mut cells = HashSet::new();
    for row in 0..n {
        for col in 0..n {
            let pos = Position::new(row, col);
            if is_attacked(pos, placements.iter().copied()) {
                cells.insert(pos);
            }
        }
    }
    cells
}

/// Whether no placement attacks any of the others.
///
/// Each piece is checked against the set with itself removed, the same test
/// a victory check runs on a full board.
pub fn pairwise_safe(placements: &[Position]) -> bool {
    placements.iter().enumerate().all(|(i, &p)| {
        let others = placements
            .iter()
            .enumerate()
            .filter(move |&(j, _)| j != i)
            .map(|(_, &q)| q);
        !is_attacked(p, others)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_row_column_and_diagonal_attacks() {
        let queens = [Position::new(3, 3)];
        assert!(is_attacked(Position::new(3, 0), queens.iter().copied()));
        assert!(is_attacked(Position::new(0, 3), queens.iter().copied()));
        assert!(is_attacked(Position::new(5, 5), queens.iter().copied()));
        assert!(is_attacked(Position::new(1, 5), queens.iter().copied()));
        assert!(!is_attacked(Position::new(1, 4), queens.iter().copied()));
    }

    #[test]
    fn empty_board_attacks_nothing() {
        assert!(!is_attacked(Position::new(0, 0), std::iter::empty()));
        assert!(attacked_cells(4, &[]).is_empty());
    }

    #[test]
    fn corner_queen_covers_row_column_and_diagonal() {
        let cells = attacked_cells(4, &[Position::new(0, 0)]);
        // Row 0 and column 0 (4 each, sharing the corner) plus the main
        // diagonal below it.
        assert_eq!(cells.len(), 10);
        assert!(cells.contains(&Position::new(0, 0)));
        assert!(cells.contains(&Position::new(3, 3)));
        assert!(!cells.contains(&Position::new(1, 2)));
    }

    #[test]
    fn pairwise_safe_accepts_known_solution() {
        let solution = [
            Position::new(0, 1),
            Position::new(1, 3),
            Position::new(2, 0),
            Position::new(3, 2),
        ];
        assert!(pairwise_safe(&solution));
    }

    #[test]
    fn pairwise_safe_rejects_conflicts() {
        assert!(!pairwise_safe(&[Position::new(0, 0), Position::new(0, 3)]));
        assert!(!pairwise_safe(&[Position::new(0, 0), Position::new(2, 2)]));
        assert!(pairwise_safe(&[]));
        assert!(pairwise_safe(&[Position::new(2, 2)]));
    }
}
