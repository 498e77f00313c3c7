use crate::board::{is_attacked, Position};

/// A complete non-attacking placement, one queen per row.
///
/// Stored as the occupied column per row, the canonical form every solution
/// found by row-by-row search takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    cols: Vec<usize>,
}

impl Solution {
    /// Board size this solution belongs to
    pub fn size(&self) -> usize {
        self.cols.len()
    }

    /// Column of the queen in `row`
    pub fn col_in_row(&self, row: usize) -> usize {
        self.cols[row]
    }

    /// Placements in increasing-row order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cols
            .iter()
            .enumerate()
            .map(|(row, &col)| Position::new(row, col))
    }
}

/// Backtracking N-Queens search.
///
/// Rows are filled top to bottom, columns tried left to right, so both the
/// first solution and the enumeration order are deterministic for a given
/// board size.
pub struct Solver;

impl Solver {
    pub fn new() -> Self {
        Solver
    }

    /// The canonical first solution for an n×n board, if one exists.
    ///
    /// Short-circuits out of the recursion as soon as a full placement is
    /// reached; it never pays for exhaustive enumeration.
    pub fn first_solution(&self, n: usize) -> Option<Solution> {
        let mut placed = Vec::with_capacity(n);
        let mut found = Vec::with_capacity(1);
        self.search(n, &mut placed, &mut found, true);
        found.pop()
    }

    /// Every solution for an n×n board, in discovery order.
    ///
    /// Exponential in n; fine up to n = 12, after which callers are on
    /// their own.
    pub fn all_solutions(&self, n: usize) -> Vec<Solution> {
        let mut placed = Vec::with_capacity(n);
        let mut found = Vec::new();
        self.search(n, &mut placed, &mut found, false);
        found
    }

    /// Depth-first placement, one row per level. Returns true once the
    /// caller should stop exploring.
    fn search(
        &self,
        n: usize,
        placed: &mut Vec<Position>,
        found: &mut Vec<Solution>,
        first_only: bool,
    ) -> bool {
        let row = placed.len();
        if row == n {
            found.push(Solution {
                cols: placed.iter().map(|p| p.col).collect(),
            });
            return first_only;
        }

        for col in 0..n {
            let pos = Position::new(row, col);
            if is_attacked(pos, placed.iter().copied()) {
                continue;
            }
            placed.push(pos);
            let stop = self.search(n, placed, found, first_only);
            placed.pop();
            if stop {
                return true;
            }
        }
        false
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::pairwise_safe;

    #[test]
    fn counts_match_known_sequence_small() {
        let solver = Solver::new();
        let expected = [
            (1, 1),
            (2, 0),
            (3, 0),
            (4, 2),
            (5, 10),
            (6, 4),
            (7, 40),
            (8, 92),
            (9, 352),
            (10, 724),
        ];
        for (n, count) in expected {
            assert_eq!(solver.all_solutions(n).len(), count, "n = {}", n);
        }
    }

    #[test]
    fn counts_match_known_sequence_large() {
        let solver = Solver::new();
        assert_eq!(solver.all_solutions(11).len(), 2680);
        assert_eq!(solver.all_solutions(12).len(), 14200);
    }

    #[test]
    fn four_queens_solutions_in_discovery_order() {
        let solutions = Solver::new().all_solutions(4);
        assert_eq!(
            solutions,
            vec![
                Solution { cols: vec![1, 3, 0, 2] },
                Solution { cols: vec![2, 0, 3, 1] },
            ]
        );
    }

    #[test]
    fn first_solution_is_head_of_full_enumeration() {
        let solver = Solver::new();
        for n in 4..=8 {
            let first = solver.first_solution(n);
            let all = solver.all_solutions(n);
            assert_eq!(first.as_ref(), all.first(), "n = {}", n);
        }
    }

    #[test]
    fn tiny_boards_have_no_solution() {
        let solver = Solver::new();
        assert!(solver.first_solution(2).is_none());
        assert!(solver.first_solution(3).is_none());
        assert!(solver.all_solutions(3).is_empty());
    }

    #[test]
    fn every_solution_is_pairwise_safe() {
        let solver = Solver::new();
        for n in 4..=8 {
            for solution in solver.all_solutions(n) {
                let placements: Vec<Position> = solution.positions().collect();
                assert!(pairwise_safe(&placements), "n = {}", n);
            }
        }
    }

    #[test]
    fn positions_iterate_in_row_order() {
        let solution = Solver::new().first_solution(5).unwrap();
        let rows: Vec<usize> = solution.positions().map(|p| p.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4]);
        assert_eq!(solution.size(), 5);
        assert_eq!(solution.col_in_row(0), 0);
    }
}
