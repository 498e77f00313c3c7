use crate::solver::Solver;

/// Aggregate statistics over the full solution set for one board size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// grid[row][col] = number of solutions with a queen on that cell
    pub grid: Vec<Vec<usize>>,
    pub total_solutions: usize,
    /// Largest single-cell count in the grid, for heatmap scaling
    pub max_cell_count: usize,
}

/// Enumerate every solution for `n` and fold them into per-cell placement
/// frequencies.
///
/// Pure function of `n`; callers that need it repeatedly can cache the
/// result per size.
pub fn analyze(n: usize) -> Analysis {
    let solutions = Solver::new().all_solutions(n);

    let mut grid = vec![vec![0usize; n]; n];
    for solution in &solutions {
        for pos in solution.positions() {
            grid[pos.row][pos.col] += 1;
        }
    }
    let max_cell_count = grid.iter().flatten().copied().max().unwrap_or(0);

    Analysis {
        grid,
        total_solutions: solutions.len(),
        max_cell_count,
    }
}

/// Size of the naive placement space, n^n (one queen anywhere in each row).
///
/// Reported for display only; the search never walks it.
pub fn search_space_size(n: usize) -> f64 {
    (n as f64).powi(n as i32)
}

/// Qualitative rating for a board size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyRating {
    Tutorial,
    Novice,
    Easy,
    Medium,
    HardClassic,
    Expert,
    Master,
    Grandmaster,
    Supercomputer,
    Unknown,
}

impl DifficultyRating {
    /// Rating for an n×n board
    pub fn for_size(n: usize) -> Self {
        match n {
            4 => DifficultyRating::Tutorial,
            5 => DifficultyRating::Novice,
            6 => DifficultyRating::Easy,
            7 => DifficultyRating::Medium,
            8 => DifficultyRating::HardClassic,
            9 => DifficultyRating::Expert,
            10 => DifficultyRating::Master,
            11 => DifficultyRating::Grandmaster,
            12 => DifficultyRating::Supercomputer,
            _ => DifficultyRating::Unknown,
        }
    }
}

impl std::fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyRating::Tutorial => write!(f, "Tutorial"),
            DifficultyRating::Novice => write!(f, "Novice"),
            DifficultyRating::Easy => write!(f, "Easy"),
            DifficultyRating::Medium => write!(f, "Medium"),
            DifficultyRating::HardClassic => write!(f, "Hard (Classic)"),
            DifficultyRating::Expert => write!(f, "Expert"),
            DifficultyRating::Master => write!(f, "Master"),
            DifficultyRating::Grandmaster => write!(f, "Grandmaster"),
            DifficultyRating::Supercomputer => write!(f, "Supercomputer"),
            DifficultyRating::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_queens_heatmap_is_symmetric_pair() {
        let analysis = analyze(4);
        assert_eq!(analysis.total_solutions, 2);
        assert_eq!(analysis.max_cell_count, 1);
        // The two solutions put their row-0 queens on columns 1 and 2.
        assert_eq!(analysis.grid[0], vec![0, 1, 1, 0]);
    }

    #[test]
    fn grid_total_is_n_queens_per_solution() {
        for n in 4..=8 {
            let analysis = analyze(n);
            let sum: usize = analysis.grid.iter().flatten().sum();
            assert_eq!(sum, n * analysis.total_solutions, "n = {}", n);
        }
    }

    #[test]
    fn unsolvable_size_yields_empty_analysis() {
        let analysis = analyze(3);
        assert_eq!(analysis.total_solutions, 0);
        assert_eq!(analysis.max_cell_count, 0);
        assert!(analysis.grid.iter().flatten().all(|&c| c == 0));
    }

    #[test]
    fn ratings_cover_supported_sizes() {
        assert_eq!(DifficultyRating::for_size(4), DifficultyRating::Tutorial);
        assert_eq!(DifficultyRating::for_size(8), DifficultyRating::HardClassic);
        assert_eq!(DifficultyRating::for_size(12), DifficultyRating::Supercomputer);
        assert_eq!(DifficultyRating::for_size(3), DifficultyRating::Unknown);
        assert_eq!(DifficultyRating::for_size(13), DifficultyRating::Unknown);
        assert_eq!(DifficultyRating::for_size(8).to_string(), "Hard (Classic)");
    }

    #[test]
    fn search_space_is_n_to_the_n() {
        assert_eq!(search_space_size(4), 256.0);
        assert_eq!(search_space_size(12), 8_916_100_448_256.0);
    }
}
