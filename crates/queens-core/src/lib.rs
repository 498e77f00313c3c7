//! N-Queens puzzle engine.
//!
//! Provides the attack model, a backtracking solver, solution-space
//! analytics, and an interactive [`Session`] with undo/redo history,
//! timing, hints, and stepwise auto-solve playback. Front ends drive a
//! `Session` with cell toggles and drain its event queue for sounds and
//! completion reports.

pub mod analysis;
pub mod board;
pub mod history;
pub mod session;
pub mod solver;

pub use analysis::{analyze, search_space_size, Analysis, DifficultyRating};
pub use board::{
    attacked_cells, is_attacked, pairwise_safe, Position, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
pub use history::History;
pub use session::{
    PlaceOutcome, SavedSession, Session, SessionEvent, SoundEvent, VictoryReport, HINT_TTL,
    INVALID_TTL,
};
pub use solver::{Solution, Solver};
