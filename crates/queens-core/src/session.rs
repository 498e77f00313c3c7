use crate::board::{attacked_cells, is_attacked, pairwise_safe, Position};
use crate::history::History;
use crate::solver::Solver;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

/// How long a hint marker stays visible
pub const HINT_TTL: Duration = Duration::from_secs(3);

/// How long a rejected placement stays flagged
pub const INVALID_TTL: Duration = Duration::from_millis(500);

/// Fire-and-forget audio tags surfaced to the sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Place,
    Remove,
    Error,
    Victory,
}

/// Summary of a solved board, emitted once per victory transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryReport {
    pub board_size: usize,
    pub elapsed: Duration,
    pub move_count: usize,
    /// True when auto-solve playback filled the board
    pub solver_assisted: bool,
}

/// Events drained by the front end once per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Sound(SoundEvent),
    Completed(VictoryReport),
}

/// What a `place_or_remove` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Placed,
    Removed,
    /// Attack conflict in strict mode; the invalid marker was set
    Rejected,
    /// Board is frozen (playback running or already won)
    Ignored,
}

/// Wall-clock tracking for one puzzle.
///
/// Armed once, by the first piece placed on the empty board, and frozen on
/// victory. Only a reset arms it again, so un-winning via undo keeps the
/// recorded time.
#[derive(Debug, Clone, Copy)]
struct Clock {
    base: Duration,
    run_since: Option<Instant>,
    stopped: bool,
}

impl Clock {
    fn new() -> Self {
        Self {
            base: Duration::ZERO,
            run_since: None,
            stopped: false,
        }
    }

    fn elapsed(&self) -> Duration {
        self.base + self.run_since.map(|t| t.elapsed()).unwrap_or(Duration::ZERO)
    }

    fn start_once(&mut self) {
        if self.run_since.is_none() && !self.stopped && self.base.is_zero() {
            self.run_since = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(since) = self.run_since.take() {
            self.base += since.elapsed();
        }
        self.stopped = true;
    }

    fn reset(&mut self) {
        *self = Clock::new();
    }

    fn resume(elapsed: Duration) -> Self {
        Self {
            base: elapsed,
            run_since: Some(Instant::now()),
            stopped: false,
        }
    }

    fn frozen(elapsed: Duration) -> Self {
        Self {
            base: elapsed,
            run_since: None,
            stopped: true,
        }
    }
}

/// A board marker that expires on its own
#[derive(Debug, Clone, Copy)]
struct Marker {
    pos: Position,
    set_at: Instant,
}

impl Marker {
    fn new(pos: Position) -> Self {
        Self {
            pos,
            set_at: Instant::now(),
        }
    }

    fn live(&self, ttl: Duration) -> Option<Position> {
        (self.set_at.elapsed() < ttl).then_some(self.pos)
    }
}

/// Serializable snapshot of an in-progress board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub board_size: usize,
    pub placements: Vec<Position>,
    pub elapsed_ms: u64,
    pub permissive: bool,
}

/// Interactive puzzle state for one board size.
///
/// Owns the placement set, move counter, clock, undo/redo history, and the
/// transient hint/invalid markers. Every committed mutation re-derives the
/// victory state from the full placement set, so there is a single source of
/// truth for "won" no matter how the board got there.
#[derive(Debug)]
pub struct Session {
    n: usize,
    placements: Vec<Position>,
    move_count: usize,
    won: bool,
    solving: bool,
    permissive: bool,
    solver_assisted: bool,
    hint: Option<Marker>,
    invalid: Option<Marker>,
    history: History,
    clock: Clock,
    playback: VecDeque<Position>,
    generation: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Fresh empty board.
    ///
    /// # Panics
    /// Panics if `n` is 0.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "board size must be at least 1");
        Self {
            n,
            placements: Vec::new(),
            move_count: 0,
            won: false,
            solving: false,
            permissive: false,
            solver_assisted: false,
            hint: None,
            invalid: None,
            history: History::new(),
            clock: Clock::new(),
            playback: VecDeque::new(),
            generation: 0,
            events: Vec::new(),
        }
    }

    pub fn board_size(&self) -> usize {
        self.n
    }

    /// Queens on the board, in placement order
    pub fn placements(&self) -> &[Position] {
        &self.placements
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_solving(&self) -> bool {
        self.solving
    }

    pub fn is_permissive(&self) -> bool {
        self.permissive
    }

    /// Allow attacked placements, deferring validity to the victory check
    pub fn set_permissive(&mut self, on: bool) {
        self.permissive = on;
    }

    /// Whether the current board was filled by auto-solve playback
    pub fn solver_assisted(&self) -> bool {
        self.solver_assisted
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Elapsed time as MM:SS for display
    pub fn elapsed_string(&self) -> String {
        let total = self.elapsed().as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    pub fn occupied(&self, pos: Position) -> bool {
        self.placements.contains(&pos)
    }

    /// Cells currently under attack, recomputed per call
    pub fn attacked(&self) -> HashSet<Position> {
        attacked_cells(self.n, &self.placements)
    }

    /// Active hint cell, if the marker has not expired
    pub fn hint_marker(&self) -> Option<Position> {
        self.hint.as_ref().and_then(|m| m.live(HINT_TTL))
    }

    /// Last rejected cell, if the marker has not expired
    pub fn invalid_marker(&self) -> Option<Position> {
        self.invalid.as_ref().and_then(|m| m.live(INVALID_TTL))
    }

    pub fn can_undo(&self) -> bool {
        !self.solving && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.solving && self.history.can_redo()
    }

    /// Board generation, bumped by every reset. Playback steps scheduled
    /// under an older generation are refused, so a clear or size change
    /// always wins over in-flight auto-solve.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drain pending sound/completion events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Toggle the cell at `pos`: remove an existing queen, or add one if the
    /// cell is free and, in strict mode, unattacked.
    ///
    /// # Panics
    /// Panics if `pos` is outside the board.
    pub fn place_or_remove(&mut self, pos: Position) -> PlaceOutcome {
        assert!(
            pos.in_bounds(self.n),
            "position {} out of bounds on a {}x{} board",
            pos,
            self.n,
            self.n
        );
        if self.solving || self.won {
            return PlaceOutcome::Ignored;
        }

        if let Some(i) = self.placements.iter().position(|&q| q == pos) {
            self.placements.remove(i);
            self.move_count -= 1;
            self.history.commit(self.placements.clone());
            self.events.push(SessionEvent::Sound(SoundEvent::Remove));
            self.refresh_victory();
            return PlaceOutcome::Removed;
        }

        if !self.permissive && is_attacked(pos, self.placements.iter().copied()) {
            self.invalid = Some(Marker::new(pos));
            self.events.push(SessionEvent::Sound(SoundEvent::Error));
            return PlaceOutcome::Rejected;
        }

        if self.placements.is_empty() {
            self.clock.start_once();
        }
        self.placements.push(pos);
        self.move_count += 1;
        self.hint = None;
        self.history.commit(self.placements.clone());
        self.events.push(SessionEvent::Sound(SoundEvent::Place));
        self.refresh_victory();
        PlaceOutcome::Placed
    }

    /// Step back one board state. No-op during playback or at the stack
    /// boundary.
    pub fn undo(&mut self) -> bool {
        if self.solving {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.placements = snapshot.to_vec();
                self.move_count = self.placements.len();
                self.refresh_victory();
                true
            }
            None => false,
        }
    }

    /// Step forward one board state. No-op during playback or at the stack
    /// boundary.
    pub fn redo(&mut self) -> bool {
        if self.solving {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.placements = snapshot.to_vec();
                self.move_count = self.placements.len();
                self.refresh_victory();
                true
            }
            None => false,
        }
    }

    /// Reset board, history, markers, and clock. Cancels any in-flight
    /// auto-solve playback.
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.playback.clear();
        self.solving = false;
        self.solver_assisted = false;
        self.placements.clear();
        self.move_count = 0;
        self.won = false;
        self.hint = None;
        self.invalid = None;
        self.history.reset_to(Vec::new());
        self.clock.reset();
    }

    /// Clear the board and queue the canonical first solution for stepwise
    /// playback. Returns the generation to drive `auto_solve_step` with, or
    /// None when nothing was queued (already solving, or no solution exists
    /// for this size; the board is left cleared in that case).
    pub fn begin_auto_solve(&mut self) -> Option<u64> {
        if self.solving {
            return None;
        }
        self.clear();
        let solution = Solver::new().first_solution(self.n)?;
        self.playback = solution.positions().collect();
        self.solving = true;
        self.solver_assisted = true;
        Some(self.generation)
    }

    /// Commit the next queued playback placement. Returns the placed
    /// position, or None when playback has finished or `generation` is
    /// stale. Playback placements bypass history and never start the clock.
    pub fn auto_solve_step(&mut self, generation: u64) -> Option<Position> {
        if !self.solving || generation != self.generation {
            return None;
        }
        let pos = self.playback.pop_front()?;
        self.placements.push(pos);
        self.move_count += 1;
        if self.playback.is_empty() {
            self.solving = false;
            self.refresh_victory();
        }
        Some(pos)
    }

    /// Flag the first free, unattacked cell in row-major order. Returns the
    /// flagged cell, or None when the board is frozen or every free cell is
    /// attacked.
    pub fn hint(&mut self) -> Option<Position> {
        if self.solving || self.won {
            return None;
        }
        for row in 0..self.n {
            for col in 0..self.n {
                let pos = Position::new(row, col);
                if !self.occupied(pos) && !is_attacked(pos, self.placements.iter().copied()) {
                    self.hint = Some(Marker::new(pos));
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Snapshot for persistence. History and playback state do not survive
    /// a save.
    pub fn to_saved(&self) -> SavedSession {
        SavedSession {
            board_size: self.n,
            placements: self.placements.clone(),
            elapsed_ms: self.elapsed().as_millis() as u64,
            permissive: self.permissive,
        }
    }

    /// Rebuild a session from a snapshot. Returns None when the snapshot is
    /// inconsistent (zero size, out-of-bounds or duplicate placements).
    ///
    /// A snapshot of an already-solved board restores as won without
    /// re-emitting its completion event.
    pub fn from_saved(saved: &SavedSession) -> Option<Session> {
        let n = saved.board_size;
        if n == 0 {
            return None;
        }
        let mut seen = HashSet::new();
        for &pos in &saved.placements {
            if !pos.in_bounds(n) || !seen.insert(pos) {
                return None;
            }
        }

        let mut session = Session::new(n);
        session.permissive = saved.permissive;
        session.placements = saved.placements.clone();
        session.move_count = session.placements.len();
        session.history.reset_to(session.placements.clone());
        session.won = session.placements.len() == n && pairwise_safe(&session.placements);

        let elapsed = Duration::from_millis(saved.elapsed_ms);
        session.clock = if session.won {
            Clock::frozen(elapsed)
        } else if session.placements.is_empty() && elapsed.is_zero() {
            Clock::new()
        } else {
            Clock::resume(elapsed)
        };
        Some(session)
    }

    /// Victory is re-derived from the full placement set: exactly n queens,
    /// each safe from all the others. Permissive boards can reach size n in
    /// an attacking configuration, so placement-time checks are never
    /// trusted here.
    fn refresh_victory(&mut self) {
        if self.placements.len() == self.n && pairwise_safe(&self.placements) {
            if !self.won {
                self.won = true;
                self.clock.stop();
                self.events.push(SessionEvent::Sound(SoundEvent::Victory));
                self.events.push(SessionEvent::Completed(VictoryReport {
                    board_size: self.n,
                    elapsed: self.clock.elapsed(),
                    move_count: self.move_count,
                    solver_assisted: self.solver_assisted,
                }));
            }
        } else if self.placements.len() != self.n {
            self.won = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_SOLUTION: [Position; 4] = [
        Position { row: 0, col: 1 },
        Position { row: 1, col: 3 },
        Position { row: 2, col: 0 },
        Position { row: 3, col: 2 },
    ];

    fn completions(events: &[SessionEvent]) -> Vec<&VictoryReport> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Completed(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    fn win_four(session: &mut Session) {
        for pos in FOUR_SOLUTION {
            assert_eq!(session.place_or_remove(pos), PlaceOutcome::Placed);
        }
        assert!(session.is_won());
    }

    #[test]
    fn place_then_remove_toggles_the_cell() {
        let mut session = Session::new(4);
        let pos = Position::new(0, 0);

        assert_eq!(session.place_or_remove(pos), PlaceOutcome::Placed);
        assert_eq!(session.placements(), &[pos]);
        assert_eq!(session.move_count(), 1);

        assert_eq!(session.place_or_remove(pos), PlaceOutcome::Removed);
        assert!(session.placements().is_empty());
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn strict_mode_rejects_attacked_cell() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));
        session.take_events();

        let outcome = session.place_or_remove(Position::new(0, 1));
        assert_eq!(outcome, PlaceOutcome::Rejected);
        assert_eq!(session.placements(), &[Position::new(0, 0)]);
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.invalid_marker(), Some(Position::new(0, 1)));
        assert!(!session.can_redo());

        let events = session.take_events();
        assert_eq!(events, vec![SessionEvent::Sound(SoundEvent::Error)]);
    }

    #[test]
    fn rejected_placement_leaves_history_untouched() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));
        session.place_or_remove(Position::new(0, 2));

        assert!(session.can_undo());
        session.undo();
        assert_eq!(session.placements(), &[Position::new(0, 0)]);
        assert!(!session.can_undo());
    }

    #[test]
    fn permissive_mode_allows_attacked_cell() {
        let mut session = Session::new(4);
        session.set_permissive(true);
        session.place_or_remove(Position::new(0, 0));

        assert_eq!(
            session.place_or_remove(Position::new(0, 1)),
            PlaceOutcome::Placed
        );
        assert_eq!(session.move_count(), 2);
        assert!(session.invalid_marker().is_none());
    }

    #[test]
    fn victory_fires_exactly_once() {
        let mut session = Session::new(4);
        win_four(&mut session);

        let events = session.take_events();
        let reports = completions(&events);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].board_size, 4);
        assert_eq!(reports[0].move_count, 4);
        assert!(!reports[0].solver_assisted);
        assert!(events.contains(&SessionEvent::Sound(SoundEvent::Victory)));

        // Frozen board ignores further input and emits nothing new.
        assert_eq!(
            session.place_or_remove(Position::new(0, 0)),
            PlaceOutcome::Ignored
        );
        assert!(session.hint().is_none());
        assert!(completions(&session.take_events()).is_empty());
    }

    #[test]
    fn full_attacking_board_is_not_a_victory() {
        let mut session = Session::new(4);
        session.set_permissive(true);
        for row in 0..4 {
            session.place_or_remove(Position::new(row, 0));
        }
        assert_eq!(session.move_count(), 4);
        assert!(!session.is_won());
        assert!(completions(&session.take_events()).is_empty());
    }

    #[test]
    fn undo_redo_round_trip_restores_the_board() {
        let mut session = Session::new(4);
        let placed = &FOUR_SOLUTION[..3];
        for &pos in placed {
            session.place_or_remove(pos);
        }

        for _ in 0..3 {
            assert!(session.undo());
        }
        assert!(session.placements().is_empty());
        assert_eq!(session.move_count(), 0);
        assert!(!session.undo());

        for _ in 0..3 {
            assert!(session.redo());
        }
        assert_eq!(session.placements(), placed);
        assert_eq!(session.move_count(), 3);
        assert!(!session.redo());
    }

    #[test]
    fn new_commit_after_undo_drops_redo_branch() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));
        session.place_or_remove(Position::new(1, 2));
        session.undo();

        session.place_or_remove(Position::new(2, 1));
        assert!(!session.can_redo());
        assert_eq!(
            session.placements(),
            &[Position::new(0, 0), Position::new(2, 1)]
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));
        session.hint();
        session.clear();
        session.take_events();

        let observe = |s: &Session| {
            (
                s.placements().to_vec(),
                s.move_count(),
                s.is_won(),
                s.is_solving(),
                s.can_undo(),
                s.can_redo(),
                s.hint_marker(),
                s.invalid_marker(),
                s.elapsed(),
            )
        };
        let after_once = observe(&session);
        session.clear();
        assert_eq!(observe(&session), after_once);
        assert!(session.placements().is_empty());
        assert_eq!(session.elapsed(), Duration::ZERO);
    }

    #[test]
    fn hint_on_empty_board_is_origin() {
        let mut session = Session::new(4);
        assert_eq!(session.hint(), Some(Position::new(0, 0)));
        assert_eq!(session.hint_marker(), Some(Position::new(0, 0)));
    }

    #[test]
    fn hint_skips_occupied_and_attacked_cells() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));
        // Row 0, column 0, and the (1,1) diagonal are all covered; the scan
        // lands on the first survivor.
        assert_eq!(session.hint(), Some(Position::new(1, 2)));
    }

    #[test]
    fn successful_placement_clears_the_hint() {
        let mut session = Session::new(4);
        session.hint();
        session.place_or_remove(Position::new(1, 2));
        assert!(session.hint_marker().is_none());
    }

    #[test]
    fn undo_after_victory_unwins_and_redo_rewins() {
        let mut session = Session::new(4);
        win_four(&mut session);
        session.take_events();

        assert!(session.undo());
        assert!(!session.is_won());
        assert_eq!(session.move_count(), 3);

        assert!(session.redo());
        assert!(session.is_won());
        let reports_len = completions(&session.take_events()).len();
        assert_eq!(reports_len, 1);
    }

    #[test]
    fn auto_solve_plays_the_canonical_solution() {
        let mut session = Session::new(4);
        let generation = session.begin_auto_solve().unwrap();
        assert!(session.is_solving());

        let mut played = Vec::new();
        while let Some(pos) = session.auto_solve_step(generation) {
            played.push(pos);
        }

        let expected: Vec<Position> = Solver::new()
            .first_solution(4)
            .unwrap()
            .positions()
            .collect();
        assert_eq!(played, expected);
        assert!(!session.is_solving());
        assert!(session.is_won());
        assert_eq!(session.move_count(), 4);
        // Playback never starts the player's clock.
        assert_eq!(session.elapsed(), Duration::ZERO);

        let events = session.take_events();
        let reports = completions(&events);
        assert_eq!(reports.len(), 1);
        assert!(reports[0].solver_assisted);
    }

    #[test]
    fn board_is_frozen_during_playback() {
        let mut session = Session::new(6);
        let generation = session.begin_auto_solve().unwrap();
        session.auto_solve_step(generation);

        assert_eq!(
            session.place_or_remove(Position::new(5, 5)),
            PlaceOutcome::Ignored
        );
        assert!(!session.undo());
        assert!(session.hint().is_none());
        assert!(session.begin_auto_solve().is_none());
    }

    #[test]
    fn clear_cancels_playback_and_stales_old_steps() {
        let mut session = Session::new(6);
        let generation = session.begin_auto_solve().unwrap();
        session.auto_solve_step(generation);

        session.clear();
        assert!(!session.is_solving());
        assert!(session.auto_solve_step(generation).is_none());
        assert!(session.placements().is_empty());
    }

    #[test]
    fn auto_solve_on_unsolvable_board_degrades_to_no_op() {
        let mut session = Session::new(3);
        assert!(session.begin_auto_solve().is_none());
        assert!(!session.is_solving());
        assert!(session.placements().is_empty());
    }

    #[test]
    fn events_drain_once() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 0));

        let events = session.take_events();
        assert_eq!(events, vec![SessionEvent::Sound(SoundEvent::Place)]);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn saved_session_round_trips_through_json() {
        let mut session = Session::new(5);
        session.set_permissive(true);
        session.place_or_remove(Position::new(0, 2));
        session.place_or_remove(Position::new(3, 1));

        let json = serde_json::to_string(&session.to_saved()).unwrap();
        let saved: SavedSession = serde_json::from_str(&json).unwrap();
        let restored = Session::from_saved(&saved).unwrap();

        assert_eq!(restored.board_size(), 5);
        assert_eq!(restored.placements(), session.placements());
        assert_eq!(restored.move_count(), 2);
        assert!(restored.is_permissive());
        assert!(!restored.is_won());
        assert!(!restored.can_undo());
    }

    #[test]
    fn restoring_a_won_board_stays_silent() {
        let mut session = Session::new(4);
        win_four(&mut session);
        let saved = session.to_saved();

        let mut restored = Session::from_saved(&saved).unwrap();
        assert!(restored.is_won());
        assert!(restored.take_events().is_empty());
        // The frozen clock reports exactly the saved time.
        assert_eq!(restored.elapsed(), Duration::from_millis(saved.elapsed_ms));
    }

    #[test]
    fn corrupt_snapshots_are_refused() {
        let out_of_bounds = SavedSession {
            board_size: 4,
            placements: vec![Position::new(0, 4)],
            elapsed_ms: 0,
            permissive: false,
        };
        assert!(Session::from_saved(&out_of_bounds).is_none());

        let duplicate = SavedSession {
            board_size: 4,
            placements: vec![Position::new(1, 1), Position::new(1, 1)],
            elapsed_ms: 0,
            permissive: false,
        };
        assert!(Session::from_saved(&duplicate).is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_placement_panics() {
        let mut session = Session::new(4);
        session.place_or_remove(Position::new(0, 4));
    }
}
