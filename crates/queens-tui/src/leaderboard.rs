//! Per-size score tables
//!
//! Each board size keeps its own top-10 table, fastest first. Ties rank
//! behind existing entries, so an equal time never displaces an earlier
//! record.

use crate::storage::{StorageResult, Store};
use serde::{Deserialize, Serialize};

/// Entries kept per board size
pub const LEADERBOARD_CAP: usize = 10;

/// One completed game on the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub time_ms: u64,
    pub moves: usize,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl ScoreRecord {
    /// Build a record stamped with the current time
    pub fn now(time_ms: u64, moves: usize) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            time_ms,
            moves,
            timestamp,
        }
    }

    /// Completion time as MM:SS.cc for display
    pub fn time_string(&self) -> String {
        let total = self.time_ms / 1000;
        let centis = (self.time_ms % 1000) / 10;
        format!("{:02}:{:02}.{:02}", total / 60, total % 60, centis)
    }
}

/// Where a submitted score landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePlacement {
    /// 1-based position in the table
    pub rank: usize,
    pub is_new_best: bool,
}

/// Score tables keyed by board size
pub struct Leaderboard {
    store: Store,
}

impl Leaderboard {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn key(board_size: usize) -> String {
        format!("leaderboard:{}", board_size)
    }

    /// The stored table for `board_size`, fastest first
    pub fn top(&self, board_size: usize) -> Vec<ScoreRecord> {
        self.store.get(&Self::key(board_size)).unwrap_or_default()
    }

    /// Fastest recorded time for `board_size`
    pub fn best(&self, board_size: usize) -> Option<ScoreRecord> {
        self.top(board_size).into_iter().next()
    }

    /// Insert a score at its rank, or return Ok(None) when the table is
    /// full and every kept entry is at least as fast.
    pub fn submit(
        &self,
        board_size: usize,
        record: ScoreRecord,
    ) -> StorageResult<Option<ScorePlacement>> {
        let mut entries = self.top(board_size);
        let pos = entries
            .iter()
            .position(|e| e.time_ms > record.time_ms)
            .unwrap_or(entries.len());
        if pos >= LEADERBOARD_CAP {
            return Ok(None);
        }

        entries.insert(pos, record);
        entries.truncate(LEADERBOARD_CAP);
        self.store.set(&Self::key(board_size), &entries)?;

        Ok(Some(ScorePlacement {
            rank: pos + 1,
            is_new_best: pos == 0,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn test_board() -> Leaderboard {
        Leaderboard::new(Store::new(Arc::new(MemoryStorage::new())))
    }

    #[test]
    fn test_time_string_has_centiseconds() {
        assert_eq!(ScoreRecord::now(0, 0).time_string(), "00:00.00");
        assert_eq!(ScoreRecord::now(61_230, 8).time_string(), "01:01.23");
        assert_eq!(ScoreRecord::now(605_999, 9).time_string(), "10:05.99");
    }

    #[test]
    fn test_submit_orders_by_time() {
        let board = test_board();
        board.submit(8, ScoreRecord::now(30_000, 12)).unwrap();
        board.submit(8, ScoreRecord::now(10_000, 8)).unwrap();
        board.submit(8, ScoreRecord::now(20_000, 9)).unwrap();

        let times: Vec<u64> = board.top(8).iter().map(|e| e.time_ms).collect();
        assert_eq!(times, vec![10_000, 20_000, 30_000]);
        assert_eq!(board.best(8).unwrap().time_ms, 10_000);
    }

    #[test]
    fn test_faster_score_is_new_best() {
        let board = test_board();
        board.submit(8, ScoreRecord::now(20_000, 10)).unwrap();

        let placement = board
            .submit(8, ScoreRecord::now(15_000, 9))
            .unwrap()
            .unwrap();
        assert_eq!(placement.rank, 1);
        assert!(placement.is_new_best);
    }

    #[test]
    fn test_tie_ranks_behind_existing() {
        let board = test_board();
        board.submit(8, ScoreRecord::now(20_000, 10)).unwrap();

        let placement = board
            .submit(8, ScoreRecord::now(20_000, 8))
            .unwrap()
            .unwrap();
        assert_eq!(placement.rank, 2);
        assert!(!placement.is_new_best);
    }

    #[test]
    fn test_table_caps_at_ten() {
        let board = test_board();
        for i in 0..12 {
            board.submit(6, ScoreRecord::now(1_000 * (i + 1), 6)).unwrap();
        }
        assert_eq!(board.top(6).len(), LEADERBOARD_CAP);

        // Slower than everything kept: no placement, table unchanged.
        let placement = board.submit(6, ScoreRecord::now(99_000, 6)).unwrap();
        assert!(placement.is_none());
        assert_eq!(board.top(6).last().unwrap().time_ms, 10_000);
    }

    #[test]
    fn test_tables_are_per_size() {
        let board = test_board();
        board.submit(4, ScoreRecord::now(5_000, 4)).unwrap();
        board.submit(5, ScoreRecord::now(7_000, 5)).unwrap();

        assert_eq!(board.top(4).len(), 1);
        assert_eq!(board.top(5).len(), 1);
        assert_eq!(board.top(4)[0].time_ms, 5_000);
        assert!(board.top(6).is_empty());
    }
}
