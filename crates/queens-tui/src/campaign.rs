//! Campaign levels and player progression
//!
//! Free play unlocks board sizes one at a time; the campaign is a fixed
//! ladder of twelve levels that layer rule variants on top of the base
//! game. Both cursors persist through the storage layer.

use crate::storage::{StorageResult, Store};
use queens_core::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

const UNLOCKED_KEY: &str = "unlocked_max";
const CAMPAIGN_KEY: &str = "campaign_level";

/// Rule variant applied to a campaign level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruleset {
    /// Safe squares highlighted, hints available
    Relaxed,
    /// Classic rules, hints available
    Standard,
    /// No hints
    Challenger,
    /// Queens disappear after placement
    Blindfold,
}

impl Ruleset {
    pub fn name(&self) -> &'static str {
        match self {
            Ruleset::Relaxed => "Relaxed",
            Ruleset::Standard => "Standard",
            Ruleset::Challenger => "Challenger",
            Ruleset::Blindfold => "Blindfold",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Ruleset::Relaxed => "Safe squares highlighted. Hints available.",
            Ruleset::Standard => "Classic rules. Hints available.",
            Ruleset::Challenger => "No hints. Prove your skill.",
            Ruleset::Blindfold => "Queens disappear after placement. Memory test!",
        }
    }

    pub fn hints_allowed(&self) -> bool {
        !matches!(self, Ruleset::Challenger)
    }

    pub fn queens_hidden(&self) -> bool {
        matches!(self, Ruleset::Blindfold)
    }

    pub fn safe_cells_highlighted(&self) -> bool {
        matches!(self, Ruleset::Relaxed)
    }
}

impl std::fmt::Display for Ruleset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One rung of the campaign ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignLevel {
    pub id: u32,
    pub board_size: usize,
    pub ruleset: Ruleset,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CAMPAIGN_LEVELS: [CampaignLevel; 12] = [
    CampaignLevel {
        id: 1,
        board_size: 4,
        ruleset: Ruleset::Relaxed,
        title: "The Beginning",
        description: "Learn the basics on a small board.",
    },
    CampaignLevel {
        id: 2,
        board_size: 5,
        ruleset: Ruleset::Relaxed,
        title: "Space to Breathe",
        description: "A slightly larger kingdom.",
    },
    CampaignLevel {
        id: 3,
        board_size: 5,
        ruleset: Ruleset::Standard,
        title: "Training Wheels Off",
        description: "Standard rules apply.",
    },
    CampaignLevel {
        id: 4,
        board_size: 6,
        ruleset: Ruleset::Standard,
        title: "Sixfold Path",
        description: "Things are getting interesting.",
    },
    CampaignLevel {
        id: 5,
        board_size: 7,
        ruleset: Ruleset::Standard,
        title: "Lucky Seven",
        description: "Find your rhythm.",
    },
    CampaignLevel {
        id: 6,
        board_size: 8,
        ruleset: Ruleset::Standard,
        title: "Classic Challenge",
        description: "The original puzzle.",
    },
    CampaignLevel {
        id: 7,
        board_size: 8,
        ruleset: Ruleset::Challenger,
        title: "The Gauntlet",
        description: "No hints allowed. Prove your skill.",
    },
    CampaignLevel {
        id: 8,
        board_size: 9,
        ruleset: Ruleset::Challenger,
        title: "Crowded House",
        description: "Tougher board, tougher rules.",
    },
    CampaignLevel {
        id: 9,
        board_size: 10,
        ruleset: Ruleset::Challenger,
        title: "Decagon",
        description: "A massive challenge.",
    },
    CampaignLevel {
        id: 10,
        board_size: 8,
        ruleset: Ruleset::Blindfold,
        title: "Blind Justice",
        description: "Invisible queens on a classic board.",
    },
    CampaignLevel {
        id: 11,
        board_size: 10,
        ruleset: Ruleset::Blindfold,
        title: "Memory Master",
        description: "Can you remember where they are?",
    },
    CampaignLevel {
        id: 12,
        board_size: 12,
        ruleset: Ruleset::Blindfold,
        title: "The Grandmaster",
        description: "The ultimate test of mind and memory.",
    },
];

/// Look up a campaign level by id
pub fn campaign_level(id: u32) -> Option<&'static CampaignLevel> {
    CAMPAIGN_LEVELS.iter().find(|level| level.id == id)
}

/// Persisted unlock state for free play and the campaign
pub struct Progression {
    store: Store,
}

impl Progression {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Largest board size available in free play
    pub fn unlocked_max(&self) -> usize {
        self.store
            .get::<usize>(UNLOCKED_KEY)
            .unwrap_or(MIN_BOARD_SIZE)
            .clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE)
    }

    pub fn is_unlocked(&self, board_size: usize) -> bool {
        board_size <= self.unlocked_max()
    }

    pub fn is_completed(&self, board_size: usize) -> bool {
        board_size < self.unlocked_max()
    }

    /// Register a free-play win. Returns true when it unlocked the next
    /// size: only beating the current frontier advances it.
    pub fn record_free_play_win(&self, board_size: usize) -> StorageResult<bool> {
        let unlocked = self.unlocked_max();
        if board_size == unlocked && unlocked < MAX_BOARD_SIZE {
            self.store.set(UNLOCKED_KEY, &(unlocked + 1))?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Current campaign level id, 1-based
    pub fn campaign_current(&self) -> u32 {
        self.store
            .get::<u32>(CAMPAIGN_KEY)
            .unwrap_or(1)
            .clamp(1, CAMPAIGN_LEVELS.len() as u32)
    }

    /// Register a campaign win. Returns true when it advanced the ladder:
    /// replays of earlier levels leave the cursor alone, and finishing the
    /// last level keeps it there.
    pub fn record_campaign_win(&self, level_id: u32) -> StorageResult<bool> {
        let current = self.campaign_current();
        if level_id == current && (level_id as usize) < CAMPAIGN_LEVELS.len() {
            self.store.set(CAMPAIGN_KEY, &(level_id + 1))?;
            return Ok(true);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn test_progression() -> Progression {
        Progression::new(Store::new(Arc::new(MemoryStorage::new())))
    }

    #[test]
    fn test_fresh_defaults() {
        let progress = test_progression();
        assert_eq!(progress.unlocked_max(), 4);
        assert_eq!(progress.campaign_current(), 1);
        assert!(progress.is_unlocked(4));
        assert!(!progress.is_unlocked(5));
        assert!(!progress.is_completed(4));
    }

    #[test]
    fn test_only_the_frontier_unlocks() {
        let progress = test_progression();

        assert!(progress.record_free_play_win(4).unwrap());
        assert_eq!(progress.unlocked_max(), 5);
        assert!(progress.is_completed(4));

        // Replaying a completed size changes nothing.
        assert!(!progress.record_free_play_win(4).unwrap());
        assert_eq!(progress.unlocked_max(), 5);
    }

    #[test]
    fn test_unlock_stops_at_the_largest_board() {
        let progress = test_progression();
        for size in 4..12 {
            assert!(progress.record_free_play_win(size).unwrap());
        }
        assert_eq!(progress.unlocked_max(), 12);
        assert!(!progress.record_free_play_win(12).unwrap());
        assert_eq!(progress.unlocked_max(), 12);
    }

    #[test]
    fn test_campaign_advances_in_order() {
        let progress = test_progression();

        assert!(progress.record_campaign_win(1).unwrap());
        assert_eq!(progress.campaign_current(), 2);

        // Replays and skipped-ahead wins do not move the cursor.
        assert!(!progress.record_campaign_win(1).unwrap());
        assert!(!progress.record_campaign_win(4).unwrap());
        assert_eq!(progress.campaign_current(), 2);
    }

    #[test]
    fn test_campaign_final_level_is_replayable() {
        let progress = test_progression();
        for id in 1..12 {
            assert!(progress.record_campaign_win(id).unwrap());
        }
        assert_eq!(progress.campaign_current(), 12);
        assert!(!progress.record_campaign_win(12).unwrap());
        assert_eq!(progress.campaign_current(), 12);
    }

    #[test]
    fn test_level_table_shape() {
        assert_eq!(CAMPAIGN_LEVELS.len(), 12);
        for (i, level) in CAMPAIGN_LEVELS.iter().enumerate() {
            assert_eq!(level.id, i as u32 + 1);
            assert!((4..=12).contains(&level.board_size));
        }
        assert_eq!(campaign_level(7).unwrap().ruleset, Ruleset::Challenger);
        assert_eq!(campaign_level(10).unwrap().ruleset, Ruleset::Blindfold);
        assert!(campaign_level(13).is_none());
    }

    #[test]
    fn test_ruleset_flags() {
        assert!(Ruleset::Relaxed.safe_cells_highlighted());
        assert!(Ruleset::Relaxed.hints_allowed());
        assert!(!Ruleset::Standard.safe_cells_highlighted());
        assert!(!Ruleset::Challenger.hints_allowed());
        assert!(Ruleset::Blindfold.queens_hidden());
        assert!(Ruleset::Blindfold.hints_allowed());
    }
}
