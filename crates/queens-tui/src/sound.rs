//! Terminal sound cues
//!
//! The terminal offers a single channel, the BEL byte, so only the
//! salient session events ring: rejected placements and victories. The
//! mute switch persists across runs.

use crate::storage::{StorageResult, Store};
use queens_core::SoundEvent;

const MUTED_KEY: &str = "muted";

pub struct SoundPlayer {
    store: Store,
    muted: bool,
    pending_bell: bool,
}

impl SoundPlayer {
    pub fn new(store: Store) -> Self {
        let muted = store.get::<bool>(MUTED_KEY).unwrap_or(false);
        Self {
            store,
            muted,
            pending_bell: false,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute switch and persist it. Returns the new state.
    pub fn toggle_muted(&mut self) -> StorageResult<bool> {
        self.muted = !self.muted;
        self.store.set(MUTED_KEY, &self.muted)?;
        Ok(self.muted)
    }

    /// Queue the cue for a session event, if it has one
    pub fn play(&mut self, event: SoundEvent) {
        if self.muted {
            return;
        }
        match event {
            SoundEvent::Error | SoundEvent::Victory => self.pending_bell = true,
            SoundEvent::Place | SoundEvent::Remove => {}
        }
    }

    /// Drain the pending bell; the render loop writes the BEL byte
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn test_store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_salient_events_ring() {
        let mut player = SoundPlayer::new(test_store());

        player.play(SoundEvent::Place);
        player.play(SoundEvent::Remove);
        assert!(!player.take_bell());

        player.play(SoundEvent::Error);
        assert!(player.take_bell());
        assert!(!player.take_bell());

        player.play(SoundEvent::Victory);
        assert!(player.take_bell());
    }

    #[test]
    fn test_mute_suppresses_cues() {
        let mut player = SoundPlayer::new(test_store());
        player.toggle_muted().unwrap();

        player.play(SoundEvent::Error);
        assert!(!player.take_bell());
    }

    #[test]
    fn test_mute_persists() {
        let store = test_store();
        SoundPlayer::new(store.clone()).toggle_muted().unwrap();

        let player = SoundPlayer::new(store);
        assert!(player.is_muted());
    }
}
