//! Sound board: turns simulation events into sound cues.
//!
//! The simulation never calls this.  The front end owns a `SoundBoard` and
//! feeds it the events each frame returns.  A terminal has one instrument,
//! the bell, so only the loud cues are audible.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};

use crate::events::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Shoot,
    Explosion,
    Crash,
    Chime,
    Fanfare,
}

impl Sound {
    /// Whether the cue rings the terminal bell.
    pub fn audible(&self) -> bool {
        matches!(self, Sound::Explosion | Sound::Crash | Sound::Fanfare)
    }
}

#[derive(Debug, Default)]
pub struct SoundBoard {
    muted: bool,
}

impl SoundBoard {
    pub fn new(muted: bool) -> Self {
        SoundBoard { muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip mute and return the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// The sound an event should make, ignoring mute.
    pub fn cue(&self, event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::ProjectileFired => Some(Sound::Shoot),
            GameEvent::EnemyDestroyed { .. } => Some(Sound::Explosion),
            GameEvent::PlayerDestroyed => Some(Sound::Crash),
            GameEvent::AchievementUnlocked { .. } => Some(Sound::Chime),
            GameEvent::NewBest { .. } => Some(Sound::Fanfare),
            GameEvent::EnemySpawned { .. } | GameEvent::EnemyEscaped => None,
        }
    }

    /// Queue a bell for every audible cue in `events`, at most one per frame.
    pub fn play<W: Write>(&self, out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
        if self.muted {
            return Ok(());
        }
        if events.iter().filter_map(|e| self.cue(e)).any(|s| s.audible()) {
            out.queue(Print('\u{7}'))?;
        }
        Ok(())
    }
}
