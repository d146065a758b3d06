//! All game entity types. Pure data, no logic.

use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::config::SimConfig;
use crate::geometry::Rect;

/// Cosmetic enemy variant. Collision treats every kind the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Spacecraft,
    Octopus,
    Car,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Running,
    GameOver,
}

// ── Player & projectiles ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    /// Current lane (1-based) when the world uses lane movement.
    pub lane: Option<u8>,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    pub active: bool,
}

// ── Enemies / obstacles ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub active: bool,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// The full mutable snapshot of one game attempt.  Owned by a single driver
/// and updated in place by `compute::tick` and the input functions.
#[derive(Clone, Debug)]
pub struct World {
    pub config: SimConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Oldest first.
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    pub survival_secs: u64,
    pub enemies_defeated: u32,
    pub status: GameStatus,
    pub run_started_ms: u64,
    pub achievements: Vec<Achievement>,
    /// Ticks processed this run.
    pub frame: u64,
}

impl World {
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }

    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.unlocked)
    }
}
