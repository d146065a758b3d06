//! Simulation parameters.  The shooter and the racer are two presets of the
//! same engine; everything that differs between them lives in `SimConfig`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::EnemyKind;

/// Logical surface size shared by both presets, in surface units.
pub const SURFACE_SIZE: f32 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Shooter,
    Racer,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Shooter => "shooter",
            GameKind::Racer => "racer",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Shooter => "TTEOKBOKKI SPACE BATTLE",
            GameKind::Racer => "KART RIDER",
        }
    }

    pub fn config(&self) -> SimConfig {
        match self {
            GameKind::Shooter => SimConfig::shooter(),
            GameKind::Racer => SimConfig::racer(),
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown game '{0}' (expected shooter or racer)")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shooter" | "space" => Ok(GameKind::Shooter),
            "racer" | "kart" => Ok(GameKind::Racer),
            other => Err(UnknownGame(other.to_string())),
        }
    }
}

/// How left/right input moves the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    /// Free horizontal movement by `step` units per input.
    Free { step: f32 },
    /// Discrete lanes, numbered from 1.
    Lanes { count: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    /// Units travelled upward per tick.
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    /// Units travelled downward per tick.
    pub speed: f32,
    /// Peak sideways drift per tick; 0 disables weaving.
    pub sway_amplitude: f32,
    pub sway_period_ms: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub kind: GameKind,
    pub width: f32,
    pub height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_y: f32,
    pub movement: Movement,
    /// `None` disables firing.
    pub projectile: Option<ProjectileConfig>,
    pub enemy: EnemyConfig,
    pub spawn_interval_ms: u64,
    pub spawn_window_ms: u64,
    pub max_enemies: usize,
    pub kill_reward: u64,
    pub survival_points_per_tick: u64,
    pub variants: Vec<EnemyKind>,
}

impl SimConfig {
    pub fn shooter() -> Self {
        SimConfig {
            kind: GameKind::Shooter,
            width: SURFACE_SIZE,
            height: SURFACE_SIZE,
            player_width: 40.0,
            player_height: 30.0,
            player_y: 360.0,
            movement: Movement::Free { step: 10.0 },
            projectile: Some(ProjectileConfig { width: 4.0, height: 10.0, speed: 7.0 }),
            enemy: EnemyConfig {
                width: 30.0,
                height: 30.0,
                speed: 2.0,
                sway_amplitude: 2.0,
                sway_period_ms: 500.0,
            },
            spawn_interval_ms: 1_000,
            spawn_window_ms: 20,
            max_enemies: 5,
            kill_reward: 100,
            survival_points_per_tick: 0,
            variants: vec![EnemyKind::Spacecraft, EnemyKind::Octopus],
        }
    }

    pub fn racer() -> Self {
        SimConfig {
            kind: GameKind::Racer,
            width: SURFACE_SIZE,
            height: SURFACE_SIZE,
            player_width: 40.0,
            player_height: 60.0,
            player_y: 300.0,
            movement: Movement::Lanes { count: 3 },
            projectile: None,
            enemy: EnemyConfig {
                width: 30.0,
                height: 50.0,
                speed: 5.0,
                sway_amplitude: 0.0,
                sway_period_ms: 1.0,
            },
            spawn_interval_ms: 1_500,
            spawn_window_ms: 20,
            max_enemies: 3,
            kill_reward: 0,
            survival_points_per_tick: 1,
            variants: vec![EnemyKind::Car],
        }
    }

    /// Left edge that centres an entity of `width` in `lane` (1-based).
    pub fn lane_x(&self, lane: u8, width: f32) -> f32 {
        let count = match self.movement {
            Movement::Lanes { count } => count.max(1),
            Movement::Free { .. } => 1,
        };
        let lane_width = self.width / count as f32;
        lane as f32 * lane_width - lane_width / 2.0 - width / 2.0
    }
}
