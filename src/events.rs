//! Things that happened during a tick or an input, for listeners such as the
//! sound board.  The simulation only emits these; it never acts on them.

use crate::entities::EnemyKind;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ProjectileFired,
    EnemySpawned { kind: EnemyKind },
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    /// An enemy left the bottom of the surface; no score, no penalty.
    EnemyEscaped,
    PlayerDestroyed,
    AchievementUnlocked { id: &'static str, name: &'static str },
    NewBest { score: u64 },
}
