//! Game-logic functions for the arcade engine.
//!
//! Every function takes the `World` it advances by `&mut` and returns the
//! events it produced.  Side effects are limited to the injected RNG, so a
//! seeded RNG and explicit timestamps make every run reproducible.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::achievements::{default_achievements, evaluate, RunStats};
use crate::config::{Movement, SimConfig};
use crate::entities::{EnemyKind, Enemy, GameStatus, Player, Projectile, World};
use crate::events::GameEvent;
use crate::geometry::Rect;

/// Abstract player input, already translated from physical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh running world.  `now_ms` becomes the run's start time.
pub fn init_state(config: SimConfig, now_ms: u64) -> World {
    let player = spawn_player(&config);
    World {
        config,
        player,
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        survival_secs: 0,
        enemies_defeated: 0,
        status: GameStatus::Running,
        run_started_ms: now_ms,
        achievements: default_achievements(),
        frame: 0,
    }
}

/// A world parked at the menu, before any run has started.
pub fn idle_state(config: SimConfig) -> World {
    World {
        status: GameStatus::Menu,
        ..init_state(config, 0)
    }
}

fn spawn_player(config: &SimConfig) -> Player {
    let (x, lane) = match config.movement {
        Movement::Free { .. } => ((config.width - config.player_width) / 2.0, None),
        Movement::Lanes { .. } => (config.lane_x(1, config.player_width), Some(1)),
    };
    Player {
        rect: Rect::new(x, config.player_y, config.player_width, config.player_height),
        lane,
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

pub fn move_player_left(world: &mut World) {
    shift_player(world, -1);
}

pub fn move_player_right(world: &mut World) {
    shift_player(world, 1);
}

fn shift_player(world: &mut World, direction: i8) {
    if !world.is_running() {
        return;
    }
    let config = &world.config;
    match config.movement {
        Movement::Free { step } => {
            let max_x = (config.width - config.player_width).max(0.0);
            let x = world.player.rect.x + step * direction as f32;
            world.player.rect.x = x.clamp(0.0, max_x);
        }
        Movement::Lanes { count } => {
            let current = world.player.lane.unwrap_or(1) as i16;
            let lane = (current + direction as i16).clamp(1, count.max(1) as i16) as u8;
            world.player.lane = Some(lane);
            world.player.rect.x = config.lane_x(lane, config.player_width);
        }
    }
}

/// Fire a projectile from the player's horizontal centre.  Not rate limited:
/// every call while running fires.
pub fn player_shoot(world: &mut World) -> Option<GameEvent> {
    if !world.is_running() {
        return None;
    }
    let shot = world.config.projectile?;
    let rect = Rect::new(
        world.player.rect.center_x() - shot.width / 2.0,
        world.player.rect.y - shot.height,
        shot.width,
        shot.height,
    );
    world.projectiles.push(Projectile { rect, active: true });
    Some(GameEvent::ProjectileFired)
}

pub fn apply_action(world: &mut World, action: Action) -> Vec<GameEvent> {
    match action {
        Action::MoveLeft => move_player_left(world),
        Action::MoveRight => move_player_right(world),
        Action::Fire => return player_shoot(world).into_iter().collect(),
    }
    Vec::new()
}

// ── Per-frame tick (RNG is injected) ────────────────────────────────────────

/// Advance the simulation by one frame observed at wall-clock `now_ms`.
///
/// Does nothing unless the world is running.  A player collision ends the
/// run immediately and skips the rest of the tick.
pub fn tick(world: &mut World, now_ms: u64, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !world.is_running() {
        return events;
    }
    world.frame += 1;

    // ── 1. Move projectiles ─────────────────────────────────────────────────
    if let Some(shot) = world.config.projectile {
        for p in &mut world.projectiles {
            p.rect.y -= shot.speed;
        }
    }
    world.projectiles.retain(|p| p.rect.bottom() >= 0.0);

    // ── 2. Move enemies (time-driven weave) ─────────────────────────────────
    let enemy_cfg = world.config.enemy;
    let sway = if enemy_cfg.sway_amplitude == 0.0 {
        0.0
    } else {
        (now_ms as f32 / enemy_cfg.sway_period_ms).sin() * enemy_cfg.sway_amplitude
    };
    for e in &mut world.enemies {
        e.rect.y += enemy_cfg.speed;
        e.rect.x += sway;
    }
    let height = world.config.height;
    let before = world.enemies.len();
    world.enemies.retain(|e| e.rect.y < height);
    for _ in world.enemies.len()..before {
        events.push(GameEvent::EnemyEscaped);
    }

    // ── 3. Collision: player ↔ enemies ──────────────────────────────────────
    let player = world.player.rect;
    if world.enemies.iter().any(|e| e.active && player.overlaps(&e.rect)) {
        world.status = GameStatus::GameOver;
        log::info!(
            "{} run over: score {} after {}s",
            world.config.kind,
            world.score,
            world.survival_secs
        );
        events.push(GameEvent::PlayerDestroyed);
        return events;
    }

    // ── 4. Collision: projectiles ↔ enemies ─────────────────────────────────
    let reward = world.config.kill_reward;
    for p in world.projectiles.iter_mut().filter(|p| p.active) {
        if let Some(e) = world
            .enemies
            .iter_mut()
            .find(|e| e.active && p.rect.overlaps(&e.rect))
        {
            p.active = false;
            e.active = false;
            world.score += reward;
            world.enemies_defeated += 1;
            events.push(GameEvent::EnemyDestroyed { kind: e.kind, points: reward });
        }
    }

    // ── 5. Spawn ────────────────────────────────────────────────────────────
    let in_window = now_ms % world.config.spawn_interval_ms.max(1) < world.config.spawn_window_ms;
    if in_window && world.active_enemies() < world.config.max_enemies {
        let enemy = spawn_enemy(&world.config, rng);
        log::debug!("spawned {:?} at x={:.1}", enemy.kind, enemy.rect.x);
        events.push(GameEvent::EnemySpawned { kind: enemy.kind });
        world.enemies.push(enemy);
    }

    // ── 6. Survival scoring & time ──────────────────────────────────────────
    world.score += world.config.survival_points_per_tick;
    world.survival_secs = now_ms.saturating_sub(world.run_started_ms) / 1000;

    // ── 7. Achievements ─────────────────────────────────────────────────────
    let stats = RunStats {
        score: world.score,
        enemies_defeated: world.enemies_defeated,
        survival_secs: world.survival_secs,
    };
    let evaluation = evaluate(&world.achievements, &stats);
    world.achievements = evaluation.achievements;
    for a in evaluation.newly_unlocked {
        log::info!("achievement unlocked: {}", a.name);
        events.push(GameEvent::AchievementUnlocked { id: a.id, name: a.name });
    }

    // ── 8. Purge inactive entities ──────────────────────────────────────────
    world.projectiles.retain(|p| p.active);
    world.enemies.retain(|e| e.active);

    events
}

fn spawn_enemy(config: &SimConfig, rng: &mut impl Rng) -> Enemy {
    let size = config.enemy;
    let x = match config.movement {
        Movement::Free { .. } => {
            let max_x = (config.width - size.width).max(0.0);
            rng.gen_range(0.0..=max_x)
        }
        Movement::Lanes { count } => {
            let lane = rng.gen_range(1..=count.max(1));
            config.lane_x(lane, size.width)
        }
    };
    let kind = config
        .variants
        .choose(rng)
        .copied()
        .unwrap_or(EnemyKind::Spacecraft);
    Enemy {
        rect: Rect::new(x, -size.height, size.width, size.height),
        kind,
        active: true,
    }
}
