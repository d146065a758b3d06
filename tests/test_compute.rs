use term_blog::compute::*;
use term_blog::config::{GameKind, SimConfig};
use term_blog::entities::*;
use term_blog::events::GameEvent;
use term_blog::geometry::Rect;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A timestamp outside every spawn window (500 % 1000 and 500 % 1500).
const QUIET: u64 = 500;

fn make_state() -> World {
    init_state(SimConfig::shooter(), 0)
}

fn make_racer() -> World {
    init_state(SimConfig::racer(), 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        rect: Rect::new(x, y, 30.0, 30.0),
        kind: EnemyKind::Spacecraft,
        active: true,
    }
}

fn projectile_at(x: f32, y: f32) -> Projectile {
    Projectile { rect: Rect::new(x, y, 4.0, 10.0), active: true }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_centered() {
    let s = make_state();
    assert_eq!(s.player.rect.x, 180.0); // (400 - 40) / 2
    assert_eq!(s.player.rect.y, 360.0);
    assert_eq!(s.player.lane, None);
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.survival_secs, 0);
    assert_eq!(s.enemies_defeated, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.status, GameStatus::Running);
    assert!(s.achievements.iter().all(|a| !a.unlocked));
}

#[test]
fn idle_state_is_parked_at_menu() {
    let mut s = idle_state(SimConfig::shooter());
    assert_eq!(s.status, GameStatus::Menu);
    let events = tick(&mut s, 1_005, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(s.frame, 0);
    assert!(s.enemies.is_empty());
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let mut s = make_state();
    move_player_left(&mut s);
    assert_eq!(s.player.rect.x, 170.0); // step is 10
}

#[test]
fn move_left_clamps_at_boundary() {
    let mut s = make_state();
    s.player.rect.x = 5.0;
    move_player_left(&mut s);
    assert_eq!(s.player.rect.x, 0.0);
    move_player_left(&mut s);
    assert_eq!(s.player.rect.x, 0.0);
}

#[test]
fn move_right_clamps_at_boundary() {
    let mut s = make_state();
    s.player.rect.x = 355.0;
    move_player_right(&mut s);
    assert_eq!(s.player.rect.x, 360.0); // 400 - 40
}

#[test]
fn movement_ignored_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    move_player_right(&mut s);
    assert_eq!(s.player.rect.x, 180.0);
}

#[test]
fn racer_starts_in_first_lane() {
    let s = make_racer();
    let config = SimConfig::racer();
    assert_eq!(s.player.lane, Some(1));
    assert_eq!(s.player.rect.x, config.lane_x(1, 40.0));
}

#[test]
fn racer_lane_changes_clamp() {
    let mut s = make_racer();
    let config = SimConfig::racer();

    move_player_left(&mut s);
    assert_eq!(s.player.lane, Some(1));

    move_player_right(&mut s);
    assert_eq!(s.player.lane, Some(2));
    assert_eq!(s.player.rect.x, config.lane_x(2, 40.0));

    move_player_right(&mut s);
    move_player_right(&mut s);
    assert_eq!(s.player.lane, Some(3));
    assert_eq!(s.player.rect.x, config.lane_x(3, 40.0));
}

#[test]
fn lane_two_is_centered() {
    let config = SimConfig::racer();
    let x = config.lane_x(2, 40.0);
    assert!((x + 20.0 - 200.0).abs() < 1e-3);
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_projectile_above_player_center() {
    let mut s = make_state();
    let event = player_shoot(&mut s);
    assert_eq!(event, Some(GameEvent::ProjectileFired));
    assert_eq!(s.projectiles.len(), 1);
    let p = &s.projectiles[0].rect;
    assert_eq!(p.x, 198.0); // 200 - 4/2
    assert_eq!(p.y, 350.0); // 360 - 10
}

#[test]
fn shooting_is_not_rate_limited() {
    let mut s = make_state();
    for _ in 0..3 {
        apply_action(&mut s, Action::Fire);
    }
    assert_eq!(s.projectiles.len(), 3);
}

#[test]
fn racer_cannot_fire() {
    let mut s = make_racer();
    assert_eq!(player_shoot(&mut s), None);
    assert!(apply_action(&mut s, Action::Fire).is_empty());
    assert!(s.projectiles.is_empty());
}

// ── tick: movement ────────────────────────────────────────────────────────────

#[test]
fn tick_moves_projectiles_up() {
    let mut s = make_state();
    s.projectiles.push(projectile_at(100.0, 200.0));
    tick(&mut s, QUIET, &mut seeded_rng());
    assert_eq!(s.projectiles[0].rect.y, 193.0);
}

#[test]
fn projectile_leaving_top_is_dropped() {
    let mut s = make_state();
    s.projectiles.push(projectile_at(100.0, -5.0));
    tick(&mut s, QUIET, &mut seeded_rng());
    assert!(s.projectiles.is_empty());
}

#[test]
fn tick_moves_enemies_down() {
    let mut s = make_state();
    s.enemies.push(enemy_at(50.0, 100.0));
    tick(&mut s, QUIET, &mut seeded_rng());
    assert_eq!(s.enemies[0].rect.y, 102.0);
}

#[test]
fn enemy_sways_with_time() {
    let mut s = make_state();
    s.enemies.push(enemy_at(50.0, 100.0));
    tick(&mut s, QUIET, &mut seeded_rng());
    let expected = 50.0 + (QUIET as f32 / 500.0).sin() * 2.0;
    assert!((s.enemies[0].rect.x - expected).abs() < 1e-3);
}

#[test]
fn escaped_enemy_is_removed_without_penalty() {
    let mut s = make_state();
    s.score = 300;
    s.enemies.push(enemy_at(0.0, 399.0));
    let events = tick(&mut s, QUIET, &mut seeded_rng());
    assert!(s.enemies.is_empty());
    assert!(events.contains(&GameEvent::EnemyEscaped));
    assert_eq!(s.score, 300);
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn enemy_reaching_bottom_edge_escapes() {
    let mut s = make_racer();
    let config = SimConfig::racer();
    s.enemies.push(Enemy {
        rect: Rect::new(config.lane_x(3, 30.0), 395.0, 30.0, 50.0),
        kind: EnemyKind::Car,
        active: true,
    });
    let events = tick(&mut s, QUIET, &mut seeded_rng());
    assert!(s.enemies.is_empty()); // top landed exactly on y=400
    assert!(events.contains(&GameEvent::EnemyEscaped));
}

#[test]
fn escaped_enemy_frees_spawn_slot() {
    let mut s = make_state();
    for i in 0..4 {
        s.enemies.push(enemy_at(i as f32 * 70.0, 0.0));
    }
    s.enemies.push(enemy_at(300.0, 398.0));
    // 398 + 2 lands on the bottom edge; the slot opens in the same tick
    tick(&mut s, 1_005, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 5);
    assert!(s.enemies.iter().all(|e| e.rect.y < 400.0));
}

// ── tick: collisions ──────────────────────────────────────────────────────────

#[test]
fn player_collision_ends_run() {
    let mut s = make_state();
    s.enemies.push(enemy_at(185.0, 340.0));
    let events = tick(&mut s, QUIET, &mut seeded_rng());
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(events.last(), Some(&GameEvent::PlayerDestroyed));
}

#[test]
fn no_updates_after_game_over() {
    let mut s = make_state();
    s.enemies.push(enemy_at(185.0, 340.0));
    tick(&mut s, QUIET, &mut seeded_rng());

    let frame = s.frame;
    let enemy_y = s.enemies[0].rect.y;
    let events = tick(&mut s, 1_005, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(s.frame, frame);
    assert_eq!(s.enemies[0].rect.y, enemy_y);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn projectile_destroys_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(190.0, 190.0));
    s.projectiles.push(projectile_at(200.0, 200.0));
    let events = tick(&mut s, QUIET, &mut seeded_rng());

    assert_eq!(s.score, 100);
    assert_eq!(s.enemies_defeated, 1);
    assert!(s.enemies.is_empty());
    assert!(s.projectiles.is_empty());
    assert!(events.contains(&GameEvent::EnemyDestroyed {
        kind: EnemyKind::Spacecraft,
        points: 100
    }));
    assert!(events.contains(&GameEvent::AchievementUnlocked {
        id: "first_blood",
        name: "First Blood"
    }));
}

#[test]
fn projectile_destroys_at_most_one_enemy() {
    let mut s = make_state();
    s.enemies.push(enemy_at(190.0, 190.0));
    s.enemies.push(enemy_at(192.0, 192.0));
    s.projectiles.push(projectile_at(200.0, 200.0));
    tick(&mut s, QUIET, &mut seeded_rng());

    assert_eq!(s.enemies_defeated, 1);
    assert_eq!(s.score, 100);
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn enemy_scores_only_once() {
    let mut s = make_state();
    s.enemies.push(enemy_at(190.0, 190.0));
    s.projectiles.push(projectile_at(200.0, 200.0));
    s.projectiles.push(projectile_at(202.0, 204.0));
    tick(&mut s, QUIET, &mut seeded_rng());

    assert_eq!(s.enemies_defeated, 1);
    assert_eq!(s.score, 100);
    // The second shot flies on
    assert_eq!(s.projectiles.len(), 1);
}

#[test]
fn grazing_projectile_misses() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 100.0));
    // After one tick the enemy sits at x≈101.7..131.7; the shot is far left
    s.projectiles.push(projectile_at(90.0, 110.0));
    tick(&mut s, QUIET, &mut seeded_rng());
    assert_eq!(s.enemies_defeated, 0);
}

// ── tick: spawning ────────────────────────────────────────────────────────────

#[test]
fn spawns_inside_window() {
    let mut s = make_state();
    let events = tick(&mut s, 1_005, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    let e = &s.enemies[0];
    assert_eq!(e.rect.y, -30.0);
    assert!(e.rect.x >= 0.0 && e.rect.x <= 370.0);
    assert!(matches!(e.kind, EnemyKind::Spacecraft | EnemyKind::Octopus));
    assert!(events.contains(&GameEvent::EnemySpawned { kind: e.kind }));
}

#[test]
fn no_spawn_outside_window() {
    let mut s = make_state();
    tick(&mut s, QUIET, &mut seeded_rng());
    assert!(s.enemies.is_empty());
}

#[test]
fn spawn_respects_cap() {
    let mut s = make_state();
    for i in 0..5 {
        s.enemies.push(enemy_at(i as f32 * 70.0, 0.0));
    }
    tick(&mut s, 2_010, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 5);
}

#[test]
fn seeded_spawns_are_reproducible() {
    let mut a = make_state();
    let mut b = make_state();
    tick(&mut a, 1_000, &mut seeded_rng());
    tick(&mut b, 1_000, &mut seeded_rng());
    assert_eq!(a.enemies[0].rect, b.enemies[0].rect);
    assert_eq!(a.enemies[0].kind, b.enemies[0].kind);
}

#[test]
fn racer_spawns_cars_in_lanes() {
    let mut s = make_racer();
    let config = SimConfig::racer();
    tick(&mut s, 1_505, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    let car = &s.enemies[0];
    assert_eq!(car.kind, EnemyKind::Car);
    assert!((1..=3).any(|lane| car.rect.x == config.lane_x(lane, 30.0)));
}

// ── tick: survival & achievements ─────────────────────────────────────────────

#[test]
fn survival_time_in_whole_seconds() {
    let mut s = make_state();
    tick(&mut s, 5_999, &mut seeded_rng());
    assert_eq!(s.survival_secs, 5);
}

#[test]
fn survival_measured_from_run_start() {
    let mut s = init_state(SimConfig::shooter(), 10_000);
    tick(&mut s, 15_000, &mut seeded_rng());
    assert_eq!(s.survival_secs, 5);
}

#[test]
fn racer_scores_every_tick() {
    let mut s = make_racer();
    let mut rng = seeded_rng();
    for now in [QUIET, QUIET + 16, QUIET + 32] {
        tick(&mut s, now, &mut rng);
    }
    assert_eq!(s.score, 3);
    assert_eq!(s.frame, 3);
}

#[test]
fn shooter_has_no_survival_points() {
    let mut s = make_state();
    tick(&mut s, QUIET, &mut seeded_rng());
    assert_eq!(s.score, 0);
}

#[test]
fn survivor_unlocks_once() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let first = tick(&mut s, 30_500, &mut rng);
    assert!(first.contains(&GameEvent::AchievementUnlocked { id: "survivor", name: "Survivor" }));

    let second = tick(&mut s, 30_600, &mut rng);
    assert!(!second
        .iter()
        .any(|e| matches!(e, GameEvent::AchievementUnlocked { .. })));
    assert_eq!(s.unlocked_achievements().count(), 1);
}

#[test]
fn config_matches_kind() {
    assert_eq!(GameKind::Shooter.config(), SimConfig::shooter());
    assert_eq!(GameKind::Racer.config().kind, GameKind::Racer);
    assert_eq!("kart".parse::<GameKind>(), Ok(GameKind::Racer));
    assert!("chess".parse::<GameKind>().is_err());
}

#[test]
fn unknown_game_error_message() {
    let err = "pinball".parse::<GameKind>().unwrap_err();
    assert_eq!(err.to_string(), "unknown game 'pinball' (expected shooter or racer)");
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(boxed.source().is_none());
}
