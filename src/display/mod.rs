//! Rendering layer: all terminal I/O for the arcade lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world.  No game logic is performed; this module only translates state
//! into terminal commands, scaling the logical surface onto whatever size
//! the terminal currently has.

pub mod shell;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::config::{GameKind, Movement};
use crate::entities::{Enemy, EnemyKind, GameStatus, Projectile, World};

// ── Colour palette ────────────────────────────────────────────────────────────

/// The site's phosphor green, rgb(40,254,20).
pub const C_PHOSPHOR: Color = Color::Rgb { r: 40, g: 254, b: 20 };
const C_BORDER: Color = C_PHOSPHOR;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_STATS: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY_SPACECRAFT: Color = Color::Green;
const C_ENEMY_OCTOPUS: Color = Color::Red;
const C_ENEMY_CAR: Color = Color::Red;
const C_PROJECTILE: Color = Color::Cyan;
const C_LANE: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Magenta;

/// Per-frame extras that are not part of the world itself.
#[derive(Debug, Default)]
pub struct Hud<'a> {
    pub best_score: u64,
    /// One-line message (achievement, submission result) shown under the field.
    pub banner: Option<&'a str>,
    pub show_hints: bool,
    pub muted: bool,
}

/// Maps surface units onto terminal cells inside the border.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(world: &World, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Viewport {
            cols,
            rows,
            scale_x: inner_w / world.config.width,
            scale_y: inner_h / world.config.height,
        }
    }

    /// Cell for a surface point, or `None` when it falls outside the field.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = 1.0 + (x * self.scale_x).floor();
        let row = 2.0 + (y * self.scale_y).floor();
        let inside = col >= 1.0
            && col < self.cols.saturating_sub(1) as f32
            && row >= 2.0
            && row < self.rows.saturating_sub(2) as f32;
        inside.then_some((col as u16, row as u16))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, hud: &Hud) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(world, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, world, hud, &view)?;
    if let Movement::Lanes { count } = world.config.movement {
        draw_lanes(out, world, count, &view)?;
    }

    for enemy in &world.enemies {
        draw_enemy(out, enemy, &view)?;
    }
    for projectile in &world.projectiles {
        draw_projectile(out, projectile, &view)?;
    }
    draw_player(out, world, &view)?;
    draw_footer(out, hud, &view)?;

    match world.status {
        GameStatus::GameOver => draw_game_over(out, world, hud, &view)?,
        GameStatus::Menu => draw_menu(out, world.config.kind, hud.best_score, &view)?,
        GameStatus::Running => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE: {:>7}  BEST: {:>7}", world.score, hud.best_score)))?;

    // Title, centre
    let title = world.config.kind.title();
    let tx = (view.cols / 2).saturating_sub(title.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_PHOSPHOR))?;
    out.queue(Print(title))?;

    // Stats, right
    let unlocked = world.unlocked_achievements().count();
    let stats = format!(
        "TIME: {:>3}s  KILLS: {:>3}  ★ {}/{}",
        world.survival_secs,
        world.enemies_defeated,
        unlocked,
        world.achievements.len()
    );
    let sx = view.cols.saturating_sub(stats.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_STATS))?;
    out.queue(Print(&stats))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_lanes<W: Write>(out: &mut W, world: &World, count: u8, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_LANE))?;
    let lane_width = world.config.width / count.max(1) as f32;
    for i in 1..count {
        let x = lane_width * i as f32;
        for row in (2..view.rows.saturating_sub(2)).step_by(2) {
            if let Some((col, _)) = view.cell(x, 0.0) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("¦"))?;
            }
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let p = &world.player.rect;
    let Some((col, row)) = view.cell(p.center_x(), p.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    match world.config.kind {
        GameKind::Shooter => {
            // Sprite (2 rows, 3 cols):
            //   ▲       ← row y      (tip)
            //  /|\      ← row y+1    (wings + fuselage)
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("▲"))?;
            if row + 1 < view.rows.saturating_sub(2) {
                out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
                out.queue(Print("/|\\"))?;
            }
        }
        GameKind::Racer => {
            //  o█o
            //  o█o
            for dy in 0..2 {
                if row + dy < view.rows.saturating_sub(2) {
                    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + dy))?;
                    out.queue(Print("o█o"))?;
                }
            }
        }
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(enemy.rect.center_x(), enemy.rect.y) else {
        return Ok(());
    };
    let (color, top, bottom) = match enemy.kind {
        EnemyKind::Spacecraft => (C_ENEMY_SPACECRAFT, "<▼>", "[_]"),
        EnemyKind::Octopus => (C_ENEMY_OCTOPUS, "(◉)", "\\-/"),
        EnemyKind::Car => (C_ENEMY_CAR, "[▓]", "[▓]"),
    };
    let lx = col.saturating_sub(1).max(1);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(top))?;
    if row + 1 < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print(bottom))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, projectile: &Projectile, view: &Viewport) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(projectile.rect.center_x(), projectile.rect.y) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print("║"))?;
    }
    Ok(())
}

// ── Footer (last row): banner or controls hint ───────────────────────────────

fn draw_footer<W: Write>(out: &mut W, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    if let Some(banner) = hud.banner {
        out.queue(style::SetForegroundColor(C_BANNER))?;
        out.queue(Print(banner))?;
    } else if hud.show_hints {
        out.queue(style::SetForegroundColor(C_HINT))?;
        let mute = if hud.muted { "unmute" } else { "mute" };
        out.queue(Print(format!(
            "← → / A D : Move   SPACE : Fire   M : {}   Q : Quit",
            mute
        )))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(out: &mut W, lines: &[(&str, Color)], view: &Viewport) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, world: &World, hud: &Hud, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", world.score);
    let best_line = format!("Best: {}", hud.best_score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║  MISSION FAILED  ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), Color::Yellow),
        ("R - Play Again  Q - Back to terminal", Color::White),
    ];
    draw_centered(out, lines, view)
}

fn draw_menu<W: Write>(out: &mut W, kind: GameKind, best: u64, view: &Viewport) -> std::io::Result<()> {
    let best_line = format!("HIGH SCORE: {}", best);
    let goal = match kind {
        GameKind::Shooter => "Each enemy vessel destroyed: +100 points",
        GameKind::Racer => "Dodge the traffic; every frame survived scores",
    };
    let lines: &[(&str, Color)] = &[
        (kind.title(), C_PHOSPHOR),
        (best_line.as_str(), Color::Yellow),
        ("", Color::White),
        (goal, Color::DarkGrey),
        ("ENTER - Launch mission   Q - Abort mission", Color::White),
    ];
    draw_centered(out, lines, view)
}
