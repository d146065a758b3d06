//! The loop driver: owns one `World`, feeds it frames and input, and handles
//! the end of a run.
//!
//! Frames and input only reach the world while the driver is subscribed.
//! `stop()` drops both subscriptions, after which nothing the presentation
//! layer does can change the world.

use rand::Rng;

use crate::clock::Clock;
use crate::compute::{apply_action, idle_state, init_state, tick, Action};
use crate::config::SimConfig;
use crate::entities::{GameStatus, World};
use crate::events::GameEvent;
use crate::store::{NewScore, Notice, ScoreSink};

pub struct LoopDriver<C: Clock> {
    config: SimConfig,
    clock: C,
    world: World,
    best_score: u64,
    player_name: Option<String>,
    sink: Box<dyn ScoreSink>,
    subscribed: bool,
}

impl<C: Clock> LoopDriver<C> {
    pub fn new(config: SimConfig, clock: C, sink: Box<dyn ScoreSink>) -> Self {
        LoopDriver {
            world: idle_state(config.clone()),
            config,
            clock,
            best_score: 0,
            player_name: None,
            sink,
            subscribed: false,
        }
    }

    /// Seed the session best, e.g. from the leaderboard.
    pub fn with_best_score(mut self, best: u64) -> Self {
        self.best_score = best;
        self
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Begin a fresh run and subscribe to frames and input.
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        self.world = init_state(self.config.clone(), now);
        self.subscribed = true;
        log::info!("{} run started at {}ms", self.config.kind, now);
    }

    /// Unsubscribe from frames and input.  Idempotent.
    pub fn stop(&mut self) {
        if self.subscribed {
            log::debug!("{} driver stopped", self.config.kind);
        }
        self.subscribed = false;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Leave the game-over screen for the menu.
    pub fn return_to_menu(&mut self) {
        if self.world.status == GameStatus::GameOver {
            self.world.status = GameStatus::Menu;
        }
    }

    pub fn status(&self) -> GameStatus {
        self.world.status
    }

    /// Read-only view for rendering.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Run one frame.  `None` once the driver has been stopped.
    pub fn frame(&mut self, rng: &mut impl Rng) -> Option<Vec<GameEvent>> {
        if !self.subscribed {
            return None;
        }
        let was_running = self.world.is_running();
        let mut events = tick(&mut self.world, self.clock.now_ms(), rng);
        if was_running && self.world.status == GameStatus::GameOver {
            events.extend(self.finish_run());
        }
        Some(events)
    }

    /// Apply one input action.  Ignored unless subscribed and running.
    pub fn input(&mut self, action: Action) -> Vec<GameEvent> {
        if !self.subscribed {
            return Vec::new();
        }
        apply_action(&mut self.world, action)
    }

    /// Outcomes of earlier score submissions.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.sink.drain()
    }

    fn finish_run(&mut self) -> Option<GameEvent> {
        let score = self.world.score;
        if score <= self.best_score {
            return None;
        }
        self.best_score = score;
        log::info!("new {} best: {}", self.config.kind, score);
        self.sink.submit(NewScore {
            name: self.player_name.clone(),
            score,
            game: self.config.kind.to_string(),
        });
        Some(GameEvent::NewBest { score })
    }
}
