//! Runner simulation: the per-frame loop over ground, obstacles, player and
//! score, plus the Waiting / Running / GameOver state machine.
//!
//! Nothing in here touches the browser. Input arrives as timestamped
//! [`InputEvent`]s that are queued by the host and consumed at the start of
//! the next frame; drawing goes through the [`Surface`] trait; cosmetic
//! collaborators hear about transitions through [`GameObserver`].

use std::collections::VecDeque;

use log::{debug, info};
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::storage::HighScoreStore;

pub mod geometry;
pub mod ground;
pub mod obstacles;
pub mod player;
pub mod prize;
pub mod progress;
pub mod score;
pub mod surface;

use ground::Ground;
use obstacles::ObstacleController;
use player::Player;
use prize::{PrizeTier, prize_tier};
use progress::ProgressIndicator;
use score::Score;
use surface::{Surface, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Waiting,
    Running,
    GameOver,
}

/// Host input, already stripped of device details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press or touch start: start, jump, or restart depending on state.
    Activate,
    /// Key or touch released: ends a held jump.
    Release,
}

/// Notified after authoritative state transitions.
pub trait GameObserver {
    fn on_run_started(&mut self) {}
    fn on_game_over(&mut self, _final_score: f64, _tier: Option<PrizeTier>) {}
}

pub struct NoopObserver;

impl GameObserver for NoopObserver {}

const GAME_OVER_TEXT: &str = "GAME OVER";
const START_TEXT: &str = "Tap the screen or press Space to start";
const GAME_OVER_STYLE: TextStyle = TextStyle { font_px: 28.0, color: "black" };
const START_STYLE: TextStyle = TextStyle { font_px: 13.0, color: "black" };

pub struct GameState {
    config: GameConfig,
    ground: Ground,
    obstacles: ObstacleController,
    player: Player,
    score: Score,
    progress: ProgressIndicator,
    game_speed: f64,
    run_state: RunState,
    previous_time: Option<f64>,
    game_over_at: Option<f64>,
    pending: VecDeque<(InputEvent, f64)>,
    observer: Box<dyn GameObserver>,
}

impl GameState {
    /// Build a game in the Waiting state. The config is validated first.
    pub fn new(config: GameConfig, rng: StdRng, store: Box<dyn HighScoreStore>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ground: Ground::new(&config),
            obstacles: ObstacleController::new(&config, rng),
            player: Player::new(&config),
            score: Score::new(&config, store),
            progress: ProgressIndicator::default(),
            game_speed: config.game_speed_start,
            run_state: RunState::Waiting,
            previous_time: None,
            game_over_at: None,
            pending: VecDeque::new(),
            observer: Box::new(NoopObserver),
            config,
        })
    }

    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Queue an input for the next frame. `at_ms` is on the same clock as
    /// the frame timestamps.
    pub fn input(&mut self, event: InputEvent, at_ms: f64) {
        self.pending.push_back((event, at_ms));
    }

    /// Advance and draw one animation frame at host time `now_ms`.
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        let Some(previous) = self.previous_time.replace(now_ms) else {
            // calibration frame
            return;
        };
        let delta_ms = (now_ms - previous).max(0.0).min(self.config.max_frame_delta_ms);

        self.process_inputs();
        surface.clear();

        if self.run_state == RunState::Running {
            self.update(delta_ms);
            if self.obstacles.collide_with(&self.player) {
                self.end_run(now_ms);
            }
        }

        self.draw(surface);
    }

    fn process_inputs(&mut self) {
        while let Some((event, at_ms)) = self.pending.pop_front() {
            match (self.run_state, event) {
                (RunState::Waiting, InputEvent::Activate) => self.reset(),
                (RunState::Running, InputEvent::Activate) => {
                    self.player.jump();
                }
                (RunState::GameOver, InputEvent::Activate) => {
                    if self.restart_armed(at_ms) {
                        debug!("restart accepted at {at_ms:.0}ms");
                        self.reset();
                    } else {
                        debug!("restart ignored during lockout at {at_ms:.0}ms");
                    }
                }
                (_, InputEvent::Release) => self.player.release(),
            }
        }
    }

    fn restart_armed(&self, at_ms: f64) -> bool {
        match self.game_over_at {
            Some(ended) => at_ms - ended >= self.config.restart_lockout_ms,
            None => false,
        }
    }

    fn update(&mut self, delta_ms: f64) {
        self.ground.update(self.game_speed, delta_ms);
        self.obstacles.update(self.game_speed, delta_ms);
        self.player.update(self.game_speed, delta_ms);
        self.score.update(delta_ms);
        self.game_speed += delta_ms * self.config.game_speed_increment;
    }

    fn end_run(&mut self, now_ms: f64) {
        self.run_state = RunState::GameOver;
        self.game_over_at = Some(now_ms);
        self.score.set_high_score();
        self.progress.stop();

        let final_score = self.score.score();
        let tier = prize_tier(final_score);
        info!("game over: score {final_score:.0}, best {:.0}, tier {tier:?}", self.score.high_score());
        self.observer.on_game_over(final_score, tier);
    }

    /// Start a fresh run. The best score and the player carry over.
    fn reset(&mut self) {
        self.ground.reset();
        self.obstacles.reset();
        self.score.reset();
        self.game_speed = self.config.game_speed_start;
        self.run_state = RunState::Running;
        self.game_over_at = None;
        self.progress.start();
        info!("run started");
        self.observer.on_run_started();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.ground.draw(surface);
        self.obstacles.draw(surface);
        self.player.draw(surface);
        self.score.draw(surface);

        match self.run_state {
            RunState::GameOver => surface.draw_text(
                GAME_OVER_TEXT,
                self.config.game_width / 4.5,
                self.config.game_height / 2.0,
                &GAME_OVER_STYLE,
            ),
            RunState::Waiting => surface.draw_text(
                START_TEXT,
                self.config.game_width / 14.0,
                self.config.game_height / 2.0,
                &START_STYLE,
            ),
            RunState::Running => {}
        }
    }

    /// Interval-driven progress bar sample; never affects the simulation.
    pub fn sample_progress(&mut self) -> f64 {
        self.progress.sample(self.score.score())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn game_speed(&self) -> f64 {
        self.game_speed
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &ObstacleController {
        &self.obstacles
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn game_over_at(&self) -> Option<f64> {
        self.game_over_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use surface::{DrawOp, Recorder, Sprite};

    fn game(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), StdRng::seed_from_u64(seed), Box::new(MemoryStore::default())).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_before_construction() {
        let config = GameConfig { spawn_interval_min_ms: 900.0, spawn_interval_max_ms: 100.0, ..Default::default() };
        let result = GameState::new(config, StdRng::seed_from_u64(1), Box::new(MemoryStore::default()));
        assert!(matches!(result, Err(ConfigError::SpawnRange { .. })));

        let config = GameConfig { obstacles: Vec::new(), ..Default::default() };
        let result = GameState::new(config, StdRng::seed_from_u64(1), Box::new(MemoryStore::default()));
        assert!(matches!(result, Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn first_frame_only_calibrates() {
        let mut g = game(1);
        let mut surface = Recorder::default();
        g.frame(100.0, &mut surface);
        assert!(surface.ops.is_empty());
        g.frame(116.0, &mut surface);
        assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
    }

    #[test]
    fn waiting_draws_world_and_instructions_without_moving() {
        let mut g = game(1);
        let mut surface = Recorder::default();
        g.frame(0.0, &mut surface);
        for i in 1..50 {
            g.frame(i as f64 * 16.0, &mut surface);
        }
        assert_eq!(g.run_state(), RunState::Waiting);
        assert_eq!(g.game_speed(), g.config().game_speed_start);
        assert_eq!(g.score().score(), 0.0);
        assert!(surface.texts().any(|t| t == START_TEXT));
    }

    #[test]
    fn draw_order_is_background_to_foreground() {
        let mut g = game(1);
        let mut surface = Recorder::default();
        g.frame(0.0, &mut surface);
        g.frame(16.0, &mut surface);
        let kinds: Vec<u8> = surface
            .ops
            .iter()
            .map(|op| match op {
                DrawOp::Clear => 0,
                DrawOp::Sprite(Sprite::Ground, _) => 1,
                DrawOp::Sprite(Sprite::Obstacle(_), _) => 2,
                DrawOp::Sprite(_, _) => 3,
                DrawOp::Text(_) => 4,
            })
            .collect();
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]), "{kinds:?}");
    }

    #[test]
    fn activate_starts_the_run() {
        let mut g = game(1);
        let mut surface = Recorder::default();
        g.frame(0.0, &mut surface);
        g.input(InputEvent::Activate, 5.0);
        g.frame(16.0, &mut surface);
        assert_eq!(g.run_state(), RunState::Running);
        assert!(g.player().is_grounded(), "start input must not also jump");
        assert!(g.score().score() > 0.0);
    }

    #[test]
    fn huge_and_negative_deltas_are_clamped() {
        let mut g = game(1);
        let mut surface = Recorder::default();
        g.frame(0.0, &mut surface);
        g.input(InputEvent::Activate, 0.0);
        g.frame(10_000.0, &mut surface);
        let max = g.config().max_frame_delta_ms * g.config().score_rate;
        assert!((g.score().score() - max).abs() < 1e-9);
        let before = g.score().score();
        g.frame(5_000.0, &mut surface);
        assert_eq!(g.score().score(), before);
    }
}
