// Integration tests (native) for the `dino-runner` crate.
// Whole runs are driven headless through `GameState` with a recording surface,
// so they run under `cargo test` on the host.

use std::cell::RefCell;
use std::rc::Rc;

use dino_runner::game::prize::PrizeTier;
use dino_runner::game::surface::Recorder;
use dino_runner::storage::MemoryStore;
use dino_runner::{GameConfig, GameObserver, GameState, InputEvent, RunState};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FRAME_MS: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Started,
    Over(f64, Option<PrizeTier>),
}

#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<Seen>>>);

impl GameObserver for Log {
    fn on_run_started(&mut self) {
        self.0.borrow_mut().push(Seen::Started);
    }

    fn on_game_over(&mut self, final_score: f64, tier: Option<PrizeTier>) {
        self.0.borrow_mut().push(Seen::Over(final_score, tier));
    }
}

struct Harness {
    game: GameState,
    surface: Recorder,
    now: f64,
    log: Log,
}

impl Harness {
    fn new(config: GameConfig, seed: u64, store: MemoryStore) -> Self {
        let log = Log::default();
        let game = GameState::new(config, StdRng::seed_from_u64(seed), Box::new(store))
            .unwrap()
            .with_observer(Box::new(log.clone()));
        let mut h = Self { game, surface: Recorder::default(), now: 0.0, log };
        h.game.frame(h.now, &mut h.surface); // calibration
        h
    }

    fn frame(&mut self) {
        self.now += FRAME_MS;
        self.surface.ops.clear();
        self.game.frame(self.now, &mut self.surface);
    }

    fn press(&mut self) {
        self.game.input(InputEvent::Activate, self.now);
    }

    fn tap(&mut self) {
        self.game.input(InputEvent::Activate, self.now);
        self.game.input(InputEvent::Release, self.now);
    }

    fn start(&mut self) {
        self.press();
        self.frame();
        assert_eq!(self.game.run_state(), RunState::Running);
    }

    /// Run without jumping until an obstacle ends the run.
    fn run_into_obstacle(&mut self) {
        for _ in 0..20_000 {
            self.frame();
            if self.game.run_state() == RunState::GameOver {
                return;
            }
        }
        panic!("run never ended");
    }
}

fn harness(seed: u64) -> Harness {
    Harness::new(GameConfig::default(), seed, MemoryStore::default())
}

#[test]
fn collision_ends_the_run_and_reports_once() {
    let mut h = harness(1);
    h.start();
    h.run_into_obstacle();

    assert!(h.surface.texts().any(|t| t == "GAME OVER"));
    let score = h.game.score().score();
    for _ in 0..30 {
        h.frame();
    }
    // frozen after game over
    assert_eq!(h.game.score().score(), score);

    let seen = h.log.0.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], Seen::Started);
    assert!(matches!(seen[1], Seen::Over(s, None) if s == score));
}

#[test]
fn speed_is_monotonic_and_resets_on_restart() {
    let mut h = harness(2);
    let base = h.game.config().game_speed_start;
    h.start();
    let mut last = h.game.game_speed();
    assert!(last > base);
    while h.game.run_state() == RunState::Running {
        h.frame();
        if h.game.run_state() == RunState::Running {
            assert!(h.game.game_speed() > last);
        }
        last = h.game.game_speed();
    }

    let over_at = h.game.game_over_at().unwrap();
    h.game.input(InputEvent::Activate, over_at + 1000.0);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::Running);
    // one frame of growth from the base speed
    let expected = base + FRAME_MS * h.game.config().game_speed_increment;
    assert!((h.game.game_speed() - expected).abs() < 1e-12);
    assert!(h.game.obstacles().live().len() <= 1);
    assert!((h.game.score().score() - FRAME_MS * h.game.config().score_rate).abs() < 1e-9);
}

#[test]
fn restart_respects_lockout() {
    let mut h = harness(3);
    h.start();
    h.run_into_obstacle();
    let over_at = h.game.game_over_at().unwrap();

    // the press that arrives in the collision frame itself
    h.game.input(InputEvent::Activate, over_at);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::GameOver);

    h.game.input(InputEvent::Activate, over_at + 1.0);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::GameOver);

    h.game.input(InputEvent::Activate, over_at + 999.0);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::GameOver);

    h.game.input(InputEvent::Activate, over_at + 1000.0);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::Running);
    assert_eq!(h.game.game_over_at(), None);
    assert_eq!(*h.log.0.borrow().last().unwrap(), Seen::Started);
}

#[test]
fn configurable_lockout() {
    let config = GameConfig { restart_lockout_ms: 250.0, ..Default::default() };
    let mut h = Harness::new(config, 4, MemoryStore::default());
    h.start();
    h.run_into_obstacle();
    let over_at = h.game.game_over_at().unwrap();
    h.game.input(InputEvent::Activate, over_at + 250.0);
    h.frame();
    assert_eq!(h.game.run_state(), RunState::Running);
}

#[test]
fn high_score_is_max_over_runs() {
    let mut h = Harness::new(GameConfig::default(), 5, MemoryStore::with_value(3.0));
    let mut best = 3.0_f64;
    for _ in 0..5 {
        if h.game.run_state() == RunState::GameOver {
            let over_at = h.game.game_over_at().unwrap();
            h.now = h.now.max(over_at + 1000.0);
            h.press();
            h.frame();
        } else {
            h.start();
        }
        assert_eq!(h.game.score().high_score(), best);
        h.run_into_obstacle();
        let run = h.game.score().score();
        best = best.max(run);
        assert_eq!(h.game.score().high_score(), best);
    }
}

#[test]
fn tap_jump_reaches_min_height_in_game() {
    let config = GameConfig {
        game_height: 400.0,
        min_jump_height: 150.0,
        max_jump_height: 200.0,
        ..Default::default()
    };
    config.validate().unwrap();
    let mut h = Harness::new(config, 6, MemoryStore::default());
    h.start();
    h.tap();
    h.frame();
    assert!(!h.game.player().is_grounded());

    let mut peak: f64 = 0.0;
    while !h.game.player().is_grounded() {
        h.frame();
        assert_eq!(h.game.run_state(), RunState::Running);
        peak = peak.max(h.game.player().lift());
    }
    assert!((peak - 150.0).abs() < 1e-9, "peak {peak}");
    assert_eq!(h.game.player().lift(), 0.0);
}

#[test]
fn held_jump_goes_higher_but_not_past_max() {
    let config = GameConfig {
        game_height: 400.0,
        min_jump_height: 150.0,
        max_jump_height: 200.0,
        ..Default::default()
    };
    let mut h = Harness::new(config, 6, MemoryStore::default());
    h.start();
    h.press();
    let mut peak: f64 = 0.0;
    let mut frames = 0;
    loop {
        h.frame();
        frames += 1;
        if frames == 10 {
            h.game.input(InputEvent::Release, h.now);
        }
        peak = peak.max(h.game.player().lift());
        if h.game.player().is_grounded() {
            break;
        }
    }
    assert!(peak > 150.0 && peak <= 200.0, "peak {peak}");
}

#[test]
fn obstacle_count_stays_bounded_over_long_play() {
    let mut h = harness(7);
    h.start();
    let mut restarts = 0;
    for _ in 0..50_000 {
        // crude autopilot: hop when something is close
        let player_right = h.game.player().rect().right();
        let near = h
            .game
            .obstacles()
            .live()
            .iter()
            .any(|o| o.x > player_right && o.x - player_right < 40.0);
        if near && h.game.player().is_grounded() {
            h.tap();
        }
        h.frame();
        assert!(h.game.obstacles().live().len() < 10);
        if h.game.run_state() == RunState::GameOver {
            h.now += 1000.0;
            h.press();
            h.frame();
            restarts += 1;
        }
    }
    assert!(restarts > 0 || h.game.score().score() > 100.0);
}

#[test]
fn prize_tier_reported_at_game_over() {
    // A fast score rate gets a run past the first threshold before the first hit.
    let config = GameConfig { score_rate: 1.0, ..Default::default() };
    let mut h = Harness::new(config, 8, MemoryStore::default());
    h.start();
    h.run_into_obstacle();
    let score = h.game.score().score();
    let expected = dino_runner::game::prize::prize_tier(score);
    assert!(expected.is_some(), "score {score} too low for a tier");
    assert_eq!(*h.log.0.borrow().last().unwrap(), Seen::Over(score, expected));
}

#[test]
fn progress_bar_follows_the_run() {
    let mut h = harness(9);
    assert_eq!(h.game.sample_progress(), 0.0);
    h.start();
    // well before the first obstacle can arrive
    for _ in 0..100 {
        h.frame();
    }
    assert_eq!(h.game.run_state(), RunState::Running);
    let score = h.game.score().score();
    assert!(score >= 1.0);
    let sampled = h.game.sample_progress();
    assert!((sampled - score / 30.0).abs() < 1e-9);

    h.run_into_obstacle();
    let frozen = h.game.sample_progress();
    for _ in 0..10 {
        h.frame();
    }
    assert_eq!(h.game.sample_progress(), frozen);
}
