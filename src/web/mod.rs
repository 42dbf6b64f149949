//! Browser host for the runner: canvas, input listeners, the animation
//! frame loop, localStorage and the cosmetic DOM widgets.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Window, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{GameState, InputEvent, RunState};
use crate::storage::{HighScoreStore, MemoryStore};

pub mod canvas;
pub mod dom;
pub mod storage;
pub mod viewport;

use canvas::{CanvasSurface, SpriteSheet, acquire_canvas};
use dom::DomObserver;
use storage::LocalStorageStore;

const JUMP_KEYS: &[&str] = &[" ", "w", "W", "ArrowUp"];
const PROGRESS_INTERVAL_MS: i32 = 1000;

struct Runtime {
    state: GameState,
    surface: CanvasSurface,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn with_runtime(f: impl FnOnce(&mut Runtime)) {
    RUNTIME.with(|cell| {
        if let Some(rt) = cell.borrow_mut().as_mut() {
            f(rt);
        }
    });
}

fn push_input(event: InputEvent) {
    let at = now_ms();
    with_runtime(|rt| rt.state.input(event, at));
}

fn is_jump_key(key: &str) -> bool {
    JUMP_KEYS.contains(&key)
}

/// Jump keys always count; after a game over any key restarts.
fn key_activates(key: &str, state: RunState) -> bool {
    is_jump_key(key) || state == RunState::GameOver
}

fn open_store(win: &Window, key: &str) -> Box<dyn HighScoreStore> {
    match LocalStorageStore::open(win, key) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("{err}; high score will not persist");
            Box::new(MemoryStore::default())
        }
    }
}

/// Build the game on the configured canvas and start the frame loop.
/// A page hosts one game; later calls return [`GameError::AlreadyStarted`].
pub fn start(config: GameConfig) -> Result<(), GameError> {
    if RUNTIME.with(|cell| cell.borrow().is_some()) {
        return Err(GameError::AlreadyStarted);
    }
    config.validate()?;
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let canvas = acquire_canvas(&doc, &config.canvas_id)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoContext)?
        .dyn_into()
        .map_err(|_| GameError::NoContext)?;

    let mut surface = CanvasSurface::new(canvas, ctx, SpriteSheet::load(&config)?);
    let ratio = viewport::window_ratio(&win, config.game_width, config.game_height, config.fallback_scale_ratio);
    surface.set_ratio(ratio, config.game_width, config.game_height);

    let store = open_store(&win, &config.high_score_key);
    let state = GameState::new(config, StdRng::from_entropy(), store)?
        .with_observer(Box::new(DomObserver::new(doc.clone())));
    info!("runner ready, scale ratio {ratio:.3}");

    RUNTIME.with(|cell| cell.replace(Some(Runtime { state, surface })));

    install_input_listeners(&win)?;
    install_resize_listener(&win)?;
    install_progress_interval(&win)?;
    start_frame_loop();
    Ok(())
}

fn install_input_listeners(win: &Window) -> Result<(), GameError> {
    let keydown = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = evt.key();
        if is_jump_key(&key) {
            // keep space from scrolling the page
            evt.prevent_default();
        }
        if evt.repeat() {
            return;
        }
        let at = now_ms();
        with_runtime(|rt| {
            if key_activates(&key, rt.state.run_state()) {
                rt.state.input(InputEvent::Activate, at);
            }
        });
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();

    let keyup = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        if is_jump_key(&evt.key()) {
            push_input(InputEvent::Release);
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
    keyup.forget();

    let touchstart = Closure::wrap(Box::new(move |_evt: web_sys::TouchEvent| {
        push_input(InputEvent::Activate);
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref())?;
    touchstart.forget();

    let touchend = Closure::wrap(Box::new(move |_evt: web_sys::TouchEvent| {
        push_input(InputEvent::Release);
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref())?;
    touchend.forget();
    Ok(())
}

fn install_resize_listener(win: &Window) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(win) = window() else { return };
        with_runtime(|rt| {
            let cfg = rt.state.config();
            let (w, h, fallback) = (cfg.game_width, cfg.game_height, cfg.fallback_scale_ratio);
            let ratio = viewport::window_ratio(&win, w, h, fallback);
            rt.surface.set_ratio(ratio, w, h);
        });
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    win.add_event_listener_with_callback("orientationchange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn install_progress_interval(win: &Window) -> Result<(), GameError> {
    let closure = Closure::wrap(Box::new(move || {
        let Some(doc) = window().and_then(|w| w.document()) else { return };
        with_runtime(|rt| {
            let percent = rt.state.sample_progress();
            dom::paint_progress(&doc, percent);
        });
    }) as Box<dyn FnMut()>);
    win.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        PROGRESS_INTERVAL_MS,
    )?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_runtime(|rt| rt.state.frame(ts, &mut rt.surface));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
