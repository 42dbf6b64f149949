//! Dino Runner core crate.
//!
//! A side-scrolling jump game for the browser. The simulation in [`game`] is
//! plain Rust and runs headless under `cargo test`; [`web`] hosts it on a
//! canvas with `requestAnimationFrame`, keyboard/touch input and
//! `localStorage` for the best score.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod storage;
pub mod web;

pub use config::GameConfig;
pub use error::{ConfigError, GameError, StorageError};
pub use game::{GameObserver, GameState, InputEvent, RunState};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())?;
    Ok(())
}

/// Start with a JSON config; fields left out keep their defaults.
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(GameError::from)?;
    web::start(config)?;
    Ok(())
}
