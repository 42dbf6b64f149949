//! Error types shared by the simulation core and the browser adapter.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("obstacle catalog is empty")]
    EmptyCatalog,
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("min jump height {min} exceeds max jump height {max}")]
    JumpBounds { min: f64, max: f64 },
    #[error("max jump height {max} leaves the {available} units above the player")]
    JumpTooHigh { max: f64, available: f64 },
    #[error("spawn interval range {min}..{max} is inverted")]
    SpawnRange { min: f64, max: f64 },
    #[error("player needs at least one run frame")]
    NoRunFrames,
    #[error("malformed config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the persisted high-score slot. Never fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    Write(String),
    #[error("stored value is unreadable: {0}")]
    Corrupt(String),
}

/// Browser setup failures surfaced to JS.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("2d context unavailable")]
    NoContext,
    #[error("game already started on this page")]
    AlreadyStarted,
    #[error("js exception: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
