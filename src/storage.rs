//! Persisted best-score slot.

use crate::error::StorageError;

pub trait HighScoreStore {
    fn load(&self) -> Result<Option<f64>, StorageError>;
    fn save(&mut self, value: f64) -> Result<(), StorageError>;
}

/// In-process store; also the fallback when the browser refuses storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<f64>,
}

impl MemoryStore {
    pub fn with_value(value: f64) -> Self {
        Self { value: Some(value) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<f64>, StorageError> {
        Ok(self.value)
    }

    fn save(&mut self, value: f64) -> Result<(), StorageError> {
        self.value = Some(value);
        Ok(())
    }
}

/// Decode a stored high score. Anything but a finite, non-negative number
/// counts as corrupt.
pub fn decode_high_score(raw: &str) -> Result<f64, StorageError> {
    let value: f64 = serde_json::from_str(raw.trim()).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StorageError::Corrupt(raw.to_string()))
    }
}

pub fn encode_high_score(value: f64) -> Result<String, StorageError> {
    serde_json::to_string(&value).map_err(|e| StorageError::Write(e.to_string()))
}
