use web_sys::{Storage, Window};

use crate::error::StorageError;
use crate::storage::{HighScoreStore, decode_high_score, encode_high_score};

/// High score kept in `window.localStorage` under a fixed key.
pub struct LocalStorageStore {
    storage: Storage,
    key: String,
}

impl LocalStorageStore {
    pub fn open(win: &Window, key: &str) -> Result<Self, StorageError> {
        // Throws in some privacy modes, returns None in others.
        let storage = win
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage, key: key.to_string() })
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<f64>, StorageError> {
        let raw = self.storage.get_item(&self.key).map_err(|_| StorageError::Unavailable)?;
        raw.map(|raw| decode_high_score(&raw)).transpose()
    }

    fn save(&mut self, value: f64) -> Result<(), StorageError> {
        let encoded = encode_high_score(value)?;
        self.storage
            .set_item(&self.key, &encoded)
            .map_err(|e| StorageError::Write(e.as_string().unwrap_or_else(|| "quota exceeded".into())))
    }
}
