use log::warn;

use super::surface::{Surface, TextStyle};
use crate::config::GameConfig;
use crate::storage::HighScoreStore;

const SCORE_STYLE: TextStyle = TextStyle { font_px: 20.0, color: "#525250" };

/// Time-driven score plus the persisted best score.
pub struct Score {
    score: f64,
    high_score: f64,
    rate: f64,
    game_width: f64,
    store: Box<dyn HighScoreStore>,
}

impl Score {
    pub fn new(config: &GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = match store.load() {
            Ok(Some(value)) if value.is_finite() && value >= 0.0 => value,
            Ok(_) => 0.0,
            Err(err) => {
                warn!("high score unavailable, starting from 0: {err}");
                0.0
            }
        };
        Self { score: 0.0, high_score, rate: config.score_rate, game_width: config.game_width, store }
    }

    pub fn update(&mut self, delta_ms: f64) {
        self.score += delta_ms * self.rate;
    }

    /// Commit the current score as the best score if it beats it. A failed
    /// write keeps the in-memory value.
    pub fn set_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(err) = self.store.save(self.high_score) {
                warn!("could not persist high score {}: {err}", self.high_score);
            }
        }
    }

    pub fn reset(&mut self) {
        self.score = 0.0;
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn high_score(&self) -> f64 {
        self.high_score
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let y = 20.0;
        let score_x = self.game_width - 75.0;
        let high_x = score_x - 125.0;
        surface.draw_text(&format_score(self.score), score_x, y, &SCORE_STYLE);
        surface.draw_text(&format!("HI {}", format_score(self.high_score)), high_x, y, &SCORE_STYLE);
    }
}

/// Whole points, zero padded to six digits.
pub fn format_score(value: f64) -> String {
    format!("{:06}", value.max(0.0).floor() as u64)
}
