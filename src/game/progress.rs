//! Cosmetic progress bar model, sampled on a wall-clock interval by the host.

/// Score at which the bar is full.
pub const PROGRESS_FULL_SCORE: f64 = 3000.0;

pub fn percent(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    (score * 100.0 / PROGRESS_FULL_SCORE).clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressState {
    Idle,
    Active,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct ProgressIndicator {
    state: ProgressState,
    width: f64,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self { state: ProgressState::Idle, width: 0.0 }
    }
}

impl ProgressIndicator {
    pub fn start(&mut self) {
        self.state = ProgressState::Active;
    }

    /// Freeze the bar at its last width.
    pub fn stop(&mut self) {
        self.state = ProgressState::Stopped;
    }

    /// One interval tick. Returns the width (percent) to display.
    pub fn sample(&mut self, score: f64) -> f64 {
        if score < 1.0 {
            self.width = 0.0;
        } else if self.state == ProgressState::Active {
            self.width = percent(score);
        }
        self.width
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }
}
