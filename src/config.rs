//! Tunable game constants. Everything is expressed in logical units of the
//! 800x200 game area; the canvas surface applies the viewport scale ratio.

use serde::Deserialize;

use crate::error::ConfigError;

/// One entry of the obstacle catalog.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObstacleDesc {
    pub width: f64,
    pub height: f64,
    pub image: String,
}

impl ObstacleDesc {
    fn new(width: f64, height: f64, image: &str) -> Self {
        Self { width, height, image: image.to_string() }
    }
}

/// Player sprite paths: one standing frame plus the looping run frames.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSprites {
    pub standing: String,
    pub run: Vec<String>,
}

impl Default for PlayerSprites {
    fn default() -> Self {
        Self {
            standing: "assets/standing_still.png".into(),
            run: vec!["assets/dino_run1.png".into(), "assets/dino_run2.png".into()],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Game area
    pub game_width: f64,
    pub game_height: f64,
    pub canvas_id: String,
    /// Used whenever the viewport yields a degenerate ratio.
    pub fallback_scale_ratio: f64,

    // Player
    pub player_x: f64,
    pub player_width: f64,
    pub player_height: f64,
    /// Gap between the bottom of the player sprite and the game area bottom.
    pub player_ground_gap: f64,
    pub min_jump_height: f64,
    pub max_jump_height: f64,
    /// Downward acceleration, logical units per ms².
    pub gravity: f64,
    /// How long a held input keeps raising the apex toward `max_jump_height`.
    pub jump_hold_cap_ms: f64,
    pub run_frame_ms: f64,
    pub player_sprites: PlayerSprites,

    // Ground
    pub ground_width: f64,
    pub ground_height: f64,
    pub ground_image: String,
    /// Shared scroll factor of ground and obstacles relative to game speed.
    pub scroll_factor: f64,

    // Speed
    pub game_speed_start: f64,
    pub game_speed_increment: f64,

    // Obstacles
    pub obstacles: Vec<ObstacleDesc>,
    pub spawn_interval_min_ms: f64,
    pub spawn_interval_max_ms: f64,
    pub spawn_x: f64,
    pub hitbox_inset: f64,

    // Score / flow
    pub score_rate: f64,
    pub high_score_key: String,
    pub restart_lockout_ms: f64,
    pub max_frame_delta_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let game_width = 800.0;
        let game_height = 200.0;
        let player_height = 94.0 / 1.5;
        let player_ground_gap = 1.5;
        // Classic tuning measured the jump by the sprite's top edge (150 up to
        // the full area height); converted here to lift above the standing line.
        let standing_y = game_height - player_height - player_ground_gap;
        Self {
            game_width,
            game_height,
            canvas_id: "game".into(),
            fallback_scale_ratio: 1.0,

            player_x: 10.0,
            player_width: 88.0 / 1.5,
            player_height,
            player_ground_gap,
            min_jump_height: standing_y - (game_height - 150.0),
            max_jump_height: standing_y,
            gravity: 0.004,
            jump_hold_cap_ms: 300.0,
            run_frame_ms: 200.0,
            player_sprites: PlayerSprites::default(),

            ground_width: 2400.0,
            ground_height: 24.0,
            ground_image: "assets/ground.png".into(),
            scroll_factor: 0.5,

            game_speed_start: 0.5,
            game_speed_increment: 0.00003,

            obstacles: vec![
                ObstacleDesc::new(68.0 / 1.5, 70.0 / 1.5, "assets/obs2.png"),
                ObstacleDesc::new(98.0 / 1.5, 100.0 / 1.5, "assets/obs2.png"),
                ObstacleDesc::new(68.0 / 1.5, 70.0 / 1.5, "assets/obs1.png"),
            ],
            spawn_interval_min_ms: 500.0,
            spawn_interval_max_ms: 2000.0,
            spawn_x: game_width * 1.5,
            hitbox_inset: 6.0,

            score_rate: 0.01,
            high_score_key: "highScore".into(),
            restart_lockout_ms: 1000.0,
            max_frame_delta_ms: 100.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("fallback_scale_ratio", self.fallback_scale_ratio),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("min_jump_height", self.min_jump_height),
            ("gravity", self.gravity),
            ("run_frame_ms", self.run_frame_ms),
            ("ground_width", self.ground_width),
            ("ground_height", self.ground_height),
            ("scroll_factor", self.scroll_factor),
            ("game_speed_start", self.game_speed_start),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
            ("score_rate", self.score_rate),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
        ];
        for (field, value) in positive {
            // written so NaN fails too
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("player_x", self.player_x),
            ("player_ground_gap", self.player_ground_gap),
            ("jump_hold_cap_ms", self.jump_hold_cap_ms),
            ("game_speed_increment", self.game_speed_increment),
            ("hitbox_inset", self.hitbox_inset),
            ("restart_lockout_ms", self.restart_lockout_ms),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.min_jump_height > self.max_jump_height {
            return Err(ConfigError::JumpBounds {
                min: self.min_jump_height,
                max: self.max_jump_height,
            });
        }
        let available = self.player_standing_y();
        if self.max_jump_height > available {
            return Err(ConfigError::JumpTooHigh { max: self.max_jump_height, available });
        }
        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            return Err(ConfigError::SpawnRange {
                min: self.spawn_interval_min_ms,
                max: self.spawn_interval_max_ms,
            });
        }
        if self.obstacles.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for obstacle in &self.obstacles {
            if !(obstacle.width > 0.0) {
                return Err(ConfigError::NotPositive { field: "obstacle.width", value: obstacle.width });
            }
            if !(obstacle.height > 0.0) {
                return Err(ConfigError::NotPositive { field: "obstacle.height", value: obstacle.height });
            }
        }
        if self.player_sprites.run.is_empty() {
            return Err(ConfigError::NoRunFrames);
        }
        Ok(())
    }

    /// Screen y of the player sprite's top edge while grounded.
    pub fn player_standing_y(&self) -> f64 {
        self.game_height - self.player_height - self.player_ground_gap
    }
}
