use super::geometry::Rect;
use super::surface::{Sprite, Surface};
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    Rising,
    Falling,
}

/// The runner sprite. Vertical state is kept as `lift`, the height of the
/// sprite above its standing line, always within `[0, max_jump_height]`.
pub struct Player {
    x: f64,
    standing_y: f64,
    width: f64,
    height: f64,

    min_jump_height: f64,
    max_jump_height: f64,
    gravity: f64,
    hold_cap_ms: f64,

    lift: f64,
    /// Upward positive, logical units per ms.
    velocity: f64,
    phase: JumpPhase,
    held: bool,
    hold_ms: f64,
    apex: f64,

    run_frame_ms: f64,
    run_frame_count: usize,
    run_timer_ms: f64,
    run_frame: usize,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.player_x,
            standing_y: config.player_standing_y(),
            width: config.player_width,
            height: config.player_height,
            min_jump_height: config.min_jump_height,
            max_jump_height: config.max_jump_height,
            gravity: config.gravity,
            hold_cap_ms: config.jump_hold_cap_ms,
            lift: 0.0,
            velocity: 0.0,
            phase: JumpPhase::Grounded,
            held: false,
            hold_ms: 0.0,
            apex: 0.0,
            run_frame_ms: config.run_frame_ms,
            run_frame_count: config.player_sprites.run.len().max(1),
            run_timer_ms: config.run_frame_ms,
            run_frame: 0,
        }
    }

    /// Launch speed that peaks exactly `height` above the current lift.
    fn launch_velocity(&self, height: f64) -> f64 {
        (2.0 * self.gravity * height.max(0.0)).sqrt()
    }

    /// Start a jump if grounded. The jump is aimed at `min_jump_height` and
    /// keeps growing toward `max_jump_height` while the input stays held.
    pub fn jump(&mut self) -> bool {
        if self.phase != JumpPhase::Grounded {
            return false;
        }
        self.phase = JumpPhase::Rising;
        self.held = true;
        self.hold_ms = 0.0;
        self.apex = self.min_jump_height;
        self.velocity = self.launch_velocity(self.apex);
        true
    }

    /// The jump input was let go; the current apex becomes final.
    pub fn release(&mut self) {
        self.held = false;
    }

    fn held_apex(&self) -> f64 {
        let ratio = if self.hold_cap_ms > 0.0 {
            (self.hold_ms / self.hold_cap_ms).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.min_jump_height + (self.max_jump_height - self.min_jump_height) * ratio
    }

    pub fn update(&mut self, game_speed: f64, delta_ms: f64) {
        match self.phase {
            JumpPhase::Grounded => {
                self.run_timer_ms -= delta_ms * game_speed;
                if self.run_timer_ms <= 0.0 {
                    self.run_frame = (self.run_frame + 1) % self.run_frame_count;
                    self.run_timer_ms = self.run_frame_ms;
                }
            }
            JumpPhase::Rising => {
                if self.held {
                    self.hold_ms += delta_ms;
                    self.apex = self.held_apex();
                    self.velocity = self.launch_velocity(self.apex - self.lift);
                }
                let next = self.step(delta_ms);
                if self.velocity <= 0.0 || next >= self.apex {
                    self.lift = self.apex;
                    self.velocity = 0.0;
                    self.phase = JumpPhase::Falling;
                } else {
                    self.lift = next;
                }
            }
            JumpPhase::Falling => {
                let next = self.step(delta_ms);
                if next <= 0.0 {
                    self.land();
                } else {
                    self.lift = next;
                }
            }
        }
        self.lift = self.lift.clamp(0.0, self.max_jump_height);
    }

    /// Constant-acceleration step; returns the new lift and updates velocity.
    fn step(&mut self, delta_ms: f64) -> f64 {
        let next = self.lift + self.velocity * delta_ms - 0.5 * self.gravity * delta_ms * delta_ms;
        self.velocity -= self.gravity * delta_ms;
        next
    }

    fn land(&mut self) {
        self.lift = 0.0;
        self.velocity = 0.0;
        self.held = false;
        self.phase = JumpPhase::Grounded;
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn is_grounded(&self) -> bool {
        self.phase == JumpPhase::Grounded
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn run_frame(&self) -> usize {
        self.run_frame
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.standing_y - self.lift, self.width, self.height)
    }

    pub fn sprite(&self) -> Sprite {
        match self.phase {
            JumpPhase::Grounded => Sprite::PlayerRun(self.run_frame),
            _ => Sprite::PlayerStanding,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(self.sprite(), self.rect());
    }
}
