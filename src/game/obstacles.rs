use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::geometry::Rect;
use super::player::Player;
use super::surface::{Sprite, Surface};
use crate::config::GameConfig;

/// A live obstacle. `id` is a spawn serial, unique per controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id: u64,
    pub kind: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn is_off_screen(&self) -> bool {
        self.x + self.width <= 0.0
    }
}

pub struct ObstacleController {
    /// (width, height) per catalog entry.
    catalog: Vec<(f64, f64)>,
    live: Vec<Obstacle>,
    rng: StdRng,
    until_spawn_ms: f64,
    spawn_min_ms: f64,
    spawn_max_ms: f64,
    spawn_x: f64,
    floor_y: f64,
    scroll_factor: f64,
    hitbox_inset: f64,
    next_id: u64,
}

impl ObstacleController {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        let mut controller = Self {
            catalog: config.obstacles.iter().map(|o| (o.width, o.height)).collect(),
            live: Vec::new(),
            rng,
            until_spawn_ms: 0.0,
            spawn_min_ms: config.spawn_interval_min_ms,
            spawn_max_ms: config.spawn_interval_max_ms,
            spawn_x: config.spawn_x,
            floor_y: config.game_height,
            scroll_factor: config.scroll_factor,
            hitbox_inset: config.hitbox_inset,
            next_id: 0,
        };
        controller.reset();
        controller
    }

    fn next_interval(&mut self) -> f64 {
        self.rng.gen_range(self.spawn_min_ms..=self.spawn_max_ms)
    }

    fn spawn(&mut self) {
        let kind = self.rng.gen_range(0..self.catalog.len());
        let (width, height) = self.catalog[kind];
        let obstacle = Obstacle {
            id: self.next_id,
            kind,
            x: self.spawn_x,
            y: self.floor_y - height,
            width,
            height,
        };
        debug!("spawned obstacle #{} kind {}", obstacle.id, kind);
        self.next_id += 1;
        self.live.push(obstacle);
    }

    pub fn update(&mut self, game_speed: f64, delta_ms: f64) {
        self.until_spawn_ms -= delta_ms;
        if self.until_spawn_ms <= 0.0 {
            self.spawn();
            self.until_spawn_ms = self.next_interval();
        }

        let shift = game_speed * delta_ms * self.scroll_factor;
        for obstacle in self.live.iter_mut() {
            obstacle.x -= shift;
        }
        self.live.retain(|o| !o.is_off_screen());
    }

    /// Strict overlap of the inset player box against any inset obstacle box.
    pub fn collide_with(&self, player: &Player) -> bool {
        let player_box = player.rect().inset(self.hitbox_inset);
        self.live
            .iter()
            .any(|o| o.rect().inset(self.hitbox_inset).overlaps(&player_box))
    }

    pub fn reset(&mut self) {
        self.live.clear();
        self.until_spawn_ms = self.next_interval();
    }

    /// Live obstacles in spawn order (oldest first).
    pub fn live(&self) -> &[Obstacle] {
        &self.live
    }

    pub fn until_spawn_ms(&self) -> f64 {
        self.until_spawn_ms
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for obstacle in &self.live {
            surface.draw_sprite(Sprite::Obstacle(obstacle.kind), obstacle.rect());
        }
    }
}
