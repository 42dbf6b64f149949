use std::collections::VecDeque;

use super::geometry::Rect;
use super::surface::{Sprite, Surface};
use crate::config::GameConfig;

/// Horizontally tiling ground strip. Segments are kept adjacent and ordered
/// left to right; the leftmost one is recycled to the back once it has
/// scrolled fully off the left edge.
pub struct Ground {
    tile_width: f64,
    height: f64,
    y: f64,
    scroll_factor: f64,
    segment_count: usize,
    segments: VecDeque<f64>,
}

impl Ground {
    pub fn new(config: &GameConfig) -> Self {
        // Enough tiles to cover the view at any offset in (-tile_width, 0].
        let segment_count = (config.game_width / config.ground_width).ceil() as usize + 1;
        let mut ground = Self {
            tile_width: config.ground_width,
            height: config.ground_height,
            y: config.game_height - config.ground_height,
            scroll_factor: config.scroll_factor,
            segment_count,
            segments: VecDeque::with_capacity(segment_count),
        };
        ground.reset();
        ground
    }

    pub fn update(&mut self, game_speed: f64, delta_ms: f64) {
        let shift = game_speed * delta_ms * self.scroll_factor;
        for x in self.segments.iter_mut() {
            *x -= shift;
        }
        while let Some(&front) = self.segments.front() {
            if front + self.tile_width > 0.0 {
                break;
            }
            self.segments.pop_front();
            let back = self.segments.back().copied().unwrap_or(front);
            self.segments.push_back(back + self.tile_width);
        }
    }

    pub fn reset(&mut self) {
        self.segments.clear();
        for i in 0..self.segment_count {
            self.segments.push_back(i as f64 * self.tile_width);
        }
    }

    /// Segment rectangles, left to right.
    pub fn segments(&self) -> impl Iterator<Item = Rect> + '_ {
        self.segments
            .iter()
            .map(move |&x| Rect::new(x, self.y, self.tile_width, self.height))
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for segment in self.segments() {
            surface.draw_sprite(Sprite::Ground, segment);
        }
    }
}
