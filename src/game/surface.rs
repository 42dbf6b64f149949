//! Drawing seam between the simulation and whatever renders it. All
//! coordinates are logical; implementations apply their own scale.

use super::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ground,
    /// Index into the obstacle catalog.
    Obstacle(usize),
    PlayerStanding,
    /// Index into the run animation frames.
    PlayerRun(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_px: f64,
    pub color: &'static str,
}

pub trait Surface {
    fn clear(&mut self);
    fn draw_sprite(&mut self, sprite: Sprite, at: Rect);
    /// `x`/`y` is the left end of the text baseline.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Sprite(Sprite, Rect),
    Text(String),
}

/// Headless surface that records what a frame drew.
#[derive(Debug, Default)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t.as_str()),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: Rect) {
        self.ops.push(DrawOp::Sprite(sprite, at));
    }

    fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _style: &TextStyle) {
        self.ops.push(DrawOp::Text(text.to_string()));
    }
}
