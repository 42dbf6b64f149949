use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::geometry::Rect;
use crate::game::surface::{Sprite, Surface, TextStyle};

/// Images for every sprite the simulation can ask for. Loading is left to
/// the browser; an image that is not ready yet is drawn as a flat box.
pub struct SpriteSheet {
    ground: HtmlImageElement,
    obstacles: Vec<HtmlImageElement>,
    standing: HtmlImageElement,
    run: Vec<HtmlImageElement>,
}

fn image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    Ok(img)
}

impl SpriteSheet {
    pub fn load(config: &GameConfig) -> Result<Self, JsValue> {
        Ok(Self {
            ground: image(&config.ground_image)?,
            obstacles: config.obstacles.iter().map(|o| image(&o.image)).collect::<Result<_, _>>()?,
            standing: image(&config.player_sprites.standing)?,
            run: config.player_sprites.run.iter().map(|s| image(s)).collect::<Result<_, _>>()?,
        })
    }

    fn get(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        match sprite {
            Sprite::Ground => Some(&self.ground),
            Sprite::Obstacle(i) => self.obstacles.get(i),
            Sprite::PlayerStanding => Some(&self.standing),
            Sprite::PlayerRun(i) => self.run.get(i),
        }
    }
}

/// 2D canvas backend. Logical coordinates are multiplied by `ratio`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
    ratio: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, sprites: SpriteSheet) -> Self {
        Self { canvas, ctx, sprites, ratio: 1.0 }
    }

    /// Resize the backing canvas for a new scale ratio.
    pub fn set_ratio(&mut self, ratio: f64, game_w: f64, game_h: f64) {
        self.ratio = ratio;
        self.canvas.set_width((game_w * ratio).round() as u32);
        self.canvas.set_height((game_h * ratio).round() as u32);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.set_fill_style_str("white");
        self.ctx
            .fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: Rect) {
        let r = self.ratio;
        let (x, y, w, h) = (at.x * r, at.y * r, at.width * r, at.height * r);
        match self.sprites.get(sprite) {
            Some(img) if img.complete() && img.natural_width() > 0 => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .ok();
            }
            _ => {
                let color = match sprite {
                    Sprite::Ground => "#c8c8c0",
                    Sprite::Obstacle(_) => "#3a7d44",
                    Sprite::PlayerStanding | Sprite::PlayerRun(_) => "#535353",
                };
                self.ctx.set_fill_style_str(color);
                self.ctx.fill_rect(x, y, w, h);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let r = self.ratio;
        self.ctx.set_font(&format!("{}px Verdana", style.font_px * r));
        self.ctx.set_fill_style_str(style.color);
        self.ctx.fill_text(text, x * r, y * r).ok();
    }
}

/// Reuse the configured canvas or create one at the end of `<body>`.
pub fn acquire_canvas(doc: &Document, id: &str) -> Result<HtmlCanvasElement, GameError> {
    if let Some(el) = doc.get_element_by_id(id) {
        return el
            .dyn_into()
            .map_err(|_| GameError::MissingElement(format!("#{id} (not a canvas)")));
    }
    let canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| GameError::MissingElement("canvas".into()))?;
    canvas.set_id(id);
    canvas
        .set_attribute("style", "display:block; margin:0 auto; touch-action:none;")
        .ok();
    doc.body()
        .ok_or_else(|| GameError::MissingElement("body".into()))?
        .append_child(&canvas)?;
    Ok(canvas)
}
