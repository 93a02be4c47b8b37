//! Canvas 2D backend
//!
//! Executes a draw list on a `CanvasRenderingContext2d`. The field is scaled
//! uniformly to the canvas, so a resize mid-round just changes the scale.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCommand, Sprite};
use crate::sim::{Aabb, Layout};

/// Loaded (or loading) sprite images
struct SpriteSheet {
    bird: Option<HtmlImageElement>,
    pipe: Option<HtmlImageElement>,
    game_over: Option<HtmlImageElement>,
}

impl SpriteSheet {
    fn load() -> Self {
        fn image(sprite: Sprite) -> Option<HtmlImageElement> {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.path());
                    Some(img)
                }
                Err(e) => {
                    log::warn!("Cannot create image for {:?}: {:?}", sprite, e);
                    None
                }
            }
        }

        Self {
            bird: image(Sprite::Bird),
            pipe: image(Sprite::Pipe),
            game_over: image(Sprite::GameOver),
        }
    }

    /// Image ready to draw (decoded, non-empty)
    fn ready(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        let img = match sprite {
            Sprite::Bird => self.bird.as_ref(),
            Sprite::Pipe => self.pipe.as_ref(),
            Sprite::GameOver => self.game_over.as_ref(),
        }?;
        (img.complete() && img.natural_width() > 0).then_some(img)
    }
}

/// Canvas renderer state
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            sprites: SpriteSheet::load(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Set the canvas backing size in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
    }

    /// Draw a frame built for `layout`
    pub fn render(&self, commands: &[DrawCommand], layout: &Layout) {
        let scale = self.canvas.height() as f64 / layout.height as f64;
        let ctx = &self.ctx;
        ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0).ok();

        for cmd in commands {
            match cmd {
                DrawCommand::Clear => {
                    ctx.clear_rect(0.0, 0.0, layout.width as f64, layout.height as f64);
                }
                DrawCommand::Image {
                    sprite,
                    rect,
                    rotation,
                } => self.draw_image(*sprite, rect, *rotation),
                DrawCommand::FillRect { rect, color } => {
                    let size = rect.size();
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        size.x as f64,
                        size.y as f64,
                    );
                }
                DrawCommand::Text {
                    text,
                    pos,
                    size,
                    bold,
                    align,
                    color,
                } => {
                    let weight = if *bold { "bold " } else { "" };
                    ctx.set_font(&format!("{}{}px Arial", weight, size));
                    ctx.set_text_align(align.as_str());
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
                }
            }
        }
    }

    /// Missing or still-loading images draw nothing
    fn draw_image(&self, sprite: Sprite, rect: &Aabb, rotation: f32) {
        let Some(img) = self.sprites.ready(sprite) else {
            return;
        };
        let ctx = &self.ctx;
        let size = rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }

        if rotation == 0.0 {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.min.x as f64,
                rect.min.y as f64,
                size.x as f64,
                size.y as f64,
            )
            .ok();
            return;
        }

        let center = (rect.min + rect.max) / 2.0;
        ctx.save();
        ctx.translate(center.x as f64, center.y as f64).ok();
        ctx.rotate(rotation as f64).ok();
        ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            -size.x as f64 / 2.0,
            -size.y as f64 / 2.0,
            size.x as f64,
            size.y as f64,
        )
        .ok();
        ctx.restore();
    }
}
