//! Scene description for one frame
//!
//! Turns a `GameState` into a flat list of draw commands in field pixels.
//! Backends only need "draw image in rect", "fill rect" and "fill text".

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{Aabb, GamePhase, GameState};

/// Image assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Bird,
    Pipe,
    GameOver,
}

impl Sprite {
    /// Asset path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Bird => "images/bird.jpeg",
            Sprite::Pipe => "images/pipe.jpeg",
            Sprite::GameOver => "images/gameover.jpeg",
        }
    }
}

/// RGBA color, alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RETRY: Color = Color::rgb(255, 204, 0);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 0.65);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string for canvas fill styles
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole field
    Clear,
    /// Image stretched into `rect`, rotated about its centre (radians)
    Image { sprite: Sprite, rect: Aabb, rotation: f32 },
    FillRect { rect: Aabb, color: Color },
    /// Text with its baseline at `pos`
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        bold: bool,
        align: TextAlign,
        color: Color,
    },
}

fn text(
    text: impl Into<String>,
    pos: Vec2,
    size: f32,
    bold: bool,
    align: TextAlign,
    color: Color,
) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        pos,
        size,
        bold,
        align,
        color,
    }
}

/// Build the draw list for the current frame
pub fn build(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut out = vec![DrawCommand::Clear];

    match state.phase {
        GamePhase::Start => title_screen(state, &mut out),
        GamePhase::Playing => {
            world(state, &mut out);
            hud(state, settings, &mut out);
        }
        GamePhase::GameOver => {
            world(state, &mut out);
            game_over(state, &mut out);
        }
    }

    out
}

fn title_screen(state: &GameState, out: &mut Vec<DrawCommand>) {
    let w = state.layout.width;
    let h = state.layout.height;
    out.push(text(
        "Flappy-Jak",
        Vec2::new(w / 2.0, h / 3.0),
        36.0,
        true,
        TextAlign::Center,
        Color::BLACK,
    ));
    out.push(text(
        "Press Space or Tap to Start",
        Vec2::new(w / 2.0, h / 2.0),
        18.0,
        false,
        TextAlign::Center,
        Color::BLACK,
    ));
}

fn world(state: &GameState, out: &mut Vec<DrawCommand>) {
    let h = state.layout.height;
    for pipe in &state.pipes {
        out.push(DrawCommand::Image {
            sprite: Sprite::Pipe,
            rect: pipe.top_aabb(),
            rotation: 0.0,
        });
        out.push(DrawCommand::Image {
            sprite: Sprite::Pipe,
            rect: pipe.bottom_aabb(h),
            rotation: 0.0,
        });
    }

    out.push(DrawCommand::Image {
        sprite: Sprite::Bird,
        rect: state.bird.aabb(),
        rotation: state.bird.rotation(),
    });
}

fn hud(state: &GameState, settings: &Settings, out: &mut Vec<DrawCommand>) {
    out.push(text(
        format!("Score: {}", state.score),
        Vec2::new(20.0, 40.0),
        22.0,
        true,
        TextAlign::Left,
        Color::BLACK,
    ));
    if settings.show_best {
        out.push(text(
            format!("High: {}", state.best_score),
            Vec2::new(20.0, 70.0),
            22.0,
            true,
            TextAlign::Left,
            Color::BLACK,
        ));
    }
}

fn game_over(state: &GameState, out: &mut Vec<DrawCommand>) {
    let layout = &state.layout;
    let center_x = layout.width / 2.0;

    out.push(DrawCommand::FillRect {
        rect: Aabb::from_pos_size(Vec2::ZERO, Vec2::new(layout.width, layout.height)),
        color: Color::OVERLAY,
    });

    let popup = state.popup.popup_rect(layout);
    out.push(DrawCommand::Image {
        sprite: Sprite::GameOver,
        rect: popup,
        rotation: 0.0,
    });
    out.push(text(
        "GAME OVER",
        Vec2::new(center_x, popup.min.y - 30.0),
        24.0,
        true,
        TextAlign::Center,
        Color::WHITE,
    ));

    let button = state.popup.retry_button(layout);
    out.push(DrawCommand::FillRect {
        rect: button,
        color: Color::RETRY,
    });
    out.push(text(
        "RETRY",
        Vec2::new(center_x, button.min.y + 30.0),
        24.0,
        true,
        TextAlign::Center,
        Color::BLACK,
    ));
}
