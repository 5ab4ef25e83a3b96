//! Draw primitives and a recording surface

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA, 0-1 per channel
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const PLAYER: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_FOCUSED: Color = [0.4, 0.75, 1.0, 1.0]; // Sky blue
    pub const HITBOX: Color = [0.9, 0.16, 0.22, 1.0];
    pub const PLAYER_BULLET: Color = [0.99, 0.98, 0.0, 1.0];
    pub const ENEMY: Color = [0.9, 0.16, 0.22, 1.0];
    pub const ENEMY_BULLET: Color = [0.0, 0.47, 0.95, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT_ACCENT: Color = [0.99, 0.98, 0.0, 1.0];
    pub const TEXT_PROMPT: Color = [0.0, 0.89, 0.19, 1.0];
    pub const TEXT_ALERT: Color = [0.9, 0.16, 0.22, 1.0];
}

/// Something the platform can draw. Calls are fire-and-forget.
pub trait DrawSurface {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Surface that records commands instead of drawing them (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop last frame's commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Recorded strings, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Circle { .. } => None,
        })
    }
}

impl DrawSurface for DrawList {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
