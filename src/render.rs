//! The draw-call surface the core renders into.
//!
//! The core only issues ordered draw calls in screen space (camera offset already
//! applied); scaling, blending and presentation belong to whoever implements
//! [`RenderTarget`].

use glam::{UVec2, Vec2};

use crate::texture::sprite::Sprite;

/// A surface that accepts back-to-front draw calls.
pub trait RenderTarget {
    /// The logical size of the surface, in pixels.
    fn size(&self) -> UVec2;

    /// Draws an image with its top-left corner at `pos`, optionally mirrored horizontally.
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, flip_x: bool);

    /// Fills a convex quadrilateral.
    fn fill_polygon(&mut self, points: [Vec2; 4]);
}

/// A single recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Sprite { sprite: Sprite, pos: Vec2, flip_x: bool },
    Polygon([Vec2; 4]),
}

/// A render target that records draw calls instead of drawing them.
///
/// Useful for headless runs and for inspecting draw order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: UVec2,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(size: UVec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the recorded calls and clears the list for the next frame.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Iterates over the sprite draws with the given image id.
    pub fn sprites_with_id(&self, id: u32) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |command| matches!(command, DrawCommand::Sprite { sprite, .. } if sprite.id == id))
    }
}

impl RenderTarget for DrawList {
    fn size(&self) -> UVec2 {
        self.size
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, flip_x: bool) {
        self.commands.push(DrawCommand::Sprite { sprite, pos, flip_x });
    }

    fn fill_polygon(&mut self, points: [Vec2; 4]) {
        self.commands.push(DrawCommand::Polygon(points));
    }
}
