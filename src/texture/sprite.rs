use glam::UVec2;

/// A handle to an image owned by the presentation layer.
///
/// The core only needs an image's size (for centering and hit boxes); the `id`
/// is passed back verbatim in draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sprite {
    pub id: u32,
    pub size: UVec2,
}

impl Sprite {
    pub const fn new(id: u32, size: UVec2) -> Self {
        Self { id, size }
    }

    pub const fn width(&self) -> u32 {
        self.size.x
    }

    pub const fn height(&self) -> u32 {
        self.size.y
    }
}
