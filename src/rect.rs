//! Integer axis-aligned rectangles used for collision and hit tests.

use glam::{IVec2, UVec2, Vec2};

/// An axis-aligned rectangle with integer pixel coordinates.
///
/// Floating point positions are truncated when a rectangle is built from them,
/// so an entity's collision box always sits on whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rectangle from a sub-pixel position, truncating it.
    pub fn from_pos_size(pos: Vec2, size: UVec2) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size.x as i32, size.y as i32)
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub const fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    pub const fn area(&self) -> i32 {
        self.w * self.h
    }

    /// Returns true if the two rectangles share any interior area. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns true if the point lies inside the rectangle (left/top inclusive, right/bottom exclusive).
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x as f32 && point.x < self.right() as f32 && point.y >= self.y as f32 && point.y < self.bottom() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 16, 16);
        let b = Rect::new(16, 0, 16, 16);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&Rect::new(15, 15, 4, 4)));
    }

    #[test]
    fn test_from_pos_size_truncates() {
        let rect = Rect::from_pos_size(Vec2::new(3.9, 7.2), UVec2::new(8, 15));
        assert_eq!(rect, Rect::new(3, 7, 8, 15));
        assert_eq!(rect.center(), IVec2::new(7, 14));
    }

    #[test]
    fn test_contains_point() {
        let rect = Rect::new(10, 10, 4, 4);
        assert!(rect.contains_point(Vec2::new(10.0, 10.0)));
        assert!(rect.contains_point(Vec2::new(13.5, 12.0)));
        assert!(!rect.contains_point(Vec2::new(14.0, 12.0)));
        assert!(!rect.contains_point(Vec2::new(9.9, 12.0)));
    }

    #[test]
    fn test_setters_keep_size() {
        let mut rect = Rect::new(0, 0, 8, 15);
        rect.set_right(32);
        rect.set_bottom(48);
        assert_eq!(rect, Rect::new(24, 33, 8, 15));
    }
}
