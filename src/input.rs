//! Decoded player intent.
//!
//! Raw device polling lives outside the core. The caller keeps the held directions
//! current and sets the edge-triggered flags on the tick the key went down.

use glam::Vec2;

/// Player intent for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump was pressed this tick.
    pub jump: bool,
    /// Dash was pressed this tick.
    pub dash: bool,
}

impl InputState {
    /// Horizontal intent: `right - left`.
    pub fn movement(&self) -> Vec2 {
        Vec2::new(self.right as i32 as f32 - self.left as i32 as f32, 0.0)
    }

    /// Clears the edge-triggered flags once they have been consumed.
    pub fn clear_edges(&mut self) {
        self.jump = false;
        self.dash = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_cancels_out() {
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_movement_left() {
        let input = InputState {
            left: true,
            ..Default::default()
        };
        assert_eq!(input.movement(), Vec2::new(-1.0, 0.0));
    }
}
