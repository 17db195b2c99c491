use std::f32::consts::{FRAC_PI_2, PI};

use glam::{IVec2, Vec2};

use crate::constants::SPARK_DECAY;
use crate::render::RenderTarget;

/// A streak that flies along `angle` and slows to a stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
}

impl Spark {
    pub const fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self { pos, angle, speed }
    }

    /// Moves the spark and decays its speed. Returns `true` once it has stopped.
    pub fn update(&mut self) -> bool {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
        self.speed = (self.speed - SPARK_DECAY).max(0.0);
        self.speed == 0.0
    }

    /// The diamond drawn for the spark: long along its heading, thin across it.
    pub fn polygon(&self, offset: IVec2) -> [Vec2; 4] {
        let center = self.pos - offset.as_vec2();
        let point = |angle: f32, length: f32| center + Vec2::from_angle(angle) * length;
        [
            point(self.angle, self.speed * 3.0),
            point(self.angle + FRAC_PI_2, self.speed * 0.5),
            point(self.angle + PI, self.speed * 3.0),
            point(self.angle - FRAC_PI_2, self.speed * 0.5),
        ]
    }

    pub fn render(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        target.fill_polygon(self.polygon(offset));
    }
}
