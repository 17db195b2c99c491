use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::render::RenderTarget;
use crate::texture::animated::Animation;

/// Horizontal sway applied to falling leaves, scaled by the sine of the animation frame.
const LEAF_SWAY_FREQUENCY: f32 = 0.035;
const LEAF_SWAY_AMPLITUDE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ParticleKind {
    Leaf,
    /// Dust puffs from dashes and impacts.
    #[strum(serialize = "particle")]
    Dust,
}

impl ParticleKind {
    /// The name of the animation this particle plays.
    pub fn animation_name(self) -> String {
        format!("particle/{}", self.as_ref())
    }
}

/// A short-lived animated sprite drifting with a fixed velocity.
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub animation: Animation,
}

impl Particle {
    pub fn new(kind: ParticleKind, pos: Vec2, velocity: Vec2, animation: Animation) -> Self {
        Self {
            kind,
            pos,
            velocity,
            animation,
        }
    }

    /// Moves and animates the particle. Returns `true` once it should be removed.
    ///
    /// Removal is decided before advancing, so the final frame is still shown for one tick.
    pub fn update(&mut self) -> bool {
        let kill = self.animation.is_done();

        self.pos += self.velocity;
        self.animation.update();

        if self.kind == ParticleKind::Leaf {
            self.pos.x += (self.animation.frame() as f32 * LEAF_SWAY_FREQUENCY).sin() * LEAF_SWAY_AMPLITUDE;
        }

        kill
    }

    /// Draws the current frame centered on the particle.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        let image = self.animation.current_image();
        let half = (image.size / 2).as_vec2();
        target.draw_sprite(image, self.pos - offset.as_vec2() - half, false);
    }
}
