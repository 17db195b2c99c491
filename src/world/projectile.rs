use glam::{IVec2, Vec2};

use crate::constants::projectile::MAX_AGE;
use crate::entity::player::Player;
use crate::map::TileMap;
use crate::render::RenderTarget;
use crate::texture::sprite::Sprite;

/// An enemy bullet flying horizontally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    /// Signed horizontal speed in pixels per tick.
    pub speed: f32,
    /// Ticks since the projectile was fired.
    pub age: u32,
}

/// What happened to a projectile this tick. The outcomes are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Flying,
    /// It flew into a solid tile.
    HitTile,
    /// It lived past its maximum age.
    Expired,
    /// It struck the player, who was not mid-dash.
    HitPlayer,
}

impl Outcome {
    pub fn removes(self) -> bool {
        self != Outcome::Flying
    }
}

impl Projectile {
    pub const fn new(pos: Vec2, speed: f32) -> Self {
        Self { pos, speed, age: 0 }
    }

    /// Moves the projectile one tick and decides its fate.
    ///
    /// `player` is `None` while the player is dead and cannot be hit.
    pub fn update(&mut self, tilemap: &TileMap, player: Option<&Player>) -> Outcome {
        self.pos.x += self.speed;
        self.age += 1;

        if tilemap.solid_check(self.pos).is_some() {
            Outcome::HitTile
        } else if self.age > MAX_AGE {
            Outcome::Expired
        } else if player.is_some_and(|player| !player.is_dash_active() && player.body.rect().contains_point(self.pos)) {
            Outcome::HitPlayer
        } else {
            Outcome::Flying
        }
    }

    /// Direction of travel as a sign.
    pub fn direction(&self) -> f32 {
        self.speed.signum()
    }

    /// Draws the image centered on the projectile.
    pub fn render(&self, target: &mut dyn RenderTarget, image: Sprite, offset: IVec2) {
        let pos = self.pos - image.size.as_vec2() / 2.0 - offset.as_vec2();
        target.draw_sprite(image, pos, false);
    }
}
