//! Cosmetic effects: particles, sparks and background clouds.
//!
//! Nothing here affects gameplay. Pools are updated in place with `retain_mut`, so an
//! effect spawned during a pass is first updated on the next tick.

pub mod clouds;
pub mod particle;
pub mod spark;

use std::f32::consts::{PI, TAU};

use glam::{IVec2, Vec2};
use rand::Rng;
use tracing::trace;

use crate::asset::Assets;
use crate::constants::world::DUST_MAX_START_FRAME;
use crate::error::AssetError;
use crate::render::RenderTarget;
use crate::texture::animated::Animation;

use self::particle::{Particle, ParticleKind};
use self::spark::Spark;

/// The particle and spark pools, plus the particle animation templates.
#[derive(Debug, Clone)]
pub struct Effects {
    particles: Vec<Particle>,
    sparks: Vec<Spark>,
    leaf: Animation,
    dust: Animation,
}

impl Effects {
    pub fn new(assets: &Assets) -> Result<Self, AssetError> {
        Ok(Self {
            particles: Vec::new(),
            sparks: Vec::new(),
            leaf: assets.animation(&ParticleKind::Leaf.animation_name())?.clone(),
            dust: assets.animation(&ParticleKind::Dust.animation_name())?.clone(),
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Spawns a particle whose animation starts at `frame` (clamped to the animation).
    pub fn spawn_particle(&mut self, kind: ParticleKind, pos: Vec2, velocity: Vec2, frame: u32) {
        let template = match kind {
            ParticleKind::Leaf => &self.leaf,
            ParticleKind::Dust => &self.dust,
        };
        let mut animation = template.instance();
        animation.set_frame(frame);
        self.particles.push(Particle::new(kind, pos, velocity, animation));
    }

    pub fn spawn_spark(&mut self, pos: Vec2, angle: f32, speed: f32) {
        self.sparks.push(Spark::new(pos, angle, speed));
    }

    /// Sparks fanning out around `heading`, as from a muzzle or a projectile hitting a wall.
    pub fn spark_spray(&mut self, rng: &mut impl Rng, pos: Vec2, heading: f32, count: usize) {
        for _ in 0..count {
            let angle = rng.random::<f32>() - 0.5 + heading;
            self.spawn_spark(pos, angle, 2.0 + rng.random::<f32>());
        }
    }

    /// An omnidirectional burst of sparks with dust thrown the opposite way.
    pub fn impact_burst(&mut self, rng: &mut impl Rng, center: Vec2, count: usize) {
        for _ in 0..count {
            let angle = rng.random::<f32>() * TAU;
            let speed = rng.random::<f32>() * 5.0;
            self.spawn_spark(center, angle, 2.0 + rng.random::<f32>());

            let velocity = Vec2::from_angle(angle + PI) * speed * 0.5;
            let frame = rng.random_range(0..=DUST_MAX_START_FRAME);
            self.spawn_particle(ParticleKind::Dust, center, velocity, frame);
        }
    }

    pub fn update_sparks(&mut self) {
        let before = self.sparks.len();
        self.sparks.retain_mut(|spark| !spark.update());
        trace!(removed = before - self.sparks.len(), "Updated sparks");
    }

    pub fn update_particles(&mut self) {
        let before = self.particles.len();
        self.particles.retain_mut(|particle| !particle.update());
        trace!(removed = before - self.particles.len(), "Updated particles");
    }

    pub fn render_sparks(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        self.sparks.iter().for_each(|spark| spark.render(target, offset));
    }

    pub fn render_particles(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        self.particles.iter().for_each(|particle| particle.render(target, offset));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.sparks.clear();
    }
}
