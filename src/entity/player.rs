//! The player state machine.

use std::f32::consts::TAU;

use glam::{IVec2, Vec2};
use rand::Rng;
use tracing::debug;

use crate::asset::AnimationSet;
use crate::constants::physics::FRICTION;
use crate::constants::player::*;
use crate::constants::world::DUST_MAX_START_FRAME;
use crate::effects::particle::ParticleKind;
use crate::entity::{physics, Action, Body, Collisions, TickContext};
use crate::error::AssetError;
use crate::render::RenderTarget;

/// The player character.
///
/// `dashing` and `hit` are signed timers: their magnitude is the ticks remaining and
/// their sign the direction of the dash or knockback.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub air_time: u32,
    pub jumps: u32,
    pub wall_slide: bool,
    pub dashing: i32,
    pub hit: i32,
}

impl Player {
    pub fn new(animations: AnimationSet, pos: Vec2) -> Result<Self, AssetError> {
        let mut body = Body::new(animations, pos, SIZE)?;
        body.anim_offset = ANIM_OFFSET;
        Ok(Self {
            body,
            air_time: 0,
            jumps: 1,
            wall_slide: false,
            dashing: 0,
            hit: 0,
        })
    }

    /// Moves the player to a spawn point, clearing motion and hit stun.
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.velocity = Vec2::ZERO;
        self.air_time = 0;
        self.hit = 0;
    }

    /// Whether the dash is in its forced-velocity window, where projectiles pass through.
    pub fn is_dash_active(&self) -> bool {
        self.dashing.abs() > DASH_ACTIVE_THRESHOLD
    }

    fn center(&self) -> Vec2 {
        self.body.rect().center().as_vec2()
    }

    /// Advances the player by one tick.
    ///
    /// Returns `true` on the tick the player has been airborne for too long, which the
    /// caller treats as falling out of the level.
    pub fn update(&mut self, ctx: &mut TickContext, movement: Vec2) -> bool {
        let collisions = physics::step(&mut self.body, ctx.tilemap, movement);
        self.body.anim_offset = if self.body.flip { ANIM_OFFSET_FLIPPED } else { ANIM_OFFSET };

        self.air_time += 1;
        let fell = self.air_time == MAX_AIR_TICKS + 1;
        if fell {
            debug!(pos = ?self.body.pos, "Player fell out of the level");
        }
        if collisions.contains(Collisions::DOWN) {
            self.air_time = 0;
            self.jumps = 1;
        }

        self.wall_slide = false;
        if self.hit == 0 {
            if collisions.horizontal() && self.air_time > AIR_GRACE_TICKS {
                self.wall_slide = true;
                self.air_time = WALL_SLIDE_AIR_TICKS;
                self.body.velocity.y = self.body.velocity.y.min(WALL_SLIDE_MAX_FALL);
                self.body.flip = !collisions.contains(Collisions::RIGHT);
                self.body.set_action(Action::WallSlide);
            } else if self.air_time > AIR_GRACE_TICKS {
                self.body.set_action(Action::Jump);
            } else if movement.x != 0.0 {
                self.body.set_action(Action::Run);
            } else {
                self.body.set_action(Action::Idle);
            }
        } else {
            self.body.set_action(Action::Hit);
            self.hit -= self.hit.signum();
            if self.body.animation().is_done() {
                self.hit = 0;
            }
            if self.hit != 0 {
                self.body.velocity.x = HIT_PUSH_SPEED * self.hit.signum() as f32;
            }
        }

        self.update_dash(ctx);

        self.body.velocity.x = if self.body.velocity.x > 0.0 {
            (self.body.velocity.x - FRICTION).max(0.0)
        } else {
            (self.body.velocity.x + FRICTION).min(0.0)
        };

        fell
    }

    fn update_dash(&mut self, ctx: &mut TickContext) {
        let magnitude = self.dashing.abs();
        let direction = self.dashing.signum() as f32;

        // Bursts mark the start and the end of the forced-velocity window
        if magnitude == DASH_TICKS || magnitude == DASH_ACTIVE_THRESHOLD {
            for _ in 0..DASH_BURST_PARTICLES {
                let angle = ctx.rng.random::<f32>() * TAU;
                let speed = ctx.rng.random::<f32>() * 0.5 + 0.5;
                let velocity = Vec2::from_angle(angle) * speed;
                let frame = ctx.rng.random_range(0..=DUST_MAX_START_FRAME);
                ctx.effects.spawn_particle(ParticleKind::Dust, self.center(), velocity, frame);
            }
        }

        if magnitude > DASH_ACTIVE_THRESHOLD {
            self.body.velocity.x = direction * DASH_SPEED;
            if magnitude == DASH_ACTIVE_THRESHOLD + 1 {
                self.body.velocity.x *= DASH_END_DAMPING;
            }
            let velocity = Vec2::new(direction * ctx.rng.random::<f32>() * 3.0, 0.0);
            let frame = ctx.rng.random_range(0..=DUST_MAX_START_FRAME);
            ctx.effects.spawn_particle(ParticleKind::Dust, self.center(), velocity, frame);
        }

        self.dashing -= self.dashing.signum();
    }

    /// Attempts a jump. Returns whether one happened.
    ///
    /// While wall sliding the player must be holding toward the wall, and kicks off it
    /// diagonally. Otherwise a jump needs a remaining charge.
    pub fn jump(&mut self) -> bool {
        if self.wall_slide {
            let into_wall = (self.body.flip && self.body.last_movement.x < 0.0) || (!self.body.flip && self.body.last_movement.x > 0.0);
            if !into_wall {
                return false;
            }
            let direction = if self.body.flip { 1.0 } else { -1.0 };
            self.body.velocity = Vec2::new(WALL_JUMP_VELOCITY.x * direction, WALL_JUMP_VELOCITY.y);
            self.air_time = JUMP_AIR_TICKS;
            self.jumps = self.jumps.saturating_sub(1);
            return true;
        }

        if self.jumps > 0 {
            self.body.velocity.y = JUMP_VELOCITY;
            self.jumps -= 1;
            self.air_time = JUMP_AIR_TICKS;
            return true;
        }

        false
    }

    /// Starts a dash in the facing direction. Returns `false` if already dashing.
    pub fn dash(&mut self) -> bool {
        if self.dashing != 0 {
            return false;
        }
        self.dashing = if self.body.flip { -DASH_TICKS } else { DASH_TICKS };
        true
    }

    /// Draws the player unless it is mid-dash.
    pub fn render(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        if !self.is_dash_active() {
            self.body.render(target, offset);
        }
    }
}
