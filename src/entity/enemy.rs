use std::f32::consts::PI;

use glam::{IVec2, Vec2};
use rand::Rng;
use tracing::{debug, trace};

use crate::asset::AnimationSet;
use crate::audio::Sound;
use crate::constants::enemy::*;
use crate::constants::player::DASH_ACTIVE_THRESHOLD;
use crate::constants::projectile::SPEED as PROJECTILE_SPEED;
use crate::constants::world::SCREEN_SHAKE;
use crate::entity::player::Player;
use crate::entity::{physics, Action, Body, TickContext};
use crate::error::AssetError;
use crate::events::GameEvent;
use crate::render::RenderTarget;
use crate::texture::sprite::Sprite;
use crate::world::projectile::Projectile;

/// A patrolling gunner.
///
/// While `walking` is nonzero the enemy patrols, turning at walls and ledges. When the
/// countdown runs out it fires if the player stands in front of it at about the same height.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub walking: u32,
}

impl Enemy {
    pub fn new(animations: AnimationSet, pos: Vec2) -> Result<Self, AssetError> {
        let mut body = Body::new(animations, pos, SIZE)?;
        body.anim_offset = ANIM_OFFSET;
        Ok(Self { body, walking: 0 })
    }

    /// Advances the enemy by one tick. Returns `true` if the player's dash killed it.
    pub fn update(&mut self, ctx: &mut TickContext, player: &Player) -> bool {
        let mut movement = Vec2::ZERO;

        if self.walking > 0 {
            let rect = self.body.rect();
            let ahead = if self.body.flip { -PROBE_AHEAD } else { PROBE_AHEAD };
            let probe = Vec2::new((rect.center_x() + ahead) as f32, self.body.pos.y + PROBE_BELOW);

            if ctx.tilemap.solid_check(probe).is_some() {
                if self.body.collisions.horizontal() {
                    self.body.flip = !self.body.flip;
                } else {
                    movement.x = self.body.facing() * WALK_SPEED;
                }
            } else {
                self.body.flip = !self.body.flip;
            }

            self.walking -= 1;
            if self.walking == 0 {
                self.try_shoot(ctx, player);
            }
        } else if ctx.rng.random::<f64>() < WALK_CHANCE {
            self.walking = ctx.rng.random_range(WALK_TICKS_MIN..=WALK_TICKS_MAX);
            trace!(ticks = self.walking, "Enemy started walking");
        }

        physics::step(&mut self.body, ctx.tilemap, movement);
        self.body.set_action(if movement.x != 0.0 { Action::Run } else { Action::Idle });

        if player.dashing.abs() >= DASH_ACTIVE_THRESHOLD && self.body.rect().overlaps(&player.body.rect()) {
            self.die(ctx);
            return true;
        }

        false
    }

    fn try_shoot(&self, ctx: &mut TickContext, player: &Player) {
        let distance = player.body.pos - self.body.pos;
        if distance.y.abs() >= SHOOT_BAND {
            return;
        }

        let facing_player = (self.body.flip && distance.x < 0.0) || (!self.body.flip && distance.x > 0.0);
        if !facing_player {
            return;
        }

        let direction = self.body.facing();
        let rect = self.body.rect();
        let muzzle = IVec2::new(rect.center_x() + direction as i32 * MUZZLE_OFFSET, rect.center_y()).as_vec2();
        let projectile = Projectile::new(muzzle, direction * PROJECTILE_SPEED);
        debug!(pos = ?projectile.pos, speed = projectile.speed, "Enemy fired");
        ctx.projectiles.push(projectile);

        let spray = if self.body.flip { PI } else { 0.0 };
        ctx.effects.spark_spray(&mut *ctx.rng, muzzle, spray, 4);
        ctx.events.push(GameEvent::Sound(Sound::Shoot));
    }

    fn die(&self, ctx: &mut TickContext) {
        let center = self.body.rect().center().as_vec2();
        debug!(pos = ?center, "Enemy killed by dash");

        ctx.events.push(GameEvent::Sound(Sound::Hit));
        ctx.shake(SCREEN_SHAKE);
        ctx.effects.impact_burst(&mut *ctx.rng, center, DEATH_BURST);
        ctx.effects.spawn_spark(center, 0.0, 5.0 + ctx.rng.random::<f32>());
        ctx.effects.spawn_spark(center, PI, 5.0 + ctx.rng.random::<f32>());
    }

    /// Draws the enemy and its gun, which sits beside the body on the facing side.
    pub fn render(&self, target: &mut dyn RenderTarget, gun: Sprite, offset: IVec2) {
        self.body.render(target, offset);

        let rect = self.body.rect();
        let x = if self.body.flip {
            rect.center_x() - GUN_GAP - gun.width() as i32
        } else {
            rect.center_x() + GUN_GAP
        };
        let pos = IVec2::new(x, rect.center_y()) - offset;
        target.draw_sprite(gun, pos.as_vec2(), self.body.flip);
    }
}
