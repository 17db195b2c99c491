//! Entities: the shared physics body plus the player and enemy state machines layered on it.

pub mod enemy;
pub mod physics;
pub mod player;

use bitflags::bitflags;
use glam::{IVec2, UVec2, Vec2};
use rand::rngs::SmallRng;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::asset::AnimationSet;
use crate::effects::Effects;
use crate::error::AssetError;
use crate::events::GameEvent;
use crate::map::TileMap;
use crate::rect::Rect;
use crate::render::RenderTarget;
use crate::texture::animated::Animation;
use crate::world::projectile::Projectile;

/// The kind of an entity, used to look up its animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
}

impl EntityKind {
    /// Every action this kind has an animation for.
    pub const fn actions(self) -> &'static [Action] {
        match self {
            EntityKind::Player => &[Action::Idle, Action::Run, Action::Jump, Action::WallSlide, Action::Hit],
            EntityKind::Enemy => &[Action::Idle, Action::Run],
        }
    }
}

/// What an entity is currently doing; selects the animation it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Idle,
    Run,
    Jump,
    WallSlide,
    Hit,
}

bitflags! {
    /// The sides on which a body hit solid tiles during its last physics step.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Collisions: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Collisions {
    pub fn horizontal(self) -> bool {
        self.intersects(Collisions::LEFT | Collisions::RIGHT)
    }

    pub fn vertical(self) -> bool {
        self.intersects(Collisions::UP | Collisions::DOWN)
    }
}

/// Everything an entity may read or spawn into during a tick.
///
/// Borrowed piecewise from the world so entities never hold a reference back to it.
pub struct TickContext<'a> {
    pub tilemap: &'a TileMap,
    pub effects: &'a mut Effects,
    pub projectiles: &'a mut Vec<Projectile>,
    pub events: &'a mut Vec<GameEvent>,
    pub screen_shake: &'a mut u32,
    pub rng: &'a mut SmallRng,
}

impl TickContext<'_> {
    /// Raises the screen shake to at least `amount`.
    pub fn shake(&mut self, amount: u32) {
        *self.screen_shake = (*self.screen_shake).max(amount);
    }
}

/// A physics body with a sub-pixel position, an integer hit box and an animation.
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub size: UVec2,
    pub velocity: Vec2,
    pub collisions: Collisions,
    /// Mirrors the sprite horizontally; `true` means facing left.
    pub flip: bool,
    pub last_movement: Vec2,
    /// Sprite position relative to `pos`.
    pub anim_offset: Vec2,
    action: Action,
    animation: Animation,
    animations: AnimationSet,
}

impl Body {
    /// Creates an idle body.
    ///
    /// # Errors
    ///
    /// Fails if the animation set has no idle animation.
    pub fn new(animations: AnimationSet, pos: Vec2, size: UVec2) -> Result<Self, AssetError> {
        let animation = animations
            .instance(Action::Idle)
            .ok_or_else(|| AssetError::NotFound(format!("{}/{}", animations.kind(), Action::Idle)))?;

        Ok(Self {
            pos,
            size,
            velocity: Vec2::ZERO,
            collisions: Collisions::empty(),
            flip: false,
            last_movement: Vec2::ZERO,
            anim_offset: Vec2::ZERO,
            action: Action::Idle,
            animation,
            animations,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.animations.kind()
    }

    /// The hit box, with the position truncated to whole pixels.
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Switches to another action, restarting its animation. Re-setting the current action is a no-op.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the action is not one of [`EntityKind::actions`] for this body's kind.
    pub fn set_action(&mut self, action: Action) {
        debug_assert!(
            self.kind().actions().contains(&action),
            "{} has no {} animation",
            self.kind(),
            action
        );
        if action == self.action {
            return;
        }
        if let Some(animation) = self.animations.instance(action) {
            self.action = action;
            self.animation = animation;
        }
    }

    /// Direction the body faces, as a sign.
    pub fn facing(&self) -> f32 {
        if self.flip {
            -1.0
        } else {
            1.0
        }
    }

    pub fn render(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        let pos = self.pos - offset.as_vec2() + self.anim_offset;
        target.draw_sprite(self.animation.current_image(), pos, self.flip);
    }
}
