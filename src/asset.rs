//! The shared asset table: images, image sequences and animation templates.
//!
//! Decoding images is the presentation layer's job. It registers one [`Sprite`] handle
//! per image under the logical names below, then the core resolves everything it
//! needs by name. Entities copy only animation cursors out of this table.

use std::collections::HashMap;
use std::rc::Rc;

use glam::UVec2;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::entity::{Action, EntityKind};
use crate::error::AssetError;
use crate::map::tile::TileKind;
use crate::texture::animated::Animation;
use crate::texture::sprite::Sprite;

/// Single images used directly by the core.
pub const IMAGES: [&str; 3] = ["gun", "projectile", "heart"];

/// Image sequences used directly by the core (tiles and clouds).
pub const SEQUENCES: [&str; 6] = ["grass", "stone", "decor", "large_decor", "spawners", "clouds"];

/// How an animation template is built from the image sequence of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    pub name: &'static str,
    pub frame_duration: u32,
    pub looping: bool,
}

const fn spec(name: &'static str, frame_duration: u32, looping: bool) -> AnimationSpec {
    AnimationSpec {
        name,
        frame_duration,
        looping,
    }
}

/// Every animation the core plays.
pub const ANIMATIONS: [AnimationSpec; 9] = [
    spec("enemy/idle", 6, true),
    spec("enemy/run", 4, true),
    spec("player/idle", 6, true),
    spec("player/jump", 5, true),
    spec("player/run", 4, true),
    spec("player/wall_slide", 5, true),
    spec("player/hit", 5, false),
    spec("particle/leaf", 12, false),
    spec("particle/particle", 6, false),
];

/// Animation templates for one entity kind, keyed by action.
///
/// Cloning is cheap: the table is shared and every template shares its frames.
#[derive(Debug, Clone)]
pub struct AnimationSet {
    kind: EntityKind,
    animations: Rc<HashMap<Action, Animation>>,
}

impl AnimationSet {
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Returns a fresh cursor for the given action, if the kind supports it.
    pub fn instance(&self, action: Action) -> Option<Animation> {
        self.animations.get(&action).map(Animation::instance)
    }
}

/// Registered images, sequences and animation templates.
#[derive(Debug, Default)]
pub struct Assets {
    images: HashMap<String, Sprite>,
    sequences: HashMap<String, Rc<[Sprite]>>,
    animations: HashMap<String, Animation>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_image(&mut self, name: impl Into<String>, sprite: Sprite) {
        self.images.insert(name.into(), sprite);
    }

    pub fn register_sequence(&mut self, name: impl Into<String>, sprites: Vec<Sprite>) {
        self.sequences.insert(name.into(), sprites.into());
    }

    /// Builds every template in [`ANIMATIONS`] from the sequence of the same name.
    ///
    /// # Errors
    ///
    /// Fails if a sequence is missing or cannot form an animation.
    pub fn build_animations(&mut self) -> Result<(), AssetError> {
        for spec in ANIMATIONS {
            let frames = Rc::clone(self.sequence_rc(spec.name)?);
            let animation = Animation::new(frames, spec.frame_duration, spec.looping).map_err(|source| AssetError::Animation {
                name: spec.name.to_string(),
                source,
            })?;
            self.animations.insert(spec.name.to_string(), animation);
        }
        debug!(count = self.animations.len(), "Built animation templates");
        Ok(())
    }

    pub fn image(&self, name: &str) -> Result<Sprite, AssetError> {
        self.images.get(name).copied().ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    fn sequence_rc(&self, name: &str) -> Result<&Rc<[Sprite]>, AssetError> {
        self.sequences.get(name).ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    pub fn sequence(&self, name: &str) -> Result<&[Sprite], AssetError> {
        self.sequence_rc(name).map(|sprites| &**sprites)
    }

    pub fn animation(&self, name: &str) -> Result<&Animation, AssetError> {
        self.animations.get(name).ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    /// The image drawn for a tile of the given kind and variant.
    pub fn tile(&self, kind: TileKind, variant: u8) -> Result<Sprite, AssetError> {
        self.sequence(kind.as_ref())?
            .get(variant as usize)
            .copied()
            .ok_or_else(|| AssetError::NotFound(format!("{}/{}", kind, variant)))
    }

    /// Resolves the templates for every action an entity kind can take.
    pub fn entity_animations(&self, kind: EntityKind) -> Result<AnimationSet, AssetError> {
        let animations = kind
            .actions()
            .iter()
            .map(|&action| {
                let name = format!("{}/{}", kind.as_ref(), action.as_ref());
                self.animation(&name).map(|animation| (action, animation.clone()))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(AnimationSet {
            kind,
            animations: Rc::new(animations),
        })
    }

    /// An asset table with blank placeholder images under every name the core uses.
    ///
    /// Handy for headless runs; ids are assigned sequentially from 1.
    pub fn placeholder() -> Result<Self, AssetError> {
        let mut assets = Self::new();
        let mut next_id = 0;
        let mut sprite = |size: UVec2| {
            next_id += 1;
            Sprite::new(next_id, size)
        };

        for (name, size) in IMAGES.iter().zip([UVec2::new(7, 4), UVec2::new(5, 2), UVec2::new(14, 12)]) {
            assets.register_image(*name, sprite(size));
        }

        for kind in TileKind::iter() {
            let (count, size) = match kind {
                TileKind::Grass | TileKind::Stone => (9, UVec2::splat(16)),
                TileKind::Decor => (4, UVec2::splat(16)),
                TileKind::LargeDecor => (3, UVec2::new(32, 32)),
                TileKind::Spawners => (2, UVec2::splat(16)),
            };
            assets.register_sequence(kind.as_ref(), (0..count).map(|_| sprite(size)).collect());
        }
        assets.register_sequence("clouds", (0..2).map(|_| sprite(UVec2::new(64, 32))).collect());

        for spec in ANIMATIONS {
            let (count, size) = match spec.name {
                "particle/leaf" => (18, UVec2::splat(6)),
                "particle/particle" => (4, UVec2::splat(4)),
                "player/idle" => (11, UVec2::splat(16)),
                "player/run" => (12, UVec2::splat(16)),
                "player/hit" => (7, UVec2::splat(16)),
                "enemy/idle" => (16, UVec2::new(14, 18)),
                "enemy/run" => (8, UVec2::new(14, 18)),
                _ => (1, UVec2::splat(16)),
            };
            assets.register_sequence(spec.name, (0..count).map(|_| sprite(size)).collect());
        }

        assets.build_animations()?;
        Ok(assets)
    }
}
