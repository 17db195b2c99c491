//! Parallax clouds drifting behind the level.

use glam::{IVec2, Vec2};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::render::RenderTarget;
use crate::texture::sprite::Sprite;

/// Clouds start scattered over a large area so wrap-around hides any pattern.
const SCATTER: f32 = 99999.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub pos: Vec2,
    pub image: Sprite,
    pub speed: f32,
    /// How strongly the cloud follows the camera, in `0.2..0.8`.
    pub depth: f32,
}

impl Cloud {
    pub fn update(&mut self) {
        self.pos.x += self.speed;
    }

    /// Screen position, wrapped so the cloud re-enters from the opposite edge.
    pub fn screen_pos(&self, surface: Vec2, offset: IVec2) -> Vec2 {
        let size = self.image.size.as_vec2();
        let pos = self.pos - offset.as_vec2() * self.depth;
        pos.rem_euclid(surface + size) - size
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

impl Clouds {
    /// Scatters `count` clouds with random images, speeds and depths, ordered far to near.
    pub fn new(images: &[Sprite], count: usize, rng: &mut impl Rng) -> Self {
        let mut clouds: Vec<Cloud> = (0..count)
            .filter_map(|_| {
                let image = *images.choose(&mut *rng)?;
                Some(Cloud {
                    pos: Vec2::new(rng.random::<f32>() * SCATTER, rng.random::<f32>() * SCATTER),
                    image,
                    speed: rng.random::<f32>() * 0.05 + 0.05,
                    depth: rng.random::<f32>() * 0.6 + 0.2,
                })
            })
            .collect();
        clouds.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        Self { clouds }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn update(&mut self) {
        self.clouds.iter_mut().for_each(Cloud::update);
    }

    pub fn render(&self, target: &mut dyn RenderTarget, offset: IVec2) {
        let surface = target.size().as_vec2();
        for cloud in &self.clouds {
            target.draw_sprite(cloud.image, cloud.screen_pos(surface, offset), false);
        }
    }
}
