//! The world: owns the level, its entities and effects, and advances them one tick at a time.

pub mod projectile;

use std::f32::consts::PI;

use glam::{IVec2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::asset::{AnimationSet, Assets};
use crate::audio::Sound;
use crate::config::Settings;
use crate::constants::player::{HIT_STUN_TICKS, SPAWN};
use crate::constants::world::*;
use crate::constants::{viewport_center, LEAF_SPAWNER_RECT};
use crate::effects::clouds::Clouds;
use crate::effects::particle::ParticleKind;
use crate::effects::Effects;
use crate::entity::enemy::Enemy;
use crate::entity::player::Player;
use crate::entity::{EntityKind, TickContext};
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::input::InputState;
use crate::map::render::MapRenderer;
use crate::map::tile::spawner;
use crate::map::TileMap;
use crate::rect::Rect;
use crate::render::RenderTarget;
use crate::texture::sprite::Sprite;

use self::projectile::{Outcome, Projectile};

/// Single images the world draws directly, resolved once up front.
#[derive(Debug, Clone, Copy)]
struct Props {
    gun: Sprite,
    projectile: Sprite,
    heart: Sprite,
}

/// The running game.
///
/// Level bookkeeping follows two counters. `transition` starts each level at
/// [`TRANSITION_START`] and counts up to zero; once every enemy is dead it keeps counting
/// and the next level loads after [`TRANSITION_END`]. `lives` keeps counting down past zero
/// after the player dies, and the level restarts once it drops below [`RESPAWN_DELAY_LIVES`].
pub struct World {
    settings: Settings,
    assets: Assets,
    props: Props,
    enemy_animations: AnimationSet,
    tilemap: TileMap,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    effects: Effects,
    clouds: Clouds,
    leaf_spawners: Vec<Rect>,
    scroll: Vec2,
    screen_shake: u32,
    lives: i32,
    level: usize,
    transition: i32,
    game_over: bool,
    tick: u64,
    rng: SmallRng,
    events: Vec<GameEvent>,
}

impl World {
    /// Creates the world and loads the first level from the levels directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset is missing or the first level cannot be loaded.
    pub fn new(settings: Settings, assets: Assets) -> GameResult<Self> {
        let tilemap = TileMap::load(settings.level_path(0))?;
        Self::with_tilemap(settings, assets, tilemap)
    }

    /// Creates the world with `tilemap` as the first level.
    ///
    /// Later levels (and restarts) still load from the levels directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are out of range or an asset is missing.
    pub fn with_tilemap(settings: Settings, assets: Assets, tilemap: TileMap) -> GameResult<Self> {
        settings.validate()?;

        let mut rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let props = Props {
            gun: assets.image("gun")?,
            projectile: assets.image("projectile")?,
            heart: assets.image("heart")?,
        };
        let player = Player::new(assets.entity_animations(EntityKind::Player)?, SPAWN)?;
        let enemy_animations = assets.entity_animations(EntityKind::Enemy)?;
        let effects = Effects::new(&assets)?;
        let clouds = Clouds::new(assets.sequence("clouds")?, CLOUD_COUNT, &mut rng);
        let lives = settings.lives;

        let mut world = Self {
            settings,
            assets,
            props,
            enemy_animations,
            tilemap: TileMap::new(tilemap.tile_size()),
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            effects,
            clouds,
            leaf_spawners: Vec::new(),
            scroll: Vec2::ZERO,
            screen_shake: 0,
            lives,
            level: 0,
            transition: TRANSITION_START,
            game_over: false,
            tick: 0,
            rng,
            events: vec![GameEvent::Sound(Sound::Ambience)],
        };
        world.setup_level(tilemap)?;
        Ok(world)
    }

    /// Loads a level from the levels directory, replacing the current one.
    pub fn load_level(&mut self, level: usize) -> GameResult<()> {
        let tilemap = TileMap::load(self.settings.level_path(level))?;
        self.level = level;
        self.setup_level(tilemap)
    }

    /// Installs a level: pulls spawners and leaf-dropping trees out of the map, resets
    /// transient state and moves the player to its spawn point.
    fn setup_level(&mut self, mut tilemap: TileMap) -> GameResult<()> {
        self.events.push(GameEvent::StopMusic);
        self.events.push(GameEvent::PlayMusic { track: self.level });

        let (dx, dy, w, h) = LEAF_SPAWNER_RECT;
        self.leaf_spawners = tilemap
            .extract(&[spawner::TREE], true)
            .into_iter()
            .map(|tree| Rect::new(dx + tree.pos.x as i32, dy + tree.pos.y as i32, w, h))
            .collect();

        self.enemies.clear();
        for marker in tilemap.extract(&[spawner::PLAYER, spawner::ENEMY], false) {
            if marker.id() == spawner::PLAYER {
                self.player.respawn(marker.pos);
            } else {
                self.enemies.push(Enemy::new(self.enemy_animations.clone(), marker.pos)?);
            }
        }

        self.tilemap = tilemap;
        self.projectiles.clear();
        self.effects.clear();
        self.scroll = Vec2::ZERO;
        self.lives = self.settings.lives;
        self.transition = TRANSITION_START;

        info!(
            level = self.level,
            enemies = self.enemies.len(),
            leaf_spawners = self.leaf_spawners.len(),
            "Level loaded"
        );
        self.events.push(GameEvent::LevelLoaded { level: self.level });
        Ok(())
    }

    /// Advances the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Returns an error if a level change fails to load the next map.
    pub fn tick(&mut self, input: &InputState) -> GameResult<()> {
        self.tick += 1;
        self.handle_input(input);

        self.screen_shake = self.screen_shake.saturating_sub(1);
        self.update_progress()?;
        self.update_camera();
        self.spawn_leaves();
        self.clouds.update();

        let mut ctx = TickContext {
            tilemap: &self.tilemap,
            effects: &mut self.effects,
            projectiles: &mut self.projectiles,
            events: &mut self.events,
            screen_shake: &mut self.screen_shake,
            rng: &mut self.rng,
        };

        if self.lives > 0 && self.player.update(&mut ctx, input.movement()) {
            self.lives = 0;
            ctx.events.push(GameEvent::Sound(Sound::Hit));
            ctx.events.push(GameEvent::PlayerFell);
            if !self.game_over {
                ctx.shake(SCREEN_SHAKE);
            }
        }

        let player = &self.player;
        self.enemies.retain_mut(|enemy| !enemy.update(&mut ctx, player));

        self.update_projectiles();
        self.effects.update_sparks();
        self.effects.update_particles();
        Ok(())
    }

    fn handle_input(&mut self, input: &InputState) {
        if self.lives <= 0 {
            return;
        }
        if input.jump && self.player.jump() {
            self.events.push(GameEvent::Sound(Sound::Jump));
        }
        if input.dash && self.player.dash() {
            self.events.push(GameEvent::Sound(Sound::Dash));
        }
    }

    /// Level clear, game over and death bookkeeping.
    fn update_progress(&mut self) -> GameResult<()> {
        if self.enemies.is_empty() && !self.game_over {
            self.transition += 1;
            if self.transition > TRANSITION_END {
                let next = self.level + 1;
                if next > self.settings.last_level() {
                    self.level = next;
                    self.game_over = true;
                    info!(levels = self.settings.total_levels, "All levels cleared");
                    self.events.push(GameEvent::GameOver);
                } else {
                    self.load_level(next)?;
                }
            }
        }
        if self.transition < 0 {
            self.transition += 1;
        }

        if self.lives <= 0 && !self.game_over {
            self.lives -= 1;
            self.transition += 1;
            if self.lives < RESPAWN_DELAY_LIVES {
                debug!(level = self.level, "Restarting level after death");
                self.load_level(self.level)?;
            }
        }
        Ok(())
    }

    /// Eases the camera toward the player's center.
    fn update_camera(&mut self) {
        let target = self.player.body.rect().center().as_vec2() - viewport_center(self.settings.viewport);
        self.scroll += (target - self.scroll) / CAMERA_LAG;
    }

    /// Each tree drops a leaf with a chance proportional to its spawner's area.
    fn spawn_leaves(&mut self) {
        for rect in &self.leaf_spawners {
            if self.rng.random::<f32>() * LEAF_SPAWN_DENOMINATOR < rect.area() as f32 {
                let pos = Vec2::new(
                    rect.x as f32 + self.rng.random::<f32>() * rect.w as f32,
                    rect.y as f32 + self.rng.random::<f32>() * rect.h as f32,
                );
                let frame = self.rng.random_range(0..=LEAF_MAX_START_FRAME);
                self.effects.spawn_particle(ParticleKind::Leaf, pos, LEAF_VELOCITY, frame);
            }
        }
    }

    fn update_projectiles(&mut self) {
        let target = (self.lives > 0).then_some(&self.player);
        let tilemap = &self.tilemap;
        let effects = &mut self.effects;
        let rng = &mut self.rng;
        let mut hits = Vec::new();

        self.projectiles.retain_mut(|projectile| match projectile.update(tilemap, target) {
            Outcome::Flying => true,
            Outcome::HitTile => {
                trace!(pos = ?projectile.pos, "Projectile hit a tile");
                let heading = if projectile.speed > 0.0 { PI } else { 0.0 };
                effects.spark_spray(&mut *rng, projectile.pos, heading, 4);
                false
            }
            Outcome::Expired => {
                trace!(pos = ?projectile.pos, age = projectile.age, "Projectile expired");
                false
            }
            Outcome::HitPlayer => {
                hits.push(projectile.direction());
                false
            }
        });

        for direction in hits {
            self.hit_player(direction);
        }
    }

    /// Knocks the player back in `direction`, costing a life.
    fn hit_player(&mut self, direction: f32) {
        self.lives -= 1;
        self.player.hit = direction as i32 * HIT_STUN_TICKS;
        self.screen_shake = self.screen_shake.max(SCREEN_SHAKE);

        let center = self.player.body.rect().center().as_vec2();
        self.effects.impact_burst(&mut self.rng, center, HIT_BURST);

        debug!(lives = self.lives, "Player hit by projectile");
        self.events.push(GameEvent::Sound(Sound::Hit));
        self.events.push(GameEvent::PlayerHit { lives: self.lives });
    }

    /// Draws the frame back to front: clouds, tiles, player, enemies, projectiles,
    /// sparks, particles, then the remaining lives.
    ///
    /// # Errors
    ///
    /// Returns an error if a tile's image is not registered.
    pub fn render(&self, target: &mut dyn RenderTarget) -> GameResult<()> {
        let offset = self.render_offset();

        self.clouds.render(target, offset);
        MapRenderer::render(&self.tilemap, target, &self.assets, offset)?;

        if self.lives > 0 {
            self.player.render(target, offset);
        }
        for enemy in &self.enemies {
            enemy.render(target, self.props.gun, offset);
        }
        for projectile in &self.projectiles {
            projectile.render(target, self.props.projectile, offset);
        }
        self.effects.render_sparks(target, offset);
        self.effects.render_particles(target, offset);

        for i in 0..self.lives.max(0) {
            let pos = HEART_ORIGIN + Vec2::new(i as f32 * HEART_SPACING, 0.0);
            target.draw_sprite(self.props.heart, pos, false);
        }
        Ok(())
    }

    /// The camera position in whole pixels.
    pub fn render_offset(&self) -> IVec2 {
        self.scroll.as_ivec2()
    }

    /// A random offset for the presentation layer to shake the frame by.
    pub fn shake_offset(&mut self) -> Vec2 {
        let shake = self.screen_shake as f32;
        Vec2::new(
            self.rng.random::<f32>() * shake - shake / 2.0,
            self.rng.random::<f32>() * shake - shake / 2.0,
        )
    }

    /// Radius of the iris drawn during level transitions, or `None` when no transition is running.
    ///
    /// The iris stays fully closed (radius 0) for the first and last ticks of a transition.
    pub fn transition_radius(&self) -> Option<i32> {
        (self.transition != 0).then(|| (IRIS_TICKS - self.transition.abs()).max(0) * IRIS_SCALE)
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn tilemap(&self) -> &TileMap {
        &self.tilemap
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn clouds(&self) -> &Clouds {
        &self.clouds
    }

    pub fn leaf_spawners(&self) -> &[Rect] {
        &self.leaf_spawners
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn screen_shake(&self) -> u32 {
        self.screen_shake
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn transition(&self) -> i32 {
        self.transition
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ticks simulated since the world was created.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}
