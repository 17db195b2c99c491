#![allow(dead_code)]

use std::path::{Path, PathBuf};

use glam::{IVec2, Vec2};
use ninja_frog::{
    asset::Assets,
    config::Settings,
    effects::Effects,
    entity::{player::Player, EntityKind, TickContext},
    events::GameEvent,
    input::InputState,
    map::{
        tile::{spawner, Tile, TileKind},
        TileMap,
    },
    world::{projectile::Projectile, World},
};
use rand::{rngs::SmallRng, SeedableRng};

pub const SEED: u64 = 0x5eed;

pub fn assets() -> Assets {
    Assets::placeholder().unwrap()
}

/// Settings with a fixed seed and a levels directory that does not exist.
pub fn settings() -> Settings {
    settings_in(Path::new("no-such-levels-dir"))
}

pub fn settings_in(levels_dir: &Path) -> Settings {
    Settings {
        seed: Some(SEED),
        levels_dir: PathBuf::from(levels_dir),
        ..Default::default()
    }
}

/// Places a horizontal run of stone tiles on row `y`, from column `x0` to `x1` inclusive.
pub fn floor(map: &mut TileMap, y: i32, x0: i32, x1: i32) {
    for x in x0..=x1 {
        map.place(Tile::new(TileKind::Stone, 0, IVec2::new(x, y)));
    }
}

/// Places a vertical run of stone tiles on column `x`, from row `y0` to `y1` inclusive.
pub fn wall(map: &mut TileMap, x: i32, y0: i32, y1: i32) {
    for y in y0..=y1 {
        map.place(Tile::new(TileKind::Stone, 0, IVec2::new(x, y)));
    }
}

pub fn place_spawner(map: &mut TileMap, id: (TileKind, u8), cell: IVec2) {
    map.place(Tile::new(id.0, id.1, cell));
}

/// A level with a long floor on row 10, the player spawning above it at cell (6, 8)
/// and a single enemy parked on a separate platform far below.
pub fn level_map() -> TileMap {
    let mut map = TileMap::new(16);
    floor(&mut map, 10, -5, 60);
    floor(&mut map, 22, 35, 45);
    place_spawner(&mut map, spawner::PLAYER, IVec2::new(6, 8));
    place_spawner(&mut map, spawner::ENEMY, IVec2::new(40, 20));
    map
}

pub fn world() -> World {
    World::with_tilemap(settings(), assets(), level_map()).unwrap()
}

/// Ticks the world with no input until the player stands on the floor.
pub fn settled_world() -> World {
    let mut world = world();
    for _ in 0..120 {
        world.tick(&InputState::default()).unwrap();
        if world.player().air_time == 0 && world.player().body.velocity.y == 0.0 {
            world.drain_events();
            return world;
        }
    }
    panic!("player never landed");
}

pub fn ticks(world: &mut World, count: usize) {
    for _ in 0..count {
        world.tick(&InputState::default()).unwrap();
    }
}

pub fn player(assets: &Assets, pos: Vec2) -> Player {
    Player::new(assets.entity_animations(EntityKind::Player).unwrap(), pos).unwrap()
}

/// Owns everything a [`TickContext`] borrows, for driving entities outside a world.
pub struct Harness {
    pub tilemap: TileMap,
    pub effects: Effects,
    pub projectiles: Vec<Projectile>,
    pub events: Vec<GameEvent>,
    pub screen_shake: u32,
    pub rng: SmallRng,
}

impl Harness {
    pub fn new(tilemap: TileMap, assets: &Assets) -> Self {
        Self {
            tilemap,
            effects: Effects::new(assets).unwrap(),
            projectiles: Vec::new(),
            events: Vec::new(),
            screen_shake: 0,
            rng: SmallRng::seed_from_u64(SEED),
        }
    }

    pub fn ctx(&mut self) -> TickContext<'_> {
        TickContext {
            tilemap: &self.tilemap,
            effects: &mut self.effects,
            projectiles: &mut self.projectiles,
            events: &mut self.events,
            screen_shake: &mut self.screen_shake,
            rng: &mut self.rng,
        }
    }
}
