//! This module contains all the constants used by the simulation.

use std::time::Duration;

use glam::{UVec2, Vec2};

/// The fixed simulation rate.
pub const TICKS_PER_SECOND: u32 = 60;
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The default size of each grid cell, in pixels.
pub const TILE_SIZE: u32 = 16;
/// The logical render surface the camera centers the player in.
pub const VIEWPORT_SIZE: UVec2 = UVec2::new(640, 480);

/// Offsets of the 3x3 neighborhood scanned for collision, including the containing cell.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub mod physics {
    /// Added to vertical velocity every tick.
    pub const GRAVITY: f32 = 0.1;
    /// Maximum downward velocity.
    pub const TERMINAL_VELOCITY: f32 = 3.5;
    /// Horizontal velocity decay per tick outside of a forced dash.
    pub const FRICTION: f32 = 0.1;
}

pub mod player {
    use glam::{UVec2, Vec2};

    pub const SIZE: UVec2 = UVec2::new(12, 12);
    pub const SPAWN: Vec2 = Vec2::new(400.0, 100.0);

    /// Ticks airborne before the player counts as "in the air" for animation and wall slides.
    pub const AIR_GRACE_TICKS: u32 = 4;
    /// Continuous air time treated as falling out of the level.
    pub const MAX_AIR_TICKS: u32 = 180;
    /// Air time pinned while wall sliding.
    pub const WALL_SLIDE_AIR_TICKS: u32 = 20;
    /// Air time pinned right after a jump so the jump animation starts immediately.
    pub const JUMP_AIR_TICKS: u32 = 5;
    pub const WALL_SLIDE_MAX_FALL: f32 = 0.5;

    pub const JUMP_VELOCITY: f32 = -3.0;
    pub const WALL_JUMP_VELOCITY: Vec2 = Vec2::new(3.5, -2.5);

    pub const DASH_TICKS: i32 = 60;
    /// While `|dash|` is above this, the dash is in its forced-velocity window.
    pub const DASH_ACTIVE_THRESHOLD: i32 = 50;
    pub const DASH_SPEED: f32 = 8.0;
    /// Applied once, on the last tick of the forced-velocity window.
    pub const DASH_END_DAMPING: f32 = 0.1;
    pub const DASH_BURST_PARTICLES: usize = 20;

    pub const HIT_STUN_TICKS: i32 = 60;
    pub const HIT_PUSH_SPEED: f32 = 2.5;

    /// Sprite offsets relative to the body, depending on facing.
    pub const ANIM_OFFSET: Vec2 = Vec2::new(0.0, -3.0);
    pub const ANIM_OFFSET_FLIPPED: Vec2 = Vec2::new(-3.0, -3.0);
}

pub mod enemy {
    use glam::{UVec2, Vec2};

    pub const SIZE: UVec2 = UVec2::new(8, 15);
    pub const ANIM_OFFSET: Vec2 = Vec2::new(-3.0, -3.0);

    pub const WALK_SPEED: f32 = 0.5;
    /// Per-tick chance that an idle enemy starts walking.
    pub const WALK_CHANCE: f64 = 0.01;
    pub const WALK_TICKS_MIN: u32 = 30;
    pub const WALK_TICKS_MAX: u32 = 120;
    /// Ground probe, relative to the body's horizontal center and top edge.
    pub const PROBE_AHEAD: i32 = 7;
    pub const PROBE_BELOW: f32 = 23.0;

    /// Maximum vertical distance at which the enemy will fire at the player.
    pub const SHOOT_BAND: f32 = 16.0;
    pub const MUZZLE_OFFSET: i32 = 7;
    pub const GUN_GAP: i32 = 2;

    pub const DEATH_BURST: usize = 15;
}

pub mod projectile {
    pub const SPEED: f32 = 1.5;
    /// Projectiles older than this are removed.
    pub const MAX_AGE: u32 = 240;
}

pub mod world {
    pub const SCREEN_SHAKE: u32 = 16;
    /// Sparks (and as many dust particles) thrown when a projectile hits the player.
    pub const HIT_BURST: usize = 15;
    /// Divisor of the camera's exponential smoothing.
    pub const CAMERA_LAG: f32 = 30.0;
    /// Leaf spawn chance per tick is `area / LEAF_SPAWN_DENOMINATOR`.
    pub const LEAF_SPAWN_DENOMINATOR: f32 = 49999.0;
    pub const LEAF_VELOCITY: glam::Vec2 = glam::Vec2::new(-0.1, 0.3);
    pub const LEAF_MAX_START_FRAME: u32 = 20;
    pub const DUST_MAX_START_FRAME: u32 = 7;
    /// The transition counter starts here after a level load and counts up to zero.
    pub const TRANSITION_START: i32 = -40;
    /// Once all enemies are dead, the next level loads after the counter passes this.
    pub const TRANSITION_END: i32 = 40;
    /// After lives run out, the level reloads once lives drop below this.
    pub const RESPAWN_DELAY_LIVES: i32 = -40;
    /// The transition iris opens once `|transition|` drops below this.
    pub const IRIS_TICKS: i32 = 30;
    pub const IRIS_SCALE: i32 = 8;
    pub const DEFAULT_LIVES: i32 = 3;
    pub const CLOUD_COUNT: usize = 16;
    pub const HEART_SPACING: f32 = 16.0;
    pub const HEART_ORIGIN: glam::Vec2 = glam::Vec2::new(8.0, 0.0);
}

/// Leaf spawner rectangle relative to a tree's position: `(dx, dy, w, h)`.
pub const LEAF_SPAWNER_RECT: (i32, i32, i32, i32) = (4, 4, 23, 13);

/// Speed lost by a spark every tick.
pub const SPARK_DECAY: f32 = 0.1;

/// Neighbor mask to tile variant for auto-tiled kinds.
///
/// Mask bits follow [`crate::map::Adjacency`]: right = 1, left = 2, up = 4, down = 8.
/// Masks missing from this table leave the variant untouched.
pub static AUTOTILE_VARIANTS: phf::Map<u8, u8> = phf::phf_map! {
    0b1001u8 => 0u8, // right, down
    0b1011u8 => 1u8, // right, left, down
    0b1010u8 => 2u8, // left, down
    0b1110u8 => 3u8, // left, up, down
    0b0110u8 => 4u8, // left, up
    0b0111u8 => 5u8, // right, left, up
    0b0101u8 => 6u8, // right, up
    0b1101u8 => 7u8, // right, up, down
    0b1111u8 => 8u8, // all four
};

/// Center of the viewport, in pixels.
pub fn viewport_center(viewport: UVec2) -> Vec2 {
    viewport.as_vec2() / 2.0
}
