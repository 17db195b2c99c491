use glam::{IVec2, UVec2, Vec2};
use ninja_frog::{
    constants::physics::TERMINAL_VELOCITY,
    entity::{physics, Body, Collisions, EntityKind},
    map::{
        tile::{Tile, TileKind},
        TileMap,
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn body(pos: Vec2, size: UVec2) -> Body {
    let assets = common::assets();
    Body::new(assets.entity_animations(EntityKind::Player).unwrap(), pos, size).unwrap()
}

#[test]
fn test_diagonal_move_into_corner_stops_on_both_axes() {
    let mut map = TileMap::new(16);
    map.place(Tile::new(TileKind::Stone, 0, IVec2::new(2, 1)));
    map.place(Tile::new(TileKind::Stone, 0, IVec2::new(1, 2)));

    let mut body = body(Vec2::new(16.0, 16.0), UVec2::new(16, 16));
    body.velocity.y = 2.0;

    let collisions = physics::step(&mut body, &map, Vec2::new(2.0, 0.0));

    assert_eq!(body.pos, Vec2::new(16.0, 16.0));
    assert_eq!(collisions, Collisions::RIGHT | Collisions::DOWN);
    assert_eq!(body.collisions, collisions);
    assert_eq!(body.velocity.y, 0.0);
}

#[test]
fn test_moving_left_into_wall() {
    let mut map = TileMap::new(16);
    common::wall(&mut map, 0, 0, 4);

    let mut body = body(Vec2::new(17.5, 20.0), UVec2::new(12, 12));
    let collisions = physics::step(&mut body, &map, Vec2::new(-3.0, 0.0));

    assert_that(&collisions.contains(Collisions::LEFT)).is_true();
    assert_eq!(body.pos.x, 16.0);
    assert_that(&body.flip).is_true();
}

#[test]
fn test_gravity_is_clamped_to_terminal_velocity() {
    let map = TileMap::new(16);
    let mut body = body(Vec2::ZERO, UVec2::new(12, 12));

    for _ in 0..100 {
        physics::step(&mut body, &map, Vec2::ZERO);
        assert_that(&body.velocity.y).is_less_than_or_equal_to(TERMINAL_VELOCITY);
    }
    assert_eq!(body.velocity.y, TERMINAL_VELOCITY);
    assert_that(&body.collisions.is_empty()).is_true();
}

#[test]
fn test_landing_zeroes_vertical_velocity() {
    let mut map = TileMap::new(16);
    common::floor(&mut map, 5, 0, 5);

    let mut body = body(Vec2::new(32.0, 40.0), UVec2::new(12, 12));
    let mut landed = false;
    for _ in 0..60 {
        let collisions = physics::step(&mut body, &map, Vec2::ZERO);
        if collisions.contains(Collisions::DOWN) {
            landed = true;
            break;
        }
    }

    assert_that(&landed).is_true();
    assert_eq!(body.velocity.y, 0.0);
    assert_eq!(body.rect().bottom(), 80);
}

#[test]
fn test_bumping_a_ceiling_stops_rising() {
    let mut map = TileMap::new(16);
    common::floor(&mut map, 0, 0, 5);

    let mut body = body(Vec2::new(32.0, 18.0), UVec2::new(12, 12));
    body.velocity.y = -3.0;
    let collisions = physics::step(&mut body, &map, Vec2::ZERO);

    assert_eq!(collisions, Collisions::UP);
    assert_eq!(body.pos.y, 16.0);
    assert_eq!(body.velocity.y, 0.0);
}

#[test]
fn test_facing_follows_intent_only() {
    let map = TileMap::new(16);
    let mut body = body(Vec2::ZERO, UVec2::new(12, 12));

    physics::step(&mut body, &map, Vec2::new(-1.0, 0.0));
    assert_that(&body.flip).is_true();
    assert_eq!(body.facing(), -1.0);

    // No intent keeps the previous facing, even while drifting right
    body.velocity.x = 2.0;
    physics::step(&mut body, &map, Vec2::ZERO);
    assert_that(&body.flip).is_true();
    assert_eq!(body.last_movement, Vec2::ZERO);

    physics::step(&mut body, &map, Vec2::new(1.0, 0.0));
    assert_that(&body.flip).is_false();
}

#[test]
fn test_step_advances_animation() {
    let map = TileMap::new(16);
    let mut body = body(Vec2::ZERO, UVec2::new(12, 12));

    physics::step(&mut body, &map, Vec2::ZERO);
    physics::step(&mut body, &map, Vec2::ZERO);
    assert_eq!(body.animation().frame(), 2);
}
