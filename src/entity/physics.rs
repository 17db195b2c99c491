//! The shared physics step.

use glam::Vec2;

use crate::constants::physics::{GRAVITY, TERMINAL_VELOCITY};
use crate::entity::{Body, Collisions};
use crate::map::TileMap;

/// Moves a body by `movement` plus its velocity, resolving collisions against solid tiles.
///
/// The X axis is moved and fully resolved before the Y axis moves. Each overlapping
/// tile snaps the body to its near edge, so a diagonal move into a corner stops on
/// both axes instead of slipping through.
///
/// Also applies gravity, updates facing from horizontal intent and advances the
/// body's animation. Returns the sides that collided this step.
pub fn step(body: &mut Body, tilemap: &TileMap, movement: Vec2) -> Collisions {
    body.collisions = Collisions::empty();
    let frame_movement = movement + body.velocity;

    body.pos.x += frame_movement.x;
    let mut rect = body.rect();
    for tile in tilemap.physics_rects_around(body.pos) {
        if rect.overlaps(&tile) {
            if frame_movement.x > 0.0 {
                rect.set_right(tile.left());
                body.collisions |= Collisions::RIGHT;
            }
            if frame_movement.x < 0.0 {
                rect.x = tile.right();
                body.collisions |= Collisions::LEFT;
            }
            body.pos.x = rect.x as f32;
        }
    }

    body.pos.y += frame_movement.y;
    let mut rect = body.rect();
    for tile in tilemap.physics_rects_around(body.pos) {
        if rect.overlaps(&tile) {
            if frame_movement.y > 0.0 {
                rect.set_bottom(tile.top());
                body.collisions |= Collisions::DOWN;
            }
            if frame_movement.y < 0.0 {
                rect.y = tile.bottom();
                body.collisions |= Collisions::UP;
            }
            body.pos.y = rect.y as f32;
        }
    }

    if movement.x > 0.0 {
        body.flip = false;
    } else if movement.x < 0.0 {
        body.flip = true;
    }
    body.last_movement = movement;

    body.velocity.y = (body.velocity.y + GRAVITY).min(TERMINAL_VELOCITY);
    if body.collisions.vertical() {
        body.velocity.y = 0.0;
    }

    body.animation.update();
    body.collisions
}
