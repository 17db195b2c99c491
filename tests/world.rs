use glam::{IVec2, UVec2, Vec2};
use ninja_frog::{
    audio::Sound,
    config::Settings,
    effects::particle::ParticleKind,
    error::{ConfigError, GameError},
    events::GameEvent,
    input::InputState,
    map::{
        tile::{spawner, Tile, TileKind},
        TileMap,
    },
    rect::Rect,
    render::{DrawCommand, DrawList},
    world::{
        projectile::{Outcome, Projectile},
        World,
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// A floor with a player spawner and no enemies, so the level counts as cleared at once.
fn cleared_map() -> TileMap {
    let mut map = TileMap::new(16);
    common::floor(&mut map, 10, -5, 30);
    common::place_spawner(&mut map, spawner::PLAYER, IVec2::new(6, 8));
    map
}

fn tick_until(world: &mut World, limit: usize, mut done: impl FnMut(&World) -> bool) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..limit {
        world.tick(&InputState::default()).unwrap();
        events.extend(world.drain_events());
        if done(world) {
            return events;
        }
    }
    panic!("condition not reached within {limit} ticks");
}

#[test]
fn test_level_setup() {
    let mut map = common::level_map();
    map.place(Tile::new(TileKind::LargeDecor, 2, IVec2::new(10, 5)));
    let mut world = World::with_tilemap(common::settings(), common::assets(), map).unwrap();

    assert_eq!(world.player().body.pos, Vec2::new(96.0, 128.0));
    assert_that(&world.enemies().len()).is_equal_to(1);
    assert_eq!(world.enemies()[0].body.pos, Vec2::new(640.0, 320.0));
    assert_that(&world.tilemap().tiles().any(|tile| tile.kind == TileKind::Spawners)).is_false();
    // Trees stay in the map and drop leaves from under their canopy
    assert_that(&world.tilemap().get(IVec2::new(10, 5))).is_some();
    assert_eq!(world.leaf_spawners(), &[Rect::new(164, 84, 23, 13)]);

    assert_eq!(world.lives(), 3);
    assert_eq!(world.level(), 0);
    assert_eq!(world.transition(), -40);
    assert_eq!(world.transition_radius(), Some(0));
    assert_eq!(world.clouds().clouds().len(), 16);
    assert_eq!(
        world.drain_events(),
        vec![
            GameEvent::Sound(Sound::Ambience),
            GameEvent::StopMusic,
            GameEvent::PlayMusic { track: 0 },
            GameEvent::LevelLoaded { level: 0 },
        ]
    );
    assert_that(&world.drain_events()).is_empty();
}

#[test]
fn test_missing_first_level_is_an_error() {
    let result = World::new(common::settings(), common::assets());
    assert!(result.is_err());
}

#[test]
fn test_world_loads_first_level_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    common::level_map().save(dir.path().join("0.json")).unwrap();

    let world = World::new(common::settings_in(dir.path()), common::assets()).unwrap();
    assert_eq!(world.player().body.pos, Vec2::new(96.0, 128.0));
    assert_that(&world.enemies().len()).is_equal_to(1);
}

#[test]
fn test_transition_counts_up_to_zero() {
    let mut world = common::world();
    common::ticks(&mut world, 1);
    assert_eq!(world.transition(), -39);
    assert_eq!(world.transition_radius(), Some(0));

    common::ticks(&mut world, 29);
    assert_eq!(world.transition(), -10);
    assert_eq!(world.transition_radius(), Some(160));

    common::ticks(&mut world, 10);
    assert_eq!(world.transition(), 0);
    assert_eq!(world.transition_radius(), None);
}

#[test]
fn test_camera_eases_toward_player() {
    let mut world = common::world();
    world.tick(&InputState::default()).unwrap();

    // Player center (102, 134) minus the viewport center, over the camera lag
    let expected = Vec2::new(-218.0, -106.0) / 30.0;
    assert_that(&(world.scroll() - expected).length()).is_less_than(1e-4);
    assert_eq!(world.render_offset(), IVec2::new(-7, -3));
}

#[test]
fn test_jump_and_dash_emit_sounds() {
    let mut world = common::settled_world();

    world
        .tick(&InputState {
            jump: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(world.drain_events(), vec![GameEvent::Sound(Sound::Jump)]);

    // No charge left in the air
    world
        .tick(&InputState {
            jump: true,
            dash: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(world.drain_events(), vec![GameEvent::Sound(Sound::Dash)]);
    assert_that(&world.player().is_dash_active()).is_true();
}

#[test]
fn test_projectile_hits_player() {
    let mut world = common::settled_world();
    let center = world.player().body.rect().center().as_vec2();
    world.spawn_projectile(Projectile::new(center, 0.0));

    world.tick(&InputState::default()).unwrap();

    assert_that(&world.projectiles().is_empty()).is_true();
    assert_eq!(world.lives(), 2);
    assert_eq!(world.player().hit, 60);
    assert_eq!(world.screen_shake(), 16);
    assert_that(&world.effects().sparks().len()).is_equal_to(15);
    assert_eq!(
        world.drain_events(),
        vec![GameEvent::Sound(Sound::Hit), GameEvent::PlayerHit { lives: 2 }]
    );
}

#[test]
fn test_dashing_player_is_not_hit() {
    let assets = common::assets();
    let mut map = TileMap::new(16);
    common::floor(&mut map, 10, 0, 10);
    let mut player = common::player(&assets, Vec2::new(32.0, 148.0));
    let center = player.body.rect().center().as_vec2();

    player.dashing = 51;
    assert_eq!(Projectile::new(center, 0.0).update(&map, Some(&player)), Outcome::Flying);

    player.dashing = -51;
    assert_eq!(Projectile::new(center, 0.0).update(&map, Some(&player)), Outcome::Flying);

    player.dashing = 50;
    assert_eq!(Projectile::new(center, 0.0).update(&map, Some(&player)), Outcome::HitPlayer);

    // Nobody to hit while the player is dead
    assert_eq!(Projectile::new(center, 0.0).update(&map, None), Outcome::Flying);
}

#[test]
fn test_projectile_outcomes_are_checked_in_order() {
    let assets = common::assets();
    let mut map = TileMap::new(16);
    common::floor(&mut map, 10, 0, 10);
    let player = common::player(&assets, Vec2::new(32.0, 150.0));

    // Inside both a tile and the player: the tile wins
    let mut projectile = Projectile::new(Vec2::new(37.0, 161.0), 0.0);
    assert_eq!(projectile.update(&map, Some(&player)), Outcome::HitTile);

    // Expired while overlapping the player
    let mut projectile = Projectile::new(Vec2::new(37.0, 155.0), 0.0);
    projectile.age = 240;
    assert_eq!(projectile.update(&map, Some(&player)), Outcome::Expired);
    assert_that(&Outcome::Expired.removes()).is_true();
    assert_that(&Outcome::Flying.removes()).is_false();
}

#[test]
fn test_projectile_lifetime() {
    let mut world = common::settled_world();
    world.spawn_projectile(Projectile::new(Vec2::new(5000.0, -5000.0), 0.5));

    common::ticks(&mut world, 240);
    assert_that(&world.projectiles().len()).is_equal_to(1);
    assert_eq!(world.projectiles()[0].age, 240);
    assert_eq!(world.projectiles()[0].pos, Vec2::new(5120.0, -5000.0));

    common::ticks(&mut world, 1);
    assert_that(&world.projectiles().is_empty()).is_true();
    assert_that(&world.effects().sparks().is_empty()).is_true();
}

#[test]
fn test_projectile_stops_at_first_solid_tile() {
    let mut map = common::level_map();
    map.place(Tile::new(TileKind::Stone, 0, IVec2::new(20, 5)));
    let mut world = World::with_tilemap(common::settings(), common::assets(), map).unwrap();
    world.spawn_projectile(Projectile::new(Vec2::new(317.0, 88.0), 1.5));

    world.tick(&InputState::default()).unwrap();
    assert_that(&world.projectiles().len()).is_equal_to(1);
    assert_that(&world.effects().sparks().is_empty()).is_true();

    world.tick(&InputState::default()).unwrap();
    assert_that(&world.projectiles().is_empty()).is_true();
    assert_that(&world.effects().sparks().len()).is_equal_to(4);
    assert_eq!(world.lives(), 3);
}

#[test]
fn test_clearing_last_level_ends_game() {
    let settings = Settings {
        total_levels: 1,
        ..common::settings()
    };
    let mut world = World::with_tilemap(settings, common::assets(), cleared_map()).unwrap();
    world.drain_events();

    let events = tick_until(&mut world, 100, World::is_game_over);

    assert_eq!(events.last(), Some(&GameEvent::GameOver));
    let transition = world.transition();
    common::ticks(&mut world, 10);
    assert_eq!(world.transition(), transition);
    assert_that(&world.drain_events()).is_empty();
}

#[test]
fn test_world_rejects_settings_without_levels() {
    let settings = Settings {
        total_levels: 0,
        ..common::settings()
    };

    let result = World::with_tilemap(settings, common::assets(), cleared_map());
    assert!(matches!(result, Err(GameError::Config(ConfigError::Invalid(_)))));
}

#[test]
fn test_clearing_level_loads_next() {
    let dir = tempfile::tempdir().unwrap();
    common::level_map().save(dir.path().join("1.json")).unwrap();
    let mut world = World::with_tilemap(common::settings_in(dir.path()), common::assets(), cleared_map()).unwrap();
    world.drain_events();

    let events = tick_until(&mut world, 100, |world| world.level() == 1);

    assert_eq!(
        events,
        vec![
            GameEvent::StopMusic,
            GameEvent::PlayMusic { track: 1 },
            GameEvent::LevelLoaded { level: 1 },
        ]
    );
    assert_that(&world.enemies().len()).is_equal_to(1);
    assert_that(&world.transition()).is_less_than(0);
    assert_that(&world.is_game_over()).is_false();
    assert_eq!(world.player().body.pos.x, 96.0);
}

#[test]
fn test_falling_restarts_level() {
    let dir = tempfile::tempdir().unwrap();
    common::level_map().save(dir.path().join("0.json")).unwrap();

    // Nothing under the player; the enemy sits on a ledge well above its fall
    let mut map = TileMap::new(16);
    common::floor(&mut map, 3, 35, 45);
    common::place_spawner(&mut map, spawner::PLAYER, IVec2::new(6, 8));
    common::place_spawner(&mut map, spawner::ENEMY, IVec2::new(40, 1));
    let mut world = World::with_tilemap(common::settings_in(dir.path()), common::assets(), map).unwrap();
    world.drain_events();

    let events = tick_until(&mut world, 200, |world| world.lives() <= 0);
    assert_eq!(world.tick_count(), 181);
    assert_eq!(events, vec![GameEvent::Sound(Sound::Hit), GameEvent::PlayerFell]);
    assert_eq!(world.screen_shake(), 16);

    // Dead players are neither drawn nor controllable
    world
        .tick(&InputState {
            jump: true,
            ..Default::default()
        })
        .unwrap();
    assert_that(&world.drain_events()).is_empty();
    let mut target = DrawList::new(UVec2::new(640, 480));
    world.render(&mut target).unwrap();
    let heart = world.assets().image("heart").unwrap();
    assert_eq!(target.sprites_with_id(heart.id).count(), 0);

    let events = tick_until(&mut world, 100, |world| world.lives() > 0);
    assert_eq!(events.last(), Some(&GameEvent::LevelLoaded { level: 0 }));
    assert_eq!(world.lives(), 3);
    assert_eq!(world.level(), 0);
    assert_eq!(world.player().body.pos, Vec2::new(96.0, 128.0));
    assert_eq!(world.player().air_time, 1);
}

#[test]
fn test_render_draws_hud_last() {
    let mut world = common::settled_world();
    let heart = world.assets().image("heart").unwrap();

    let mut target = DrawList::new(UVec2::new(640, 480));
    world.render(&mut target).unwrap();
    let commands = target.commands();

    let hearts: Vec<Vec2> = commands[commands.len() - 3..]
        .iter()
        .map(|command| match command {
            DrawCommand::Sprite { sprite, pos, .. } if sprite.id == heart.id => *pos,
            other => panic!("expected a heart, got {other:?}"),
        })
        .collect();
    assert_eq!(hearts, vec![Vec2::new(8.0, 0.0), Vec2::new(24.0, 0.0), Vec2::new(40.0, 0.0)]);

    // Clouds come first
    let cloud_ids: Vec<u32> = world.assets().sequence("clouds").unwrap().iter().map(|sprite| sprite.id).collect();
    for command in &commands[..16] {
        assert!(matches!(command, DrawCommand::Sprite { sprite, .. } if cloud_ids.contains(&sprite.id)));
    }

    // Nothing has shaken the screen yet
    assert_that(&world.shake_offset()).is_equal_to(Vec2::ZERO);
}

#[test]
fn test_trees_drop_leaves() {
    let mut map = common::level_map();
    for x in 0..20 {
        map.place(Tile::new(TileKind::LargeDecor, 2, IVec2::new(x * 2, 0)));
    }
    let mut world = World::with_tilemap(common::settings(), common::assets(), map).unwrap();
    assert_that(&world.leaf_spawners().len()).is_equal_to(20);

    common::ticks(&mut world, 200);

    let leaves = world
        .effects()
        .particles()
        .iter()
        .filter(|particle| particle.kind == ParticleKind::Leaf)
        .count();
    assert_that(&leaves).is_greater_than(0);
}

#[test]
fn test_same_seed_same_world() {
    let mut a = common::world();
    let mut b = common::world();
    common::ticks(&mut a, 300);
    common::ticks(&mut b, 300);

    assert_eq!(a.enemies()[0].body.pos, b.enemies()[0].body.pos);
    assert_eq!(a.clouds().clouds(), b.clouds().clouds());
    assert_eq!(a.effects().particles().len(), b.effects().particles().len());
}
