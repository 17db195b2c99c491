//! Runtime core of a tile-based action platformer.
//!
//! A [`world::World`] owns a [`map::TileMap`], the player, enemies, projectiles and
//! effects, and advances them at a fixed tick rate. Presentation, audio and input are
//! collaborators behind [`render::RenderTarget`], [`audio::AudioSink`] and [`input::InputState`].

pub mod asset;
pub mod audio;
pub mod config;
pub mod constants;
pub mod effects;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod input;
pub mod map;
pub mod rect;
pub mod render;
pub mod texture;
pub mod timing;
pub mod world;
