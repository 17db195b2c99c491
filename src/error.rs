//! Centralized error types for the platformer core.
//!
//! Missing level files are the only recoverable condition ([`MapError::NotFound`]);
//! everything else is propagated to the caller as fatal for the operation at hand.

use std::io;
use std::path::PathBuf;

use glam::IVec2;

use crate::texture::animated::AnimationError;

/// Main error type for the platformer core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while looking up or registering assets.
///
/// Lookups use names derived from fixed enumerations, so a missing entry is a
/// programming error rather than something to recover from.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid animation '{name}': {source}")]
    Animation {
        name: String,
        #[source]
        source: AnimationError,
    },
}

/// Errors related to loading, saving, or editing a tilemap.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    /// The map file does not exist. Callers may start from an empty map instead.
    #[error("Map file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to access map file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed map document {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize map: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Tile size must be a positive i32 pixel count, got {0}")]
    InvalidTileSize(u32),

    #[error("Invalid grid key: {0:?}")]
    InvalidKey(String),

    #[error("Grid key {key:?} does not match tile position {pos}")]
    KeyMismatch { key: String, pos: IVec2 },
}

impl MapError {
    /// Returns `true` if the map file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::NotFound(_))
    }
}

/// Errors raised while assembling [`crate::config::Settings`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Load(Box::new(error))
    }
}

/// Result type for core operations.
pub type GameResult<T> = Result<T, GameError>;
