//! Runtime settings, layered from defaults, an optional JSON file and the environment.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use glam::UVec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::world::DEFAULT_LIVES;
use crate::constants::VIEWPORT_SIZE;
use crate::error::ConfigError;

/// Prefix of environment variables that override settings, e.g. `NINJA_FROG_LIVES=5`.
pub const ENV_PREFIX: &str = "NINJA_FROG_";

/// Game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Number of levels; level ids run from `0` to `total_levels - 1`.
    pub total_levels: usize,
    /// Lives the player starts each level with.
    pub lives: i32,
    /// Directory holding the `<id>.json` level maps.
    pub levels_dir: PathBuf,
    /// Logical size of the render surface.
    pub viewport: UVec2,
    /// Seeds the world's random number generator for reproducible runs.
    pub seed: Option<u64>,
    /// Stops the headless runner after this many ticks.
    pub ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_levels: 2,
            lives: DEFAULT_LIVES,
            levels_dir: PathBuf::from("assets/maps"),
            viewport: VIEWPORT_SIZE,
            seed: None,
            ticks: None,
        }
    }
}

impl Settings {
    /// The provider stack: defaults, then `path` if given, then `NINJA_FROG_*` variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads and validates settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_levels == 0 {
            return Err(ConfigError::Invalid("total_levels must be at least 1".into()));
        }
        if self.lives <= 0 {
            return Err(ConfigError::Invalid(format!("lives must be positive, got {}", self.lives)));
        }
        if self.viewport.x == 0 || self.viewport.y == 0 {
            return Err(ConfigError::Invalid(format!("viewport must be non-empty, got {}", self.viewport)));
        }
        Ok(())
    }

    /// The id of the final level.
    pub fn last_level(&self) -> usize {
        self.total_levels.saturating_sub(1)
    }

    /// Path of the map file for a level.
    pub fn level_path(&self, level: usize) -> PathBuf {
        self.levels_dir.join(format!("{}.json", level))
    }
}
