use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// The type tag of a placed tile.
///
/// The serialized names double as asset names for the tile's image sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TileKind {
    Grass,
    Stone,
    Decor,
    LargeDecor,
    /// Level markers pulled out of the map at load time.
    Spawners,
}

impl TileKind {
    /// Solid tiles take part in collision.
    pub const fn is_solid(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }

    /// Auto-tiled kinds derive their variant from same-kind neighbors.
    pub const fn is_autotiled(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Stone)
    }
}

/// Spawner marker variants.
pub mod spawner {
    use super::TileKind;

    pub const PLAYER: (TileKind, u8) = (TileKind::Spawners, 0);
    pub const ENEMY: (TileKind, u8) = (TileKind::Spawners, 1);
    /// Trees drop leaves from a region below their canopy.
    pub const TREE: (TileKind, u8) = (TileKind::LargeDecor, 2);
}

/// A tile aligned to the grid, positioned by its cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u8,
    pub pos: IVec2,
}

impl Tile {
    pub const fn new(kind: TileKind, variant: u8, pos: IVec2) -> Self {
        Self { kind, variant, pos }
    }

    /// Returns the `(type, variant)` pair used for extraction lookups.
    pub const fn id(&self) -> (TileKind, u8) {
        (self.kind, self.variant)
    }
}

/// A decorative tile placed at an arbitrary pixel position.
///
/// Extraction also returns grid tiles in this shape, with their position converted to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffgridTile {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u8,
    pub pos: Vec2,
}

impl OffgridTile {
    pub const fn new(kind: TileKind, variant: u8, pos: Vec2) -> Self {
        Self { kind, variant, pos }
    }

    pub const fn id(&self) -> (TileKind, u8) {
        (self.kind, self.variant)
    }
}
