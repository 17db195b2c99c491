//! The persisted tilemap document.
//!
//! ```json
//! {"tilemap": {"3;4": {"type": "grass", "variant": 1, "pos": [3, 4]}},
//!  "tile_size": 16,
//!  "offgrid": [{"type": "decor", "variant": 0, "pos": [41.5, 60.0]}]}
//! ```
//!
//! Grid keys are `"<gx>;<gy>"` without padding and may be negative. They are
//! regenerated from each tile's `pos` when saving and checked against it when loading.

use std::collections::{BTreeMap, HashMap};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::map::tile::{OffgridTile, Tile};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MapDocument {
    pub tilemap: BTreeMap<String, Tile>,
    pub tile_size: u32,
    pub offgrid: Vec<OffgridTile>,
}

/// Formats a grid cell as its canonical document key.
pub fn grid_key(pos: IVec2) -> String {
    format!("{};{}", pos.x, pos.y)
}

/// Parses a `"<gx>;<gy>"` document key.
pub fn parse_grid_key(key: &str) -> Result<IVec2, MapError> {
    let invalid = || MapError::InvalidKey(key.to_string());
    let (x, y) = key.split_once(';').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(IVec2::new(x, y))
}

impl MapDocument {
    pub fn from_parts(tile_size: u32, tiles: &HashMap<IVec2, Tile>, offgrid: &[OffgridTile]) -> Self {
        Self {
            tilemap: tiles.values().map(|tile| (grid_key(tile.pos), *tile)).collect(),
            tile_size,
            offgrid: offgrid.to_vec(),
        }
    }

    /// Converts the document into the in-memory grid, validating the tile size and every key against its tile.
    pub fn into_parts(self) -> Result<(u32, HashMap<IVec2, Tile>, Vec<OffgridTile>), MapError> {
        // Cell math runs in i32 pixels
        if self.tile_size == 0 || self.tile_size > i32::MAX as u32 {
            return Err(MapError::InvalidTileSize(self.tile_size));
        }

        let mut tiles = HashMap::with_capacity(self.tilemap.len());
        for (key, tile) in self.tilemap {
            let cell = parse_grid_key(&key)?;
            if cell != tile.pos {
                return Err(MapError::KeyMismatch { key, pos: tile.pos });
            }
            tiles.insert(cell, tile);
        }
        Ok((self.tile_size, tiles, self.offgrid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_key_round_trip_negative() {
        let pos = IVec2::new(-3, 12);
        assert_eq!(grid_key(pos), "-3;12");
        assert_eq!(parse_grid_key("-3;12").unwrap(), pos);
    }

    #[test]
    fn test_into_parts_rejects_unusable_tile_sizes() {
        for tile_size in [0, i32::MAX as u32 + 1, u32::MAX] {
            let document = MapDocument {
                tilemap: BTreeMap::new(),
                tile_size,
                offgrid: Vec::new(),
            };
            assert!(matches!(document.into_parts(), Err(MapError::InvalidTileSize(size)) if size == tile_size));
        }
    }

    #[test]
    fn test_parse_grid_key_rejects_garbage() {
        assert!(matches!(parse_grid_key("3,4"), Err(MapError::InvalidKey(_))));
        assert!(matches!(parse_grid_key("a;4"), Err(MapError::InvalidKey(_))));
    }
}
