//! This module defines the tilemap and provides functions for querying and editing it.

pub mod format;
pub mod render;
pub mod tile;

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use bitflags::bitflags;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::asset::Assets;
use crate::constants::{AUTOTILE_VARIANTS, NEIGHBOR_OFFSETS};
use crate::error::MapError;
use crate::map::format::MapDocument;
use crate::map::tile::{OffgridTile, Tile, TileKind};
use crate::rect::Rect;

bitflags! {
    /// Which axis neighbors of a tile share its kind.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Adjacency: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

impl Adjacency {
    /// The four axis neighbors, paired with their cell offsets.
    pub const NEIGHBORS: [(Adjacency, IVec2); 4] = [
        (Adjacency::RIGHT, IVec2::new(1, 0)),
        (Adjacency::LEFT, IVec2::new(-1, 0)),
        (Adjacency::UP, IVec2::new(0, -1)),
        (Adjacency::DOWN, IVec2::new(0, 1)),
    ];
}

/// A sparse grid of tiles plus a list of free-floating decorations.
///
/// Grid tiles are keyed by cell; a key always equals its tile's `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    tile_size: u32,
    tiles: HashMap<IVec2, Tile>,
    offgrid: Vec<OffgridTile>,
}

impl TileMap {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            tiles: HashMap::new(),
            offgrid: Vec::new(),
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    /// Number of tiles on the grid. Off-grid decorations are not counted.
    pub fn grid_len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true if the map holds neither grid tiles nor off-grid decorations.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.offgrid.is_empty()
    }

    pub fn get(&self, cell: IVec2) -> Option<&Tile> {
        self.tiles.get(&cell)
    }

    /// Converts a pixel position into the grid cell containing it.
    pub fn cell_at(&self, pixel: Vec2) -> IVec2 {
        (pixel / self.tile_size as f32).floor().as_ivec2()
    }

    /// The pixel-space rectangle covered by a grid cell.
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        let size = self.tile_size as i32;
        Rect::new(cell.x * size, cell.y * size, size, size)
    }

    /// Returns the tile at a pixel position if it is solid.
    pub fn solid_check(&self, pixel: Vec2) -> Option<&Tile> {
        self.tiles.get(&self.cell_at(pixel)).filter(|tile| tile.kind.is_solid())
    }

    /// Returns the tiles in the 3x3 cell neighborhood around a pixel position.
    pub fn tiles_around(&self, pixel: Vec2) -> SmallVec<[&Tile; 9]> {
        let cell = self.cell_at(pixel);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.tiles.get(&(cell + IVec2::new(dx, dy))))
            .collect()
    }

    /// Returns the pixel rectangles of the solid tiles around a pixel position.
    pub fn physics_rects_around(&self, pixel: Vec2) -> SmallVec<[Rect; 9]> {
        self.tiles_around(pixel)
            .into_iter()
            .filter(|tile| tile.kind.is_solid())
            .map(|tile| self.cell_rect(tile.pos))
            .collect()
    }

    /// Collects copies of every tile whose `(kind, variant)` is in `ids`, with pixel positions.
    ///
    /// Off-grid matches come first, in order, followed by grid matches. Unless `keep`
    /// is set, matched tiles are removed from the map.
    pub fn extract(&mut self, ids: &[(TileKind, u8)], keep: bool) -> Vec<OffgridTile> {
        let mut matches = Vec::new();

        self.offgrid.retain(|tile| {
            if ids.contains(&tile.id()) {
                matches.push(*tile);
                keep
            } else {
                true
            }
        });

        let tile_size = self.tile_size as f32;
        self.tiles.retain(|_, tile| {
            if ids.contains(&tile.id()) {
                matches.push(OffgridTile::new(tile.kind, tile.variant, tile.pos.as_vec2() * tile_size));
                keep
            } else {
                true
            }
        });

        debug!(count = matches.len(), keep, "Extracted tiles");
        matches
    }

    /// Same-kind axis neighbors of a grid cell.
    pub fn adjacency(&self, tile: &Tile) -> Adjacency {
        Adjacency::NEIGHBORS
            .iter()
            .filter(|(_, offset)| {
                self.tiles
                    .get(&(tile.pos + *offset))
                    .is_some_and(|neighbor| neighbor.kind == tile.kind)
            })
            .fold(Adjacency::empty(), |acc, (flag, _)| acc | *flag)
    }

    /// Rewrites the variant of every auto-tiled grid tile from its same-kind neighbors.
    ///
    /// Neighbor sets without an entry in the variant table leave the tile as authored.
    pub fn auto_tile(&mut self) {
        let updates: Vec<(IVec2, u8)> = self
            .tiles
            .values()
            .filter(|tile| tile.kind.is_autotiled())
            .filter_map(|tile| {
                AUTOTILE_VARIANTS
                    .get(&self.adjacency(tile).bits())
                    .map(|&variant| (tile.pos, variant))
            })
            .collect();

        trace!(updated = updates.len(), "Auto-tiled map");
        for (cell, variant) in updates {
            if let Some(tile) = self.tiles.get_mut(&cell) {
                tile.variant = variant;
            }
        }
    }

    /// Places a tile on the grid, replacing whatever occupied its cell.
    pub fn place(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.pos, tile)
    }

    /// Removes the grid tile at a cell.
    pub fn remove(&mut self, cell: IVec2) -> Option<Tile> {
        self.tiles.remove(&cell)
    }

    pub fn place_offgrid(&mut self, tile: OffgridTile) {
        self.offgrid.push(tile);
    }

    /// Removes every off-grid tile whose image covers `point` (in map pixels).
    ///
    /// Returns the number of tiles removed. Tiles whose image is not registered are kept.
    pub fn remove_offgrid_at(&mut self, point: Vec2, assets: &Assets) -> usize {
        let before = self.offgrid.len();
        self.offgrid.retain(|tile| match assets.tile(tile.kind, tile.variant) {
            Ok(sprite) => !Rect::from_pos_size(tile.pos, sprite.size).contains_point(point),
            Err(_) => true,
        });
        before - self.offgrid.len()
    }

    /// Writes the map as a JSON document.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        let document = MapDocument::from_parts(self.tile_size, &self.tiles, &self.offgrid);

        let file = fs::File::create(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &document)?;
        writer.flush().map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), tiles = self.tiles.len(), offgrid = self.offgrid.len(), "Saved map");
        Ok(())
    }

    /// Reads a map from a JSON document.
    ///
    /// A missing file is reported as [`MapError::NotFound`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => MapError::NotFound(path.to_path_buf()),
            _ => MapError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let document: MapDocument = serde_json::from_reader(BufReader::new(file)).map_err(|source| MapError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        let (tile_size, tiles, offgrid) = document.into_parts()?;

        debug!(path = %path.display(), tiles = tiles.len(), offgrid = offgrid.len(), tile_size, "Loaded map");
        Ok(Self {
            tile_size,
            tiles,
            offgrid,
        })
    }

    /// Loads a map, starting from an empty one if the file does not exist yet.
    pub fn load_or_empty(path: impl AsRef<Path>, tile_size: u32) -> Result<Self, MapError> {
        match Self::load(path) {
            Err(MapError::NotFound(path)) => {
                info!(path = %path.display(), "Map not found, starting empty");
                Ok(Self::new(tile_size))
            }
            other => other,
        }
    }
}
