//! Map rendering functionality.

use std::ops::RangeInclusive;

use glam::{IVec2, UVec2};

use crate::asset::Assets;
use crate::error::GameResult;
use crate::map::TileMap;
use crate::render::RenderTarget;

/// Handles rendering operations for the map.
pub struct MapRenderer;

impl MapRenderer {
    /// Draws the map with the camera at `offset`.
    ///
    /// Off-grid decorations are drawn first and without clipping. Grid tiles are
    /// limited to the cells overlapping the viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if a tile's image sequence or variant is not registered.
    pub fn render(map: &TileMap, target: &mut dyn RenderTarget, assets: &Assets, offset: IVec2) -> GameResult<()> {
        for tile in map.offgrid() {
            let sprite = assets.tile(tile.kind, tile.variant)?;
            target.draw_sprite(sprite, tile.pos - offset.as_vec2(), false);
        }

        let (columns, rows) = Self::visible_cells(offset, target.size(), map.tile_size());
        for y in rows {
            for x in columns.clone() {
                if let Some(tile) = map.get(IVec2::new(x, y)) {
                    let sprite = assets.tile(tile.kind, tile.variant)?;
                    let pos = tile.pos * map.tile_size() as i32 - offset;
                    target.draw_sprite(sprite, pos.as_vec2(), false);
                }
            }
        }

        Ok(())
    }

    /// The inclusive column and row ranges of cells overlapping the viewport.
    pub fn visible_cells(offset: IVec2, viewport: UVec2, tile_size: u32) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let size = tile_size as i32;
        let start = offset.div_euclid(IVec2::splat(size));
        let end = (offset + viewport.as_ivec2()).div_euclid(IVec2::splat(size));
        (start.x..=end.x, start.y..=end.y)
    }
}
