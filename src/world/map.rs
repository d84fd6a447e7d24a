//! Map data structure
//!
//! The 2D grid of tiles plus a same-shaped grid of per-tile heights in feet.
//! Immutable per frame; regeneration replaces the whole value at once so
//! partial updates are never observable.

use super::tile::Tile;

/// A world map: row-major tile grid, parallel height grid, spawn point
#[derive(Debug, Clone)]
pub struct GridMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    heights: Vec<f32>,
    /// Camera spawn position (tile center), selected at generation time
    pub spawn: (f32, f32),
}

impl GridMap {
    /// Create a new map filled with walls of zero height
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; size],
            heights: vec![0.0; size],
            spawn: (width as f32 / 2.0, height as f32 / 2.0),
        }
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get tile at position, treating out-of-bounds as solid wall
    #[inline]
    pub fn tile_or_wall(&self, x: i32, y: i32) -> Tile {
        self.tile(x, y).unwrap_or(Tile::Wall)
    }

    /// Set tile at position (no-op out of bounds)
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile;
        }
    }

    /// Frozen per-tile height in feet (0.0 out of bounds)
    pub fn height_ft(&self, x: i32, y: i32) -> f32 {
        if self.in_bounds(x, y) {
            self.heights[self.xy_to_idx(x, y)]
        } else {
            0.0
        }
    }

    /// Set per-tile height in feet (no-op out of bounds)
    pub fn set_height_ft(&mut self, x: i32, y: i32, height: f32) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.heights[idx] = height;
        }
    }

    /// All floor cell coordinates, row-major order
    pub fn floor_cells(&self) -> Vec<(i32, i32)> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[self.xy_to_idx(x, y)] == Tile::Floor {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Count tiles of a given kind
    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }
}
