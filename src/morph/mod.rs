//! Distant morphing layer
//!
//! A pure function of (cell, base tile, camera position, phase) that decides
//! what tile the renderer and minimap actually see. Cells within the safe
//! radius never change, so the floor never vanishes under the player; doors
//! never morph because gameplay logic assumes fixed door positions. With
//! morphing disabled this layer is a bit-exact identity pass-through.

pub mod hash;

pub use hash::hash01;

use crate::config::RenderConfig;
use crate::world::{GridMap, Tile};

/// Morph layer parameters, captured from the render configuration
#[derive(Debug, Clone)]
pub struct MorphLayer {
    enabled: bool,
    safe_radius: f32,
    flip_probability: f32,
    phase_period: f32,
    wall_min_height_ft: f32,
    wall_max_height_ft: f32,
    door_height_ft: f32,
}

impl MorphLayer {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            enabled: config.enable_morph,
            safe_radius: config.safe_radius,
            flip_probability: config.flip_probability,
            phase_period: config.phase_period,
            wall_min_height_ft: config.wall_min_height_ft,
            wall_max_height_ft: config.wall_max_height_ft,
            door_height_ft: config.door_height_ft,
        }
    }

    /// Discrete phase index for an elapsed wall-clock time in seconds.
    /// Advancing the phase is the only way morphed tiles change.
    #[inline]
    pub fn phase(&self, elapsed_secs: f32) -> u32 {
        (elapsed_secs / self.phase_period).floor().max(0.0) as u32
    }

    /// The tile the world currently presents at (x, y).
    /// Out-of-bounds cells are solid wall.
    pub fn effective_tile(
        &self,
        map: &GridMap,
        x: i32,
        y: i32,
        cam_x: f32,
        cam_y: f32,
        phase: u32,
    ) -> Tile {
        let Some(base) = map.tile(x, y) else {
            return Tile::Wall;
        };

        if !self.enabled {
            return base;
        }

        // keep a safe bubble around the camera stable
        let dx = (x as f32 + 0.5) - cam_x;
        let dy = (y as f32 + 0.5) - cam_y;
        if dx.hypot(dy) < self.safe_radius {
            return base;
        }

        // doors are load-bearing geometry and never morph
        if base == Tile::Door {
            return base;
        }

        if hash01(x, y, phase) < self.flip_probability {
            match base {
                Tile::Floor => Tile::Wall,
                Tile::Wall => Tile::Floor,
                Tile::Door => Tile::Door,
            }
        } else {
            base
        }
    }

    /// Height in feet for the tile currently shown at (x, y).
    /// Walls that were walls at generation keep their frozen height; walls
    /// morphed out of floor synthesize one from the same hash, so the height
    /// is stable within a phase.
    pub fn effective_height(&self, map: &GridMap, x: i32, y: i32, tile: Tile, phase: u32) -> f32 {
        match tile {
            Tile::Door => self.door_height_ft,
            Tile::Wall => {
                if map.tile_or_wall(x, y) == Tile::Wall {
                    map.height_ft(x, y)
                } else {
                    let r = hash01(x, y, phase);
                    self.wall_min_height_ft
                        + (self.wall_max_height_ft - self.wall_min_height_ft) * r
                }
            }
            Tile::Floor => 0.0,
        }
    }

    /// Whether the morphed cell at (mx, my) blocks movement
    pub fn is_blocking(
        &self,
        map: &GridMap,
        mx: i32,
        my: i32,
        cam_x: f32,
        cam_y: f32,
        phase: u32,
    ) -> bool {
        self.effective_tile(map, mx, my, cam_x, cam_y, phase).is_solid()
    }

    /// Collision probe for a proposed camera position: samples the four
    /// corners of a padded box against the morphed grid
    pub fn can_move_to(&self, map: &GridMap, nx: f32, ny: f32, phase: u32) -> bool {
        const PAD: f32 = 0.15;
        let (mx0, my0) = ((nx - PAD) as i32, (ny - PAD) as i32);
        let (mx1, my1) = ((nx + PAD) as i32, (ny + PAD) as i32);
        for my in [my0, my1] {
            for mx in [mx0, mx1] {
                if self.is_blocking(map, mx, my, nx, ny, phase) {
                    return false;
                }
            }
        }
        true
    }
}
