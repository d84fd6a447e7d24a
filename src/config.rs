//! Render configuration
//!
//! All tunables the core recognizes, gathered into one explicit value that
//! gets passed into every call instead of living in ambient globals. Loadable
//! from a RON file with fallback to hardcoded defaults.

use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Field of view bounds in radians (20 to 120 degrees)
pub const FOV_MIN: f32 = 20.0 * PI / 180.0;
pub const FOV_MAX: f32 = 120.0 * PI / 180.0;

/// Complete configuration for the renderer core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Framebuffer width in pixels
    pub screen_width: u32,
    /// Framebuffer height in pixels
    pub screen_height: u32,
    /// Horizontal field of view in radians
    pub fov: f32,
    /// Movement speed in tile units per second (consumed upstream)
    pub move_speed: f32,
    /// Turn speed in radians per second (consumed upstream)
    pub turn_speed: f32,
    /// Square texture size in pixels
    pub tex_size: u32,
    /// Maze dimensions requested at generation time (clamped odd, >= 5)
    pub maze_width: i32,
    pub maze_height: i32,
    /// Fraction of cells converted to doors during generation
    pub door_fraction: f32,
    /// Wall height range in feet, frozen per wall at generation
    pub wall_min_height_ft: f32,
    pub wall_max_height_ft: f32,
    /// Fixed door height in feet
    pub door_height_ft: f32,
    /// Eye height used to scale projected wall heights
    pub player_height_ft: f32,
    /// Radius around the camera that never morphs, in tile units
    pub safe_radius: f32,
    /// Probability that a distant tile flips during a phase
    pub flip_probability: f32,
    /// Seconds per morph phase
    pub phase_period: f32,
    /// Master switch for the morph layer
    pub enable_morph: bool,
    /// Scale projected wall heights by the per-tile height attribute
    pub enable_height_variance: bool,
    /// Smallest billboard size in pixels
    pub sprite_min_size_px: u32,
    /// Inverse-distance billboard scale factor
    pub sprite_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fov: PI / 3.0, // 60 degrees
            move_speed: 3.0,
            turn_speed: 2.2,
            tex_size: 64,
            maze_width: 32,
            maze_height: 32,
            door_fraction: 0.0015,
            wall_min_height_ft: 6.0,
            wall_max_height_ft: 13.0,
            door_height_ft: 7.0,
            player_height_ft: 6.0,
            safe_radius: 6.0,
            flip_probability: 0.18,
            phase_period: 3.5,
            enable_morph: true,
            enable_height_variance: false,
            sprite_min_size_px: 12,
            sprite_scale: 0.9,
        }
    }
}

impl RenderConfig {
    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: RenderConfig = ron::from_str(&text)?;
        Ok(config.normalized())
    }

    /// Load from a RON file, falling back to defaults if missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("could not load {}: {}. Using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp every field into its sane range
    pub fn normalized(mut self) -> Self {
        self.screen_width = self.screen_width.max(1);
        self.screen_height = self.screen_height.max(1);
        self.fov = self.fov.clamp(FOV_MIN, FOV_MAX);
        self.tex_size = self.tex_size.max(1);
        self.door_fraction = self.door_fraction.clamp(0.0, 1.0);
        self.wall_min_height_ft = self.wall_min_height_ft.max(0.0);
        self.wall_max_height_ft = self.wall_max_height_ft.max(self.wall_min_height_ft);
        self.door_height_ft = self.door_height_ft.max(0.0);
        self.player_height_ft = self.player_height_ft.max(0.1);
        self.safe_radius = self.safe_radius.max(0.0);
        self.flip_probability = self.flip_probability.clamp(0.0, 1.0);
        self.phase_period = self.phase_period.max(0.001);
        self.sprite_scale = self.sprite_scale.max(0.0);
        self
    }

    /// Half of the field of view, used all over the column math
    #[inline]
    pub fn half_fov(&self) -> f32 {
        self.fov * 0.5
    }
}
