//! Mazelight - a Wolfenstein-style software raycaster
//!
//! Renders a first-person 2.5D view of a grid-based maze using per-column
//! DDA ray casting, generates that maze procedurally, and perturbs distant
//! tiles through a deterministic, time-phased morph layer.

pub mod camera;
pub mod config;
pub mod error;
pub mod morph;
pub mod render;
pub mod world;

// Re-export commonly used types
pub use camera::Camera;
pub use config::RenderConfig;
pub use error::ConfigError;
pub use morph::MorphLayer;
pub use render::{
    composite_sprites, render_frame, render_minimap, Entity, Frame, Framebuffer, RenderContext,
    SpriteAtlas, SpriteId, TextureSet,
};
pub use world::{generation, GridMap, Tile};
