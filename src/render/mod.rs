//! Render module
//!
//! Software ray-casting renderer, billboard sprite compositor, minimap
//! overlay, and the pixel/texture plumbing they share.

pub mod framebuffer;
pub mod minimap;
pub mod raycast;
pub mod sprites;
pub mod textures;

pub use framebuffer::{Color, Framebuffer};
pub use minimap::render_minimap;
pub use raycast::{render_frame, Frame, RenderContext, MAX_VIEW_DIST};
pub use sprites::{composite_sprites, Entity, SpriteAtlas, SpriteId};
pub use textures::TextureSet;
