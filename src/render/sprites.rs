//! Billboard sprite compositor
//!
//! Projects point entities as camera-facing billboards, painted back to
//! front and depth-tested per pixel column against the ray caster's depth
//! buffer, so sprites sit correctly behind nearer walls.

use std::collections::HashMap;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::camera::{normalize_relative, Camera};
use crate::render::raycast::{Frame, RenderContext};

/// Entities just outside the frustum are kept; avoids pop-in at the edge
const CULL_MARGIN: f32 = 0.6;
/// Sprites must be strictly nearer than the wall, with a small tolerance
const DEPTH_TOLERANCE: f32 = 0.01;

/// Unique identifier for a sprite image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

impl SpriteId {
    pub const ENEMY: SpriteId = SpriteId(0);
    pub const AMMO: SpriteId = SpriteId(1);
    pub const MEDKIT: SpriteId = SpriteId(2);
}

/// A point entity supplied by gameplay logic each frame, read-only here
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub sprite: SpriteId,
    pub alive: bool,
}

/// Sprite images keyed by id, with procedural fallbacks
pub struct SpriteAtlas {
    size: u32,
    images: HashMap<SpriteId, RgbaImage>,
}

impl SpriteAtlas {
    /// Colored-disc placeholders for the builtin ids
    pub fn procedural(size: u32) -> Self {
        let mut images = HashMap::new();
        images.insert(SpriteId::ENEMY, disc(size, [240, 80, 200, 255]));
        images.insert(SpriteId::AMMO, disc(size, [250, 230, 80, 255]));
        images.insert(SpriteId::MEDKIT, disc(size, [120, 220, 120, 255]));
        Self { size, images }
    }

    /// Add or replace a sprite image. Images are normalized to the atlas
    /// size so column sampling can index any sprite uniformly.
    pub fn insert(&mut self, id: SpriteId, image: RgbaImage) {
        let image = if image.width() == self.size && image.height() == self.size {
            image
        } else {
            imageops::resize(&image, self.size, self.size, imageops::FilterType::Nearest)
        };
        self.images.insert(id, image);
    }

    pub fn get(&self, id: SpriteId) -> Option<&RgbaImage> {
        self.images.get(&id)
    }
}

/// Composite all alive entities into an already ray-cast frame
pub fn composite_sprites(
    ctx: &RenderContext,
    atlas: &SpriteAtlas,
    entities: &[Entity],
    camera: &Camera,
    frame: &mut Frame,
) {
    let screen_w = ctx.config.screen_width as i32;
    let screen_h = ctx.config.screen_height as i32;

    // painter's algorithm: farthest first
    let mut order: Vec<(f32, &Entity)> = entities
        .iter()
        .filter(|e| e.alive)
        .map(|e| (camera.distance_to(e.x, e.y), e))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (dist, entity) in order {
        if dist < 1e-3 {
            continue;
        }
        let Some(sprite) = atlas.get(entity.sprite) else {
            log::warn!("no sprite image for id {:?}", entity.sprite);
            continue;
        };

        let angle =
            normalize_relative((entity.y - camera.y).atan2(entity.x - camera.x) - camera.heading);
        if angle.abs() > ctx.config.half_fov() + CULL_MARGIN {
            continue;
        }

        let screen_x = ((0.5 + angle / ctx.config.fov) * screen_w as f32) as i32;
        let size = ((screen_h as f32 / dist) * ctx.config.sprite_scale)
            .max(ctx.config.sprite_min_size_px as f32) as i32;

        let top = screen_h / 2 - size / 2;
        let left = screen_x - size / 2;

        for sx in 0..size {
            let x = left + sx;
            if x < 0 || x >= screen_w {
                continue;
            }
            // depth test against the wall hit recorded for this column
            if dist >= frame.depth[x as usize] + DEPTH_TOLERANCE {
                continue;
            }
            let tex_x = (sx as u32 * atlas.size) / size as u32;
            for sy in 0..size {
                let y = top + sy;
                if y < 0 || y >= screen_h {
                    continue;
                }
                let tex_y = (sy as u32 * atlas.size) / size as u32;
                let texel = sprite
                    .get_pixel(tex_x.min(atlas.size - 1), tex_y.min(atlas.size - 1))
                    .0;
                frame.framebuffer.blend(x as u32, y as u32, texel);
            }
        }
    }
}

/// Filled circle on a transparent background with a dark rim
fn disc(size: u32, color: [u8; 4]) -> RgbaImage {
    let center = size as f32 / 2.0;
    let radius = center;
    RgbaImage::from_fn(size, size, |x, y| {
        let d = (x as f32 + 0.5 - center).hypot(y as f32 + 0.5 - center);
        if d > radius {
            image::Rgba([0, 0, 0, 0])
        } else if d > radius - 2.0 {
            image::Rgba([0, 0, 0, 180])
        } else {
            image::Rgba(color)
        }
    })
}
