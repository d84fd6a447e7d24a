//! Minimap overlay
//!
//! Top-down redraw of the morphed grid with the camera icon, heading line
//! and FOV cone. Consults the morph layer for every cell so the overhead
//! view always agrees with what the 3D view is rendering.

use image::{Rgba, RgbaImage};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::morph::MorphLayer;
use crate::world::GridMap;

const BG_COLOR: [u8; 4] = [0, 0, 0, 120];
const PLAYER_COLOR: [u8; 4] = [255, 70, 90, 255];
const FOV_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Cell size in pixels when none is requested: compact, readable maps
fn auto_cell_px(map: &GridMap) -> u32 {
    let max_dim = map.width.max(map.height).max(1) as u32;
    (220 / max_dim).clamp(3, 12)
}

/// Render the minimap as a standalone RGBA overlay image
pub fn render_minimap(
    config: &RenderConfig,
    map: &GridMap,
    morph: &MorphLayer,
    camera: &Camera,
    phase: u32,
    cell_px: Option<u32>,
) -> RgbaImage {
    let cell = cell_px.unwrap_or_else(|| auto_cell_px(map)).max(1);
    let w = map.width as u32 * cell;
    let h = map.height as u32 * cell;
    let mut img = RgbaImage::from_pixel(w, h, Rgba(BG_COLOR));

    for y in 0..map.height {
        for x in 0..map.width {
            let tile = morph.effective_tile(map, x, y, camera.x, camera.y, phase);
            let color = Rgba(tile.minimap_color());
            for py in 0..cell {
                for px in 0..cell {
                    img.put_pixel(x as u32 * cell + px, y as u32 * cell + py, color);
                }
            }
        }
    }

    let px = camera.x * cell as f32;
    let py = camera.y * cell as f32;

    // heading line
    let (dx, dy) = camera.direction();
    let dir_len = (3 * cell).max(10) as f32;
    draw_line(&mut img, px, py, px + dx * dir_len, py + dy * dir_len, PLAYER_COLOR);

    // FOV cone bounds
    let fov_len = (4 * cell).max(16) as f32;
    for angle in [camera.heading - config.half_fov(), camera.heading + config.half_fov()] {
        draw_line(
            &mut img,
            px,
            py,
            px + angle.cos() * fov_len,
            py + angle.sin() * fov_len,
            FOV_COLOR,
        );
    }

    // camera dot last, on top of its own cone lines
    let radius = (cell / 3).max(2) as f32;
    draw_disc(&mut img, px, py, radius, PLAYER_COLOR);

    img
}

fn put_clipped(img: &mut RgbaImage, x: i32, y: i32, color: [u8; 4]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgba(color));
    }
}

fn draw_disc(img: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
    let r = radius.ceil() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            if ((dx * dx + dy * dy) as f32).sqrt() <= radius {
                put_clipped(img, cx as i32 + dx, cy as i32 + dy, color);
            }
        }
    }
}

fn draw_line(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 4]) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        put_clipped(img, x as i32, y as i32, color);
    }
}
