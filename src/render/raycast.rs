//! DDA ray caster
//!
//! For every screen column, walks a ray through the grid to the first solid
//! tile, then draws a perspective-scaled, texture-mapped wall slice into the
//! framebuffer and records the perpendicular distance in the depth buffer.
//! Columns are independent pure functions of (camera, map, morph, phase).

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::morph::MorphLayer;
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::textures::TextureSet;
use crate::world::{GridMap, Tile};

/// Depth recorded for columns whose ray leaves the grid without hitting
pub const MAX_VIEW_DIST: f32 = 32.0;

/// Substitute for 1/0 ray components: the ray never crosses that axis
const INV_DIR_SENTINEL: f32 = 1e30;

/// Perpendicular distances below this are clamped to avoid division blow-up
const MIN_PERP_DIST: f32 = 1e-4;

const CEILING_COLOR: Color = [20, 20, 28, 255];
const FLOOR_COLOR: Color = [38, 38, 46, 255];
/// Fixed darkening for walls hit on a horizontal grid line
const SIDE_SHADE: Color = [0, 0, 0, 60];

/// Everything a render call needs, passed explicitly instead of held in
/// globals so parallel views and test instances stay independent
pub struct RenderContext {
    pub config: RenderConfig,
    pub textures: TextureSet,
}

impl RenderContext {
    pub fn new(config: RenderConfig) -> Self {
        let config = config.normalized();
        let textures = TextureSet::procedural(config.tex_size);
        Self { config, textures }
    }

    pub fn with_textures(config: RenderConfig, textures: TextureSet) -> Self {
        Self {
            config: config.normalized(),
            textures,
        }
    }
}

/// One rendered frame: pixels plus the per-column wall depth
pub struct Frame {
    pub framebuffer: Framebuffer,
    pub depth: Vec<f32>,
}

/// A wall hit found by the DDA walk
struct Hit {
    map_x: i32,
    map_y: i32,
    tile: Tile,
    /// 0 = crossed a vertical grid line (x-step), 1 = horizontal (y-step)
    side: u8,
    perp_dist: f32,
}

/// Render the 3D view for the whole screen
pub fn render_frame(
    ctx: &RenderContext,
    camera: &Camera,
    map: &GridMap,
    morph: &MorphLayer,
    phase: u32,
) -> Frame {
    let w = ctx.config.screen_width;
    let h = ctx.config.screen_height;

    let mut fb = Framebuffer::new(w, h);
    fb.fill_rect(0, 0, w, h / 2, CEILING_COLOR);
    fb.fill_rect(0, h / 2, w, h - h / 2, FLOOR_COLOR);

    let mut depth = vec![MAX_VIEW_DIST; w as usize];

    for col in 0..w {
        let ray_angle =
            camera.heading - ctx.config.half_fov() + (col as f32 + 0.5) * (ctx.config.fov / w as f32);
        let ray_dx = ray_angle.cos();
        let ray_dy = ray_angle.sin();

        let Some(hit) = cast_ray(camera, map, morph, phase, ray_dx, ray_dy) else {
            continue;
        };
        depth[col as usize] = hit.perp_dist;

        draw_wall_slice(ctx, &mut fb, camera, map, morph, phase, col, &hit, ray_dx, ray_dy);
    }

    Frame {
        framebuffer: fb,
        depth,
    }
}

/// DDA walk from the camera cell to the first solid morphed tile.
/// Leaving the grid is a miss, not an error.
fn cast_ray(
    camera: &Camera,
    map: &GridMap,
    morph: &MorphLayer,
    phase: u32,
    ray_dx: f32,
    ray_dy: f32,
) -> Option<Hit> {
    let mut map_x = camera.x as i32;
    let mut map_y = camera.y as i32;

    let inv_dx = if ray_dx != 0.0 { 1.0 / ray_dx } else { INV_DIR_SENTINEL };
    let inv_dy = if ray_dy != 0.0 { 1.0 / ray_dy } else { INV_DIR_SENTINEL };
    let delta_x = inv_dx.abs();
    let delta_y = inv_dy.abs();

    let (step_x, mut side_x) = if ray_dx < 0.0 {
        (-1, (camera.x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - camera.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray_dy < 0.0 {
        (-1, (camera.y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - camera.y) * delta_y)
    };

    loop {
        let side;
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = 0;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = 1;
        }

        if !map.in_bounds(map_x, map_y) {
            return None;
        }

        let tile = morph.effective_tile(map, map_x, map_y, camera.x, camera.y, phase);
        if tile != Tile::Floor {
            let perp_dist = if side == 0 {
                (map_x as f32 - camera.x + (1 - step_x) as f32 * 0.5) * inv_dx
            } else {
                (map_y as f32 - camera.y + (1 - step_y) as f32 * 0.5) * inv_dy
            };
            return Some(Hit {
                map_x,
                map_y,
                tile,
                side,
                perp_dist: perp_dist.max(MIN_PERP_DIST),
            });
        }
    }
}

/// Scale and composite the textured slice for one column
#[allow(clippy::too_many_arguments)]
fn draw_wall_slice(
    ctx: &RenderContext,
    fb: &mut Framebuffer,
    camera: &Camera,
    map: &GridMap,
    morph: &MorphLayer,
    phase: u32,
    col: u32,
    hit: &Hit,
    ray_dx: f32,
    ray_dy: f32,
) {
    let half_h = ctx.config.screen_height as f32 * 0.5;
    let mut line_h = ctx.config.screen_height as f32 / hit.perp_dist;

    if ctx.config.enable_height_variance {
        let height_ft = morph.effective_height(map, hit.map_x, hit.map_y, hit.tile, phase);
        if height_ft > 0.0 {
            let scale = height_ft / ctx.config.player_height_ft;
            if scale > 0.0 {
                line_h *= scale;
            }
        }
    }

    let tex = match hit.tile {
        Tile::Door if door_face_visible(map, hit, ray_dx, ray_dy) => {
            ctx.textures.door(hit.map_x, hit.map_y)
        }
        // non-canonical door faces render as the cell's wall texture
        _ => ctx.textures.wall(hit.map_x, hit.map_y),
    };

    // fractional hit coordinate along the crossed wall line
    let mut wall_x = if hit.side == 0 {
        camera.y + hit.perp_dist * ray_dy
    } else {
        camera.x + hit.perp_dist * ray_dx
    };
    wall_x -= wall_x.floor();

    let tex_size = ctx.config.tex_size;
    let mut tex_x = (wall_x * tex_size as f32) as i32;
    // mirror so textures keep one orientation whichever face is struck
    if (hit.side == 0 && ray_dx > 0.0) || (hit.side == 1 && ray_dy < 0.0) {
        tex_x = tex_size as i32 - tex_x - 1;
    }
    let tex_x = tex_x.clamp(0, tex_size as i32 - 1) as u32;

    let slice_top = half_h - line_h * 0.5;
    let y0 = slice_top.max(0.0) as u32;
    let y1 = (half_h + line_h * 0.5).min(ctx.config.screen_height as f32) as u32;

    for y in y0..y1 {
        let rel = (y as f32 + 0.5 - slice_top) / line_h;
        let tex_y = ((rel * tex_size as f32) as u32).min(tex_size - 1);
        fb.put(col, y, ctx.textures.texel(tex, tex_x, tex_y));
        if hit.side == 1 {
            fb.blend(col, y, SIDE_SHADE);
        }
    }
}

/// Decide whether the struck face of a door cell is its canonical door face.
///
/// Doors show their texture on one face only: the neighbor direction whose
/// corridor continues into more floor, falling back to a parity pick among
/// floor-adjacent directions. Tie-break order is north, south, west, east
/// and must stay that way for reproducible visuals.
fn door_face_visible(map: &GridMap, hit: &Hit, ray_dx: f32, ray_dy: f32) -> bool {
    let (mx, my) = (hit.map_x, hit.map_y);

    let mut floor_dirs: Vec<(i32, i32)> = Vec::with_capacity(4);
    for dir in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        if map.tile_or_wall(mx + dir.0, my + dir.1) == Tile::Floor {
            floor_dirs.push(dir);
        }
    }

    // prefer a direction whose next cell is also floor (a corridor)
    let mut desired = floor_dirs
        .iter()
        .copied()
        .find(|&(dx, dy)| map.tile_or_wall(mx + 2 * dx, my + 2 * dy) == Tile::Floor);

    if desired.is_none() && !floor_dirs.is_empty() {
        let idx = (((mx + my) & 1) as usize) % floor_dirs.len();
        desired = Some(floor_dirs[idx]);
    }

    let Some(desired) = desired else {
        return false;
    };

    let face_dir = if hit.side == 0 {
        if ray_dx > 0.0 {
            (1, 0)
        } else {
            (-1, 0)
        }
    } else if ray_dy > 0.0 {
        (0, 1)
    } else {
        (0, -1)
    };

    face_dir == desired
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(width: u32) -> RenderConfig {
        RenderConfig {
            screen_width: width,
            screen_height: 200,
            enable_morph: false,
            ..Default::default()
        }
    }

    /// 5x5 map, corridor along row 1: floor at (1,1) and (2,1), wall at (3,1)
    fn corridor_map() -> GridMap {
        let mut map = GridMap::new(5, 5);
        map.set_tile(1, 1, Tile::Floor);
        map.set_tile(2, 1, Tile::Floor);
        map
    }

    fn render(ctx: &RenderContext, camera: &Camera, map: &GridMap) -> Frame {
        let morph = MorphLayer::from_config(&ctx.config);
        render_frame(ctx, camera, map, &morph, 0)
    }

    #[test]
    fn test_single_ray_down_corridor() {
        // with one column the center ray points exactly along the heading
        let ctx = RenderContext::new(test_config(1));
        let map = corridor_map();

        // one tile unit from the wall plane at x = 3
        let camera = Camera::new(2.0, 1.5, 0.0);
        let frame = render(&ctx, &camera, &map);
        assert!((frame.depth[0] - 1.0).abs() < 1e-4);

        // from the cell center the plane is 1.5 units out
        let camera = Camera::new(1.5, 1.5, 0.0);
        let frame = render(&ctx, &camera, &map);
        assert!((frame.depth[0] - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_depth_grows_backing_away() {
        let ctx = RenderContext::new(test_config(1));
        let map = corridor_map();
        let mut previous = 0.0;
        for camera_x in [2.4f32, 2.0, 1.7, 1.4, 1.1] {
            let camera = Camera::new(camera_x, 1.5, 0.0);
            let frame = render(&ctx, &camera, &map);
            assert!(
                frame.depth[0] > previous,
                "depth not monotonic at x = {}",
                camera_x
            );
            previous = frame.depth[0];
        }
    }

    #[test]
    fn test_miss_leaves_background_and_max_depth() {
        let ctx = RenderContext::new(test_config(3));
        // fully open map: rays exit the grid
        let mut map = GridMap::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                map.set_tile(x, y, Tile::Floor);
            }
        }
        let camera = Camera::new(2.5, 2.5, 0.3);
        let frame = render(&ctx, &camera, &map);
        for col in 0..3usize {
            assert_eq!(frame.depth[col], MAX_VIEW_DIST);
        }
        // sky above the midline, floor color below
        assert_eq!(frame.framebuffer.get(1, 10), CEILING_COLOR);
        assert_eq!(frame.framebuffer.get(1, 190), FLOOR_COLOR);
    }

    #[test]
    fn test_wall_slice_is_drawn_centered() {
        let ctx = RenderContext::new(test_config(1));
        let map = corridor_map();
        let camera = Camera::new(1.5, 1.5, 0.0);
        let frame = render(&ctx, &camera, &map);

        // perp 1.5 -> slice height 200/1.5 = 133 px centered on y = 100
        let mid = frame.framebuffer.get(0, 100);
        assert_ne!(mid, CEILING_COLOR);
        assert_ne!(mid, FLOOR_COLOR);
        assert_eq!(frame.framebuffer.get(0, 10), CEILING_COLOR);
        assert_eq!(frame.framebuffer.get(0, 195), FLOOR_COLOR);
    }

    #[test]
    fn test_height_variance_scales_slice() {
        let mut config = test_config(1);
        config.enable_height_variance = true;
        let ctx = RenderContext::new(config);

        let mut map = corridor_map();
        // a squat wall, half the player height
        map.set_height_ft(3, 1, 3.0);
        let camera = Camera::new(2.0, 1.5, 0.0);
        let frame = render(&ctx, &camera, &map);

        // full-height slice would cover y = 100; the short one must not
        // reach as far up as the unscaled slice top (y = 0 at perp 1.0)
        assert_eq!(frame.framebuffer.get(0, 20), CEILING_COLOR);
        assert_ne!(frame.framebuffer.get(0, 100), CEILING_COLOR);
    }

    #[test]
    fn test_near_zero_direction_uses_sentinel() {
        // heading straight up: ray_dx == cos(pi/2) is tiny but the render
        // must not produce NaN depths
        let ctx = RenderContext::new(test_config(5));
        let map = corridor_map();
        let camera = Camera::new(1.5, 1.5, std::f32::consts::FRAC_PI_2);
        let frame = render(&ctx, &camera, &map);
        for d in frame.depth {
            assert!(d.is_finite());
            assert!(d > 0.0);
        }
    }

    #[test]
    fn test_door_face_heuristic_prefers_corridor() {
        // corridor running east-west through a door at (2,1):
        // floor (1,1) and (3,1), floor continues to (4,1)? no -> wall.
        let mut map = GridMap::new(7, 5);
        for x in 1..=5 {
            map.set_tile(x, 1, Tile::Floor);
        }
        map.set_tile(2, 1, Tile::Door);

        let hit = Hit {
            map_x: 2,
            map_y: 1,
            tile: Tile::Door,
            side: 0,
            perp_dist: 1.0,
        };
        // west of the door the corridor dead-ends at (0,1); east of it the
        // floor continues to (4,1), so the canonical face is east and only
        // a ray traveling +x sees the door texture
        assert!(door_face_visible(&map, &hit, 1.0, 0.0));
        assert!(!door_face_visible(&map, &hit, -1.0, 0.0));
    }

    #[test]
    fn test_door_face_parity_fallback() {
        // dead-end door: floor on both sides, no continuation either way
        let mut map = GridMap::new(5, 5);
        map.set_tile(1, 2, Tile::Floor);
        map.set_tile(3, 2, Tile::Floor);
        map.set_tile(2, 2, Tile::Door);

        let hit = Hit {
            map_x: 2,
            map_y: 2,
            tile: Tile::Door,
            side: 0,
            perp_dist: 1.0,
        };
        // floor_dirs in N,S,W,E order is [west, east]; (2+2)&1 == 0 -> west
        assert!(door_face_visible(&map, &hit, -1.0, 0.0));
        assert!(!door_face_visible(&map, &hit, 1.0, 0.0));
    }

    #[test]
    fn test_columns_are_independent_of_order() {
        // rendering twice yields identical frames (no cross-column state)
        let ctx = RenderContext::new(test_config(64));
        let config = RenderConfig::default();
        let map = crate::world::generation::generate(15, 15, 42, &config);
        let camera = Camera::at_spawn(map.spawn);
        let a = render(&ctx, &camera, &map);
        let b = render(&ctx, &camera, &map);
        assert_eq!(a.depth, b.depth);
    }
}
