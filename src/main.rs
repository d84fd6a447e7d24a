//! Mazelight demo binary
//!
//! Generates a maze, walks the camera forward for a few simulated seconds,
//! and writes the rendered view plus the minimap out as PNG files. Windowing
//! and input are external collaborators; this binary stands in for them.

use std::path::Path;

use anyhow::{Context, Result};

use mazelight::render::sprites::{Entity, SpriteAtlas, SpriteId};
use mazelight::{
    composite_sprites, render_frame, render_minimap, Camera, MorphLayer, RenderConfig,
    RenderContext,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed: u64 = std::env::args()
        .nth(1)
        .map(|s| s.parse().context("seed must be an integer"))
        .transpose()?
        .unwrap_or(42);

    let config = RenderConfig::load_or_default(Path::new("mazelight.ron"));
    log::info!(
        "mazelight v{}: {}x{} maze, seed {}",
        env!("CARGO_PKG_VERSION"),
        config.maze_width,
        config.maze_height,
        seed
    );

    let map = mazelight::generation::generate(config.maze_width, config.maze_height, seed, &config);
    let morph = MorphLayer::from_config(&config);
    let ctx = RenderContext::new(config.clone());
    let atlas = SpriteAtlas::procedural(64);

    let mut camera = Camera::at_spawn(map.spawn);

    // a couple of demo entities on nearby floor cells
    let entities: Vec<Entity> = map
        .floor_cells()
        .into_iter()
        .filter(|&(x, y)| (x, y) != (camera.x as i32, camera.y as i32))
        .take(2)
        .enumerate()
        .map(|(i, (x, y))| Entity {
            x: x as f32 + 0.5,
            y: y as f32 + 0.5,
            sprite: if i == 0 { SpriteId::ENEMY } else { SpriteId::AMMO },
            alive: true,
        })
        .collect();

    // simulate a short walk so the saved frame is not a wall close-up
    let mut elapsed = 0.0f32;
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        elapsed += dt;
        let phase = morph.phase(elapsed);
        let (dx, dy) = camera.direction();
        let nx = camera.x + dx * config.move_speed * dt;
        let ny = camera.y + dy * config.move_speed * dt;
        let moved_x = morph.can_move_to(&map, nx, camera.y, phase);
        if moved_x {
            camera.x = nx;
        }
        let moved_y = morph.can_move_to(&map, camera.x, ny, phase);
        if moved_y {
            camera.y = ny;
        }
        if !moved_x && !moved_y {
            camera.turn(config.turn_speed * dt);
        }
    }

    let phase = morph.phase(elapsed);
    let mut frame = render_frame(&ctx, &camera, &map, &morph, phase);
    composite_sprites(&ctx, &atlas, &entities, &camera, &mut frame);

    frame
        .framebuffer
        .to_image()
        .save("frame.png")
        .context("saving frame.png")?;

    render_minimap(&ctx.config, &map, &morph, &camera, phase, None)
        .save("minimap.png")
        .context("saving minimap.png")?;

    log::info!(
        "wrote frame.png and minimap.png (camera at {:.2}, {:.2}, phase {})",
        camera.x,
        camera.y,
        phase
    );
    Ok(())
}
