//! Procedural maze generation
//!
//! Randomized recursive backtracking carved with an explicit stack, followed
//! by door sprinkling along straight wall segments, per-wall height
//! assignment, and spawn selection. Generation is a total function: any
//! requested size is normalized to odd dimensions >= 5 and always succeeds.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{GridMap, Tile};
use crate::config::RenderConfig;

/// Generate a maze with the given dimensions and seed
pub fn generate(width: i32, height: i32, seed: u64, config: &RenderConfig) -> GridMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let (width, height) = normalize_dims(width, height);

    let mut map = GridMap::new(width, height);
    carve_maze(&mut rng, &mut map);

    if config.door_fraction > 0.0 {
        sprinkle_doors(&mut rng, &mut map, config.door_fraction);
    }

    assign_heights(&mut rng, &mut map, config);
    pick_spawn(&mut rng, &mut map);

    log::debug!(
        "generated {}x{} maze: {} floor, {} door",
        map.width,
        map.height,
        map.count(Tile::Floor),
        map.count(Tile::Door)
    );

    map
}

/// Force dimensions odd and at least 5
pub fn normalize_dims(width: i32, height: i32) -> (i32, i32) {
    (width.max(5) | 1, height.max(5) | 1)
}

/// Carve corridors from (1,1) with an iterative backtracker
fn carve_maze(rng: &mut StdRng, map: &mut GridMap) {
    map.set_tile(1, 1, Tile::Floor);
    let mut stack: Vec<(i32, i32)> = vec![(1, 1)];

    while let Some(&(x, y)) = stack.last() {
        let mut dirs: [(i32, i32); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];
        dirs.shuffle(rng);

        let mut advanced = false;
        for (dx, dy) in dirs {
            let nx = x + dx;
            let ny = y + dy;
            // target must be an uncarved interior cell, not on the outer ring
            if nx < 1 || nx >= map.width - 1 || ny < 1 || ny >= map.height - 1 {
                continue;
            }
            if map.tile(nx, ny) != Some(Tile::Wall) {
                continue;
            }
            map.set_tile(x + dx / 2, y + dy / 2, Tile::Floor);
            map.set_tile(nx, ny, Tile::Floor);
            stack.push((nx, ny));
            advanced = true;
            break;
        }

        if !advanced {
            stack.pop();
        }
    }
}

/// Convert a fraction of wall cells sitting between two floor cells into doors
fn sprinkle_doors(rng: &mut StdRng, map: &mut GridMap, fraction: f32) {
    let mut candidates: Vec<(i32, i32)> = Vec::new();
    for y in 1..map.height - 1 {
        for x in 1..map.width - 1 {
            if map.tile(x, y) != Some(Tile::Wall) {
                continue;
            }
            let ns = map.tile_or_wall(x, y - 1) == Tile::Floor
                && map.tile_or_wall(x, y + 1) == Tile::Floor;
            let ew = map.tile_or_wall(x - 1, y) == Tile::Floor
                && map.tile_or_wall(x + 1, y) == Tile::Floor;
            if ns || ew {
                candidates.push((x, y));
            }
        }
    }

    candidates.shuffle(rng);
    let count = ((map.width * map.height) as f32 * fraction).round() as usize;
    for &(x, y) in candidates.iter().take(count) {
        map.set_tile(x, y, Tile::Door);
    }
}

/// Freeze a height for every solid cell: uniform per wall, fixed per door
fn assign_heights(rng: &mut StdRng, map: &mut GridMap, config: &RenderConfig) {
    for y in 0..map.height {
        for x in 0..map.width {
            let height = match map.tile_or_wall(x, y) {
                Tile::Wall => {
                    rng.gen_range(config.wall_min_height_ft..=config.wall_max_height_ft)
                }
                Tile::Door => config.door_height_ft,
                Tile::Floor => 0.0,
            };
            map.set_height_ft(x, y, height);
        }
    }
}

/// Pick a uniformly random floor cell center as the camera spawn.
/// Degenerate grids with no floor get their center cell forced open.
fn pick_spawn(rng: &mut StdRng, map: &mut GridMap) {
    let open: Vec<(i32, i32)> = map
        .floor_cells()
        .into_iter()
        .filter(|&(x, y)| x >= 1 && x < map.width - 1 && y >= 1 && y < map.height - 1)
        .collect();

    let (cx, cy) = match open.choose(rng) {
        Some(&cell) => cell,
        None => {
            let center = (map.width / 2, map.height / 2);
            map.set_tile(center.0, center.1, Tile::Floor);
            map.set_height_ft(center.0, center.1, 0.0);
            center
        }
    };
    map.spawn = (cx as f32 + 0.5, cy as f32 + 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn no_doors() -> RenderConfig {
        RenderConfig {
            door_fraction: 0.0,
            ..Default::default()
        }
    }

    /// Flood fill over floor cells starting from the spawn cell
    fn reachable_floor(map: &GridMap) -> usize {
        let start = (map.spawn.0 as i32, map.spawn.1 as i32);
        let mut seen = vec![false; (map.width * map.height) as usize];
        let mut queue = VecDeque::new();
        seen[map.xy_to_idx(start.0, start.1)] = true;
        queue.push_back(start);
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let (nx, ny) = (x + dx, y + dy);
                if map.tile(nx, ny) == Some(Tile::Floor) && !seen[map.xy_to_idx(nx, ny)] {
                    seen[map.xy_to_idx(nx, ny)] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        count
    }

    /// Count horizontal + vertical floor-floor adjacencies
    fn floor_edges(map: &GridMap) -> usize {
        let mut edges = 0;
        for y in 0..map.height {
            for x in 0..map.width {
                if map.tile(x, y) != Some(Tile::Floor) {
                    continue;
                }
                if map.tile(x + 1, y) == Some(Tile::Floor) {
                    edges += 1;
                }
                if map.tile(x, y + 1) == Some(Tile::Floor) {
                    edges += 1;
                }
            }
        }
        edges
    }

    #[test]
    fn test_dimensions_normalized() {
        assert_eq!(normalize_dims(4, 4), (5, 5));
        assert_eq!(normalize_dims(8, 6), (9, 7));
        assert_eq!(normalize_dims(-3, 0), (5, 5));
        assert_eq!(normalize_dims(31, 31), (31, 31));
    }

    #[test]
    fn test_connectivity_from_spawn() {
        for seed in [0u64, 1, 42, 999] {
            let map = generate(21, 17, seed, &no_doors());
            assert_eq!(
                reachable_floor(&map),
                map.count(Tile::Floor),
                "seed {} produced unreachable floor",
                seed
            );
        }
    }

    #[test]
    fn test_acyclic_before_doors() {
        // a perfect maze is a spanning tree: edges == floor cells - 1
        for seed in [7u64, 42, 12345] {
            let map = generate(25, 25, seed, &no_doors());
            assert_eq!(floor_edges(&map), map.count(Tile::Floor) - 1);
        }
    }

    #[test]
    fn test_boundary_ring_stays_solid() {
        let config = RenderConfig {
            door_fraction: 0.05,
            ..Default::default()
        };
        let map = generate(15, 15, 3, &config);
        for x in 0..map.width {
            assert_ne!(map.tile(x, 0), Some(Tile::Floor));
            assert_ne!(map.tile(x, map.height - 1), Some(Tile::Floor));
        }
        for y in 0..map.height {
            assert_ne!(map.tile(0, y), Some(Tile::Floor));
            assert_ne!(map.tile(map.width - 1, y), Some(Tile::Floor));
        }
    }

    #[test]
    fn test_doors_sit_between_floor_pairs() {
        let config = RenderConfig {
            door_fraction: 0.05,
            ..Default::default()
        };
        let map = generate(31, 31, 11, &config);
        assert!(map.count(Tile::Door) > 0, "expected at least one door");
        for y in 0..map.height {
            for x in 0..map.width {
                if map.tile(x, y) != Some(Tile::Door) {
                    continue;
                }
                let ns = map.tile_or_wall(x, y - 1) == Tile::Floor
                    && map.tile_or_wall(x, y + 1) == Tile::Floor;
                let ew = map.tile_or_wall(x - 1, y) == Tile::Floor
                    && map.tile_or_wall(x + 1, y) == Tile::Floor;
                assert!(ns || ew, "door at ({}, {}) not between floors", x, y);
            }
        }
    }

    #[test]
    fn test_heights_frozen_in_range() {
        let config = RenderConfig::default();
        let map = generate(21, 21, 5, &config);
        for y in 0..map.height {
            for x in 0..map.width {
                let h = map.height_ft(x, y);
                match map.tile(x, y).unwrap() {
                    Tile::Wall => assert!(
                        (config.wall_min_height_ft..=config.wall_max_height_ft).contains(&h)
                    ),
                    Tile::Door => assert_eq!(h, config.door_height_ft),
                    Tile::Floor => assert_eq!(h, 0.0),
                }
            }
        }
    }

    #[test]
    fn test_spawn_is_floor_center() {
        let map = generate(17, 17, 9, &no_doors());
        let (sx, sy) = map.spawn;
        assert_eq!(sx.fract(), 0.5);
        assert_eq!(sy.fract(), 0.5);
        assert_eq!(map.tile(sx as i32, sy as i32), Some(Tile::Floor));
    }

    #[test]
    fn test_seed_42_reproducible() {
        // end-to-end scenario: fixed seed, identical layout every run
        let config = RenderConfig::default();
        let a = generate(9, 9, 42, &config);
        let b = generate(9, 9, 42, &config);
        assert_eq!(a.width, b.width);
        assert_eq!(a.height, b.height);
        assert_eq!(a.spawn, b.spawn);
        for y in 0..a.height {
            for x in 0..a.width {
                assert_eq!(a.tile(x, y), b.tile(x, y));
                assert_eq!(a.height_ft(x, y), b.height_ft(x, y));
            }
        }
    }
}
