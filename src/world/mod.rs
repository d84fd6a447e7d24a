//! World module
//!
//! Contains the tile grid, the parallel height map, and maze generation.

pub mod generation;
pub mod map;
pub mod tile;

pub use map::GridMap;
pub use tile::Tile;
