//! Tile definitions

use serde::{Deserialize, Serialize};

/// A single cell of the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Door,
}

impl Tile {
    /// Solid tiles stop rays and block movement
    #[inline]
    pub fn is_solid(&self) -> bool {
        !matches!(self, Tile::Floor)
    }

    /// RGBA color used by the minimap
    pub fn minimap_color(&self) -> [u8; 4] {
        match self {
            Tile::Wall => [70, 70, 80, 255],
            Tile::Floor => [150, 150, 160, 255],
            Tile::Door => [230, 200, 60, 255],
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solidity() {
        assert!(!Tile::Floor.is_solid());
        assert!(Tile::Wall.is_solid());
        assert!(Tile::Door.is_solid());
    }
}
