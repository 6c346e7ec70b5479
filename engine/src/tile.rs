use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Specific terrain in a single level map cell.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Hash,
    Debug,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Tile {
    #[default]
    Wall,
    Floor,
    Door,
    Water,
    Portal,
}

use Tile::*;

impl Tile {
    pub fn blocks_sight(self) -> bool {
        matches!(self, Wall | Door)
    }

    pub fn blocks_movement(self) -> bool {
        matches!(self, Wall | Water)
    }

    pub fn is_walkable(self) -> bool {
        !self.blocks_movement()
    }

    /// Map glyph of the tile.
    pub fn to_char(self) -> char {
        match self {
            Wall => '#',
            Floor => '.',
            Door => '+',
            Water => '~',
            Portal => '>',
        }
    }

    /// Terrain for a map glyph.
    ///
    /// Glyphs that aren't terrain (creature markers) stand on floor, this
    /// returns `None` for them.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '#' => Some(Wall),
            '.' => Some(Floor),
            '+' => Some(Door),
            '~' => Some(Water),
            '>' => Some(Portal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn glyphs_roundtrip() {
        for t in Tile::iter() {
            assert_eq!(Tile::from_char(t.to_char()), Some(t));
        }
        assert_eq!(Tile::from_char('g'), None);
    }

    #[test]
    fn sight_and_movement() {
        assert!(Door.blocks_sight() && Door.is_walkable());
        assert!(!Water.blocks_sight() && Water.blocks_movement());
        assert!(Wall.blocks_sight() && Wall.blocks_movement());
        assert!(Portal.is_walkable());
    }
}
