use std::fmt;

use util::BitGrid;

use crate::prelude::*;

/// Index of a level in the runtime.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct LevelId(pub(crate) u32);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Connection from a tile on one level to a tile on another.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Portal {
    pub at: IVec2,
    pub exit: Location,
}

/// Terrain of a single level.
///
/// The level owns its map geometry and the transparency map derived from
/// it. Terrain does not change after loading, so neither does transparency.
#[derive(Clone, Debug)]
pub struct Level {
    name: String,
    size: IVec2,
    tiles: Vec<Tile>,
    /// Cells that block sight.
    opaque: BitGrid,
    portals: HashMap<IVec2, Location>,
}

impl Level {
    pub fn new(name: impl Into<String>, size: IVec2, tiles: Vec<Tile>) -> Self {
        assert_eq!(
            tiles.len(),
            (size.x * size.y) as usize,
            "Level::new: tile count does not match size"
        );

        let opaque = BitGrid::from_fn(size, |p| {
            tiles[(p.y * size.x + p.x) as usize].blocks_sight()
        });

        Level {
            name: name.into(),
            size,
            tiles,
            opaque,
            portals: Default::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(IVec2::ZERO).all() && p.cmplt(self.size).all()
    }

    /// Iterate all cell positions of the level.
    pub fn points(&self) -> impl Iterator<Item = IVec2> {
        self.opaque.points()
    }

    pub fn tile(&self, p: IVec2) -> Option<Tile> {
        self.contains(p)
            .then(|| self.tiles[(p.y * self.size.x + p.x) as usize])
    }

    /// Whether the cell blocks sight, everything outside the level does.
    pub fn blocks_sight(&self, p: IVec2) -> bool {
        !self.contains(p) || self.opaque.get(p)
    }

    pub fn transparency(&self) -> &BitGrid {
        &self.opaque
    }

    pub(crate) fn add_portal(&mut self, portal: Portal) {
        self.portals.insert(portal.at, portal.exit);
    }

    pub fn portal_exit(&self, p: IVec2) -> Option<Location> {
        self.portals.get(&p).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transparency_follows_terrain() {
        use Tile::*;
        let level = Level::new(
            "test",
            ivec2(3, 2),
            vec![Wall, Floor, Door, Water, Floor, Portal],
        );

        assert!(level.blocks_sight(ivec2(0, 0)));
        assert!(!level.blocks_sight(ivec2(1, 0)));
        assert!(level.blocks_sight(ivec2(2, 0)));
        assert!(!level.blocks_sight(ivec2(0, 1)));
        assert!(level.blocks_sight(ivec2(-1, 1)));
        assert!(level.blocks_sight(ivec2(3, 1)));
        assert_eq!(level.transparency().count(), 2);
        assert_eq!(level.tile(ivec2(2, 1)), Some(Portal));
        assert_eq!(level.tile(ivec2(2, 2)), None);
    }
}
