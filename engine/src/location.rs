use std::{fmt, ops::Add};

use crate::prelude::*;

/// A tile position on a specific level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub level: LevelId,
    pub pos: IVec2,
}

impl Location {
    pub fn new(level: LevelId, pos: IVec2) -> Self {
        Location { level, pos }
    }

    /// Terrain at location, `None` if outside the level bounds.
    pub fn tile(&self, r: &impl AsRef<Runtime>) -> Option<Tile> {
        r.as_ref().level(self.level)?.tile(self.pos)
    }

    pub fn blocks_sight(&self, r: &impl AsRef<Runtime>) -> bool {
        self.tile(r).map_or(true, Tile::blocks_sight)
    }

    pub fn is_walkable(&self, r: &impl AsRef<Runtime>) -> bool {
        self.tile(r).map_or(false, Tile::is_walkable)
    }

    /// All entities placed directly at this location, in arrival order.
    pub fn entities_at<'a>(
        &self,
        r: &'a impl AsRef<Runtime>,
    ) -> impl Iterator<Item = Entity> + 'a {
        r.as_ref().placement.entities_at(*self)
    }

    /// Where stepping onto this location takes you, if it's a portal.
    pub fn portal_exit(&self, r: &impl AsRef<Runtime>) -> Option<Location> {
        r.as_ref().level(self.level)?.portal_exit(self.pos)
    }
}

impl Add<IVec2> for Location {
    type Output = Location;

    fn add(self, rhs: IVec2) -> Self::Output {
        Location {
            pos: self.pos + rhs,
            ..self
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.level, self.pos.x, self.pos.y)
    }
}
