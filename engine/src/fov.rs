//! Logic for computing what creatures see and remember seeing.

use util::BitGrid;

use crate::{prelude::*, FOV_RADIUS};

/// Viewer capability, a creature with a field of view and map memory.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub radius: i32,
    /// Whether the faces of sight-blocking cells are seen.
    pub light_walls: bool,
    /// Cells seen from the current position.
    visible: HashSet<Location>,
    /// Cells ever seen, per level.
    explored: HashMap<LevelId, BitGrid>,
}

impl Default for Viewer {
    fn default() -> Self {
        Viewer::new(FOV_RADIUS)
    }
}

impl Viewer {
    pub fn new(radius: i32) -> Self {
        Viewer {
            radius,
            light_walls: true,
            visible: Default::default(),
            explored: Default::default(),
        }
    }

    pub fn is_visible(&self, loc: Location) -> bool {
        self.visible.contains(&loc)
    }

    pub fn is_explored(&self, loc: Location) -> bool {
        self.explored
            .get(&loc.level)
            .map_or(false, |grid| grid.get(loc.pos))
    }

    pub fn visible(&self) -> impl Iterator<Item = Location> + '_ {
        self.visible.iter().copied()
    }

    /// Explored cells of a level, `None` if the level was never visited.
    pub fn explored(&self, level: LevelId) -> Option<&BitGrid> {
        self.explored.get(&level)
    }

    /// Union a set of seen cells into the level's memory.
    fn mark_explored(&mut self, level: LevelId, seen: &BitGrid) {
        self.explored
            .entry(level)
            .or_insert_with(|| BitGrid::new(seen.size()))
            .union_with(seen);
    }
}

impl Runtime {
    /// Iterate cells visible from `loc` within `radius`.
    ///
    /// May repeat cells.
    pub fn fov_from(
        &self,
        loc: Location,
        radius: i32,
        light_walls: bool,
    ) -> impl Iterator<Item = Location> + '_ {
        let level = self.level(loc.level);
        fov::Fov::new(
            move |[x, y]: [i32; 2]| {
                level.map_or(true, |l| l.blocks_sight(loc.pos + ivec2(x, y)))
            },
            radius,
            light_walls,
        )
        .map(move |v: IVec2| loc + v)
    }
}

impl Entity {
    pub fn viewer(&self, r: &impl AsRef<Runtime>) -> Option<Viewer> {
        self.try_get::<Viewer>(r)
    }

    /// Recompute the field of view and update map memory.
    ///
    /// Does nothing for entities without the viewer capability.
    pub(crate) fn scan_fov(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        let Some((radius, light_walls)) =
            self.try_get::<Viewer>(r).map(|v| (v.radius, v.light_walls))
        else {
            return;
        };

        let visible: HashSet<Location> = match self.loc(r) {
            Some(loc) => r.fov_from(loc, radius, light_walls).collect(),
            None => Default::default(),
        };

        let cells: Vec<IVec2> = visible.iter().map(|l| l.pos).collect();
        self.try_mut::<Viewer, _>(r, |v| v.visible = visible);

        if let Some(loc) = self.loc(r) {
            self.mark_explored(r, loc.level, cells);
        }
    }

    /// Add cells of a level into the viewer's map memory.
    pub fn mark_explored(
        &self,
        r: &mut impl AsMut<Runtime>,
        level: LevelId,
        cells: impl IntoIterator<Item = IVec2>,
    ) {
        let r = r.as_mut();
        let Some(size) = r.level(level).map(|l| l.size()) else {
            return;
        };
        let mut seen = BitGrid::new(size);
        seen.extend(cells);
        self.try_mut::<Viewer, _>(r, |v| v.mark_explored(level, &seen));
    }

    pub fn is_explored(&self, r: &impl AsRef<Runtime>, loc: Location) -> bool {
        r.as_ref()
            .ecs
            .get::<&Viewer>(**self)
            .map_or(false, |v| v.is_explored(loc))
    }

    /// Whether the entity currently sees the location.
    pub fn is_visible(&self, r: &impl AsRef<Runtime>, loc: Location) -> bool {
        r.as_ref()
            .ecs
            .get::<&Viewer>(**self)
            .map_or(false, |v| v.is_visible(loc))
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn first_visit_initializes_memory() {
        let mut viewer = Viewer::new(4);
        let level = LevelId(1);
        let loc = Location::new(level, ivec2(2, 3));
        assert!(viewer.explored(level).is_none());
        assert!(!viewer.is_explored(loc));

        let mut seen = BitGrid::new(ivec2(10, 10));
        seen.insert(ivec2(2, 3));
        viewer.mark_explored(level, &seen);
        assert_eq!(viewer.explored(level).map(|g| g.count()), Some(1));
        assert!(viewer.is_explored(loc));
        assert!(!viewer.is_explored(Location::new(LevelId(0), ivec2(2, 3))));
    }

    #[quickcheck]
    fn explored_never_shrinks(scans: Vec<Vec<(u8, u8)>>) -> bool {
        let size = ivec2(16, 16);
        let level = LevelId(0);
        let mut viewer = Viewer::new(4);
        let mut seen = BitGrid::new(size);

        for scan in scans {
            let cells: Vec<IVec2> = scan
                .iter()
                .map(|&(x, y)| ivec2(x as i32 % 16, y as i32 % 16))
                .collect();
            let mut scan = BitGrid::new(size);
            scan.extend(cells);
            viewer.mark_explored(level, &scan);
            seen.union_with(&scan);

            // Everything ever marked is still explored.
            if seen
                .iter()
                .any(|p| !viewer.is_explored(Location::new(level, p)))
            {
                return false;
            }
        }
        true
    }
}
