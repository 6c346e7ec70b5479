use crate::prelude::*;

/// Read-only view of level contents used by action logic.
pub trait WorldQuery {
    /// Whether creatures can't enter the location.
    ///
    /// Locations outside the level are blocking.
    fn is_blocking(&self, loc: Location) -> bool;

    /// Live creature at location, other than `excluding`.
    fn creature_at(
        &self,
        loc: Location,
        excluding: Option<Entity>,
    ) -> Option<Entity>;

    /// Non-creature objects at location, in the order they arrived there.
    fn objects_at(&self, loc: Location) -> Vec<Entity>;
}

impl WorldQuery for Runtime {
    fn is_blocking(&self, loc: Location) -> bool {
        !loc.is_walkable(self)
    }

    fn creature_at(
        &self,
        loc: Location,
        excluding: Option<Entity>,
    ) -> Option<Entity> {
        loc.entities_at(self)
            .find(|e| Some(*e) != excluding && e.is_mob(self))
    }

    fn objects_at(&self, loc: Location) -> Vec<Entity> {
        loc.entities_at(self).filter(|e| e.is_object(self)).collect()
    }
}
