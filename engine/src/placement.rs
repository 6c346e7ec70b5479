use std::collections::BTreeMap;

use crate::prelude::*;

/// Where an entity is, either on a level or inside another entity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Place {
    In(Entity),
    At(Location),
}

use Place::*;

/// Spatial index, used for efficiently finding locations of entities and
/// entities at locations.
///
/// Entities at a single place are kept in the order they arrived there.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Placement {
    places: BTreeMap<Entity, Place>,
    entities: HashMap<Place, IndexSet<Entity>>,
}

impl Placement {
    pub fn entities_at(
        &self,
        loc: Location,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.entities_on(At(loc))
    }

    pub fn entities_in(
        &self,
        container: &Entity,
    ) -> impl Iterator<Item = Entity> + '_ {
        self.entities_on(In(*container))
    }

    fn entities_on(&self, place: Place) -> impl Iterator<Item = Entity> + '_ {
        self.entities.get(&place).into_iter().flatten().copied()
    }

    pub fn get(&self, e: &Entity) -> Option<Place> {
        self.places.get(e).copied()
    }

    /// Location of entity, or of its outermost container.
    pub fn entity_pos(&self, e: &Entity) -> Option<Location> {
        match self.places.get(e) {
            None => None,
            Some(At(loc)) => Some(*loc),
            Some(In(e)) => self.entity_pos(e),
        }
    }

    pub fn remove(&mut self, e: &Entity) {
        if let Some(place) = self.places.remove(e) {
            if let Some(set) = self.entities.get_mut(&place) {
                set.shift_remove(e);
                if set.is_empty() {
                    self.entities.remove(&place);
                }
            }
        }
    }

    /// Return whether `e` is inside `container`, directly or nested.
    pub fn contains(&self, container: &Entity, e: &Entity) -> bool {
        self.entities_in(container)
            .any(|i| &i == e || self.contains(&i, e))
    }

    pub fn insert_at(&mut self, loc: Location, e: Entity) {
        self.insert(At(loc), e);
    }

    pub fn insert_in(&mut self, container: &Entity, e: Entity) {
        assert!(
            *container != e && !self.contains(&e, container),
            "Placement::insert_in: Containment loop"
        );
        self.insert(In(*container), e);
    }

    fn insert(&mut self, place: Place, e: Entity) {
        if self.places.get(&e) == Some(&place) {
            return;
        }
        self.remove(&e);
        self.places.insert(e, place);
        self.entities.entry(place).or_default().insert(e);
    }
}
