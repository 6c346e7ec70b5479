//! Generic entity logic.
use std::fmt;

use hecs::Component;

use crate::{ecs::*, placement::Place, prelude::*};

// Dummy wrapper so we can write impls for it directly instead of deriving a
// trait for hecs::Entity and writing every fn signature twice.
/// Game entity identifier datatype. All the actual contents live in the ECS.
#[derive(
    Copy,
    Clone,
    Hash,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Debug,
    derive_more::Deref,
)]
pub struct Entity(pub(crate) hecs::Entity);

impl Entity {
    pub(crate) fn get<T>(&self, r: &impl AsRef<Runtime>) -> T
    where
        T: Component + Clone + Default,
    {
        let r = r.as_ref();
        r.ecs
            .get::<&T>(**self)
            .map(|c| (*c).clone())
            .unwrap_or_default()
    }

    pub(crate) fn set<T>(&self, r: &mut impl AsMut<Runtime>, val: T)
    where
        T: Component + Default + PartialEq,
    {
        let r = r.as_mut();
        if val == T::default() {
            // Remove default values, abstraction layer assumes components are
            // always present but defaulted.
            //
            // Will give an error if the component wasn't there to begin with,
            // just ignore that.
            let _ = r.ecs.remove_one::<T>(**self);
        } else {
            r.ecs.insert_one(**self, val).expect("Entity::set failed");
        }
    }

    /// Access and mutate a defaulted component using a closure.
    pub(crate) fn with_mut<T: Component + Default + PartialEq, U>(
        &self,
        r: &mut impl AsMut<Runtime>,
        f: impl FnOnce(&mut T) -> U,
    ) -> U {
        let r = r.as_mut();
        let mut delete = false;
        let mut insert = None;
        let ret;

        if let Ok(c) = r.ecs.query_one_mut::<&mut T>(**self) {
            ret = f(c);
            delete = *c == T::default();
        } else {
            let mut scratch = T::default();
            ret = f(&mut scratch);
            if scratch != T::default() {
                insert = Some(scratch);
            }
        }

        if delete {
            // Component became default value, remove from ECS.
            let _ = r.ecs.remove_one::<T>(**self);
        } else if let Some(scratch) = insert {
            r.ecs
                .insert_one(**self, scratch)
                .expect("Entity::with_mut failed to set entity");
        }

        ret
    }

    /// Read a capability component that may be absent.
    pub(crate) fn try_get<T: Component + Clone>(
        &self,
        r: &impl AsRef<Runtime>,
    ) -> Option<T> {
        r.as_ref().ecs.get::<&T>(**self).ok().map(|c| (*c).clone())
    }

    pub(crate) fn has<T: Component>(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().ecs.get::<&T>(**self).is_ok()
    }

    /// Mutate a capability component if the entity has it.
    pub(crate) fn try_mut<T: Component, U>(
        &self,
        r: &mut impl AsMut<Runtime>,
        f: impl FnOnce(&mut T) -> U,
    ) -> Option<U> {
        r.as_mut().ecs.query_one_mut::<&mut T>(**self).ok().map(f)
    }

    pub(crate) fn insert<T: Component>(
        &self,
        r: &mut impl AsMut<Runtime>,
        val: T,
    ) {
        r.as_mut()
            .ecs
            .insert_one(**self, val)
            .expect("Entity::insert failed");
    }

    pub(crate) fn remove<T: Component>(&self, r: &mut impl AsMut<Runtime>) {
        let _ = r.as_mut().ecs.remove_one::<T>(**self);
    }

    pub fn loc(&self, r: &impl AsRef<Runtime>) -> Option<Location> {
        let r = r.as_ref();
        r.placement.entity_pos(self)
    }

    /// Integer tile position of the entity on its level.
    pub fn pos(&self, r: &impl AsRef<Runtime>) -> Option<IVec2> {
        self.loc(r).map(|loc| loc.pos)
    }

    /// Interpolated display position.
    pub fn graphic_pos(&self, r: &impl AsRef<Runtime>) -> Vec2 {
        self.get::<GraphicPos>(r).0
    }

    pub(crate) fn set_graphic_pos(&self, r: &mut impl AsMut<Runtime>, p: Vec2) {
        self.set(r, GraphicPos(p));
    }

    /// Put the entity at a location on a level.
    ///
    /// Snaps the graphic position to the new location. Runs post-move logic
    /// if the location changed.
    pub fn place(&self, r: &mut impl AsMut<Runtime>, loc: Location) {
        let r = r.as_mut();
        let prev = self.loc(r);
        r.placement.insert_at(loc, *self);
        self.set_graphic_pos(r, loc.pos.as_vec2());

        if prev != Some(loc) {
            self.post_move_hook(r, prev);
        }
    }

    /// Put the entity inside a container entity.
    pub fn place_in(&self, r: &mut impl AsMut<Runtime>, container: &Entity) {
        r.as_mut().placement.insert_in(container, *self);
    }

    pub(crate) fn post_move_hook(
        &self,
        r: &mut impl AsMut<Runtime>,
        prev: Option<Location>,
    ) {
        let r = r.as_mut();
        if let Some(loc) = self.loc(r) {
            if prev.map(|p| p.level) != Some(loc.level) {
                log::debug!("{self} entered level {}", loc.level);
            }
        }
        self.scan_fov(r);
    }

    pub fn icon(&self, r: &impl AsRef<Runtime>) -> char {
        match self.get::<Icon>(r) {
            Icon('\0') => '?',
            Icon(c) => c,
        }
    }

    /// Description string of the entity.
    pub fn name(&self, r: &impl AsRef<Runtime>) -> String {
        let name = self.get::<Name>(r).0;
        if name.is_empty() {
            "thing".into()
        } else {
            name
        }
    }

    /// Name capitalized for the start of a sentence.
    pub fn the_name(&self, r: &impl AsRef<Runtime>) -> String {
        if self.is_player(r) {
            return "You".into();
        }
        let name = self.name(r);
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_uppercase() => name,
            _ => format!("The {name}"),
        }
    }

    /// Name for the object of a sentence.
    pub fn noun(&self, r: &impl AsRef<Runtime>) -> String {
        if self.is_player(r) {
            return "you".into();
        }
        let name = self.name(r);
        match name.chars().next() {
            Some(c) if c.is_uppercase() => name,
            _ => format!("the {name}"),
        }
    }

    /// Remove the entity from the world entirely.
    pub fn destroy(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        r.placement.remove(self);
        r.live.shift_remove(self);
        r.release_claim(self);
        let _ = r.ecs.despawn(self.0);
    }

    pub fn contents<'a>(
        &self,
        r: &'a impl AsRef<Runtime>,
    ) -> impl Iterator<Item = Entity> + 'a {
        let r = r.as_ref();
        r.placement.entities_in(self)
    }

    /// Container the entity is placed in, if any.
    pub fn container(&self, r: &impl AsRef<Runtime>) -> Option<Entity> {
        match r.as_ref().placement.get(self) {
            Some(Place::In(e)) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.id())
    }
}
