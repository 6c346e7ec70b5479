//! Entity logic for carried objects.

use crate::{ecs::IsMob, prelude::*};

impl Entity {
    /// Entity is a static world object, an item or a corpse.
    pub fn is_object(&self, r: &impl AsRef<Runtime>) -> bool {
        !self.get::<IsMob>(r).0 || self.is_dead(r)
    }

    pub fn inventory<'a>(
        &self,
        r: &'a impl AsRef<Runtime>,
    ) -> impl Iterator<Item = Entity> + 'a {
        self.contents(r)
    }

    /// Move an object on the floor under the creature into its inventory.
    ///
    /// Returns whether the item was picked up.
    pub fn pick_up(&self, r: &mut impl AsMut<Runtime>, item: &Entity) -> bool {
        let r = r.as_mut();
        if !self.is_mob(r) || item == self || !item.is_object(r) {
            return false;
        }
        let (Some(loc), Some(item_loc)) = (self.loc(r), item.loc(r)) else {
            return false;
        };
        if loc != item_loc || item.container(r).is_some() {
            return false;
        }

        let verb = if self.is_player(r) { "pick" } else { "picks" };
        msg!(r; "{} {verb} up {}.", self.the_name(r), item.noun(r));
        item.place_in(r, self);
        true
    }

    /// Drop everything the entity carries at its location.
    pub fn drop_all(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        let Some(loc) = self.loc(r) else {
            return;
        };
        let items: Vec<Entity> = self.contents(r).collect();
        for item in items {
            item.place(r, loc);
        }
    }
}
