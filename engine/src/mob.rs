//! Entity logic for active creatures.

use crate::{
    ecs::{
        Combat, Health, Icon, IsDead, IsFriendly, IsMob, Name, OnDeath, Speed,
    },
    prelude::*,
    DeathPolicy, TICKS_PER_SECOND,
};

impl Entity {
    pub fn is_player(&self, r: &impl AsRef<Runtime>) -> bool {
        let r = r.as_ref();
        r.player == Some(*self)
    }

    /// Entity is a creature that hasn't died.
    pub fn is_mob(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<IsMob>(r).0 && !self.is_dead(r)
    }

    /// Entity is in the live creature collection and gets scheduler ticks.
    pub fn is_alive(&self, r: &impl AsRef<Runtime>) -> bool {
        r.as_ref().live.contains(self)
    }

    pub fn is_dead(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<IsDead>(r).0
    }

    pub fn is_friendly(&self, r: &impl AsRef<Runtime>) -> bool {
        self.get::<IsFriendly>(r).0
    }

    /// Both entities are live creatures on opposite sides.
    pub fn is_enemy(&self, r: &impl AsRef<Runtime>, other: &Entity) -> bool {
        self.is_mob(r)
            && other.is_mob(r)
            && self.is_friendly(r) != other.is_friendly(r)
    }

    /// Ticks it takes to move one tile, `None` if the creature can't move.
    pub fn ticks_per_move(&self, r: &impl AsRef<Runtime>) -> Option<i32> {
        match self.get::<Speed>(r).0 {
            n if n <= 0 => None,
            n => Some((TICKS_PER_SECOND / n).max(1)),
        }
    }

    /// Base duration for the creature's non-move actions.
    pub(crate) fn action_duration(&self, r: &impl AsRef<Runtime>) -> f32 {
        self.ticks_per_move(r).unwrap_or(TICKS_PER_SECOND) as f32
    }

    pub fn hp(&self, r: &impl AsRef<Runtime>) -> Option<i32> {
        self.try_get::<Health>(r).map(|h| h.hp)
    }

    pub fn max_hp(&self, r: &impl AsRef<Runtime>) -> Option<i32> {
        self.try_get::<Health>(r).map(|h| h.max_hp)
    }

    /// Damage this creature would do attacking `other`, if it can fight it.
    pub fn attack_damage_against(
        &self,
        r: &impl AsRef<Runtime>,
        other: &Entity,
    ) -> Option<i32> {
        let combat = self.try_get::<Combat>(r)?;
        let fights_back = other.has::<Health>(r) && other.has::<Combat>(r);
        (fights_back && self.is_enemy(r, other)).then_some(combat.damage)
    }

    /// Apply damage to hit points and die if they run out.
    ///
    /// Returns whether the creature died.
    ///
    /// Negative damage heals, up to the maximum hit points.
    pub fn take_damage(
        &self,
        r: &mut impl AsMut<Runtime>,
        amount: i32,
    ) -> bool {
        let r = r.as_mut();
        let Some(hp) = self.try_mut::<Health, _>(r, |h| {
            h.hp = (h.hp - amount).min(h.max_hp);
            h.hp
        }) else {
            return false;
        };

        r.send_msg(Msg::Hurt(*self, amount));
        log::debug!("{self} takes {amount} damage, {hp} hp left");

        if hp <= 0 {
            self.die(r);
            true
        } else {
            false
        }
    }

    /// Follow the portal the creature is standing on, if there is one.
    pub(crate) fn enter_portal(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        let Some(exit) = self.loc(r).and_then(|loc| loc.portal_exit(r)) else {
            return;
        };
        if r.creature_at(exit, Some(*self)).is_some()
            || r.is_claimed(exit, self)
        {
            log::warn!("{self} can't use portal, exit {exit} is occupied");
            return;
        }
        log::info!("{self} goes through portal to {exit}");
        self.place(r, exit);
    }

    /// Run the creature's death policy.
    pub fn die(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        if self.is_dead(r) {
            return;
        }

        let loc = self.loc(r);
        let name = self.name(r);
        let verb = if self.is_player(r) { "die" } else { "dies" };
        msg!(r; "{} {verb}.", self.the_name(r));
        log::info!("{self} ({name}) died at {loc:?}");
        if let Some(loc) = loc {
            r.send_msg(Msg::Death(loc));
        }

        self.set(r, IsDead(true));
        self.clear_actions(r);
        self.remove::<crate::Brain>(r);
        self.remove::<Combat>(r);
        r.live.shift_remove(self);

        match self.get::<OnDeath>(r).0 {
            DeathPolicy::Corpse => {
                self.set(r, IsMob(false));
                self.set(r, Name(format!("{name} corpse")));
                self.set(r, Icon('%'));
            }
            DeathPolicy::Vanish => {
                self.drop_all(r);
                self.destroy(r);
            }
        }
    }
}
