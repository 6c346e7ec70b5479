//! Per-creature action queue scheduling.

use std::collections::VecDeque;

use derive_more::{Deref, DerefMut};

use crate::{
    ecs::ActiveEmote, prelude::*, MAX_PENDING_MOVES, MIN_ATTACK_DURATION,
};

/// Ordered pending actions of a creature.
///
/// New entries go in the front and the back entry is the next one to run.
/// Damage entries jump the queue and go in the back.
#[derive(Clone, Default, PartialEq, Debug, Deref, DerefMut)]
pub struct ActionQueue(VecDeque<ActionEntry>);

impl ActionQueue {
    /// Number of move entries waiting in the queue.
    pub fn pending_moves(&self) -> usize {
        self.0.iter().filter(|a| a.action.is_move()).count()
    }

    /// Entries in the order they will be executed.
    pub fn upcoming(&self) -> impl Iterator<Item = &ActionEntry> {
        self.0.iter().rev()
    }
}

impl Entity {
    pub fn action_queue(&self, r: &impl AsRef<Runtime>) -> ActionQueue {
        self.get::<ActionQueue>(r)
    }

    /// Queue a move by a tile delta, optionally with a custom emote.
    ///
    /// Does nothing for a zero delta, for creatures that can't move and if
    /// the creature already has the maximum number of moves pending.
    /// Returns whether the move was queued.
    pub fn schedule_move(
        &self,
        r: &mut impl AsMut<Runtime>,
        delta: IVec2,
        emote: Option<Emote>,
    ) -> bool {
        let r = r.as_mut();
        if delta == IVec2::ZERO {
            return false;
        }
        let Some(duration) = self.ticks_per_move(r) else {
            return false;
        };
        if self.action_queue(r).pending_moves() >= MAX_PENDING_MOVES {
            log::debug!("{self} already has {MAX_PENDING_MOVES} moves queued");
            return false;
        }

        let entry = ActionEntry::new(
            Action::Move {
                delta,
                origin: None,
            },
            duration as f32,
        );
        self.push_entry(r, entry.with_emote(emote))
    }

    pub fn schedule_wait(
        &self,
        r: &mut impl AsMut<Runtime>,
        duration: f32,
        emote: Option<Emote>,
    ) -> bool {
        let entry = ActionEntry::new(Action::Wait, duration).with_emote(emote);
        self.push_entry(r, entry)
    }

    pub(crate) fn schedule_think(
        &self,
        r: &mut impl AsMut<Runtime>,
        duration: f32,
    ) -> bool {
        self.push_entry(r, ActionEntry::new(Action::Think, duration))
    }

    /// Queue an attack against `target`.
    ///
    /// The attack and its recovery take as long as one move of the attacker,
    /// but at least two ticks so the damage interrupt it causes is shorter.
    pub fn schedule_attack(
        &self,
        r: &mut impl AsMut<Runtime>,
        target: Entity,
        damage: i32,
        emote: Option<Emote>,
    ) -> bool {
        let r = r.as_mut();
        let duration = self.action_duration(r).max(MIN_ATTACK_DURATION);
        let entry =
            ActionEntry::new(Action::Attack { target, damage }, duration)
                .with_emote(emote);
        self.push_entry(r, entry)
    }

    /// Interrupt the creature with damage that is applied on the next tick.
    pub fn schedule_damage(
        &self,
        r: &mut impl AsMut<Runtime>,
        damage: i32,
        emote: Option<Emote>,
    ) -> bool {
        let r = r.as_mut();
        let duration = self.action_duration(r) * crate::DAMAGE_DURATION_RATIO;
        self.interrupt(
            r,
            ActionEntry::new(Action::Damage { amount: damage }, duration)
                .with_emote(emote),
        )
    }

    pub(crate) fn schedule_damage_for(
        &self,
        r: &mut impl AsMut<Runtime>,
        damage: i32,
        duration: f32,
    ) -> bool {
        self.interrupt(
            r,
            ActionEntry::new(Action::Damage { amount: damage }, duration),
        )
    }

    fn push_entry(
        &self,
        r: &mut impl AsMut<Runtime>,
        entry: ActionEntry,
    ) -> bool {
        let r = r.as_mut();
        if !self.is_alive(r) {
            return false;
        }
        self.with_mut::<ActionQueue, _>(r, |q| q.push_front(entry));
        true
    }

    fn interrupt(
        &self,
        r: &mut impl AsMut<Runtime>,
        entry: ActionEntry,
    ) -> bool {
        let r = r.as_mut();
        if !self.is_alive(r) {
            return false;
        }
        self.with_mut::<ActionQueue, _>(r, |q| q.push_back(entry));
        true
    }

    pub fn clear_actions(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        self.remove::<ActionQueue>(r);
        r.release_claim(self);
    }

    /// Advance the creature's action queue by one tick.
    pub fn tick_actions(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        if !self.is_alive(r) {
            return;
        }

        let Some(mut entry) =
            self.with_mut::<ActionQueue, _>(r, |q| q.pop_back())
        else {
            if let Some(brain) = self.brain(r) {
                self.schedule_think(r, brain.thinking);
            }
            return;
        };

        let emote = entry.emote();
        if self.get::<ActiveEmote>(r).0 != Some(emote) {
            self.set(r, ActiveEmote(Some(emote)));
            r.send_msg(Msg::Emote(*self, emote));
        }

        if !entry.execute(self, r) {
            log::debug!("{self} dropped failed {:?}", entry.action);
            return;
        }

        if !entry.is_completed() && self.is_alive(r) {
            // Resume on the next tick.
            self.with_mut::<ActionQueue, _>(r, |q| q.push_back(entry));
        }
    }

    /// Display hint of the action the creature is performing.
    pub fn active_emote(&self, r: &impl AsRef<Runtime>) -> Option<Emote> {
        self.get::<ActiveEmote>(r).0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn queue_order() {
        let mut q = ActionQueue::default();
        q.push_front(ActionEntry::new(Action::Wait, 5.0));
        q.push_front(ActionEntry::new(
            Action::Move {
                delta: ivec2(1, 0),
                origin: None,
            },
            10.0,
        ));
        q.push_back(ActionEntry::new(Action::Damage { amount: 1 }, 2.0));

        let upcoming: Vec<_> = q.upcoming().map(|a| a.emote()).collect();
        assert_eq!(upcoming, vec![Emote::Hurt, Emote::Wait, Emote::Walk]);
        assert_eq!(q.pending_moves(), 1);
    }
}
