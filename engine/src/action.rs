//! Timed actions that creatures perform over several ticks.

use serde::{Deserialize, Serialize};

use crate::{prelude::*, DAMAGE_DURATION_RATIO};

/// Display hint for what a creature is currently up to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emote {
    Walk,
    Wait,
    Think,
    Attack,
    Hurt,
    /// Creature just spotted its target.
    Noticed,
    /// Creature lost track of its target.
    Confused,
}

impl Emote {
    /// Single-character bubble for text displays.
    pub fn icon(self) -> char {
        match self {
            Emote::Walk => ' ',
            Emote::Wait => 'z',
            Emote::Think => '.',
            Emote::Attack => '*',
            Emote::Hurt => '\'',
            Emote::Noticed => '!',
            Emote::Confused => '?',
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Action {
    /// Move by a tile delta, interpolating the graphic position.
    Move {
        delta: IVec2,
        /// Graphic position when the move got underway.
        origin: Option<Vec2>,
    },
    Wait,
    /// Consult the behavior policy when done.
    Think,
    Attack { target: Entity, damage: i32 },
    /// Take damage, locked in once started.
    Damage { amount: i32 },
}

impl Action {
    pub fn default_emote(&self) -> Emote {
        match self {
            Action::Move { .. } => Emote::Walk,
            Action::Wait => Emote::Wait,
            Action::Think => Emote::Think,
            Action::Attack { .. } => Emote::Attack,
            Action::Damage { .. } => Emote::Hurt,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

/// An in-progress action with its timing state.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ActionEntry {
    pub action: Action,
    total: f32,
    remaining: f32,
    started: bool,
    emote: Option<Emote>,
}

impl ActionEntry {
    /// Create an entry lasting `duration` ticks, at least one tick.
    pub fn new(action: Action, duration: f32) -> Self {
        let duration = duration.max(1.0);
        ActionEntry {
            action,
            total: duration,
            remaining: duration,
            started: false,
            emote: None,
        }
    }

    /// Override the action's default emote.
    pub fn with_emote(mut self, emote: Option<Emote>) -> Self {
        if emote.is_some() {
            self.emote = emote;
        }
        self
    }

    pub fn emote(&self) -> Emote {
        self.emote.unwrap_or_else(|| self.action.default_emote())
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction of the duration that has elapsed.
    pub fn progress(&self) -> f32 {
        ((self.total - self.remaining) / self.total).clamp(0.0, 1.0)
    }

    fn tick(&mut self) {
        self.remaining -= 1.0;
        self.started = true;
    }

    /// Run one tick of the action for entity `e`.
    ///
    /// Returns false if the action failed and must not be continued.
    pub(crate) fn execute(&mut self, e: &Entity, r: &mut Runtime) -> bool {
        match self.action {
            Action::Move { delta, origin } => {
                self.execute_move(e, r, delta, origin)
            }
            Action::Wait => {
                self.tick();
                true
            }
            Action::Think => {
                self.tick();
                if self.is_completed() {
                    e.think(r);
                }
                true
            }
            Action::Attack { target, damage } => {
                self.execute_attack(e, r, target, damage)
            }
            Action::Damage { amount } => {
                if !self.started {
                    e.take_damage(r, amount);
                }
                self.tick();
                true
            }
        }
    }

    fn execute_move(
        &mut self,
        e: &Entity,
        r: &mut Runtime,
        delta: IVec2,
        origin: Option<Vec2>,
    ) -> bool {
        let Some(loc) = e.loc(r) else {
            return false;
        };
        let dest = loc + delta;

        let origin = match origin {
            Some(origin) => origin,
            None => {
                if let Some(occupant) = r.creature_at(dest, Some(*e)) {
                    if let Some(damage) = e.attack_damage_against(r, &occupant)
                    {
                        log::debug!("{e} bumps into {occupant}, attacking");
                        e.schedule_attack(r, occupant, damage, None);
                    } else {
                        log::debug!("{e} move blocked by {occupant}");
                    }
                    return false;
                }

                if r.is_blocking(dest) {
                    log::debug!("{e} move blocked at {dest}");
                    return false;
                }

                if r.is_claimed(dest, e) {
                    log::debug!("{e} move blocked by another move into {dest}");
                    return false;
                }

                r.claims.insert(dest, *e);
                let origin = e.graphic_pos(r);
                self.action = Action::Move {
                    delta,
                    origin: Some(origin),
                };
                origin
            }
        };

        self.tick();
        e.set_graphic_pos(r, origin + delta.as_vec2() * self.progress());

        if self.is_completed() {
            r.release_claim(e);
            let pos = e.graphic_pos(r).round().as_ivec2();
            e.place(r, Location::new(loc.level, pos));
            e.enter_portal(r);
        }

        true
    }

    fn execute_attack(
        &mut self,
        e: &Entity,
        r: &mut Runtime,
        target: Entity,
        damage: i32,
    ) -> bool {
        if !self.started {
            if !target.is_alive(r) {
                log::debug!("{e} attack on dead {target} dropped");
                return false;
            }

            let verb = if e.is_player(r) { "hit" } else { "hits" };
            msg!(r; "{} {verb} {}.", e.the_name(r), target.noun(r));
            target.schedule_damage_for(
                r,
                damage,
                self.total * DAMAGE_DURATION_RATIO,
            );
        }

        self.tick();
        true
    }
}
