//! Mobs figuring out what to do on their own.

use serde::{Deserialize, Serialize};
use util::{step_towards, RngExt};

use crate::{prelude::*, CONFUSED_WAIT, PASSIVE_WAIT};

/// Decision policy consulted whenever a creature runs out of actions.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    /// Stumble around at random.
    RandomWalk,
    /// Stand still for long stretches.
    Passive,
    /// Chase enemies that come within radius.
    Aggressive { radius: f32 },
    /// Run away from enemies that come within radius.
    Cowardly { radius: f32 },
}

impl Behavior {
    /// How many ticks the policy spends thinking between decisions.
    pub fn default_thinking(&self) -> f32 {
        match self {
            Behavior::RandomWalk => 20.0,
            Behavior::Passive => 30.0,
            Behavior::Aggressive { .. } => 5.0,
            Behavior::Cowardly { .. } => 8.0,
        }
    }
}

/// Behavior capability of a creature.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Brain {
    pub behavior: Behavior,
    /// Duration of think entries.
    pub thinking: f32,
    /// Whether the creature was tracking a target on its last decision.
    pub noticed: bool,
}

impl Brain {
    pub fn new(behavior: Behavior, thinking: Option<f32>) -> Self {
        Brain {
            behavior,
            thinking: thinking.unwrap_or_else(|| behavior.default_thinking()),
            noticed: false,
        }
    }
}

impl Entity {
    pub fn brain(&self, r: &impl AsRef<Runtime>) -> Option<Brain> {
        self.try_get::<Brain>(r)
    }

    /// Give the creature a behavior policy, or take it away with `None`.
    pub fn set_behavior(
        &self,
        r: &mut impl AsMut<Runtime>,
        behavior: Option<Behavior>,
    ) {
        match behavior {
            Some(b) => self.insert(r, Brain::new(b, None)),
            None => self.remove::<Brain>(r),
        }
    }

    /// Run the behavior policy decision step.
    pub(crate) fn think(&self, r: &mut impl AsMut<Runtime>) {
        let r = r.as_mut();
        let Some(mut brain) = self.brain(r) else {
            log::warn!("{self} is thinking without a behavior");
            return;
        };

        match brain.behavior {
            Behavior::RandomWalk => self.wander(r),
            Behavior::Passive => {
                self.schedule_wait(r, PASSIVE_WAIT, None);
            }
            Behavior::Aggressive { radius } => {
                self.pursue(r, &mut brain, radius, 1.0)
            }
            Behavior::Cowardly { radius } => {
                self.pursue(r, &mut brain, radius, -1.0)
            }
        }

        self.try_mut::<Brain, _>(r, |b| *b = brain);
    }

    fn wander(&self, r: &mut Runtime) {
        let delta = r.rng.step_or_stay();
        log::debug!("{self} wanders {delta}");
        self.schedule_move(r, delta, None);
    }

    /// Move towards (`sign` = 1) or away from (`sign` = -1) the nearest
    /// enemy within radius.
    fn pursue(
        &self,
        r: &mut Runtime,
        brain: &mut Brain,
        radius: f32,
        sign: f32,
    ) {
        let here = self.graphic_pos(r);
        let target = self
            .nearest_enemy(r)
            .map(|e| e.graphic_pos(r) - here)
            .filter(|v| v.length() <= radius);

        match target {
            Some(dir) => {
                let emote = (!brain.noticed).then_some(Emote::Noticed);
                if !brain.noticed {
                    log::debug!("{self} noticed a target");
                    brain.noticed = true;
                }
                let step = step_towards(dir * sign);
                if !self.schedule_move(r, step, emote) && emote.is_some() {
                    // Show the emote even when pinned in place.
                    self.schedule_wait(r, 1.0, emote);
                }
            }
            None if brain.noticed => {
                log::debug!("{self} lost its target");
                brain.noticed = false;
                self.schedule_wait(r, CONFUSED_WAIT, Some(Emote::Confused));
            }
            None => self.wander(r),
        }
    }

    /// Closest live enemy on the same level, by graphic position.
    fn nearest_enemy(&self, r: &Runtime) -> Option<Entity> {
        let level = self.loc(r)?.level;
        let here = self.graphic_pos(r);
        r.live_creatures()
            .filter(|e| {
                self.is_enemy(r, e)
                    && e.loc(r).map(|loc| loc.level) == Some(level)
            })
            .min_by(|a, b| {
                let da = a.graphic_pos(r).distance_squared(here);
                let db = b.graphic_pos(r).distance_squared(here);
                da.total_cmp(&db)
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn thinking_override() {
        let brain = Brain::new(Behavior::Passive, None);
        assert_eq!(brain.thinking, 30.0);
        let brain = Brain::new(Behavior::Aggressive { radius: 3.0 }, Some(2.0));
        assert_eq!(brain.thinking, 2.0);
        assert!(!brain.noticed);
    }

    #[test]
    fn faster_policies_think_more_often() {
        let chaser = Behavior::Aggressive { radius: 1.0 }.default_thinking();
        assert!(chaser < Behavior::RandomWalk.default_thinking());
        assert!(chaser < Behavior::Passive.default_thinking());
    }
}
