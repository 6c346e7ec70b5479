//! Entity component definitions.
//!
//! Plain value components follow the convention that a missing component
//! reads as its default value. Capability components (`Health`, `Combat`,
//! `Viewer`, `Brain`) are meaningful by their presence and are accessed with
//! `Entity::try_get` / `Entity::has`.

use derive_more::{Deref, DerefMut};

use crate::{prelude::*, DeathPolicy};

#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Name(pub String);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Icon(pub char);

/// Entity is a creature that takes up space and acts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsMob(pub bool);

/// Creature is on the player's side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsFriendly(pub bool);

/// Creature has died, what's left of it is a static object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct IsDead(pub bool);

/// Movement speed in tiles per second, zero means the creature can't move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Speed(pub i32);

/// Continuous display position used to interpolate multi-tick moves.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct GraphicPos(pub Vec2);

/// Display hint of the action entry the creature executed last.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct ActiveEmote(pub Option<Emote>);

/// What happens to the creature when it dies.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct OnDeath(pub DeathPolicy);

/// Hit points, creature can be damaged.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        Health { hp: max_hp, max_hp }
    }
}

/// Creature can attack things.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Combat {
    /// Damage done with an attack.
    pub damage: i32,
}

////////////////////////////////

/// Entity component system. Stores all the data of game entities.
#[derive(Default, Deref, DerefMut)]
pub(crate) struct Ecs(pub(crate) hecs::World);
