//! Simulation core: timed per-creature action queues and visibility.

/// Simulation ticks in one second of game time.
pub const TICKS_PER_SECOND: i32 = 60;

/// Default sight radius for viewers that don't specify one.
pub const FOV_RADIUS: i32 = 8;

/// How many move entries a creature may have queued at once.
pub const MAX_PENDING_MOVES: usize = 2;

/// Length of a damage interrupt relative to the attack that caused it.
pub const DAMAGE_DURATION_RATIO: f32 = 0.5;

/// Shortest attack, keeps the damage interrupt shorter than the attack.
pub const MIN_ATTACK_DURATION: f32 = 2.0;

/// How long the passive behavior idles between decisions.
pub const PASSIVE_WAIT: f32 = 120.0;

/// How long a pursuer stands around after losing sight of its target.
pub const CONFUSED_WAIT: f32 = 45.0;

mod action;
pub use action::{Action, ActionEntry, Emote};

mod ai;
pub use ai::{Behavior, Brain};

mod data;
pub use data::{Data, DeathPolicy, Item, Monster};

pub mod ecs;

mod entity;
pub use entity::Entity;

mod fov;
pub use crate::fov::Viewer;

mod item;

mod level;
pub use level::{Level, LevelId, Portal};

mod location;
pub use location::Location;

mod mob;

mod msg;
pub use msg::Msg;

pub mod prelude;

mod placement;
pub use placement::{Place, Placement};

mod query;
pub use query::WorldQuery;

mod queue;
pub use queue::ActionQueue;

mod runtime;
pub use runtime::Runtime;

mod tile;
pub use tile::Tile;

mod world;
pub use world::{LevelSpec, PortalSpec, WorldSpec};

pub type Result<T> = anyhow::Result<T>;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScenarioStatus {
    Ongoing,
    Lost,
}
