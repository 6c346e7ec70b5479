pub use crate::{
    msg, Action, ActionEntry, Behavior, Emote, Entity, Level, LevelId,
    Location, Msg, Runtime, ScenarioStatus, Tile, WorldQuery,
};
pub use anyhow::{anyhow, bail};
pub use glam::{ivec2, vec2, IVec2, Vec2};
pub use util::{HashMap, HashSet, IndexMap, IndexSet};
