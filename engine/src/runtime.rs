use rand::SeedableRng;
use util::GameRng;

use crate::{
    ecs::*, fov::Viewer, prelude::*, world::Spawn, Brain, Data, Monster,
    Placement, Result, WorldSpec,
};

/// Main data container for game engine runtime.
pub struct Runtime {
    now: i64,
    pub(crate) player: Option<Entity>,
    pub(crate) levels: Vec<Level>,
    pub(crate) ecs: Ecs,
    pub(crate) placement: Placement,
    /// Creatures that get scheduler ticks, in creation order.
    pub(crate) live: IndexSet<Entity>,
    /// Destinations of moves that are underway.
    pub(crate) claims: HashMap<Location, Entity>,
    pub(crate) rng: GameRng,
    pub(crate) data: Data,
    pub(crate) msgs: Vec<Msg>,
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime {
            now: Default::default(),
            player: Default::default(),
            levels: Default::default(),
            ecs: Default::default(),
            placement: Default::default(),
            live: Default::default(),
            claims: Default::default(),
            rng: GameRng::seed_from_u64(0xdeadbeef),
            data: Default::default(),
            msgs: Default::default(),
        }
    }
}

impl AsRef<Runtime> for Runtime {
    fn as_ref(&self) -> &Runtime {
        self
    }
}

impl AsMut<Runtime> for Runtime {
    fn as_mut(&mut self) -> &mut Runtime {
        self
    }
}

impl Runtime {
    /// Build the initial world state.
    ///
    /// Fails if the world refers to content that isn't in `data` or if the
    /// levels are malformed.
    pub fn new(world: &WorldSpec, data: &Data) -> Result<Self> {
        data.validate()?;

        let mut ret = Runtime {
            rng: world.seed.rng(),
            data: data.clone(),
            ..Default::default()
        };

        let mut spawns = Vec::new();
        for spec in &world.levels {
            if spec.name.is_empty() {
                bail!("level without a name");
            }
            if ret.level_by_name(&spec.name).is_some() {
                bail!("duplicate level name {:?}", spec.name);
            }

            let (size, tiles, level_spawns) = spec.parse()?;
            let id = LevelId(ret.levels.len() as u32);
            ret.levels.push(Level::new(&spec.name, size, tiles));
            spawns.extend(
                level_spawns
                    .into_iter()
                    .map(|(pos, s)| (Location::new(id, pos), s)),
            );
            log::info!("loaded level {id} {:?}, size {size}", spec.name);
        }

        for (i, spec) in world.levels.iter().enumerate() {
            let id = LevelId(i as u32);
            for portal in &spec.portals {
                let at = Location::new(id, portal.at);
                if at.tile(&ret) != Some(Tile::Portal) {
                    bail!(
                        "level {:?}: portal at {} is not on a portal tile",
                        spec.name,
                        portal.at
                    );
                }
                let Some(dest) = ret.level_by_name(&portal.to) else {
                    bail!(
                        "level {:?}: portal to unknown level {:?}",
                        spec.name,
                        portal.to
                    );
                };
                let exit = Location::new(dest, portal.exit);
                if !exit.is_walkable(&ret) {
                    bail!(
                        "level {:?}: portal exit {} on {:?} is not walkable",
                        spec.name,
                        portal.exit,
                        portal.to
                    );
                }
                ret.levels[i].add_portal(crate::Portal {
                    at: portal.at,
                    exit,
                });
            }

            let level = &ret.levels[i];
            for p in level.points() {
                if level.tile(p) == Some(Tile::Portal)
                    && level.portal_exit(p).is_none()
                {
                    bail!(
                        "level {:?}: portal tile at {p} has no destination",
                        spec.name
                    );
                }
            }
        }

        let player_count =
            spawns.iter().filter(|(_, s)| *s == Spawn::Player).count();
        match player_count {
            0 => bail!("world does not specify player entry point"),
            1 => {}
            n => bail!("world has {n} player entry points"),
        }

        for (loc, spawn) in spawns {
            match spawn {
                Spawn::Player => {
                    ret.spawn_player(loc)?;
                }
                Spawn::Monster(name) => {
                    ret.spawn(&name, loc)?;
                }
            }
        }

        Ok(ret)
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    /// Access the persistent engine random number generator.
    pub fn rng(&mut self) -> &mut impl rand::Rng {
        &mut self.rng
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.0 as usize)
    }

    pub fn level_by_name(&self, name: &str) -> Option<LevelId> {
        self.levels
            .iter()
            .position(|l| l.name() == name)
            .map(|i| LevelId(i as u32))
    }

    pub fn levels(&self) -> impl Iterator<Item = (LevelId, &Level)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, l)| (LevelId(i as u32), l))
    }

    /// Creatures that are taking part in the simulation, in creation order.
    pub fn live_creatures(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.iter().copied()
    }

    /// Spawn a monster from the bestiary.
    pub fn spawn(&mut self, name: &str, loc: Location) -> Result<Entity> {
        let proto = self.data.monster(name)?.clone();
        self.spawn_creature(name, &proto, loc)
    }

    /// Spawn the player creature if there isn't one yet.
    pub fn spawn_player(&mut self, loc: Location) -> Result<Entity> {
        if let Some(player) = self.player {
            bail!("player {player} already exists");
        }
        let proto = self.data.player.clone();
        let player = self.spawn_creature("player", &proto, loc)?;
        self.player = Some(player);
        Ok(player)
    }

    fn spawn_creature(
        &mut self,
        name: &str,
        proto: &Monster,
        loc: Location,
    ) -> Result<Entity> {
        if !loc.is_walkable(self) {
            bail!("can't spawn {name:?} on blocked cell {loc}");
        }
        if let Some(e) = self.creature_at(loc, None) {
            bail!("can't spawn {name:?} at {loc}, occupied by {e}");
        }

        let e = Entity(self.ecs.spawn((
            Name(name.to_string()),
            Icon(proto.icon),
            IsMob(true),
            IsFriendly(proto.friendly),
            Speed(proto.speed),
            OnDeath(proto.death),
            Health::new(proto.hp),
        )));

        if proto.damage > 0 {
            e.insert(self, Combat { damage: proto.damage });
        }
        if let Some(behavior) = proto.behavior {
            e.insert(self, Brain::new(behavior, proto.thinking));
        }
        if let Some(radius) = proto.fov {
            e.insert(self, Viewer::new(radius));
        }
        self.live.insert(e);

        for item in &proto.carries {
            let item = self.spawn_item(item)?;
            item.place_in(self, &e);
        }

        e.place(self, loc);
        Ok(e)
    }

    /// Create an item from the armory, not yet placed anywhere.
    pub fn spawn_item(&mut self, name: &str) -> Result<Entity> {
        let proto = self.data.item(name)?;
        let components = (Name(name.to_string()), Icon(proto.icon));
        Ok(Entity(self.ecs.spawn(components)))
    }

    /// Whether some creature other than `e` is moving into the location.
    pub fn is_claimed(&self, loc: Location, e: &Entity) -> bool {
        self.claims.get(&loc).map_or(false, |c| c != e)
    }

    pub(crate) fn release_claim(&mut self, e: &Entity) {
        self.claims.retain(|_, c| c != e);
    }

    /// Update the simulation state by one tick.
    pub fn tick(&mut self) {
        let all: Vec<Entity> = self.live_creatures().collect();
        for e in all {
            // Skip creatures that died earlier during this tick.
            if e.is_alive(self) {
                e.tick_actions(self);
            }
        }

        self.now += 1;
    }

    /// Return whether the overall game scenario is still going or if it has
    /// ended in defeat.
    pub fn scenario_status(&self) -> ScenarioStatus {
        match self.player {
            Some(p) if p.is_alive(self) => ScenarioStatus::Ongoing,
            _ => ScenarioStatus::Lost,
        }
    }
}
