//! Static world definitions that a runtime is built from.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use util::{AsciiMap, Logos};

use crate::{prelude::*, Result};

/// Description of a whole world, a set of levels connected by portals.
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorldSpec {
    /// Seed for the simulation random number generator.
    pub seed: Logos,
    pub levels: Vec<LevelSpec>,
}

/// A single level map.
///
/// Map glyphs: `#` wall, `.` floor, `+` door, `~` water, `>` portal, `@` the
/// player's entry point. Other glyphs are looked up from the legend, which
/// maps them to bestiary names of monsters that start on that cell.
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LevelSpec {
    pub name: String,
    pub map: String,
    pub legend: IndexMap<char, String>,
    pub portals: Vec<PortalSpec>,
}

/// Portal from a `>` cell to a cell on another level.
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PortalSpec {
    pub at: IVec2,
    /// Name of destination level.
    pub to: String,
    pub exit: IVec2,
}

/// Things that get spawned when a level map is loaded.
#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Spawn {
    Player,
    Monster(String),
}

impl WorldSpec {
    pub fn new(seed: Logos) -> Self {
        WorldSpec {
            seed,
            levels: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: LevelSpec) -> Self {
        self.levels.push(level);
        self
    }

    /// Load a world description from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading world file {path:?}"))?;
        idm::from_str(&text)
            .with_context(|| format!("parsing world file {path:?}"))
    }

    /// Small built-in world with two levels.
    pub fn demo(seed: Logos) -> Self {
        WorldSpec::new(seed)
            .with_level(
                LevelSpec::new(
                    "cellars",
                    "
                    ####################
                    #@.....#......~~...#
                    #......+..r...~~.s.#
                    #......#......~~...#
                    ###+####...........#
                    #......#####+#######
                    #..g...#...........#
                    #......+.....b....>#
                    ####################",
                )
                .with_legend('r', "rat")
                .with_legend('g', "goblin")
                .with_legend('s', "slime")
                .with_legend('b', "bat")
                .with_portal(ivec2(18, 7), "caves", ivec2(2, 1)),
            )
            .with_level(
                LevelSpec::new(
                    "caves",
                    "
                    ###############
                    #>.....#......#
                    #...r.....#g..#
                    #..###....#...#
                    #.....r...#...#
                    ###############",
                )
                .with_legend('r', "rat")
                .with_legend('g', "goblin")
                .with_portal(ivec2(1, 1), "cellars", ivec2(17, 7)),
            )
    }
}

impl LevelSpec {
    pub fn new(name: impl Into<String>, map: impl Into<String>) -> Self {
        LevelSpec {
            name: name.into(),
            map: map.into(),
            ..Default::default()
        }
    }

    pub fn with_legend(
        mut self,
        glyph: char,
        monster: impl Into<String>,
    ) -> Self {
        self.legend.insert(glyph, monster.into());
        self
    }

    pub fn with_portal(
        mut self,
        at: IVec2,
        to: impl Into<String>,
        exit: IVec2,
    ) -> Self {
        self.portals.push(PortalSpec {
            at,
            to: to.into(),
            exit,
        });
        self
    }

    /// Read the map into terrain and the list of initial spawns.
    pub(crate) fn parse(
        &self,
    ) -> Result<(IVec2, Vec<Tile>, Vec<(IVec2, Spawn)>)> {
        let map = AsciiMap::new(&self.map);
        let size = map.size();
        if size.x == 0 || size.y == 0 {
            bail!("level {:?} has an empty map", self.name);
        }

        let mut tiles = Vec::with_capacity((size.x * size.y) as usize);
        let mut spawns = Vec::new();

        for (p, c) in map.iter() {
            if let Some(tile) = Tile::from_char(c) {
                tiles.push(tile);
                continue;
            }

            match c {
                // Void around irregular maps.
                ' ' => tiles.push(Tile::Wall),
                '@' => {
                    tiles.push(Tile::Floor);
                    spawns.push((p, Spawn::Player));
                }
                c => {
                    let Some(name) = self.legend.get(&c) else {
                        bail!(
                            "level {:?}: unknown map glyph {c:?} at {}, {}",
                            self.name,
                            p.x,
                            p.y
                        );
                    };
                    tiles.push(Tile::Floor);
                    spawns.push((p, Spawn::Monster(name.clone())));
                }
            }
        }

        Ok((size, tiles, spawns))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_map() {
        let spec = LevelSpec::new(
            "test",
            "
            #####
            #@.r#
            ##>#",
        )
        .with_legend('r', "rat");

        let (size, tiles, spawns) = spec.parse().unwrap();
        assert_eq!(size, ivec2(5, 3));
        assert_eq!(tiles.len(), 15);
        assert_eq!(tiles[5 + 1], Tile::Floor);
        assert_eq!(tiles[10 + 2], Tile::Portal);
        // Padding on the short last line.
        assert_eq!(tiles[10 + 4], Tile::Wall);
        assert_eq!(
            spawns,
            vec![
                (ivec2(1, 1), Spawn::Player),
                (ivec2(3, 1), Spawn::Monster("rat".into()))
            ]
        );
    }

    #[test]
    fn unknown_glyph() {
        let spec = LevelSpec::new("test", "#@x#");
        let err = spec.parse().unwrap_err().to_string();
        assert!(err.contains("unknown map glyph 'x'"), "{err}");
    }

    #[test]
    fn empty_map() {
        assert!(LevelSpec::new("test", "\n  \n").parse().is_err());
    }
}
