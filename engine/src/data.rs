//! Content tables for creatures and items.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::{prelude::*, Result};

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Data {
    /// Prototype for the player creature.
    pub player: Monster,
    pub bestiary: IndexMap<String, Monster>,
    pub armory: IndexMap<String, Item>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Monster {
    pub icon: char,
    pub hp: i32,
    /// Tiles per second.
    pub speed: i32,
    pub damage: i32,
    pub behavior: Option<Behavior>,
    /// Override the behavior's own thinking interval, in ticks.
    pub thinking: Option<f32>,
    /// Sight radius if the creature keeps track of what it sees.
    pub fov: Option<i32>,
    pub friendly: bool,
    pub death: DeathPolicy,
    /// Names of starting inventory items.
    pub carries: Vec<String>,
}

impl Default for Monster {
    fn default() -> Self {
        Monster {
            icon: 'm',
            hp: 1,
            speed: 6,
            damage: 1,
            behavior: None,
            thinking: None,
            fov: None,
            friendly: false,
            death: DeathPolicy::Corpse,
            carries: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Item {
    pub icon: char,
}

impl Default for Item {
    fn default() -> Self {
        Item { icon: '*' }
    }
}

/// What is left behind when a creature dies.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeathPolicy {
    /// The creature turns into a corpse object that keeps its inventory.
    #[default]
    Corpse,
    /// The creature disappears and drops its inventory on the floor.
    Vanish,
}

impl Default for Data {
    fn default() -> Self {
        let monster = |icon, hp, speed, damage, behavior| Monster {
            icon,
            hp,
            speed,
            damage,
            behavior,
            ..Default::default()
        };

        let mut bestiary = IndexMap::default();
        bestiary.insert(
            "rat".to_string(),
            monster('r', 3, 6, 1, Some(Behavior::RandomWalk)),
        );
        bestiary.insert(
            "goblin".to_string(),
            Monster {
                carries: vec!["dagger".into()],
                ..monster(
                    'g',
                    6,
                    4,
                    2,
                    Some(Behavior::Aggressive { radius: 6.0 }),
                )
            },
        );
        bestiary.insert(
            "slime".to_string(),
            Monster {
                death: DeathPolicy::Vanish,
                ..monster('s', 8, 2, 1, Some(Behavior::Passive))
            },
        );
        bestiary.insert(
            "bat".to_string(),
            monster('b', 2, 10, 1, Some(Behavior::Cowardly { radius: 4.0 })),
        );

        let mut armory = IndexMap::default();
        armory.insert("dagger".to_string(), Item { icon: '(' });
        armory.insert("coin".to_string(), Item { icon: '$' });

        Data {
            player: Monster {
                icon: '@',
                hp: 20,
                speed: 6,
                damage: 3,
                fov: Some(crate::FOV_RADIUS),
                friendly: true,
                ..Default::default()
            },
            bestiary,
            armory,
        }
    }
}

impl Data {
    /// Load content tables from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading data file {path:?}"))?;
        let data: Data = idm::from_str(&text)
            .with_context(|| format!("parsing data file {path:?}"))?;
        data.validate()?;
        Ok(data)
    }

    /// Check that cross-references between tables resolve.
    pub fn validate(&self) -> Result<()> {
        for (name, m) in
            std::iter::once(("player", &self.player)).chain(
                self.bestiary.iter().map(|(n, m)| (n.as_str(), m)),
            )
        {
            if m.hp <= 0 {
                bail!("monster {name:?} has nonpositive hp {}", m.hp);
            }
            if m.speed < 0 {
                bail!("monster {name:?} has negative speed {}", m.speed);
            }
            for item in &m.carries {
                self.item(item).with_context(|| {
                    format!("in the inventory of {name:?}")
                })?;
            }
        }
        Ok(())
    }

    pub fn monster(&self, name: &str) -> Result<&Monster> {
        self.bestiary
            .get(name)
            .ok_or_else(|| anyhow!("unknown monster {name:?}"))
    }

    pub fn item(&self, name: &str) -> Result<&Item> {
        self.armory
            .get(name)
            .ok_or_else(|| anyhow!("unknown item {name:?}"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_data_is_valid() {
        let data = Data::default();
        data.validate().unwrap();
        assert!(data.player.friendly);
        assert!(data.player.behavior.is_none());
        assert_eq!(data.monster("goblin").unwrap().carries, vec!["dagger"]);
    }

    #[test]
    fn missing_entries() {
        let mut data = Data::default();
        assert!(data.monster("dragon").is_err());

        data.bestiary.get_mut("rat").unwrap().carries.push("cheese".into());
        let err = format!("{:#}", data.validate().unwrap_err());
        assert!(err.contains("unknown item \"cheese\""), "{err}");
        assert!(err.contains("\"rat\""), "{err}");
    }
}
