#![allow(dead_code)]

use engine::{Data, LevelSpec, Location, Monster, Runtime, WorldSpec};
use glam::ivec2;
use util::Logos;

/// Content tables with some extra test monsters.
pub fn data() -> Data {
    let mut data = Data::default();
    // Hostile creature that just stands there.
    data.bestiary.insert(
        "dummy".into(),
        Monster {
            icon: 'd',
            hp: 1,
            speed: 6,
            damage: 1,
            ..Default::default()
        },
    );
    // Quick enough to attack on every tick.
    data.bestiary.insert(
        "wasp".into(),
        Monster {
            icon: 'w',
            hp: 1,
            speed: 60,
            damage: 1,
            ..Default::default()
        },
    );
    data.bestiary.insert(
        "pouch".into(),
        Monster {
            icon: 'p',
            hp: 5,
            speed: 6,
            damage: 1,
            death: engine::DeathPolicy::Vanish,
            carries: vec!["coin".into()],
            ..Default::default()
        },
    );
    data
}

pub fn level(map: &str, legend: &[(char, &str)]) -> LevelSpec {
    legend
        .iter()
        .fold(LevelSpec::new("test", map), |spec, &(c, name)| {
            spec.with_legend(c, name)
        })
}

/// Single-level runtime.
pub fn runtime(map: &str, legend: &[(char, &str)]) -> Runtime {
    let world =
        WorldSpec::new(Logos::new("test")).with_level(level(map, legend));
    Runtime::new(&world, &data()).unwrap()
}

pub fn at(r: &Runtime, x: i32, y: i32) -> Location {
    Location::new(r.level_by_name("test").unwrap(), ivec2(x, y))
}

pub fn run(r: &mut Runtime, ticks: usize) {
    for _ in 0..ticks {
        r.tick();
    }
}
