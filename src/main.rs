use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine::{Behavior, Data, WorldSpec, prelude::*};
use tracing_subscriber::EnvFilter;
use util::Logos;

mod view;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(
        long,
        value_parser = |e: &str| Ok::<Logos, &str>(Logos::new(e)),
        help = "Simulation seed"
    )]
    seed: Option<Logos>,

    #[arg(long, default_value_t = 600, help = "Number of ticks to simulate")]
    ticks: u64,

    #[arg(long, help = "World file, uses the built-in demo world if omitted")]
    world: Option<PathBuf>,

    #[arg(long, help = "Content data file, uses built-in data if omitted")]
    data: Option<PathBuf>,

    #[arg(long, help = "Let the player creature wander on its own")]
    wander: bool,

    #[arg(long, default_value_t = 0, help = "Print the map every N ticks")]
    frames: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let data = match &args.data {
        Some(path) => Data::load(path)?,
        None => Data::default(),
    };

    let mut world = match &args.world {
        Some(path) => WorldSpec::load(path)?,
        None => WorldSpec::demo(Default::default()),
    };
    if let Some(seed) = &args.seed {
        world.seed = seed.clone();
    } else if args.world.is_none() {
        world.seed = Logos::sample(&mut rand::thread_rng(), 10);
    }
    log::info!("seed: {}", world.seed);

    let mut r = Runtime::new(&world, &data)?;
    let player = r.player().context("world has no player")?;
    if args.wander {
        player.set_behavior(&mut r, Some(Behavior::RandomWalk));
    }

    for t in 1..=args.ticks {
        r.tick();

        for msg in r.take_msgs() {
            if let Msg::Message(text) = msg {
                println!("[{:>5}] {text}", r.now());
            }
        }

        if args.frames > 0 && t % args.frames == 0 {
            println!("{}", view::render(&r, player));
        }

        if r.scenario_status() == ScenarioStatus::Lost {
            println!("Game over at tick {}.", r.now());
            break;
        }
    }

    println!("{}", view::render(&r, player));
    Ok(())
}
