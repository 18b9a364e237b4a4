use clap::{crate_version, value_parser, Arg, ArgAction, Command};
use lifebox_lib::{Config, State, World};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{cell::Cell, error, rc::Rc};

pub struct Args {
    pub config: Config,
    pub density: f64,
    pub seed: Option<u64>,
    pub max_gen: Option<u64>,
    pub fps: u64,
    pub no_tui: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|_| String::from("density must be a number"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(String::from("density must lie between 0 and 1"))
    }
}

pub fn parse_args() -> Args {
    let matches = Command::new("lifebox")
        .version(crate_version!())
        .about("Conway's Game of Life on a fixed-size, edge-bounded grid")
        .arg(
            Arg::new("X")
                .help("Width of the world")
                .required(true)
                .value_parser(value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new("Y")
                .help("Height of the world")
                .required(true)
                .value_parser(value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Probability that a cell of the initial world is alive")
                .short('d')
                .long("density")
                .default_value("0.5")
                .value_parser(parse_density),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed for the random initial world")
                .long_help(
                    "Seed for the random initial world\n\
                     Runs with the same size, density and seed are identical.\n",
                )
                .short('s')
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("MAX")
                .help("Maximal number of generations to advance")
                .long_help(
                    "Maximal number of generations to advance\n\
                     If this value is set to 0, it means there is no limitation;\n\
                     with --no-tui the run then continues until the world dies out.\n",
                )
                .short('m')
                .long("max-gen")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("FPS")
                .help("Generations per second in the TUI")
                .long("fps")
                .default_value("30")
                .value_parser(value_parser!(u64).range(1..=1000)),
        )
        .arg(
            Arg::new("NOTUI")
                .help("Runs without entering the TUI and prints the final world")
                .short('n')
                .long("no-tui")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let width = *matches.get_one::<i32>("X").unwrap();
    let height = *matches.get_one::<i32>("Y").unwrap();
    let density = *matches.get_one::<f64>("DENSITY").unwrap();
    let seed = matches.get_one::<u64>("SEED").copied();
    let max_gen = match *matches.get_one::<u64>("MAX").unwrap() {
        0 => None,
        i => Some(i),
    };
    let fps = *matches.get_one::<u64>("FPS").unwrap();
    let no_tui = matches.get_flag("NOTUI");

    Args {
        config: Config::new(width, height),
        density,
        seed,
        max_gen,
        fps,
        no_tui,
    }
}

pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Seeds every cell of the world at random, alive with probability `density`.
pub fn reseed<R: Rng>(world: &mut World, density: f64, rng: &mut R) {
    let config = *world.config();
    for y in 0..config.height {
        for x in 0..config.width {
            let state = if rng.gen_bool(density) {
                State::Alive
            } else {
                State::Dead
            };
            world.set_cell_state((x, y), state).unwrap();
        }
    }
}

/// Creates a world of the configured size with a random initial population.
pub fn random_world(args: &Args) -> Result<World, lifebox_lib::Error> {
    let mut world = args.config.world(&vec![0; args.config.area()])?;
    reseed(&mut world, args.density, &mut rng_from(args.seed));
    Ok(world)
}

fn run_headless(world: World, args: &Args) {
    let extinct = Rc::new(Cell::new(false));
    let flag = extinct.clone();
    let mut world = world.on_extinct(move || flag.set(true));
    while !extinct.get() && args.max_gen.map_or(true, |max| world.generation() < max) {
        world.advance();
    }
    print!("{}", world.dump());
    if extinct.get() {
        println!("The world died out at generation {}.", world.generation());
    } else {
        println!(
            "Stopped at generation {} with {} cells alive.",
            world.generation(),
            world.population()
        );
    }
}

pub fn run() -> Result<(), Box<dyn error::Error>> {
    let args = parse_args();
    let world = random_world(&args)?;

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return crate::tui::run_with_tui(world, &args).map_err(Into::into);
    }

    run_headless(world, &args);
    Ok(())
}
