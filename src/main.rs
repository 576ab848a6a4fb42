use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Duration;

use lane_traffic::{
    config::{DisplayMode, SimulationConfig, Validate},
    display::presenter_for,
    signals::install_stop_signal,
    simulation::SimulationSession,
};

#[derive(Parser)]
#[command(name = "lane-traffic")]
#[command(about = "Multi-lane cellular automaton traffic simulation")]
struct Args {
    /// Number of lanes (1-10)
    #[arg(short, long)]
    lanes: Option<usize>,

    /// Road length in cells (1-1000)
    #[arg(short = 'r', long)]
    length: Option<usize>,

    /// Chance (percent) that a vehicle enters each tick; clamped to 0-100
    #[arg(short, long, allow_negative_numbers = true)]
    probability: Option<i64>,

    /// Random seed for reproducible simulations (0 picks one from entropy)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Delay between ticks in milliseconds
    #[arg(short = 't', long)]
    delay_ms: Option<u64>,

    /// Stop after this many ticks instead of running until interrupted
    #[arg(short = 'n', long)]
    ticks: Option<u64>,

    /// How to show the road
    #[arg(short, long, value_enum)]
    display: Option<DisplayChoice>,

    /// TOML configuration file; command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging for detailed simulation progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum DisplayChoice {
    /// Redraw the road as text every tick
    Console,
    /// No drawing, periodic status lines only
    Log,
}

impl Args {
    fn apply_to(&self, config: &mut SimulationConfig) {
        if let Some(lanes) = self.lanes {
            config.road.lanes = lanes;
        }
        if let Some(length) = self.length {
            config.road.length = length;
        }
        if let Some(probability) = self.probability {
            config.generator.entry_probability = probability;
        }
        if let Some(seed) = self.seed {
            config.generator.seed = Some(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.run.delay_ms = delay_ms;
        }
        if let Some(ticks) = self.ticks {
            config.run.max_ticks = Some(ticks);
        }
        if let Some(display) = self.display {
            config.run.display = match display {
                DisplayChoice::Console => DisplayMode::Console,
                DisplayChoice::Log => DisplayMode::Log,
            };
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            SimulationConfig::load_from_file(path)?
        }
        None => SimulationConfig::default(),
    };
    args.apply_to(&mut config);

    config.validate()?;

    let mut session = SimulationSession::new(&config)?;
    install_stop_signal(session.stop_handle())?;

    info!("Traffic Simulator Started");
    match config.generator.fixed_seed() {
        Some(seed) => info!("Random Seed: {}", seed),
        None if config.generator.seed.is_some() => info!("Random Seed: entropy"),
        None => {}
    }
    match config.run.max_ticks {
        Some(ticks) => info!("Running for {} ticks", ticks),
        None => info!("Press Ctrl+C or send SIGTERM to stop the simulation"),
    }

    let mut presenter = presenter_for(&config.run);
    let summary = session.run(
        presenter.as_mut(),
        Duration::from_millis(config.run.delay_ms),
        config.run.max_ticks,
    )?;

    println!();
    println!("Simulation Summary:");
    println!("Total time steps: {}", summary.ticks);
    println!("Total vehicles generated: {}", summary.total_generated);
    println!("Total vehicles that exited: {}", summary.total_exited);
    println!("Vehicles still on road: {}", summary.active);
    println!("Average flow rate: {:.2} vehicles/time step", summary.average_flow);

    Ok(())
}
