mod config_file;
mod random;
mod render;

use std::path::PathBuf;

use clap::Parser;
use pagesim_core::PagingEngine;

use config_file::Config;
use random::RandomProcessGenerator;

/// Console driver for the demand-paged virtual memory simulator.
#[derive(Debug, Parser)]
#[command(name = "pagesim", about = "Demand-paged virtual memory simulator")]
struct Args {
    /// Path to a TOML config file. Missing keys fall back to defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of scheduling ticks to run.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Seed for the engine's internal RNG (arrivals, random page access).
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Suppress the per-tick summary line; only the final snapshot is printed.
    #[arg(long)]
    quiet: bool,

    /// Admit one random process before the tick loop starts.
    #[arg(long)]
    seed_process: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    let core_config = config.into_core_config();

    let mut engine = PagingEngine::new(core_config.clone(), args.seed);

    if args.seed_process {
        let pid = RandomProcessGenerator::new().admit_random(&mut engine, &core_config);
        println!("seeded random process, pid {pid}");
    }

    for tick in 1..=args.ticks {
        let outcome = engine.tick();
        if !args.quiet {
            render::render_tick_summary(tick, &outcome);
        }
    }

    render::render_snapshot(&engine.snapshot());
    render::render_event_log(engine.event_log());
}
