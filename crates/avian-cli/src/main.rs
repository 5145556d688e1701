use anyhow::{Context, Result};
use avian_core::taxonomy::{describe_with_fallback, parse_remote_analysis, Narrator, NarratorError};
use avian_core::{SimConfig, SpeciesAnalysis, TraitSnapshot, World};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WARMUP_TICKS: usize = 10;
const BENCHMARK_TICKS: usize = 200;
const TARGET_TPS: f64 = 60.0;

#[derive(Parser)]
#[command(name = "avian")]
#[command(about = "Headless driver for the avian flocking simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation and report its summary
    Run {
        /// Path to config file (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of ticks to run
        #[arg(long, default_value_t = 3600)]
        ticks: usize,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,

        /// Enable aging, metabolism, reproduction and death
        #[arg(long)]
        evolution: bool,

        /// Write the run summary as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Measure tick throughput across population sizes
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
    /// Print the species analysis of the first agents of a fresh world
    Describe {
        /// Path to config file (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// How many agents to describe
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// JSON file with a prepared analysis, tried before the local generator
        #[arg(long)]
        analysis_json: Option<PathBuf>,
    },
}

/// Serves a prepared analysis from disk in place of a remote service.
struct FileNarrator {
    path: PathBuf,
}

impl Narrator for FileNarrator {
    fn describe(&self, _snapshot: &TraitSnapshot) -> Result<SpeciesAnalysis, NarratorError> {
        let body = fs::read_to_string(&self.path)
            .map_err(|e| NarratorError::Unavailable(format!("{}: {e}", self.path.display())))?;
        parse_remote_analysis(&body)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).context("failed to open config file")?;
    let config: SimConfig =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse config")?;
    config.validate().context("config validation error")?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn run_benchmark(population: usize) -> Result<()> {
    let config = SimConfig {
        initial_population: population,
        tree_count: 0,
        ..SimConfig::default()
    };
    let mut world = World::new(config).context("benchmark world initialization failed")?;
    world.settings_mut().evolution.enabled = true;
    let dt = world.config().frame_dt;

    for _ in 0..WARMUP_TICKS {
        world.tick(dt);
    }

    let mut total_snapshot = 0u64;
    let mut total_behavior = 0u64;
    let mut total_steering = 0u64;
    let mut total_time = 0u64;
    for _ in 0..BENCHMARK_TICKS {
        let timings = world.tick(dt).timings;
        total_snapshot += timings.snapshot_build_us;
        total_behavior += timings.behavior_us;
        total_steering += timings.steering_us;
        total_time += timings.total_us;
    }

    let avg_tick_us = (total_time as f64 / BENCHMARK_TICKS as f64).max(1.0);
    let ticks_per_sec = 1_000_000.0 / avg_tick_us;
    let per_tick = |total: u64| total as f64 / BENCHMARK_TICKS as f64;

    println!("--- {population} birds ---");
    println!("  Avg tick:      {avg_tick_us:.0} us ({ticks_per_sec:.1} ticks/sec)");
    println!(
        "  Breakdown:     snapshot={:.0} us, behavior={:.0} us, steering={:.0} us",
        per_tick(total_snapshot),
        per_tick(total_behavior),
        per_tick(total_steering),
    );
    let verdict = if ticks_per_sec >= TARGET_TPS {
        "OK"
    } else {
        "SLOW"
    };
    println!("  Verdict:       {verdict} (target: >={TARGET_TPS} ticks/sec)");
    println!("  Flocks:        {}", world.stats_now().flock_count);
    println!();
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&SimConfig::default())?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                warn!("running in debug mode, results are not representative");
            }
            println!("Warmup: {WARMUP_TICKS} ticks, Benchmark: {BENCHMARK_TICKS} ticks");
            println!();
            for population in [100, 500, 1000, 2500] {
                run_benchmark(population)?;
            }
        }
        Commands::Run {
            config,
            ticks,
            seed,
            evolution,
            out,
        } => {
            let mut sim_config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                sim_config.seed = seed;
            }
            let mut world = World::new(sim_config).context("world initialization failed")?;
            world.settings_mut().evolution.enabled = evolution;
            info!(
                ticks,
                population = world.population(),
                evolution,
                "starting headless run"
            );

            let summary = world.run_headless(ticks).context("headless run failed")?;
            info!(
                final_population = summary.final_population,
                births = summary.births,
                deaths_old_age = summary.deaths_old_age,
                deaths_starvation = summary.deaths_starvation,
                vocalizations = summary.vocalizations,
                "run complete"
            );
            if let Some(last) = summary.samples.last() {
                println!(
                    "t={:.1}s population={} flocks={} flying={} singing={} foraging={} idle={}",
                    last.clock,
                    last.population,
                    last.flock_count,
                    last.flying,
                    last.singing,
                    last.foraging,
                    last.idle,
                );
            }

            let json = serde_json::to_string_pretty(&summary)?;
            match out {
                Some(path) => {
                    fs::write(&path, json).context("failed to write summary")?;
                    info!(path = %path.display(), "summary written");
                }
                None => println!("{json}"),
            }
        }
        Commands::Describe {
            config,
            count,
            analysis_json,
        } => {
            let world =
                World::new(load_config(config.as_deref())?).context("world initialization failed")?;
            let narrator = analysis_json.map(|path| FileNarrator { path });
            for agent in world.agents().iter().take(count) {
                let snapshot = TraitSnapshot::from(agent);
                let analysis = describe_with_fallback(
                    narrator.as_ref().map(|n| n as &dyn Narrator),
                    &snapshot,
                );
                println!(
                    "#{} {} ({}) pitch={:.0}Hz scale={:.2}",
                    agent.id.0,
                    analysis.common_name,
                    analysis.scientific_name,
                    agent.traits.pitch,
                    agent.traits.scale,
                );
                println!("  {}", analysis.description);
                println!("  {}", analysis.temperament);
            }
        }
    }

    Ok(())
}
