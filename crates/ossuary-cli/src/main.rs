//! Ossuary CLI - headless enemy simulation.
//!
//! - `ossuary run` - run a seeded scene for a number of ticks
//! - `ossuary config` - print the default configuration as YAML
//! - `ossuary prefabs` - list the prefab names a config can spawn

mod config;
mod sim;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use ossuary_core::prefab;

use crate::config::SimConfig;
use crate::sim::Sim;

#[derive(Parser)]
#[command(name = "ossuary")]
#[command(about = "Headless behaviour-tree enemy simulation", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene
    Run {
        /// YAML scene configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write the tree trace log to this file as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Print the default configuration
    Config,

    /// List spawnable prefabs
    Prefabs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
            trace,
        } => {
            let mut config = SimConfig::load_or_default(config.as_deref())?;
            if let Some(ticks) = ticks {
                config.ticks = ticks;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            run(&config, trace.as_deref())
        }
        Commands::Config => {
            print!("{}", SimConfig::default().to_yaml()?);
            Ok(())
        }
        Commands::Prefabs => {
            for kind in prefab::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn run(config: &SimConfig, trace_path: Option<&Path>) -> Result<()> {
    tracing::info!(ticks = config.ticks, seed = config.seed, "Starting simulation");

    let mut sim = Sim::new(config, trace_path.is_some())?;
    for _ in 0..config.ticks {
        let report = sim.step()?;
        if report.removed > 0 || report.adopted > 0 {
            tracing::debug!(
                tick = sim.tick(),
                removed = report.removed,
                adopted = report.adopted,
                "population changed"
            );
        }
        if !sim.player_alive() {
            tracing::info!(tick = sim.tick(), "player died");
            break;
        }
    }

    let summary = sim.summary();
    tracing::info!(
        ticks = summary.ticks,
        kills = summary.kills,
        spawned = summary.spawned,
        respawned = summary.respawned,
        player_health = ?summary.player_health,
        "Simulation finished"
    );

    if let Some(path) = trace_path {
        let log = sim.take_trace().unwrap_or_default();
        let json = serde_json::to_string_pretty(&log).context("Failed to serialize trace")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
        tracing::info!(events = log.events.len(), path = %path.display(), "Trace written");
    }

    println!("Ossuary run");
    println!("===========");
    println!("Ticks:     {}", summary.ticks);
    println!("Kills:     {}", summary.kills);
    println!("Spawned:   {}", summary.spawned);
    println!("Respawned: {}", summary.respawned);
    match summary.player_health {
        Some(hp) => println!("Player:    {hp} health"),
        None => println!("Player:    none"),
    }
    Ok(())
}
