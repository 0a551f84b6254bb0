//! Headless Encounter Runner
//!
//! Drives a session with a scripted autopilot and prints a summary. Useful for
//! balancing passes and reproducing a seed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chaos_brawler::core::config::EncounterConfig;
use chaos_brawler::core::error::Result;
use chaos_brawler::encounter::{Director, SessionOutcome};
use chaos_brawler::player::{Autopilot, AutopilotPolicy};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Encounter Runner - autopilot sessions for tuning
#[derive(Parser, Debug)]
#[command(name = "chaos-brawler")]
#[command(about = "Run a headless brawler session and report the outcome")]
struct Args {
    /// Maximum ticks before stopping (60 ticks per simulated second)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,

    /// Random seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// TOML encounter config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Who presses the buttons
    #[arg(long, value_enum, default_value_t = AutopilotPolicy::Brawler)]
    policy: AutopilotPolicy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print every event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    outcome: SessionOutcome,
    ticks: u64,
    phase: u8,
    chaos_score: u64,
    multiplier: u32,
    health: u32,
    special_unlocked: bool,
    seed: u64,
    policy: AutopilotPolicy,
    events: BTreeMap<&'static str, usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chaos_brawler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EncounterConfig::load(path)?,
        None => EncounterConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    let seed = config.seed;
    tracing::info!(seed, ticks = args.ticks, policy = ?args.policy, "starting headless run");

    let mut director = Director::new(config);
    let mut pilot = Autopilot::new(args.policy);
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();

    for _ in 0..args.ticks {
        let intents = pilot.next_intents(&director.snapshot());
        let events = director.run_tick(&intents);
        for event in events.iter() {
            *counts.entry(event.kind.name()).or_default() += 1;
            if args.verbose {
                eprintln!("  [{}] {:?}", event.tick, event.kind);
            }
        }
        if director.outcome().is_decided() {
            break;
        }
    }

    let snapshot = director.snapshot();
    let summary = RunSummary {
        outcome: director.outcome(),
        ticks: snapshot.tick,
        phase: snapshot.phase,
        chaos_score: snapshot.chaos_score,
        multiplier: snapshot.multiplier,
        health: snapshot.health,
        special_unlocked: snapshot.special_unlocked,
        seed,
        policy: args.policy,
        events: counts,
    };

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => {
            println!("Encounter Result");
            println!("================");
            println!("Outcome: {:?}", summary.outcome);
            println!("Ticks: {}", summary.ticks);
            println!("Phase: {}", summary.phase);
            println!("Chaos score: {} (x{})", summary.chaos_score, summary.multiplier);
            println!("Health: {}", summary.health);
            println!("Special unlocked: {}", summary.special_unlocked);
            println!();
            for (name, count) in &summary.events {
                println!("  {:<26} {}", name, count);
            }
            println!();
            println!("Seed: {}", summary.seed);
        }
    }

    Ok(())
}
