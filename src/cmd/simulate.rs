use crate::reports;
use clap::Args;
use dualnback::config::SessionConfig;
use dualnback::error::NbResult;
use dualnback::simulation::{self, BatchSummary, SimulatedPlayer};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: SessionConfig,

    #[arg(short = 'n', long, default_value_t = 1000)]
    pub sessions: usize,

    /// Chance of pressing on a true match.
    #[arg(long, default_value_t = 0.8)]
    pub hit_rate: f64,

    /// Chance of pressing on a non-match.
    #[arg(long, default_value_t = 0.1)]
    pub false_alarm_rate: f64,

    /// Write one row per session to this file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: SimulateArgs, config: SessionConfig) -> NbResult<()> {
    let player = SimulatedPlayer::new(args.hit_rate, args.false_alarm_rate)?;
    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));

    println!(
        "🎲 Simulating {} sessions of {}-back (seed {})",
        args.sessions, config.level, seed
    );
    let start = Instant::now();
    let outcomes = simulation::simulate_batch(&config, player, args.sessions, seed)?;
    println!("   Finished in {:.2?}", start.elapsed());

    match BatchSummary::from_outcomes(&outcomes) {
        Some(summary) => reports::print_simulation_summary(&summary),
        None => println!("⚠️  No sessions simulated."),
    }

    if let Some(path) = &args.csv {
        simulation::write_csv(&outcomes, File::create(path)?)?;
        println!("💾 Wrote {} rows to {}", outcomes.len(), path.display());
    }
    Ok(())
}
