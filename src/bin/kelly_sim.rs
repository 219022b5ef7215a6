//! Kelly Growth Simulation CLI
//!
//! Computes the Kelly fraction for a binary bet, simulates one capital path
//! per Kelly multiplier and reports the outcome of each run.
//!
//! Usage:
//!   cargo run --bin kelly_sim -- --win-probability 0.68 --odds 1.3 --trials 180
//!   cargo run --bin kelly_sim -- --config kelly_sim.toml --multiplier 0.5 --multiplier 1.0
//!   cargo run --bin kelly_sim -- --seed 7 --output runs.json
//!
//! Flags override values from the config file, which override built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use kelly_growth::config::SimulationConfig;
use kelly_growth::growth::{run_plans, CapitalFloor, RunReport};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kelly_sim")]
#[command(about = "Simulate bankroll growth under fractional Kelly betting")]
struct Args {
    /// TOML config file (falls back to defaults if absent)
    #[arg(long, env = "KELLY_SIM_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Probability of winning a single bet (0-1)
    #[arg(long, env = "KELLY_SIM_WIN_PROBABILITY")]
    win_probability: Option<f64>,

    /// Payout multiplier on a winning bet
    #[arg(long, env = "KELLY_SIM_ODDS")]
    odds: Option<f64>,

    /// Number of bets per run
    #[arg(long, env = "KELLY_SIM_TRIALS", allow_negative_numbers = true)]
    trials: Option<i64>,

    /// Starting capital
    #[arg(long, env = "KELLY_SIM_CAPITAL")]
    capital: Option<f64>,

    /// Fraction of the stake lost on a losing bet
    #[arg(long, env = "KELLY_SIM_STOP_LOSS")]
    stop_loss: Option<f64>,

    /// Kelly multiplier, repeat for several runs (0.5 = half Kelly)
    #[arg(long = "multiplier", allow_negative_numbers = true)]
    multipliers: Vec<f64>,

    /// Seed for the random generator
    #[arg(long, env = "KELLY_SIM_SEED")]
    seed: Option<u64>,

    /// Clamp capital at zero instead of letting it go negative
    #[arg(long, default_value = "false")]
    floor_at_zero: bool,

    /// Write full trajectories as JSON
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', default_value = "false")]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SimulationConfig::from_env(),
        };

        if let Some(p) = self.win_probability {
            config.win_probability = p;
        }
        if let Some(odds) = self.odds {
            config.odds = odds;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(capital) = self.capital {
            config.starting_capital = capital;
        }
        if let Some(stop_loss) = self.stop_loss {
            config.stop_loss = stop_loss;
        }
        if !self.multipliers.is_empty() {
            config.kelly_multipliers = self.multipliers.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.floor_at_zero {
            config.capital_floor = CapitalFloor::Zero;
        }

        Ok(config)
    }
}

#[derive(Serialize)]
struct RunOutput<'a> {
    config: &'a SimulationConfig,
    full_kelly_fraction: f64,
    runs: &'a [RunReport],
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.resolve_config()?;
    debug!(?config, "resolved configuration");

    let full_kelly = config.full_kelly().context("Invalid simulation parameters")?;
    let plans = config.plans().context("Invalid simulation parameters")?;

    info!(
        runs = plans.len(),
        trials = config.trials,
        seed = config.seed,
        "Running growth simulations"
    );
    let reports = run_plans(&plans, config.seed).context("Simulation failed")?;

    println!("=== Kelly Criterion Growth Simulation ===");
    println!(
        "Win probability: {:.2}% | Odds: {:.2} | Bets: {} | Stop loss: {:.0}% of bet",
        config.win_probability * 100.0,
        config.odds,
        config.trials,
        config.stop_loss * 100.0
    );
    println!("Full Kelly fraction: {:.2}%", full_kelly * 100.0);
    println!();

    for report in &reports {
        print_report(report);
    }

    if let Some(path) = &args.output {
        write_output(path, &config, full_kelly, &reports)?;
        info!("Wrote {} runs to {}", reports.len(), path.display());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kelly_growth={level},kelly_sim={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &RunReport) {
    let result = &report.result;

    println!(
        "--- {:.2}x Kelly | {:.2}% Bet Size ---",
        report.multiplier,
        report.bet_fraction * 100.0
    );
    println!("{}", optimal_fraction_line(report.bet_fraction));
    println!(
        "Start: {} | End: {} ({:.2}%)",
        format_money(result.starting_capital, 0),
        format_money(result.final_capital, 0),
        result.percent_return
    );
    println!("Final Capital: {}", format_money(result.final_capital, 2));
    println!(
        "Total Return: {} ({:.2}%)",
        format_money(result.absolute_return, 2),
        result.percent_return
    );
    println!(
        "Peak: {} | Max drawdown: {} ({:.2}%) | Wins/Losses: {}/{}",
        format_money(result.peak_capital, 2),
        format_money(result.max_drawdown, 2),
        result.max_drawdown_pct,
        result.wins,
        result.losses
    );
    println!();
}

fn optimal_fraction_line(bet_fraction: f64) -> String {
    format!("Optimal Kelly Fraction: {:.2}%", bet_fraction * 100.0)
}

fn write_output(
    path: &Path,
    config: &SimulationConfig,
    full_kelly_fraction: f64,
    runs: &[RunReport],
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let output = RunOutput {
        config,
        full_kelly_fraction,
        runs,
    };
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writer.flush()?;
    Ok(())
}

/// `$1,234.56` style formatting. Non-finite values print as-is.
fn format_money(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{}${}.{}", sign, grouped, frac),
        None => format!("{}${}", sign, grouped),
    }
}
