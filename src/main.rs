/*!
 * schedsim - Main Entry Point
 *
 * Command line front end over the simulator facade:
 * - simulate a workload under one policy
 * - generate a synthetic workload
 * - compare every available policy
 * - report model status
 */

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use schedsim::core::limits::{DEFAULT_GENERATED_COUNT, DEFAULT_MAX_ARRIVAL_GAP, DEFAULT_MEAN_BURST};
use schedsim::{
    init_tracing, load_workload, BurstDistribution, GeneratorConfig, Policy, SimConfig,
    SimulateResponse, Simulator, Tick, TimeQuantum, Workload,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "schedsim")]
#[command(version)]
#[command(about = "Discrete-time CPU scheduling simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Safety bound on simulated ticks (overrides SCHEDSIM_MAX_TICKS)
    #[arg(long, global = true)]
    max_ticks: Option<Tick>,

    /// Score model for the learned policy (overrides SCHEDSIM_MODEL_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one policy and print the timeline, metrics and process states as JSON
    Simulate(SimulateArgs),
    /// Print a synthetic workload as JSON
    Generate(GeneratorArgs),
    /// Run every available policy over the same workload
    Compare(CompareArgs),
    /// Print whether a score model is loaded
    ModelInfo,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// srtf, sjf, priority, rr or learned
    #[arg(long, default_value = "srtf")]
    policy: Policy,

    /// Time quantum in ticks (defaults to SCHEDSIM_TIME_QUANTUM or 1)
    #[arg(long)]
    quantum: Option<i64>,

    /// Print aggregate metrics only
    #[arg(long)]
    metrics_only: bool,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[arg(long)]
    quantum: Option<i64>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SourceArgs {
    /// CSV or JSON workload file; a workload is generated when absent
    #[arg(long, short)]
    input: Option<PathBuf>,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Args)]
struct GeneratorArgs {
    #[arg(long, default_value_t = DEFAULT_GENERATED_COUNT)]
    count: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Largest gap between consecutive arrivals
    #[arg(long, default_value_t = DEFAULT_MAX_ARRIVAL_GAP)]
    max_gap: Tick,

    #[arg(long, default_value_t = DEFAULT_MEAN_BURST)]
    mean_burst: f64,

    /// Draw bursts from a normal instead of an exponential distribution
    #[arg(long)]
    normal: bool,

    /// Give every process priority 0
    #[arg(long)]
    no_priority: bool,

    /// Attach deadlines at arrival + ceil(burst * slack)
    #[arg(long)]
    deadline_slack: Option<f64>,
}

impl GeneratorArgs {
    fn to_config(&self) -> GeneratorConfig {
        let burst = if self.normal {
            BurstDistribution::Normal { mean: self.mean_burst }
        } else {
            BurstDistribution::Exponential { mean: self.mean_burst }
        };
        GeneratorConfig {
            count: self.count,
            seed: self.seed,
            max_arrival_gap: self.max_gap,
            burst,
            with_priority: !self.no_priority,
            deadline_slack: self.deadline_slack,
            ..GeneratorConfig::default()
        }
    }
}

fn workload(simulator: &Simulator, source: &SourceArgs) -> Result<Workload> {
    match &source.input {
        Some(path) => {
            info!(path = %path.display(), "Loading workload");
            Ok(load_workload(path)?)
        }
        None => Ok(simulator.generate(&source.generator.to_config())?),
    }
}

fn quantum(simulator: &Simulator, ticks: Option<i64>) -> Result<TimeQuantum> {
    match ticks {
        Some(ticks) => Ok(TimeQuantum::new(ticks)?),
        None => Ok(simulator.config().default_quantum),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", text);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = SimConfig::from_env()?;
    if let Some(max_ticks) = cli.max_ticks {
        config = config.with_max_ticks(max_ticks);
    }
    if let Some(model) = cli.model {
        config = config.with_model_path(model);
    }
    let simulator = Simulator::from_config(config)?;

    match cli.command {
        Command::Simulate(args) => {
            let workload = workload(&simulator, &args.source)?;
            let quantum = quantum(&simulator, args.quantum)?;
            let outcome = simulator.run(&workload, args.policy, quantum)?;
            if args.metrics_only {
                print_json(&outcome.metrics())
            } else {
                print_json(&SimulateResponse::from(outcome))
            }
        }
        Command::Generate(args) => {
            let workload = simulator.generate(&args.to_config())?;
            print_json(&workload.to_rows())
        }
        Command::Compare(args) => {
            let workload = workload(&simulator, &args.source)?;
            let quantum = quantum(&simulator, args.quantum)?;
            let rows = simulator.compare(&workload, quantum)?;
            if args.json {
                return print_json(&rows);
            }

            println!(
                "{:<9} {:>9} {:>9} {:>9} {:>9} {:>8} {:>6}",
                "policy", "avg_wait", "avg_tat", "avg_resp", "miss", "switches", "util"
            );
            for row in &rows {
                println!(
                    "{:<9} {:>9.3} {:>9.3} {:>9.3} {:>9.3} {:>8} {:>6.2}",
                    row.policy.as_str(),
                    row.metrics.avg_wait,
                    row.metrics.avg_tat,
                    row.metrics.avg_resp,
                    row.metrics.miss_rate,
                    row.stats.context_switches,
                    row.stats.cpu_utilization()
                );
            }
            Ok(())
        }
        Command::ModelInfo => print_json(&simulator.model_info()),
    }
}
