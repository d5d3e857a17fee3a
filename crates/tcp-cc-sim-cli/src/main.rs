use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, info};

use tcp_cc_abstract::{ReportingConfig, SimConfig, Variant};
use tcp_cc_simulator::{SimulationReport, Simulator, scenario_runner};

#[derive(Parser, Debug)]
#[command(author, version, about = "Round-based TCP congestion control simulator")]
struct Args {
    /// Number of rounds (RTTs) to simulate.
    #[arg(required_unless_present = "scenario")]
    rounds: Option<usize>,

    /// Input:output speed ratio of the bottleneck relay.
    #[arg(long, default_value_t = 10)]
    mismatch_ratio: usize,

    /// Relay queue size in packets (clamped below the mismatch ratio).
    #[arg(long, default_value_t = 7)]
    buffer_size: usize,

    /// Congestion control algorithm: tahoe or reno.
    #[arg(long, default_value_t = Variant::Tahoe)]
    variant: Variant,

    /// Let Reno time out like Tahoe does.
    #[arg(long, default_value_t = false)]
    reno_timeout: bool,

    /// Load a scenario from disk instead of the command-line configuration.
    #[arg(long, conflicts_with = "rounds")]
    scenario: Option<PathBuf>,

    /// Write a JSON trace of the finished simulation.
    #[arg(long)]
    trace_out: Option<PathBuf>,

    /// Log every segment created (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print the final table and utilization.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    info!("tcp-cc-sim starting…");

    let reporting = ReportingConfig {
        congestion_events: !args.quiet,
        segment_trace: args.verbose > 0,
    };

    let report = if let Some(path) = &args.scenario {
        scenario_runner::run_scenario(path, reporting)?
    } else {
        let rounds = args
            .rounds
            .filter(|n| *n > 0)
            .context("Please enter a positive number of rounds")?;
        run_sim(&args, rounds, reporting)?
    };

    print_table(&report);

    if let Some(trace_path) = &args.trace_out {
        write_trace(trace_path, &report)?;
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn run_sim(args: &Args, rounds: usize, reporting: ReportingConfig) -> Result<SimulationReport> {
    let config = SimConfig {
        reno_timeout: args.reno_timeout,
        ..SimConfig::new(args.mismatch_ratio, args.buffer_size, args.variant)
    };
    let mut sim = Simulator::new(config, reporting).context("Invalid simulator configuration")?;
    if sim.relay().was_clamped() {
        info!(
            "Relay buffer reduced from {} to {} packets",
            sim.relay().requested_buffer_packets(),
            sim.relay().buffer_packets()
        );
    }

    info!("Starting {} simulation for {} rounds…", args.variant, rounds);
    sim.run_rounds(rounds)?;
    info!("Simulation complete.");
    Ok(sim.export_report())
}

fn print_table(report: &SimulationReport) {
    println!("Iter\tCongWindow\tEffctWindow\tFlightSize\tSSThresh\tOutcome");
    println!("{}", "=".repeat(80));
    for r in &report.rounds {
        println!(
            "{}\t{}\t\t{}\t\t{}\t\t{}\t\t{}",
            r.round,
            r.congestion_window,
            r.effective_window,
            r.flight_size,
            r.slow_start_threshold,
            r.outcome
        );
    }
    println!("{}", "=".repeat(80));
    println!(
        "Sender utilization: {} %",
        (report.utilization * 100.0).round()
    );
}

fn write_trace(path: &Path, report: &SimulationReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report).context("Failed to serialize simulation trace")?;
    fs::write(path, &data)
        .with_context(|| format!("Failed to write trace file {}", path.display()))?;
    Ok(())
}
