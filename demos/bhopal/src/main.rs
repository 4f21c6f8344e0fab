//! bhopal — earthquake timeline over a 25-node synthetic water network.
//!
//! Nodes are scattered around central Bhopal; the first three are critical
//! facilities.  The demo runs a magnitude 6.5 event from minute 0 to 10,
//! prints one line per minute, and exports every run to CSV.
//!
//! ```text
//! bhopal                        # generated network
//! bhopal nodes.csv pipes.csv    # network from CSV
//! ```
//!
//! `RUST_LOG=debug` shows the per-stage pipeline events.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qt_core::SimConfig;
use qt_hazard::LogisticScorer;
use qt_network::{GeneratorConfig, LoadOptions, WaterNetwork, generate_network, load_network_csv};
use qt_output::{CsvWriter, SimOutputObserver};
use qt_response::{PriorityRouter, SupplyRoute};
use qt_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64  = 42;
const MAGNITUDE:  f64  = 6.5;
const MINUTES:    u32  = 10;
const OUTPUT_DIR: &str = "output/bhopal";

// ── Network source ────────────────────────────────────────────────────────────

fn load_base() -> Result<WaterNetwork> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(generate_network(&GeneratorConfig::default(), SEED)?),
        [nodes, pipes] => load_network_csv(Path::new(nodes), Path::new(pipes), &LoadOptions::default())
            .with_context(|| format!("loading {nodes} and {pipes}")),
        _ => bail!("usage: bhopal [nodes.csv pipes.csv]"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("=== bhopal — quake_twin water network ===");
    println!("Magnitude: {MAGNITUDE}  |  Minutes: 0–{MINUTES}  |  Seed: {SEED}");
    println!();

    // 1. Base network.
    let base = load_base()?;
    println!(
        "Network: {} nodes, {} pipes, {} critical",
        base.node_count(),
        base.pipe_count(),
        base.critical_nodes().len()
    );

    // 2. Simulation: trained scorer, priority router, default tunables.
    let sim = SimBuilder::new(base, LogisticScorer::reference(), PriorityRouter::default())
        .config(SimConfig::default())
        .build()?;

    // 3. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?);

    // 4. Run the timeline.
    let t0 = Instant::now();
    let outcomes = sim.run_timeline_with_observer(MAGNITUDE, MINUTES, &mut obs)?;
    obs.finish();
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    info!(runs = obs.runs(), elapsed_ms = t0.elapsed().as_millis() as u64, "timeline complete");

    // 5. Per-minute summary.
    println!();
    println!(
        "{:>4} {:>9} {:>7} {:>9} {:>9} {:>10} {:>9}",
        "t", "threshold", "failed", "rerouted", "stranded", "critical%", "overall%"
    );
    println!("{}", "-".repeat(64));
    for o in &outcomes {
        let threshold = o.threshold.map_or_else(|| "-".to_owned(), |t| format!("{t:.3}"));
        println!(
            "{:>4} {:>9} {:>7} {:>9} {:>9} {:>10.1} {:>9.1}",
            o.scenario.elapsed_min,
            threshold,
            o.metrics.failed_pipes,
            o.metrics.rerouted_pipes,
            o.stranded.len(),
            o.metrics.critical_service_ratio,
            o.metrics.overall_service_ratio,
        );
    }

    // 6. Critical supply routes at the final minute.
    if let Some(last) = outcomes.last() {
        println!();
        println!("Critical supply routes at t = {} min:", last.scenario.elapsed_min);
        for (&node, route) in &last.routes {
            let name = &last.operational.node(node).name;
            match route {
                SupplyRoute::Reached(path) => {
                    let names = route.node_names(&last.operational).unwrap_or_default();
                    println!("  {name:<6} cost {:>8.1}  {}", path.cost, names.join(" → "));
                }
                SupplyRoute::Unreachable => println!("  {name:<6} unreachable"),
            }
        }
    }

    println!();
    println!("Results written to {OUTPUT_DIR}/ (pipe_results.csv, node_results.csv, run_metrics.csv)");
    Ok(())
}
