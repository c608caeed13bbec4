//! synthetic — smallest runnable example for the ran-sim simulator.
//!
//! Runs a handful of fixed sector-switching policies against synthetic
//! traffic and prints how much power each trades for dropped traffic.

use anyhow::Result;

use ran_core::RanConfig;
use ran_env::{run_episode, NoopObserver, RanEnv};

// ── Constants ─────────────────────────────────────────────────────────────────

const NUM_CELLS: u32 = 5;
const SECTORS_PER_CELL: u32 = 3;
const EPISODE_STEPS: u64 = 48;
const SEED: u64 = 42;

/// A sector stays on while its demanded load exceeds this fraction of its
/// capacity (the "shed idle sectors" heuristic).
const LOAD_ON_FRACTION: f64 = 0.2;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut config = RanConfig::default();
    config.network.num_cells = NUM_CELLS;
    config.network.sectors_per_cell = SECTORS_PER_CELL;
    config.episode.max_steps = EPISODE_STEPS;
    config.episode.seed = SEED;

    println!("=== synthetic — ran-sim ===");
    println!(
        "Cells: {NUM_CELLS} × {SECTORS_PER_CELL} sectors  |  Steps: {EPISODE_STEPS}  |  Seed: {SEED}"
    );
    println!();

    let on_threshold = config.network.sector_capacity * LOAD_ON_FRACTION;

    // Policies are plain observation → action closures; a training driver
    // would slot a learned one in here.
    let policies: [(&str, Box<dyn FnMut(&[f64]) -> Vec<bool>>); 3] = [
        ("all-on", Box::new(|obs: &[f64]| vec![true; obs.len() / 4])),
        ("all-off", Box::new(|obs: &[f64]| vec![false; obs.len() / 4])),
        (
            "load-aware",
            Box::new(move |obs: &[f64]| {
                obs.chunks_exact(4)
                    .map(|sector| sector[2] > on_threshold) // sector[2] = load
                    .collect()
            }),
        ),
    ];

    println!(
        "{:<12} {:>10} {:>10} {:>10} {:>12}",
        "Policy", "Power(W)", "Drop(%)", "Switches", "Reward"
    );
    println!("{}", "-".repeat(58));

    for (name, mut policy) in policies {
        let mut env = RanEnv::synthetic(config.clone())?;
        let summary = run_episode(&mut env, &mut policy, &mut NoopObserver)?;
        println!(
            "{:<12} {:>10.1} {:>10.2} {:>10.2} {:>12.1}",
            name,
            summary.avg_power,
            summary.avg_drop_rate * 100.0,
            summary.avg_switches,
            summary.total_reward,
        );
    }

    Ok(())
}
