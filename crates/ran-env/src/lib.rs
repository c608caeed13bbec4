//! `ran-env` — the episode engine of the ran-sim simulator.
//!
//! # Step anatomy
//!
//! ```text
//! step(action):
//!   ① Serve    — per cell, active sectors serve min(demand, capacity).
//!   ② Offload  — unmet demand from dark sectors is absorbed by the cell's
//!                remaining active capacity; a fully dark cell credits up to
//!                one sector-capacity of demand to its nearest neighbor.
//!   ③ Drop     — 1 − served/demand, clamped to [0, 1]; 0 if demand is 0.
//!   ④ Power    — ran-energy over (action, previous action).
//!   ⑤ Reward   — ran-reward over {power, drop_rate, switches, users_active}.
//!   ⑥ Advance  — previous ← action, step += 1, pull next traffic snapshot.
//!   ⑦ Terminate — at the trace horizon, or max_steps in synthetic mode.
//! ```
//!
//! The engine is generic over its [`TrafficProvider`] and single-threaded
//! throughout: a vectorized driver runs several fully independent `RanEnv`
//! values, one per worker.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut env = RanEnv::synthetic(RanConfig::default())?;
//! let obs = env.reset();
//! let out = env.step(&vec![true; env.action_len()])?;
//! println!("power {} drop {}", out.info.power, out.info.drop_rate);
//! ```

pub mod builder;
pub mod env;
pub mod error;
pub mod observer;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::EnvBuilder;
pub use env::{RanEnv, USERS_EPSILON};
pub use error::{EnvError, EnvResult};
pub use observer::{run_episode, EpisodeObserver, NoopObserver};
pub use state::{EpisodeSummary, StepInfo, StepOutcome};

// The engine's collaborators, re-exported so drivers only import one crate.
pub use ran_reward::{RewardEvaluator, StepMetrics};
pub use ran_traffic::{SyntheticTraffic, TrafficProvider, TrafficTrace};
