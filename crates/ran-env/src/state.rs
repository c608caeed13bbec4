//! Episode state and the records a step produces.

use ran_traffic::TrafficSnapshot;

// ── EpisodeState ──────────────────────────────────────────────────────────────

/// Mutable per-episode state, owned exclusively by the engine and rebuilt on
/// every `reset()`.
///
/// Invariant: `prev_action` always reflects the action applied in the
/// immediately preceding step (all-on at episode start), so switch
/// accounting never looks further back than one step.
#[derive(Clone, Debug)]
pub(crate) struct EpisodeState {
    /// Steps completed since reset.
    pub step: u64,
    /// Current per-sector activation (what the observation reports).
    pub activation: Vec<bool>,
    /// Activation applied in the previous step.
    pub prev_action: Vec<bool>,
    /// Traffic the *next* step will serve.
    pub snapshot: TrafficSnapshot,
    /// Set when the final step has been taken; `step()` refuses thereafter.
    pub terminated: bool,
}

impl EpisodeState {
    pub fn fresh(total_sectors: usize, snapshot: TrafficSnapshot) -> Self {
        Self {
            step: 0,
            activation: vec![true; total_sectors],
            prev_action: vec![true; total_sectors],
            snapshot,
            terminated: false,
        }
    }
}

// ── Step records ──────────────────────────────────────────────────────────────

/// The metrics record returned alongside each step for external logging.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepInfo {
    pub power: f64,
    pub drop_rate: f64,
    pub switches: u32,
}

/// Everything one `step()` produces.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Next observation: per sector `(users, load/users, load, active)`.
    pub observation: Vec<f64>,
    pub reward: f64,
    pub terminated: bool,
    pub info: StepInfo,
}

// ── EpisodeSummary ────────────────────────────────────────────────────────────

/// Averages over one completed episode — the quantities the external
/// feedback loop compares against its drop-rate threshold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeSummary {
    pub steps: u64,
    pub total_reward: f64,
    pub avg_power: f64,
    pub avg_drop_rate: f64,
    pub avg_switches: f64,
}

impl EpisodeSummary {
    /// `true` if this episode's average drop rate breaches `threshold` —
    /// the signal the feedback loop turns into "BAD" guidance.
    pub fn drop_rate_exceeds(&self, threshold: f64) -> bool {
        self.avg_drop_rate > threshold
    }
}
