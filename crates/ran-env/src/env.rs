//! The `RanEnv` engine: reset/step state machine and the offload algorithm.

use ran_core::{CellLayout, RanConfig, SimRng};
use ran_energy::{power, switch_count};
use ran_reward::{RewardEvaluator, RewardResult, StepMetrics};
use ran_topology::Topology;
use ran_traffic::{SyntheticTraffic, TrafficProvider, TrafficSnapshot};

use crate::state::{EpisodeState, StepInfo, StepOutcome};
use crate::{EnvBuilder, EnvError, EnvResult};

/// Guards the `load / users` division in observations when a sector has no
/// connected users.
pub const USERS_EPSILON: f64 = 1e-6;

/// The simulation engine.
///
/// Owns the full episode state; external drivers call [`reset`](Self::reset)
/// then [`step`](Self::step) until the outcome reports termination.  Create
/// via [`EnvBuilder`] or [`RanEnv::synthetic`].
pub struct RanEnv<T: TrafficProvider> {
    pub(crate) config: RanConfig,
    pub(crate) layout: CellLayout,
    pub(crate) topology: Topology,
    pub(crate) traffic: T,
    pub(crate) reward: RewardEvaluator,
    pub(crate) episode: Option<EpisodeState>,
}

impl RanEnv<SyntheticTraffic> {
    /// Convenience constructor for synthetic mode: hexagonal placement and a
    /// traffic stream derived from the config seed.
    pub fn synthetic(config: RanConfig) -> EnvResult<Self> {
        config.validate().map_err(EnvError::Core)?;
        let mut rng = SimRng::new(config.episode.seed);
        let traffic = SyntheticTraffic::new(
            &config.traffic,
            config.layout().total_sectors(),
            rng.child(1),
        );
        EnvBuilder::new(config, traffic).build()
    }
}

impl<T: TrafficProvider> RanEnv<T> {
    // ── Shape accessors (the observation/action boundary) ─────────────────

    /// Length of a valid action vector: one bit per sector.
    pub fn action_len(&self) -> usize {
        self.layout.total_sectors()
    }

    /// Length of the observation vector: four features per sector.
    pub fn observation_len(&self) -> usize {
        self.layout.total_sectors() * 4
    }

    pub fn config(&self) -> &RanConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Steps taken in the current episode, if one is live.
    pub fn current_step(&self) -> Option<u64> {
        self.episode.as_ref().map(|ep| ep.step)
    }

    /// The step count at which episodes terminate: the trace length in
    /// dataset mode, the configured maximum in synthetic mode.
    pub fn episode_horizon(&self) -> u64 {
        self.traffic
            .horizon()
            .unwrap_or(self.config.episode.max_steps)
    }

    // ── Reward-formula boundary ───────────────────────────────────────────

    /// Swap the active reward formula wholesale.  A rejected formula leaves
    /// the engine on the baseline objective; either way episodes keep
    /// running.
    pub fn set_reward_formula(&mut self, src: &str) -> RewardResult<()> {
        self.reward.set_formula(src)
    }

    /// Return to the baseline objective.
    pub fn clear_reward_formula(&mut self) {
        self.reward.clear_formula();
    }

    // ── Episode control ───────────────────────────────────────────────────

    /// Start a new episode: step counter zeroed, all sectors active, step-0
    /// traffic pulled.  Returns the initial observation.
    pub fn reset(&mut self) -> Vec<f64> {
        let snapshot = self.traffic.snapshot(0);
        let ep = EpisodeState::fresh(self.layout.total_sectors(), snapshot);
        let obs = build_observation(&ep.snapshot, &ep.activation);
        self.episode = Some(ep);
        obs
    }

    /// Apply one action.  See the crate docs for the step anatomy.
    pub fn step(&mut self, action: &[bool]) -> EnvResult<StepOutcome> {
        let layout = self.layout;
        let capacity = self.config.network.sector_capacity;
        let horizon = self.episode_horizon();

        let ep = self.episode.as_mut().ok_or(EnvError::NotStarted)?;
        if ep.terminated {
            return Err(EnvError::EpisodeOver);
        }
        if action.len() != layout.total_sectors() {
            return Err(EnvError::ActionLength {
                expected: layout.total_sectors(),
                got: action.len(),
            });
        }

        // ── ①② Serve and offload ──────────────────────────────────────────
        let total_demand = ep.snapshot.total_load();
        let mut served_total = 0.0;

        for cell in layout.cells() {
            let range = layout.sector_range(cell);
            let acts = &action[range.clone()];
            let loads = &ep.snapshot.load[range];

            // Active sectors serve their own demand up to capacity.
            let served_local: f64 = acts
                .iter()
                .zip(loads)
                .map(|(&on, &load)| if on { load.min(capacity) } else { 0.0 })
                .sum();
            served_total += served_local;

            // Demand stranded on switched-off sectors.
            let unmet: f64 = acts
                .iter()
                .zip(loads)
                .map(|(&on, &load)| if on { 0.0 } else { load })
                .sum();
            if unmet <= 0.0 {
                continue;
            }

            let active = acts.iter().filter(|&&on| on).count();
            if active > 0 {
                // Intra-site offload: the cell's remaining active capacity
                // absorbs what it can.
                let remaining = (active as f64 * capacity - served_local).max(0.0);
                served_total += unmet.min(remaining);
            } else if let Some(_neighbor) = self.topology.nearest_neighbor(cell, &[]) {
                // Fully dark: the nearest site is credited with up to one
                // sector-capacity of the stranded demand.  The neighbor's
                // own load and capacity are NOT decremented — a deliberate
                // simplification, not an accounting bug to fix here.
                served_total += unmet.min(capacity);
            }
            // No neighbor at all: the demand stays unserved.
        }

        // ── ③ Drop rate ───────────────────────────────────────────────────
        let drop_rate = if total_demand > 0.0 {
            (1.0 - served_total / total_demand).clamp(0.0, 1.0)
        } else {
            0.0
        };

        // ── ④⑤ Power and reward ───────────────────────────────────────────
        let switches = switch_count(action, &ep.prev_action);
        let step_power = power(action, &ep.prev_action, &layout, &self.config.energy);

        let metrics = StepMetrics {
            power: step_power,
            drop_rate,
            switches: switches as f64,
            users_active: ep.snapshot.total_users() as f64,
        };
        let reward = self.reward.evaluate(&metrics);

        // ── ⑥⑦ Advance and terminate ──────────────────────────────────────
        ep.prev_action.copy_from_slice(action);
        ep.activation.copy_from_slice(action);
        ep.step += 1;
        ep.snapshot = self.traffic.snapshot(ep.step);
        ep.terminated = ep.step >= horizon;

        Ok(StepOutcome {
            observation: build_observation(&ep.snapshot, &ep.activation),
            reward,
            terminated: ep.terminated,
            info: StepInfo {
                power: step_power,
                drop_rate,
                switches,
            },
        })
    }

    /// The observation for the engine's current state, if an episode is live.
    pub fn observation(&self) -> Option<Vec<f64>> {
        self.episode
            .as_ref()
            .map(|ep| build_observation(&ep.snapshot, &ep.activation))
    }
}

/// Per sector: `(users, load/users, load, active)`, flattened in sector
/// order.  The user count is padded by [`USERS_EPSILON`] in the division so
/// an empty sector reports ~0 per-user demand instead of dividing by zero.
fn build_observation(snapshot: &TrafficSnapshot, activation: &[bool]) -> Vec<f64> {
    let mut obs = Vec::with_capacity(snapshot.sector_count() * 4);
    for ((&users, &load), &active) in snapshot
        .users
        .iter()
        .zip(&snapshot.load)
        .zip(activation)
    {
        let users = users as f64;
        obs.push(users);
        obs.push(load / (users + USERS_EPSILON));
        obs.push(load);
        obs.push(if active { 1.0 } else { 0.0 });
    }
    obs
}
