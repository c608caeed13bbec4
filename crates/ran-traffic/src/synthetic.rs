//! Synthetic traffic: fresh uniform draws on every call.

use ran_core::{SimRng, TrafficConfig};

use crate::{TrafficProvider, TrafficSnapshot};

/// Generates traffic on demand instead of replaying a recording.
///
/// Each snapshot draws, per sector, a user count uniformly in
/// `[min_users, max_users)` and a per-user demand uniformly in
/// `[demand_per_user_min, demand_per_user_max)`; the sector load is
/// `users * demand`.  There is no cycling — two calls with the same step
/// index produce different traffic.
pub struct SyntheticTraffic {
    min_users: u32,
    max_users: u32,
    demand_min: f64,
    demand_max: f64,
    sectors: usize,
    rng: SimRng,
}

impl SyntheticTraffic {
    /// `rng` should be a dedicated child stream so traffic draws don't
    /// perturb other seeded components.
    ///
    /// # Panics
    /// Panics in debug mode on inverted bounds; `RanConfig::validate`
    /// rejects those before any provider is constructed.
    pub fn new(cfg: &TrafficConfig, sectors: usize, rng: SimRng) -> Self {
        debug_assert!(cfg.max_users > cfg.min_users);
        debug_assert!(cfg.demand_per_user_max > cfg.demand_per_user_min);
        Self {
            min_users: cfg.min_users,
            max_users: cfg.max_users,
            demand_min: cfg.demand_per_user_min,
            demand_max: cfg.demand_per_user_max,
            sectors,
            rng,
        }
    }
}

impl TrafficProvider for SyntheticTraffic {
    fn sector_count(&self) -> usize {
        self.sectors
    }

    fn horizon(&self) -> Option<u64> {
        None
    }

    fn snapshot(&mut self, _step: u64) -> TrafficSnapshot {
        let mut users = Vec::with_capacity(self.sectors);
        let mut load = Vec::with_capacity(self.sectors);
        for _ in 0..self.sectors {
            let u = self.rng.gen_range(self.min_users..self.max_users);
            let demand = self.rng.gen_range(self.demand_min..self.demand_max);
            users.push(u);
            load.push(u as f64 * demand);
        }
        TrafficSnapshot { users, load }
    }
}
