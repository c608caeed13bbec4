//! Diurnal traffic-profile generation.
//!
//! Traffic follows one sinusoidal day: low overnight, peaking mid-cycle,
//!
//! ```text
//! base(t) = sin(2π · t / steps − π/2) + 1.2      (range [0.2, 2.2])
//! users   = max(min_users, base(t) · max_users · noise)   noise ∈ [0.8, 1.2)
//! load    = users · demand                       demand ∈ [d_min, d_max)
//! ```
//!
//! Noise and demand are drawn per sector per step, so sectors de-correlate
//! while sharing the daily shape.  Deterministic for a given RNG state.

use std::f64::consts::PI;

use ran_core::{RanConfig, SimRng};
use ran_traffic::{TrafficResult, TrafficTrace};

/// Generate a `(trace_steps × sectors)` diurnal trace from `cfg`.
///
/// `rng` should be a dedicated child stream (see `SimRng::child`) so trace
/// generation stays independent of placement draws.
pub fn diurnal_trace(cfg: &RanConfig, rng: &mut SimRng) -> TrafficResult<TrafficTrace> {
    let steps = cfg.traffic.trace_steps;
    let sectors = cfg.layout().total_sectors();
    let t_cfg = &cfg.traffic;

    let mut user_rows = Vec::with_capacity(steps as usize);
    let mut load_rows = Vec::with_capacity(steps as usize);

    for t in 0..steps {
        let phase = 2.0 * PI * t as f64 / steps as f64;
        let base = (phase - PI / 2.0).sin() + 1.2;

        let mut users = Vec::with_capacity(sectors);
        let mut loads = Vec::with_capacity(sectors);
        for _ in 0..sectors {
            let noise = rng.gen_range(0.8..1.2);
            let u = ((base * t_cfg.max_users as f64 * noise) as u32).max(t_cfg.min_users);
            let demand = rng.gen_range(t_cfg.demand_per_user_min..t_cfg.demand_per_user_max);
            users.push(u);
            loads.push(u as f64 * demand);
        }
        user_rows.push(users);
        load_rows.push(loads);
    }

    TrafficTrace::from_rows(user_rows, load_rows)
}
