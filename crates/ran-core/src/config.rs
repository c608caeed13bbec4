//! Simulation configuration surface.
//!
//! Configuration is grouped by concern and aggregated into [`RanConfig`],
//! which is what builders and the dataset tooling consume.  Typically loaded
//! from a JSON/TOML file by the application crate; all structs derive `serde`
//! so the whole surface can be persisted alongside a dataset bundle.
//!
//! Validation is fatal and up-front: [`RanConfig::validate`] is called by
//! every constructor that accepts a config, and a bad value is a
//! [`RanError::Config`](crate::RanError::Config) — never silently coerced.

use crate::{CellLayout, RanError, RanResult};

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Shape of the radio network.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NetworkConfig {
    /// Number of cell sites.
    pub num_cells: u32,

    /// Sectors (antenna faces) per site.  3 is the usual macro layout.
    pub sectors_per_cell: u32,

    /// Distance between adjacent sites, in km.  Scales both the hexagonal
    /// grid pitch and the random-scatter area.
    pub inter_site_distance_km: f64,

    /// Serving capacity of one active sector, in load units (Mbps).
    pub sector_capacity: f64,
}

impl NetworkConfig {
    /// The index arithmetic helper for this shape.
    #[inline]
    pub fn layout(&self) -> CellLayout {
        CellLayout::new(self.num_cells, self.sectors_per_cell)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            num_cells: 5,
            sectors_per_cell: 3,
            inter_site_distance_km: 1.5,
            sector_capacity: 50.0,
        }
    }
}

// ── TrafficConfig ─────────────────────────────────────────────────────────────

/// Bounds for user counts and per-user demand.
///
/// Both synthetic generation and the diurnal trace builder draw uniformly
/// within these half-open ranges.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TrafficConfig {
    /// Minimum connected users per sector (inclusive).
    pub min_users: u32,

    /// Maximum connected users per sector (exclusive).
    pub max_users: u32,

    /// Per-user demand lower bound, Mbps (inclusive).
    pub demand_per_user_min: f64,

    /// Per-user demand upper bound, Mbps (exclusive).
    pub demand_per_user_max: f64,

    /// Rows in a generated traffic trace (one per step; 24 = one day at
    /// 1-hour steps).
    pub trace_steps: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            min_users: 5,
            max_users: 50,
            demand_per_user_min: 0.5,
            demand_per_user_max: 5.0,
            trace_steps: 24,
        }
    }
}

// ── EnergyParams ──────────────────────────────────────────────────────────────

/// Power-model constants, in watts.  All must be non-negative.
#[derive(Copy, Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EnergyParams {
    /// Fixed draw of a cell with at least one active sector.
    pub p_base: f64,

    /// Draw of a fully dark cell (deep sleep).
    pub p_sleep: f64,

    /// Additional draw per active sector.
    pub p_sector_active: f64,

    /// Energy cost charged per sector state toggle between consecutive steps.
    pub p_switch: f64,
}

impl Default for EnergyParams {
    fn default() -> Self {
        Self {
            p_base: 200.0,
            p_sleep: 50.0,
            p_sector_active: 100.0,
            p_switch: 10.0,
        }
    }
}

// ── EpisodeConfig ─────────────────────────────────────────────────────────────

/// Episode-level settings.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EpisodeConfig {
    /// Episode length when the traffic provider has no horizon of its own
    /// (synthetic mode).  Dataset-backed episodes terminate at the trace
    /// length instead.
    pub max_steps: u64,

    /// Master RNG seed.  The same seed always produces identical placement,
    /// traces, and synthetic traffic.
    pub seed: u64,

    /// Drop-rate threshold consumed by the external feedback loop; the
    /// engine itself never reads it.
    pub drop_rate_threshold: f64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_steps: 96,
            seed: 42,
            drop_rate_threshold: 0.05,
        }
    }
}

// ── RanConfig ─────────────────────────────────────────────────────────────────

/// Top-level configuration: the full surface of §external interfaces.
#[derive(Clone, Debug, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RanConfig {
    pub network: NetworkConfig,
    pub traffic: TrafficConfig,
    pub energy: EnergyParams,
    pub episode: EpisodeConfig,
}

impl RanConfig {
    /// Check every invariant the rest of the simulator relies on.
    ///
    /// Constructors call this before touching any field, so downstream code
    /// can assume e.g. `max_users > min_users` without re-checking.
    pub fn validate(&self) -> RanResult<()> {
        let n = &self.network;
        if n.num_cells == 0 {
            return Err(RanError::Config("num_cells must be > 0".into()));
        }
        if n.sectors_per_cell == 0 {
            return Err(RanError::Config("sectors_per_cell must be > 0".into()));
        }
        if !(n.inter_site_distance_km > 0.0) {
            return Err(RanError::Config("inter_site_distance_km must be > 0".into()));
        }
        if !(n.sector_capacity >= 0.0) {
            return Err(RanError::Config("sector_capacity must be >= 0".into()));
        }

        let t = &self.traffic;
        if t.max_users <= t.min_users {
            return Err(RanError::Config(format!(
                "max_users ({}) must exceed min_users ({})",
                t.max_users, t.min_users
            )));
        }
        if !(t.demand_per_user_min >= 0.0) || t.demand_per_user_max <= t.demand_per_user_min {
            return Err(RanError::Config(
                "per-user demand bounds must satisfy 0 <= min < max".into(),
            ));
        }
        if t.trace_steps == 0 {
            return Err(RanError::Config("trace_steps must be > 0".into()));
        }

        let e = &self.energy;
        for (name, v) in [
            ("p_base", e.p_base),
            ("p_sleep", e.p_sleep),
            ("p_sector_active", e.p_sector_active),
            ("p_switch", e.p_switch),
        ] {
            if !(v >= 0.0) {
                return Err(RanError::Config(format!("{name} must be >= 0, got {v}")));
            }
        }

        let ep = &self.episode;
        if ep.max_steps == 0 {
            return Err(RanError::Config("max_steps must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&ep.drop_rate_threshold) {
            return Err(RanError::Config("drop_rate_threshold must be in [0, 1]".into()));
        }

        Ok(())
    }

    /// Shorthand for `self.network.layout()`.
    #[inline]
    pub fn layout(&self) -> CellLayout {
        self.network.layout()
    }
}
