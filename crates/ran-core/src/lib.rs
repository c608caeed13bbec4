//! `ran-core` — foundational types for the `ran-sim` cellular network
//! simulator.
//!
//! This crate is a dependency of every other `ran-*` crate.  It intentionally
//! has no `ran-*` dependencies and minimal external ones (only `rand`,
//! `serde`, and `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `CellId`, `SectorId`                                      |
//! | [`layout`] | `CellLayout` — the cell↔sector index arithmetic           |
//! | [`config`] | `NetworkConfig`, `TrafficConfig`, `EnergyParams`,         |
//! |            | `EpisodeConfig`, `RanConfig`                              |
//! | [`rng`]    | `SimRng` (seeded, reproducible)                           |
//! | [`error`]  | `RanError`, `RanResult`                                   |

pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EnergyParams, EpisodeConfig, NetworkConfig, RanConfig, TrafficConfig};
pub use error::{RanError, RanResult};
pub use ids::{CellId, SectorId};
pub use layout::CellLayout;
pub use rng::SimRng;
