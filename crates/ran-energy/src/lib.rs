//! `ran-energy` — the instantaneous power model.
//!
//! Pure functions over activation slices; no state, no I/O.  Per step:
//!
//! ```text
//! power = Σ_cells  (dark      → p_sleep
//!                   otherwise → p_base + active_sectors · p_sector_active)
//!       + switch_count(action, prev) · p_switch
//! ```
//!
//! All constants are validated non-negative by `RanConfig::validate`, so the
//! result is never negative.

use ran_core::{CellLayout, EnergyParams};


/// Number of sectors whose activation state differs between two consecutive
/// steps — the quantity the switch-cost term and the reward metrics share.
#[inline]
pub fn switch_count(action: &[bool], prev: &[bool]) -> u32 {
    debug_assert_eq!(action.len(), prev.len());
    action
        .iter()
        .zip(prev)
        .filter(|(a, p)| a != p)
        .count() as u32
}

/// Total instantaneous power (watts) for one step.
///
/// The switch cost is charged once per step, not per cell.
pub fn power(
    action: &[bool],
    prev: &[bool],
    layout: &CellLayout,
    params: &EnergyParams,
) -> f64 {
    debug_assert_eq!(action.len(), layout.total_sectors());
    debug_assert_eq!(prev.len(), layout.total_sectors());

    let mut total = 0.0;
    for cell in layout.cells() {
        let active = action[layout.sector_range(cell)]
            .iter()
            .filter(|&&on| on)
            .count();
        total += if active == 0 {
            params.p_sleep
        } else {
            params.p_base + active as f64 * params.p_sector_active
        };
    }

    total + switch_count(action, prev) as f64 * params.p_switch
}
