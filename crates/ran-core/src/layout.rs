//! Cell ↔ sector index arithmetic.
//!
//! Sectors are indexed globally as `cell * sectors_per_cell + local`.  Every
//! piece of per-cell logic in the engine and the energy model slices the flat
//! per-sector arrays through [`CellLayout`], so the stride invariant is
//! written in exactly one place.

use std::ops::Range;

use crate::{CellId, SectorId};

/// The fixed shape of the network: how many cells, how many sectors each.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CellLayout {
    pub num_cells: u32,
    pub sectors_per_cell: u32,
}

impl CellLayout {
    pub fn new(num_cells: u32, sectors_per_cell: u32) -> Self {
        Self { num_cells, sectors_per_cell }
    }

    /// Total sector count across all cells — the length of every action,
    /// load, and user vector in the simulator.
    #[inline]
    pub fn total_sectors(&self) -> usize {
        self.num_cells as usize * self.sectors_per_cell as usize
    }

    /// Global sector index for `(cell, local)`.
    ///
    /// # Panics
    /// Panics in debug mode if `local >= sectors_per_cell`.
    #[inline]
    pub fn sector_id(&self, cell: CellId, local: u32) -> SectorId {
        debug_assert!(local < self.sectors_per_cell);
        SectorId(cell.0 * self.sectors_per_cell + local)
    }

    /// The cell that owns a global sector index.
    #[inline]
    pub fn cell_of(&self, sector: SectorId) -> CellId {
        CellId(sector.0 / self.sectors_per_cell)
    }

    /// The contiguous index range of `cell`'s sectors in any flat per-sector
    /// array.
    #[inline]
    pub fn sector_range(&self, cell: CellId) -> Range<usize> {
        let start = cell.index() * self.sectors_per_cell as usize;
        start..start + self.sectors_per_cell as usize
    }

    /// Iterator over all cell ids, ascending.
    pub fn cells(&self) -> impl Iterator<Item = CellId> {
        (0..self.num_cells).map(CellId)
    }
}
