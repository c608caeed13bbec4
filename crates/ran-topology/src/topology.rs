//! Site placement, the pairwise distance matrix, and neighbor search.
//!
//! # Data layout
//!
//! Distances are precomputed once into a row-major `num_cells × num_cells`
//! `Vec<f64>`; `distance(i, j)` is a single indexed load.  The matrix is
//! symmetric by construction and its diagonal is zero — the diagonal is never
//! a valid neighbor-search result.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over site positions drives
//! [`Topology::nearest_neighbor`].  The R-tree yields candidates in
//! non-decreasing distance order; the search drains every candidate at the
//! minimum distance and returns the lowest cell id among them, so results are
//! deterministic even on the exactly-tied distances a hexagonal grid
//! produces.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ran_core::{CellId, SimRng};

use crate::{SitePosition, TopologyError, TopologyResult};

/// Relative slack for "same distance" when draining tied candidates.
/// Symmetric placements tie exactly; the slack only guards against last-ulp
/// noise from differing summation orders.
const TIE_EPSILON: f64 = 1e-9;

// ── R-tree site entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D point with its `CellId`.
#[derive(Clone)]
struct SiteEntry {
    point: [f64; 2], // [x_km, y_km]
    id: CellId,
}

impl RTreeObject for SiteEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SiteEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Immutable spatial model: site positions, pairwise distances, and a
/// nearest-neighbor index.  Built once per simulation lifetime.
pub struct Topology {
    positions: Vec<SitePosition>,
    /// Row-major symmetric distance matrix, km.
    dist: Vec<f64>,
    inter_site_distance_km: f64,
    spatial_idx: RTree<SiteEntry>,
}

impl Topology {
    // ── Constructors ──────────────────────────────────────────────────────

    /// Deterministic hexagonal-ring layout: site 0 at the origin, subsequent
    /// sites spiralling outward ring by ring, adjacent sites `isd_km` apart.
    pub fn hexagonal(num_cells: u32, isd_km: f64) -> TopologyResult<Self> {
        let positions = hex_spiral(num_cells as usize, isd_km);
        Self::from_positions(positions, isd_km)
    }

    /// Random scatter over a `sqrt(num_cells) * isd_km` square, matching the
    /// scale at which a planned grid of the same size would sit.
    /// Deterministic for a given RNG state.
    pub fn scattered(num_cells: u32, isd_km: f64, rng: &mut SimRng) -> TopologyResult<Self> {
        let side = (num_cells as f64).sqrt() * isd_km;
        let positions = (0..num_cells)
            .map(|_| SitePosition::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
            .collect();
        Self::from_positions(positions, isd_km)
    }

    /// Build from explicit positions (e.g. a reloaded dataset bundle).
    pub fn from_positions(
        positions: Vec<SitePosition>,
        inter_site_distance_km: f64,
    ) -> TopologyResult<Self> {
        if positions.is_empty() {
            return Err(TopologyError::NoSites);
        }
        let n = positions.len();

        let mut dist = vec![0.0; n * n];
        for i in 0..n {
            // Diagonal stays 0; fill both triangles from one computation so
            // the matrix is symmetric to the bit.
            for j in (i + 1)..n {
                let d = positions[i].distance_km(positions[j]);
                dist[i * n + j] = d;
                dist[j * n + i] = d;
            }
        }

        let entries: Vec<SiteEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| SiteEntry {
                point: [p.x_km, p.y_km],
                id: CellId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(Self {
            positions,
            dist,
            inter_site_distance_km,
            spatial_idx,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn num_cells(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[SitePosition] {
        &self.positions
    }

    pub fn inter_site_distance_km(&self) -> f64 {
        self.inter_site_distance_km
    }

    /// Symmetric distance lookup in km.  Out-of-range indices are a fatal
    /// configuration error, never clamped.
    pub fn distance(&self, i: CellId, j: CellId) -> TopologyResult<f64> {
        let n = self.num_cells();
        for id in [i, j] {
            if id.index() >= n {
                return Err(TopologyError::CellOutOfRange(id, n));
            }
        }
        Ok(self.dist[i.index() * n + j.index()])
    }

    // ── Neighbor search ───────────────────────────────────────────────────

    /// The cell nearest to `cell`, excluding `cell` itself and everything in
    /// `exclude`.  Returns `None` iff every other cell is excluded.
    ///
    /// Tie-break: among candidates at the minimum distance, the lowest cell
    /// id wins.
    pub fn nearest_neighbor(&self, cell: CellId, exclude: &[CellId]) -> Option<CellId> {
        let n = self.num_cells();
        if cell.index() >= n {
            return None;
        }
        let origin = self.positions[cell.index()];
        let query = [origin.x_km, origin.y_km];

        let mut best: Option<(f64, CellId)> = None;
        for (entry, d2) in self
            .spatial_idx
            .nearest_neighbor_iter_with_distance_2(&query)
        {
            if entry.id == cell || exclude.contains(&entry.id) {
                continue;
            }
            match best {
                None => best = Some((d2, entry.id)),
                Some((min_d2, best_id)) => {
                    if d2 > min_d2 * (1.0 + TIE_EPSILON) {
                        // Candidates arrive in distance order; past the tied
                        // group nothing closer can follow.
                        break;
                    }
                    if entry.id < best_id {
                        best = Some((min_d2, entry.id));
                    }
                }
            }
        }
        best.map(|(_, id)| id)
    }
}

// ── Hexagonal spiral placement ────────────────────────────────────────────────

/// Axial-coordinate neighbor directions, in spiral walk order.
const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// First `n` sites of a hexagonal spiral: the origin, then ring 1 (6 sites),
/// ring 2 (12 sites), and so on, with adjacent sites exactly `isd_km` apart.
fn hex_spiral(n: usize, isd_km: f64) -> Vec<SitePosition> {
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }
    out.push(axial_to_plane(0, 0, isd_km));

    let mut ring = 1u32;
    while out.len() < n {
        // Start each ring at the site one step in direction 4 from the
        // previous ring's start, then walk `ring` steps along each of the
        // six edges.
        let (mut q, mut r) = (
            HEX_DIRECTIONS[4].0 * ring as i32,
            HEX_DIRECTIONS[4].1 * ring as i32,
        );
        for (dq, dr) in HEX_DIRECTIONS {
            for _ in 0..ring {
                if out.len() == n {
                    return out;
                }
                out.push(axial_to_plane(q, r, isd_km));
                q += dq;
                r += dr;
            }
        }
        ring += 1;
    }
    out
}

/// Pointy-top axial → planar conversion with unit pitch `isd_km`.
#[inline]
fn axial_to_plane(q: i32, r: i32, isd_km: f64) -> SitePosition {
    const SQRT3_OVER_2: f64 = 0.866_025_403_784_438_6;
    let x = isd_km * (q as f64 + r as f64 / 2.0);
    let y = isd_km * SQRT3_OVER_2 * r as f64;
    SitePosition::new(x, y)
}
