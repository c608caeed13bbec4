//! Recorded traffic traces.
//!
//! # Data layout
//!
//! Both matrices are stored flat in row-major order: step `t`'s sectors
//! occupy `data[t * sectors .. (t + 1) * sectors]`.  A snapshot is therefore
//! one contiguous slice copy.
//!
//! # Cycling
//!
//! `snapshot(t)` reads row `t % steps`, so a trace can serve episodes longer
//! than its recorded horizon; `snapshot(t) == snapshot(t + steps)` for all
//! `t`.

use crate::{TrafficError, TrafficProvider, TrafficResult, TrafficSnapshot};

/// A precomputed `(steps × sectors)` traffic recording.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficTrace {
    steps: u64,
    sectors: usize,
    /// Flat row-major user counts, length `steps * sectors`.
    users: Vec<u32>,
    /// Flat row-major demanded load, length `steps * sectors`.
    load: Vec<f64>,
}

impl TrafficTrace {
    /// Build from per-step rows.  Fails if the two matrices disagree in step
    /// count, any row has the wrong width, or the trace is empty.
    pub fn from_rows(users: Vec<Vec<u32>>, load: Vec<Vec<f64>>) -> TrafficResult<Self> {
        if users.is_empty() {
            return Err(TrafficError::Empty);
        }
        if load.len() != users.len() {
            return Err(TrafficError::ShapeMismatch {
                what: "load matrix step count",
                expected: users.len(),
                got: load.len(),
                unit: "rows",
            });
        }
        let sectors = users[0].len();
        for row in &users {
            if row.len() != sectors {
                return Err(TrafficError::ShapeMismatch {
                    what: "user matrix row width",
                    expected: sectors,
                    got: row.len(),
                    unit: "sectors",
                });
            }
        }
        for row in &load {
            if row.len() != sectors {
                return Err(TrafficError::ShapeMismatch {
                    what: "load matrix row width",
                    expected: sectors,
                    got: row.len(),
                    unit: "sectors",
                });
            }
        }

        Ok(Self {
            steps: users.len() as u64,
            sectors,
            users: users.into_iter().flatten().collect(),
            load: load.into_iter().flatten().collect(),
        })
    }

    /// Number of recorded steps (the episode horizon in dataset mode).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Sectors per row; same value the `TrafficProvider` impl reports.
    pub fn sector_count(&self) -> usize {
        self.sectors
    }

    /// Row `t % steps` as `(users, load)` slices, without copying.
    pub fn row(&self, step: u64) -> (&[u32], &[f64]) {
        let t = (step % self.steps) as usize;
        let range = t * self.sectors..(t + 1) * self.sectors;
        (&self.users[range.clone()], &self.load[range])
    }

    /// All user rows, for persistence.
    pub fn user_rows(&self) -> impl Iterator<Item = &[u32]> {
        self.users.chunks_exact(self.sectors)
    }

    /// All load rows, for persistence.
    pub fn load_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.load.chunks_exact(self.sectors)
    }
}

impl TrafficProvider for TrafficTrace {
    fn sector_count(&self) -> usize {
        self.sectors
    }

    fn horizon(&self) -> Option<u64> {
        Some(self.steps)
    }

    fn snapshot(&mut self, step: u64) -> TrafficSnapshot {
        let (users, load) = self.row(step);
        TrafficSnapshot {
            users: users.to_vec(),
            load: load.to_vec(),
        }
    }
}
