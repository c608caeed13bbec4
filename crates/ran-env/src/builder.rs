//! Fluent builder for constructing a [`RanEnv`].

use ran_core::RanConfig;
use ran_reward::RewardEvaluator;
use ran_topology::Topology;
use ran_traffic::TrafficProvider;

use crate::{EnvError, EnvResult, RanEnv};

/// Builder for [`RanEnv<T>`].
///
/// # Required inputs
///
/// - [`RanConfig`] — network shape, traffic bounds, energy constants,
///   episode settings
/// - `T: TrafficProvider` — the traffic source (trace or synthetic)
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                      |
/// |----------------------|----------------------------------------------|
/// | `.topology(t)`       | Hexagonal layout from the network config     |
/// | `.reward_formula(s)` | Baseline objective (no formula)              |
///
/// All cross-component shape checks happen in [`build`](Self::build):
/// provider sector count vs. network shape, topology cell count vs. config.
/// A builder-supplied reward formula that fails to parse is a construction
/// error here — unlike a mid-training swap, which degrades to the baseline.
pub struct EnvBuilder<T: TrafficProvider> {
    config: RanConfig,
    traffic: T,
    topology: Option<Topology>,
    formula: Option<String>,
}

impl<T: TrafficProvider> EnvBuilder<T> {
    pub fn new(config: RanConfig, traffic: T) -> Self {
        Self {
            config,
            traffic,
            topology: None,
            formula: None,
        }
    }

    /// Supply an explicit topology (e.g. from a dataset bundle).
    ///
    /// If not called, a hexagonal layout is built from
    /// `config.network.{num_cells, inter_site_distance_km}`.
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Install an initial reward formula.
    pub fn reward_formula(mut self, src: impl Into<String>) -> Self {
        self.formula = Some(src.into());
        self
    }

    /// Validate the configuration and all cross-component shapes, then
    /// produce a ready-to-reset [`RanEnv`].
    pub fn build(self) -> EnvResult<RanEnv<T>> {
        self.config.validate().map_err(EnvError::Core)?;
        let layout = self.config.layout();

        if self.traffic.sector_count() != layout.total_sectors() {
            return Err(EnvError::SectorCountMismatch {
                expected: layout.total_sectors(),
                got: self.traffic.sector_count(),
            });
        }

        let topology = match self.topology {
            Some(t) => {
                if t.num_cells() != self.config.network.num_cells as usize {
                    return Err(EnvError::CellCountMismatch {
                        expected: self.config.network.num_cells as usize,
                        got: t.num_cells(),
                    });
                }
                t
            }
            None => Topology::hexagonal(
                self.config.network.num_cells,
                self.config.network.inter_site_distance_km,
            )?,
        };

        let reward = match self.formula {
            Some(src) => RewardEvaluator::with_formula(&src)?,
            None => RewardEvaluator::baseline(),
        };

        Ok(RanEnv {
            config: self.config,
            layout,
            topology,
            traffic: self.traffic,
            reward,
            episode: None,
        })
    }
}
