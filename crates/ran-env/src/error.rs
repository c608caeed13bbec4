use ran_core::RanError;
use ran_reward::RewardError;
use ran_topology::TopologyError;
use ran_traffic::TrafficError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error(transparent)]
    Core(#[from] RanError),

    #[error("traffic provider covers {got} sectors, network has {expected}")]
    SectorCountMismatch { expected: usize, got: usize },

    #[error("topology has {got} cells, network config says {expected}")]
    CellCountMismatch { expected: usize, got: usize },

    #[error("action has {got} entries, expected {expected} (one per sector)")]
    ActionLength { expected: usize, got: usize },

    #[error("step() called before reset()")]
    NotStarted,

    #[error("episode already terminated; call reset() to start a new one")]
    EpisodeOver,

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Traffic(#[from] TrafficError),

    #[error("reward formula rejected: {0}")]
    Reward(#[from] RewardError),
}

pub type EnvResult<T> = Result<T, EnvError>;
