use ran_core::CellId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("cell {0} out of range for a {1}-cell topology")]
    CellOutOfRange(CellId, usize),

    #[error("topology must contain at least one site")]
    NoSites,
}

pub type TopologyResult<T> = Result<T, TopologyError>;
