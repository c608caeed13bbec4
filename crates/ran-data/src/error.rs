use std::path::PathBuf;

use ran_core::RanError;
use ran_topology::TopologyError;
use ran_traffic::TrafficError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset bundle not found at {path:?}; run the dataset builder first")]
    NotFound { path: PathBuf },

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Config(#[from] RanError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Shape(#[from] TrafficError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DataResult<T> = Result<T, DataError>;
