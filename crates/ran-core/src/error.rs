//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into `RanError`
//! via `From` impls or keep them separate.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{CellId, SectorId};

/// The top-level error type for `ran-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RanError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cell {0} out of range")]
    CellOutOfRange(CellId),

    #[error("sector {0} out of range")]
    SectorOutOfRange(SectorId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ran-*` crates.
pub type RanResult<T> = Result<T, RanError>;
