use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("{what}: expected {expected} {unit}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
        unit: &'static str,
    },

    #[error("traffic trace must contain at least one step")]
    Empty,
}

pub type TrafficResult<T> = Result<T, TrafficError>;
