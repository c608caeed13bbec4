use thiserror::Error;

/// Parse-time rejection of a formula.  These never escape the step loop:
/// a rejected formula leaves the evaluator on its baseline.  The limits
/// themselves live in [`crate::program`] (`MAX_SOURCE_LEN`, `MAX_NODES`,
/// `MAX_DEPTH`).
#[derive(Debug, Error)]
pub enum RewardError {
    #[error("formula is {got} bytes, over the source length limit")]
    TooLong { got: usize },

    #[error("formula has too many operations")]
    TooComplex,

    #[error("formula nesting is too deep")]
    TooDeep,

    #[error("parse error at byte {pos}: {msg}")]
    Parse { pos: usize, msg: String },

    #[error("unknown name {0:?} (metrics: power, drop_rate, switches, users_active)")]
    UnknownIdent(String),

    #[error("cannot assign to metric {0:?}; metrics are read-only")]
    AssignToMetric(String),

    #[error("{func} takes {expected} argument(s), got {got}")]
    WrongArity {
        func: &'static str,
        expected: usize,
        got: usize,
    },
}

pub type RewardResult<T> = Result<T, RewardError>;
