//! `ran-reward` — pluggable reward evaluation for the ran-sim simulator.
//!
//! An external process (the reward designer) supplies the objective function
//! as text and swaps it wholesale between training rounds.  The text is fully
//! untrusted, so it is NOT executed in a general-purpose language: it is
//! parsed into a minimal, side-effect-free expression grammar over a fixed
//! set of step metrics and interpreted with no ambient capabilities — no
//! filesystem, network, process, or clock access is reachable from a formula
//! by construction.
//!
//! # Grammar
//!
//! ```text
//! program := stmt (('\n' | ';') stmt)*
//! stmt    := ident '=' expr
//! expr    := arithmetic over + - * /, unary minus, parentheses,
//!            numeric literals, metric names, previously assigned locals,
//!            and the pure functions abs(x), min(a, b), max(a, b)
//! ```
//!
//! `#` starts a comment running to end of line.  The readable scope is
//! exactly `{power, drop_rate, switches, users_active}` plus `reward`
//! (pre-set to `0.0`) and any locals the formula assigned earlier; the only
//! externally visible effect is the final value of `reward`.
//!
//! # Bounded execution
//!
//! The grammar has no iteration or recursion constructs, so one evaluation
//! visits each AST node at most once.  Source length, node count, and
//! nesting depth are capped at parse time, which bounds the per-step
//! evaluation budget regardless of what the formula says.
//!
//! # Fail-soft contract
//!
//! [`RewardEvaluator::evaluate`] is infallible.  With no formula installed,
//! or when evaluation faults (a non-finite result), it returns the baseline
//! `-power - 1000 * drop_rate`.  A malformed or hostile formula can never
//! abort or stall an episode.

pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod program;

mod parser;
mod token;


pub use error::{RewardError, RewardResult};
pub use evaluator::{baseline_reward, RewardEvaluator};
pub use metrics::StepMetrics;
pub use program::RewardFormula;
