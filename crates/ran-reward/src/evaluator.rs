//! The evaluator the engine holds: formula slot + fail-soft policy.

use crate::error::RewardResult;
use crate::metrics::StepMetrics;
use crate::program::RewardFormula;

/// Weight on `drop_rate` in the baseline objective.
const BASELINE_DROP_WEIGHT: f64 = 1000.0;

/// The baseline objective: heavily penalize drops, linearly penalize power.
///
/// This single value serves as BOTH the no-formula default and the fallback
/// when an installed formula faults, so the reward scale stays continuous
/// across training rounds.
#[inline]
pub fn baseline_reward(m: &StepMetrics) -> f64 {
    -m.power - BASELINE_DROP_WEIGHT * m.drop_rate
}

/// Holds the active formula (if any) and evaluates it once per step.
///
/// Swapping is wholesale: `set_formula` replaces whatever was active, and a
/// rejected source leaves the evaluator on the baseline rather than on the
/// previous formula — the designer's intent was to replace it.
#[derive(Debug, Default)]
pub struct RewardEvaluator {
    formula: Option<RewardFormula>,
}

impl RewardEvaluator {
    /// An evaluator with no formula: every step scores the baseline.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Parse and install `src` in one go.
    pub fn with_formula(src: &str) -> RewardResult<Self> {
        let mut ev = Self::default();
        ev.set_formula(src)?;
        Ok(ev)
    }

    /// Replace the active formula with `src`.
    ///
    /// On a parse error the evaluator reverts to the baseline and the error
    /// is returned so the driver can report it upstream; the episode itself
    /// is unaffected either way.
    pub fn set_formula(&mut self, src: &str) -> RewardResult<()> {
        match RewardFormula::parse(src) {
            Ok(formula) => {
                self.formula = Some(formula);
                Ok(())
            }
            Err(e) => {
                self.formula = None;
                Err(e)
            }
        }
    }

    /// Drop the active formula, returning to the baseline.
    pub fn clear_formula(&mut self) {
        self.formula = None;
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// Score one step.  Never fails and never panics: a faulting formula
    /// (non-finite result) scores the baseline instead.
    pub fn evaluate(&self, metrics: &StepMetrics) -> f64 {
        match &self.formula {
            Some(formula) => formula
                .evaluate(metrics)
                .unwrap_or_else(|| baseline_reward(metrics)),
            None => baseline_reward(metrics),
        }
    }
}
