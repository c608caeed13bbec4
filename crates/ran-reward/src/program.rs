//! Parsed formula representation and its interpreter.

use crate::error::RewardResult;
use crate::metrics::{Metric, StepMetrics};
use crate::parser;

/// Maximum formula source length, bytes.
pub const MAX_SOURCE_LEN: usize = 4096;

/// Maximum AST node count.  Evaluation visits each node at most once, so
/// this is also the per-step instruction budget.
pub const MAX_NODES: usize = 512;

/// Maximum expression nesting depth (also bounds parser recursion).
pub const MAX_DEPTH: usize = 64;

// ── AST ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Func {
    Abs,
    Min,
    Max,
}

impl Func {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Func::Abs => "abs",
            Func::Min => "min",
            Func::Max => "max",
        }
    }

    pub(crate) fn arity(self) -> usize {
        match self {
            Func::Abs => 1,
            Func::Min | Func::Max => 2,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Metric(Metric),
    /// The `reward` slot's value as of this point in the program.
    Reward,
    /// A previously assigned local, by slot index.
    Local(usize),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        args: Vec<Expr>,
    },
}

/// Assignment target — the single mutable output slot or a formula-private
/// local.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Reward,
    Local(usize),
}

#[derive(Debug, PartialEq)]
pub(crate) struct Stmt {
    pub target: Slot,
    pub expr: Expr,
}

// ── RewardFormula ─────────────────────────────────────────────────────────────

/// A parsed, bounds-checked reward formula.
///
/// Immutable once parsed; evaluation is a pure function of [`StepMetrics`].
#[derive(Debug, PartialEq)]
pub struct RewardFormula {
    pub(crate) stmts: Vec<Stmt>,
    pub(crate) num_locals: usize,
}

impl RewardFormula {
    /// Parse and resolve `src`.  All names are bound here, so evaluation
    /// cannot encounter an unknown identifier.
    pub fn parse(src: &str) -> RewardResult<RewardFormula> {
        parser::parse(src)
    }

    /// Run the formula.  Returns `None` if the final `reward` value is not
    /// finite — the caller substitutes its fallback.
    pub fn evaluate(&self, metrics: &StepMetrics) -> Option<f64> {
        let mut locals = vec![0.0; self.num_locals];
        let mut reward = 0.0;

        for stmt in &self.stmts {
            let value = eval_expr(&stmt.expr, metrics, reward, &locals);
            match stmt.target {
                Slot::Reward => reward = value,
                Slot::Local(i) => locals[i] = value,
            }
        }

        reward.is_finite().then_some(reward)
    }
}

fn eval_expr(expr: &Expr, metrics: &StepMetrics, reward: f64, locals: &[f64]) -> f64 {
    match expr {
        Expr::Number(v) => *v,
        Expr::Metric(m) => metrics.get(*m),
        Expr::Reward => reward,
        Expr::Local(i) => locals[*i],
        Expr::Neg(inner) => -eval_expr(inner, metrics, reward, locals),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval_expr(lhs, metrics, reward, locals);
            let r = eval_expr(rhs, metrics, reward, locals);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                // IEEE semantics: x/0 is ±inf/NaN, caught by the finiteness
                // check on the final reward.
                BinOp::Div => l / r,
            }
        }
        Expr::Call { func, args } => match func {
            Func::Abs => eval_expr(&args[0], metrics, reward, locals).abs(),
            Func::Min => eval_expr(&args[0], metrics, reward, locals)
                .min(eval_expr(&args[1], metrics, reward, locals)),
            Func::Max => eval_expr(&args[0], metrics, reward, locals)
                .max(eval_expr(&args[1], metrics, reward, locals)),
        },
    }
}
