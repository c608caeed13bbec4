//! Recursive-descent parser with parse-time name resolution.
//!
//! Resolution happens here rather than at evaluation: reads must name a
//! metric, `reward`, or an already-assigned local, and assignment targets
//! must not shadow a metric.  A formula that parses therefore cannot fault
//! at evaluation time except by producing a non-finite value.

use std::collections::HashMap;

use crate::error::{RewardError, RewardResult};
use crate::metrics::Metric;
use crate::program::{
    BinOp, Expr, Func, RewardFormula, Slot, Stmt, MAX_DEPTH, MAX_NODES,
};
use crate::token::{tokenize, Spanned, Token};

pub(crate) fn parse(src: &str) -> RewardResult<RewardFormula> {
    let tokens = tokenize(src)?;
    Parser {
        tokens,
        cursor: 0,
        nodes: 0,
        locals: HashMap::new(),
    }
    .parse_program()
}

struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
    /// AST nodes allocated so far, checked against `MAX_NODES`.
    nodes: usize,
    /// Local name → slot index, in assignment order.
    locals: HashMap<String, usize>,
}

impl Parser {
    // ── Token plumbing ────────────────────────────────────────────────────

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|s| &s.token)
    }

    fn pos(&self) -> usize {
        self.tokens
            .get(self.cursor)
            .map(|s| s.pos)
            .unwrap_or_else(|| self.tokens.last().map(|s| s.pos + 1).unwrap_or(0))
    }

    fn expect(&mut self, want: &Token, what: &str) -> RewardResult<()> {
        if self.peek() == Some(want) {
            self.cursor += 1;
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, what: &str) -> RewardError {
        RewardError::Parse {
            pos: self.pos(),
            msg: match self.peek() {
                Some(t) => format!("expected {what}, found {t:?}"),
                None => format!("expected {what}, found end of formula"),
            },
        }
    }

    fn skip_terminators(&mut self) {
        while self.peek() == Some(&Token::Terminator) {
            self.cursor += 1;
        }
    }

    fn new_node(&mut self, expr: Expr) -> RewardResult<Expr> {
        self.nodes += 1;
        if self.nodes > MAX_NODES {
            return Err(RewardError::TooComplex);
        }
        Ok(expr)
    }

    // ── Grammar ───────────────────────────────────────────────────────────

    fn parse_program(mut self) -> RewardResult<RewardFormula> {
        let mut stmts = Vec::new();

        self.skip_terminators();
        while self.peek().is_some() {
            stmts.push(self.parse_stmt()?);
            match self.peek() {
                None => break,
                Some(Token::Terminator) => self.skip_terminators(),
                Some(_) => return Err(self.unexpected("end of statement")),
            }
        }

        if stmts.is_empty() {
            return Err(RewardError::Parse {
                pos: 0,
                msg: "formula contains no statements".into(),
            });
        }

        Ok(RewardFormula {
            stmts,
            num_locals: self.locals.len(),
        })
    }

    fn parse_stmt(&mut self) -> RewardResult<Stmt> {
        let name = match self.peek() {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(self.unexpected("an assignment `name = expr`")),
        };
        self.cursor += 1;
        self.expect(&Token::Assign, "`=`")?;
        let expr = self.parse_expr(0)?;

        let target = if name == "reward" {
            Slot::Reward
        } else if Metric::from_name(&name).is_some() {
            return Err(RewardError::AssignToMetric(name));
        } else {
            // First assignment allocates the slot; later ones reuse it.
            let next = self.locals.len();
            Slot::Local(*self.locals.entry(name).or_insert(next))
        };

        Ok(Stmt { target, expr })
    }

    fn parse_expr(&mut self, depth: usize) -> RewardResult<Expr> {
        if depth > MAX_DEPTH {
            return Err(RewardError::TooDeep);
        }
        let mut lhs = self.parse_term(depth + 1)?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.parse_term(depth + 1)?;
            lhs = self.new_node(Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            })?;
        }
    }

    fn parse_term(&mut self, depth: usize) -> RewardResult<Expr> {
        if depth > MAX_DEPTH {
            return Err(RewardError::TooDeep);
        }
        let mut lhs = self.parse_factor(depth + 1)?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.parse_factor(depth + 1)?;
            lhs = self.new_node(Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            })?;
        }
    }

    fn parse_factor(&mut self, depth: usize) -> RewardResult<Expr> {
        if depth > MAX_DEPTH {
            return Err(RewardError::TooDeep);
        }
        if self.peek() == Some(&Token::Minus) {
            self.cursor += 1;
            let inner = self.parse_factor(depth + 1)?;
            return self.new_node(Expr::Neg(Box::new(inner)));
        }
        self.parse_primary(depth)
    }

    fn parse_primary(&mut self, depth: usize) -> RewardResult<Expr> {
        match self.peek().cloned() {
            Some(Token::Number(v)) => {
                self.cursor += 1;
                self.new_node(Expr::Number(v))
            }
            Some(Token::LParen) => {
                self.cursor += 1;
                let inner = self.parse_expr(depth + 1)?;
                self.expect(&Token::RParen, "`)`")?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                self.cursor += 1;
                if self.peek() == Some(&Token::LParen) {
                    self.parse_call(&name, depth)
                } else {
                    self.resolve_read(&name)
                }
            }
            _ => Err(self.unexpected("a number, name, or `(`")),
        }
    }

    fn parse_call(&mut self, name: &str, depth: usize) -> RewardResult<Expr> {
        let func = match name {
            "abs" => Func::Abs,
            "min" => Func::Min,
            "max" => Func::Max,
            _ => return Err(RewardError::UnknownIdent(format!("{name}(...)"))),
        };

        self.expect(&Token::LParen, "`(`")?;
        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                args.push(self.parse_expr(depth + 1)?);
                if self.peek() == Some(&Token::Comma) {
                    self.cursor += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(&Token::RParen, "`)`")?;

        if args.len() != func.arity() {
            return Err(RewardError::WrongArity {
                func: func.name(),
                expected: func.arity(),
                got: args.len(),
            });
        }
        self.new_node(Expr::Call { func, args })
    }

    fn resolve_read(&mut self, name: &str) -> RewardResult<Expr> {
        if let Some(metric) = Metric::from_name(name) {
            return self.new_node(Expr::Metric(metric));
        }
        if name == "reward" {
            return self.new_node(Expr::Reward);
        }
        if let Some(&slot) = self.locals.get(name) {
            return self.new_node(Expr::Local(slot));
        }
        Err(RewardError::UnknownIdent(name.to_owned()))
    }
}
