//! Basic mode: one arithmetic operation on two numbers.

use super::error::CalcError;
use super::evaluation::{EvalResult, apply_operator};
use super::parser::BinaryOp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four operations offered by basic mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BasicOp {
    /// Name shown in history lines ("Add", "Divide", ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
        }
    }

    fn operator(self) -> BinaryOp {
        match self {
            Self::Add => BinaryOp::Add,
            Self::Subtract => BinaryOp::Sub,
            Self::Multiply => BinaryOp::Mul,
            Self::Divide => BinaryOp::Div,
        }
    }
}

impl fmt::Display for BasicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BasicOp {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" | "plus" => Ok(Self::Add),
            "-" | "sub" | "subtract" | "minus" => Ok(Self::Subtract),
            "*" | "x" | "mul" | "multiply" | "times" => Ok(Self::Multiply),
            "/" | "div" | "divide" => Ok(Self::Divide),
            other => Err(CalcError::syntax(format!("unknown operation '{}'", other))),
        }
    }
}

/// Apply `op` to two operands.
pub fn compute(lhs: f64, op: BasicOp, rhs: f64) -> EvalResult {
    let outcome = apply_operator(op.operator(), lhs, rhs);
    tracing::debug!(lhs, op = op.name(), rhs, ?outcome, "basic calculation");
    outcome
}
