//! Expression evaluation and result formatting.
//!
//! Evaluates the whitelisted expression tree built by the parser bottom-up in
//! double precision. There is no environment and no state between calls.

use super::error::CalcError;
use super::parser::{BinaryOp, Expr, parse};

/// Outcome of evaluating an expression.
pub type EvalResult = Result<f64, CalcError>;

/// Evaluate a mathematical expression.
pub fn evaluate(input: &str) -> EvalResult {
    let outcome = parse(input).and_then(|expr| eval(&expr));
    tracing::debug!(expression = input, ?outcome, "evaluated expression");
    outcome
}

fn eval(expr: &Expr) -> EvalResult {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Constant(constant) => Ok(constant.value),
        Expr::Negate(inner) => Ok(-eval(inner)?),
        Expr::Binary { op, lhs, rhs } => apply_operator(*op, eval(lhs)?, eval(rhs)?),
        Expr::Call { function, args } => {
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            function.call(&values)
        }
    }
}

/// Apply a binary operator, mapping IEEE special results onto the error taxonomy.
pub(crate) fn apply_operator(op: BinaryOp, lhs: f64, rhs: f64) -> EvalResult {
    let value = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
        BinaryOp::Pow => {
            if lhs == 0.0 && rhs < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            if lhs < 0.0 && lhs.is_finite() && rhs.is_finite() && rhs.fract() != 0.0 {
                return Err(CalcError::domain(
                    "negative number raised to a fractional power",
                ));
            }
            lhs.powf(rhs)
        }
    };

    if value.is_infinite() && lhs.is_finite() && rhs.is_finite() {
        return Err(CalcError::overflow(format!(
            "result of '{}' is out of range",
            op.symbol()
        )));
    }
    Ok(value)
}

/// How numbers are rendered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Group integer digits with commas.
    pub thousands_separators: bool,
    /// Fractional digits kept before trailing zeros are trimmed.
    pub max_decimals: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separators: true,
            max_decimals: 10,
        }
    }
}

/// Format a number for display.
pub fn format_display(value: f64, format: &NumberFormat) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e15 || (magnitude != 0.0 && magnitude < 1e-10) {
        return format_scientific(value, format.max_decimals);
    }

    let rendered = if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", format.max_decimals, value);
        // With zero decimals there is no fraction to trim.
        let trimmed = if formatted.contains('.') {
            formatted.trim_end_matches('0').trim_end_matches('.')
        } else {
            formatted.as_str()
        };
        if trimmed == "-0" { "0" } else { trimmed }.to_string()
    };

    if format.thousands_separators {
        with_separators(&rendered)
    } else {
        rendered
    }
}

/// Format a number for the clipboard (raw number, no separators).
pub fn format_plain(value: f64, max_decimals: usize) -> String {
    format_display(
        value,
        &NumberFormat {
            thousands_separators: false,
            max_decimals,
        },
    )
}

fn format_scientific(value: f64, max_decimals: usize) -> String {
    let formatted = format!("{:.*e}", max_decimals, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}e{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Insert thousand separators into the integer part of a rendered number.
fn with_separators(rendered: &str) -> String {
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}
