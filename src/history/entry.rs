//! A single history entry representing one submitted calculation.

use crate::calculator::{BasicOp, EvalResult, NumberFormat, format_display};
use crate::programmer::{Base, ConversionResult};
use crate::session::Mode;
use serde::{Deserialize, Serialize};

/// One past calculation, frozen at submission time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Mode the calculation was submitted from.
    pub mode: Mode,
    /// The input as the user should see it again.
    pub expression: String,
    /// The result formatted for display, or the error message.
    pub result: String,
    /// Whether the calculation failed.
    pub is_error: bool,
}

impl HistoryEntry {
    /// Create an entry for an evaluated expression (scientific or custom mode).
    pub fn from_evaluation(
        mode: Mode,
        expression: &str,
        outcome: &EvalResult,
        format: &NumberFormat,
    ) -> Self {
        let (result, is_error) = match outcome {
            Ok(value) => (format_display(*value, format), false),
            Err(err) => (err.to_string(), true),
        };
        Self {
            mode,
            expression: expression.trim().to_string(),
            result,
            is_error,
        }
    }

    /// Create an entry for a basic-mode calculation, e.g. `3 Add 4 = 7`.
    pub fn from_basic(
        lhs: f64,
        op: BasicOp,
        rhs: f64,
        outcome: &EvalResult,
        format: &NumberFormat,
    ) -> Self {
        let expression = format!(
            "{} {} {}",
            format_display(lhs, format),
            op.name(),
            format_display(rhs, format)
        );
        Self::from_evaluation(Mode::Basic, &expression, outcome, format)
    }

    /// Create an entry for a successful base conversion.
    ///
    /// Returns `None` for failed conversions, which are not recorded.
    pub fn from_conversion(
        input: &str,
        base: Base,
        outcome: &ConversionResult,
        prefixes: bool,
    ) -> Option<Self> {
        let conversion = outcome.as_ref().ok()?;
        Some(Self {
            mode: Mode::Programmer,
            expression: format!("{} ({})", input.trim(), base.name()),
            result: conversion.describe(prefixes),
            is_error: false,
        })
    }

    /// The entry as a single display line.
    pub fn line(&self) -> String {
        let separator = match self.mode {
            Mode::Programmer => "=>",
            _ => "=",
        };
        // Multi-line custom formulas collapse onto one line.
        let expression = self.expression.split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{} {} {}", expression, separator, self.result)
    }
}
