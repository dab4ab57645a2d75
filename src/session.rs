//! A calculator session: the current display settings plus the history they feed.
//!
//! Each handler runs one pure computation, records it in the session's
//! history and hands the structured outcome back to the caller.

use crate::calculator::{self, BasicOp, CalcError, EvalResult};
use crate::config::DisplayConfig;
use crate::history::{History, HistoryEntry};
use crate::programmer::{self, Base, ConversionResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four calculator modes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Two numbers and one of four operations.
    Basic,
    /// Single-line expressions with math functions.
    #[default]
    #[value(alias = "sci")]
    Scientific,
    /// Integer base conversion.
    #[value(alias = "prog")]
    Programmer,
    /// Free-form formulas, possibly spanning several lines.
    Custom,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Basic, Mode::Scientific, Mode::Programmer, Mode::Custom];

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Scientific => "scientific",
            Self::Programmer => "programmer",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "scientific" | "sci" => Ok(Self::Scientific),
            "programmer" | "prog" => Ok(Self::Programmer),
            "custom" => Ok(Self::Custom),
            other => Err(CalcError::syntax(format!("unknown mode '{}'", other))),
        }
    }
}

/// One user's calculator session.
#[derive(Debug, Default)]
pub struct Session {
    history: History,
    display: DisplayConfig,
}

impl Session {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            history: History::new(),
            display,
        }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Clear the whole history. The only way entries ever leave it.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Basic mode: apply `op` to two numbers. Failures are recorded too.
    pub fn on_basic(&mut self, lhs: f64, op: BasicOp, rhs: f64) -> EvalResult {
        let outcome = calculator::compute(lhs, op, rhs);
        self.history.push(HistoryEntry::from_basic(
            lhs,
            op,
            rhs,
            &outcome,
            &self.display.number_format(),
        ));
        outcome
    }

    /// Scientific mode: evaluate a single expression. Failures are recorded too.
    pub fn on_evaluate(&mut self, expression: &str) -> EvalResult {
        self.evaluate_in(Mode::Scientific, expression)
    }

    /// Custom mode: evaluate a free-form formula. Failures are recorded too.
    pub fn on_custom(&mut self, formula: &str) -> EvalResult {
        self.evaluate_in(Mode::Custom, formula)
    }

    fn evaluate_in(&mut self, mode: Mode, expression: &str) -> EvalResult {
        let outcome = calculator::evaluate(expression);
        self.history.push(HistoryEntry::from_evaluation(
            mode,
            expression,
            &outcome,
            &self.display.number_format(),
        ));
        outcome
    }

    /// Programmer mode: convert an integer literal. Only successes are recorded.
    pub fn on_convert(&mut self, input: &str, base: Base) -> ConversionResult {
        let outcome = programmer::convert(input, base);
        if let Some(entry) =
            HistoryEntry::from_conversion(input, base, &outcome, self.display.radix_prefixes)
        {
            self.history.push(entry);
        }
        outcome
    }

    /// Format a value with this session's display settings.
    pub fn format_value(&self, value: f64) -> String {
        calculator::format_display(value, &self.display.number_format())
    }

    /// Format a value for the clipboard.
    pub fn format_plain(&self, value: f64) -> String {
        calculator::format_plain(value, self.display.number_format().max_decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::ErrorKind;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("sci".parse::<Mode>(), Ok(Mode::Scientific));
        assert_eq!("Programmer".parse::<Mode>(), Ok(Mode::Programmer));
        assert!("tab".parse::<Mode>().is_err());
        assert_eq!(Mode::default(), Mode::Scientific);
    }

    #[test]
    fn test_handlers_record_history() {
        let mut session = Session::default();
        assert_eq!(session.on_evaluate("2+3*4"), Ok(14.0));
        assert_eq!(session.on_basic(6.0, BasicOp::Divide, 4.0), Ok(1.5));
        assert_eq!(session.on_custom("sqrt(9)\n+ 1"), Ok(4.0));
        assert_eq!(session.on_convert("ff", Base::Hexadecimal).unwrap().decimal, 255);

        assert_eq!(
            session.history().lines(),
            vec![
                "2+3*4 = 14",
                "6 Divide 4 = 1.5",
                "sqrt(9) + 1 = 4",
                "ff (Hexadecimal) => binary: 0b11111111, decimal: 255, hexadecimal: 0xff",
            ]
        );
    }

    #[test]
    fn test_failures() {
        let mut session = Session::default();
        assert_eq!(
            session.on_evaluate("1/0").unwrap_err().kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            session.on_convert("zz", Base::Hexadecimal).unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
        // Failed conversions are not recorded; failed evaluations are.
        assert_eq!(session.history().len(), 1);
        assert!(session.history().last().unwrap().is_error);
    }

    #[test]
    fn test_clear_history() {
        let mut session = Session::default();
        session.on_evaluate("1+1").unwrap();
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_display_settings_apply() {
        let mut session = Session::new(DisplayConfig {
            thousands_separators: false,
            radix_prefixes: false,
            max_decimals: 3,
        });
        session.on_evaluate("1000 * 1000").unwrap();
        session.on_evaluate("1/3").unwrap();
        session.on_convert("10", Base::Decimal).unwrap();
        assert_eq!(
            session.history().lines(),
            vec![
                "1000 * 1000 = 1000000",
                "1/3 = 0.333",
                "10 (Decimal) => binary: 1010, decimal: 10, hexadecimal: a",
            ]
        );
        assert_eq!(session.format_plain(1234.5), "1234.5");
    }
}
