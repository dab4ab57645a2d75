//! Text rendering of results and history for the terminal.
//!
//! Successful results print as `= <value>`, failures as `error: <message>`.

use crate::calculator::{EvalResult, functions};
use crate::config::DisplayConfig;
use crate::history::History;
use crate::programmer::{Base, ConversionResult};
use crate::session::Mode;
use serde_json::{Value, json};

/// Render an evaluation outcome.
pub fn render_evaluation(outcome: &EvalResult, display: &DisplayConfig) -> String {
    match outcome {
        Ok(value) => format!(
            "= {}",
            crate::calculator::format_display(*value, &display.number_format())
        ),
        Err(err) => format!("error: {}", err),
    }
}

/// Render a conversion outcome, one base per line.
pub fn render_conversion(outcome: &ConversionResult, display: &DisplayConfig) -> String {
    match outcome {
        Ok(conversion) => Base::ALL
            .iter()
            .map(|&base| {
                format!(
                    "{:<12} {}",
                    format!("{}:", base.name()),
                    conversion.display_in(base, display.radix_prefixes)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => format!("error: {}", err),
    }
}

/// Render the history, oldest first, numbered from 1.
pub fn render_history(history: &History) -> String {
    if history.is_empty() {
        return "(history is empty)".to_string();
    }
    history
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry.line()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the interactive help text.
pub fn render_help(mode: Mode) -> String {
    let input_hint = match mode {
        Mode::Basic => "<a> <op> <b>   op: + - * / (or add, sub, mul, div)",
        Mode::Scientific => "<expression>   e.g. sin(1) + 2**3",
        Mode::Programmer => "<number> [bin|dec|hex]",
        Mode::Custom => "<formula>      end a line with \\ to continue it",
    };
    let modes: Vec<&str> = Mode::ALL.iter().map(|m| m.name()).collect();

    format!(
        "Input ({mode} mode): {input_hint}\n\
         Commands:\n\
         \x20 :mode <{modes}>\n\
         \x20 :base <bin|dec|hex>   input base for programmer mode\n\
         \x20 :history              show past calculations\n\
         \x20 :clear                clear the history\n\
         \x20 :copy                 copy the last result to the clipboard\n\
         \x20 :help                 show this help\n\
         \x20 :quit                 leave\n\
         Constants: {constants}\n\
         Functions: {functions}",
        modes = modes.join("|"),
        constants = functions::constant_names().join(", "),
        functions = functions::function_names().join(", "),
    )
}

/// JSON form of an evaluation, for `--json` output.
pub fn evaluation_json(expression: &str, outcome: &EvalResult) -> Value {
    match outcome {
        Ok(value) => json!({ "expression": expression, "value": value }),
        Err(err) => json!({
            "expression": expression,
            "error": { "kind": err.kind(), "message": err.message() },
        }),
    }
}

/// JSON form of a conversion, for `--json` output.
pub fn conversion_json(input: &str, base: Base, outcome: &ConversionResult) -> Value {
    match outcome {
        Ok(conversion) => json!({ "input": input, "base": base, "result": conversion }),
        Err(err) => json!({
            "input": input,
            "base": base,
            "error": { "kind": err.kind(), "message": err.message() },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{CalcError, NumberFormat};
    use crate::history::HistoryEntry;
    use crate::programmer::convert;

    #[test]
    fn test_render_evaluation() {
        let display = DisplayConfig::default();
        assert_eq!(render_evaluation(&Ok(1_000_000.0), &display), "= 1,000,000");
        assert_eq!(
            render_evaluation(&Err(CalcError::DivisionByZero), &display),
            "error: Division by zero"
        );
    }

    #[test]
    fn test_render_conversion() {
        let display = DisplayConfig::default();
        let rendered = render_conversion(&convert("1010", Base::Binary), &display);
        assert_eq!(
            rendered,
            "Binary:      0b1010\nDecimal:     10\nHexadecimal: 0xa"
        );
        assert_eq!(
            render_conversion(&convert("zz", Base::Hexadecimal), &display),
            "error: Invalid number format."
        );
    }

    #[test]
    fn test_render_history() {
        let mut history = History::new();
        assert_eq!(render_history(&history), "(history is empty)");
        history.push(HistoryEntry::from_evaluation(
            Mode::Scientific,
            "2**10",
            &Ok(1024.0),
            &NumberFormat::default(),
        ));
        assert_eq!(render_history(&history), "  1. 2**10 = 1,024");
    }

    #[test]
    fn test_help_lists_whitelist() {
        let help = render_help(Mode::Scientific);
        assert!(help.contains("sqrt"));
        assert!(help.contains("tau"));
        assert!(help.contains(":history"));
    }

    #[test]
    fn test_json_output() {
        assert_eq!(
            evaluation_json("2+2", &Ok(4.0)),
            json!({ "expression": "2+2", "value": 4.0 })
        );
        assert_eq!(
            evaluation_json("1/0", &Err(CalcError::DivisionByZero))["error"]["kind"],
            "division_by_zero"
        );
        assert_eq!(
            conversion_json("1010", Base::Binary, &convert("1010", Base::Binary))["result"]
                ["hexadecimal"],
            "a"
        );
    }
}
