//! Interactive read-eval-print loop.
//!
//! Reads lines from any `BufRead`, routes them to the session handler of the
//! current mode and writes rendered results to any `Write`. Bad input is
//! reported and the loop carries on.

use super::render::{render_conversion, render_evaluation, render_help, render_history};
use crate::calculator::{BasicOp, copy_to_clipboard};
use crate::programmer::Base;
use crate::session::{Mode, Session};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, Write};

lazy_static! {
    /// A basic-mode line: `<number> <op> <number>`.
    static ref BASIC_LINE: Regex = Regex::new(
        r"(?i)^\s*(?P<lhs>[-+]?(?:\d+\.?\d*|\.\d+)(?:e[-+]?\d+)?)\s*(?P<op>[-+*/x]|add|plus|sub|subtract|minus|mul|multiply|times|div|divide)\s*(?P<rhs>[-+]?(?:\d+\.?\d*|\.\d+)(?:e[-+]?\d+)?)\s*$"
    ).unwrap();
}

/// A line starting with `:`.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Mode(Mode),
    Base(Base),
    History,
    Clear,
    Copy,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim_start_matches(':').split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    let command = match (name.as_str(), arg) {
        ("mode", Some(mode)) => Command::Mode(mode.parse::<Mode>().map_err(|e| e.message())?),
        ("mode", None) => return Err("usage: :mode <basic|scientific|programmer|custom>".into()),
        ("basic", None) => Command::Mode(Mode::Basic),
        ("sci" | "scientific", None) => Command::Mode(Mode::Scientific),
        ("prog" | "programmer", None) => Command::Mode(Mode::Programmer),
        ("custom", None) => Command::Mode(Mode::Custom),
        ("base", Some(base)) => Command::Base(base.parse::<Base>().map_err(|e| e.message())?),
        ("base", None) => return Err("usage: :base <bin|dec|hex>".into()),
        ("history" | "h", None) => Command::History,
        ("clear", None) => Command::Clear,
        ("copy" | "c", None) => Command::Copy,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => return Err(format!("unknown command '{}', try :help", line.trim())),
    };

    if parts.next().is_some() {
        return Err(format!("too many arguments in '{}'", line.trim()));
    }
    Ok(command)
}

/// The interactive front end over one [`Session`].
pub struct Repl {
    session: Session,
    mode: Mode,
    base: Base,
    show_prompt: bool,
    /// Lines of a custom formula continued with a trailing `\`.
    pending: Vec<String>,
    /// Last successful result, formatted for the clipboard.
    last_result: Option<String>,
}

impl Repl {
    pub fn new(session: Session, mode: Mode) -> Self {
        Self {
            session,
            mode,
            base: Base::Decimal,
            show_prompt: true,
            pending: Vec::new(),
            last_result: None,
        }
    }

    /// Turn the prompt off (for piped input).
    pub fn with_prompt(mut self, show_prompt: bool) -> Self {
        self.show_prompt = show_prompt;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `:quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        writeln!(
            output,
            "multicalc ({} mode). Type :help for commands.",
            self.mode
        )?;
        self.prompt(&mut output)?;

        for line in input.lines() {
            let line = line?;
            if !self.handle_line(&line, &mut output)? {
                return Ok(());
            }
            self.prompt(&mut output)?;
        }

        // End of input with an unfinished custom formula still submits it.
        if !self.pending.is_empty() {
            let formula = std::mem::take(&mut self.pending).join("\n");
            self.submit(&formula, &mut output)?;
        }
        Ok(())
    }

    fn prompt(&self, output: &mut impl Write) -> anyhow::Result<()> {
        if self.show_prompt {
            let marker = if self.pending.is_empty() { ">" } else { "..." };
            write!(output, "[{}]{} ", self.mode, marker)?;
            output.flush()?;
        }
        Ok(())
    }

    /// Handle one input line. Returns `false` when the session should end.
    fn handle_line(&mut self, line: &str, output: &mut impl Write) -> anyhow::Result<bool> {
        let trimmed = line.trim();

        if self.pending.is_empty() && trimmed.starts_with(':') {
            return match parse_command(trimmed) {
                Ok(Command::Quit) => Ok(false),
                Ok(command) => {
                    self.run_command(command, output)?;
                    Ok(true)
                }
                Err(message) => {
                    writeln!(output, "error: {}", message)?;
                    Ok(true)
                }
            };
        }

        if self.mode == Mode::Custom {
            if let Some(head) = trimmed.strip_suffix('\\') {
                self.pending.push(head.to_string());
                return Ok(true);
            }
            if !self.pending.is_empty() {
                self.pending.push(trimmed.to_string());
                let formula = std::mem::take(&mut self.pending).join("\n");
                self.submit(&formula, output)?;
                return Ok(true);
            }
        }

        if !trimmed.is_empty() {
            self.submit(trimmed, output)?;
        }
        Ok(true)
    }

    fn run_command(&mut self, command: Command, output: &mut impl Write) -> anyhow::Result<()> {
        match command {
            Command::Mode(mode) => {
                tracing::info!(from = %self.mode, to = %mode, "mode switched");
                self.mode = mode;
                writeln!(output, "switched to {} mode", mode)?;
            }
            Command::Base(base) => {
                self.base = base;
                writeln!(output, "programmer input base: {}", base)?;
            }
            Command::History => writeln!(output, "{}", render_history(self.session.history()))?,
            Command::Clear => {
                self.session.clear_history();
                writeln!(output, "History cleared.")?;
            }
            Command::Copy => match &self.last_result {
                Some(text) => match copy_to_clipboard(text) {
                    Ok(()) => writeln!(output, "copied {}", text)?,
                    Err(err) => {
                        tracing::warn!("{:#}", err);
                        writeln!(output, "error: {:#}", err)?;
                    }
                },
                None => writeln!(output, "error: nothing to copy yet")?,
            },
            Command::Help => writeln!(output, "{}", render_help(self.mode))?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Submit input to the current mode's handler and print the outcome.
    fn submit(&mut self, input: &str, output: &mut impl Write) -> anyhow::Result<()> {
        let display = *self.session.display();

        match self.mode {
            Mode::Basic => {
                let Some((lhs, op, rhs)) = parse_basic_line(input) else {
                    writeln!(
                        output,
                        "error: expected '<a> <op> <b>' with op one of + - * /"
                    )?;
                    return Ok(());
                };
                let outcome = self.session.on_basic(lhs, op, rhs);
                self.remember(&outcome);
                writeln!(output, "{}", render_evaluation(&outcome, &display))?;
            }
            Mode::Scientific | Mode::Custom => {
                let outcome = if self.mode == Mode::Custom {
                    self.session.on_custom(input)
                } else {
                    self.session.on_evaluate(input)
                };
                self.remember(&outcome);
                writeln!(output, "{}", render_evaluation(&outcome, &display))?;
            }
            Mode::Programmer => {
                let mut parts = input.split_whitespace();
                let number = parts.next().unwrap_or_default();
                let base = match parts.next().map(str::parse::<Base>) {
                    Some(Ok(base)) => base,
                    Some(Err(err)) => {
                        writeln!(output, "error: {}", err.message())?;
                        return Ok(());
                    }
                    None => self.base,
                };
                if parts.next().is_some() {
                    writeln!(output, "error: expected '<number> [bin|dec|hex]'")?;
                    return Ok(());
                }
                let outcome = self.session.on_convert(number, base);
                if let Ok(conversion) = &outcome {
                    self.last_result = Some(conversion.decimal.to_string());
                }
                writeln!(output, "{}", render_conversion(&outcome, &display))?;
            }
        }
        Ok(())
    }

    fn remember(&mut self, outcome: &crate::calculator::EvalResult) {
        if let Ok(value) = outcome {
            self.last_result = Some(self.session.format_plain(*value));
        }
    }
}

/// Split a basic-mode line into its operands and operation.
fn parse_basic_line(line: &str) -> Option<(f64, BasicOp, f64)> {
    let captures = BASIC_LINE.captures(line)?;
    let lhs = captures["lhs"].parse().ok()?;
    let op = captures["op"].parse().ok()?;
    let rhs = captures["rhs"].parse().ok()?;
    Some((lhs, op, rhs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        assert_eq!(parse_basic_line("3 + 4"), Some((3.0, BasicOp::Add, 4.0)));
        assert_eq!(parse_basic_line("3-4"), Some((3.0, BasicOp::Subtract, 4.0)));
        assert_eq!(
            parse_basic_line("3 - -4"),
            Some((3.0, BasicOp::Subtract, -4.0))
        );
        assert_eq!(
            parse_basic_line("1.5 DIV .5"),
            Some((1.5, BasicOp::Divide, 0.5))
        );
        assert_eq!(
            parse_basic_line("2e3 x 2"),
            Some((2000.0, BasicOp::Multiply, 2.0))
        );
        assert_eq!(parse_basic_line("3 + 4 + 5"), None);
        assert_eq!(parse_basic_line("sqrt(4)"), None);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(":mode basic"), Ok(Command::Mode(Mode::Basic)));
        assert_eq!(parse_command(":prog"), Ok(Command::Mode(Mode::Programmer)));
        assert_eq!(parse_command(":base hex"), Ok(Command::Base(Base::Hexadecimal)));
        assert_eq!(parse_command(":q"), Ok(Command::Quit));
        assert_eq!(parse_command(":HISTORY"), Ok(Command::History));
        assert!(parse_command(":mode").is_err());
        assert!(parse_command(":mode tab").is_err());
        assert!(parse_command(":clear all").is_err());
        assert!(parse_command(":delete 1").is_err());
    }
}
