//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Tokenize and parse the restricted expression language
//! - Evaluate expressions against a fixed whitelist of functions and constants
//! - Run basic two-operand calculations
//! - Format results and copy them to the clipboard

pub mod basic;
mod clipboard;
pub mod error;
mod evaluation;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod special;

pub use basic::{BasicOp, compute};
pub use clipboard::copy_to_clipboard;
pub use error::{CalcError, ErrorKind};
pub use evaluation::{EvalResult, NumberFormat, evaluate, format_display, format_plain};
