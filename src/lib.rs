//! A multi-mode calculator: basic arithmetic, a safe scientific expression
//! evaluator, integer base conversion and free-form formulas, with a shared
//! history of past calculations.

pub mod calculator;
pub mod config;
pub mod history;
pub mod programmer;
pub mod session;
pub mod ui;

pub use calculator::{BasicOp, CalcError, ErrorKind, EvalResult, evaluate};
pub use config::{Config, DisplayConfig};
pub use history::{History, HistoryEntry};
pub use programmer::{Base, Conversion, ConversionResult, convert};
pub use session::{Mode, Session};
