//! Terminal front end: result rendering and the interactive loop.

pub mod render;
pub mod repl;

pub use render::{
    conversion_json, evaluation_json, render_conversion, render_evaluation, render_help,
    render_history,
};
pub use repl::Repl;
