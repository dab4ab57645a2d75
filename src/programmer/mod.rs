//! Programmer mode: integer base conversion between binary, decimal and hexadecimal.

mod base;
mod conversion;

pub use base::Base;
pub use conversion::{Conversion, ConversionResult, convert, parse_integer, render};
