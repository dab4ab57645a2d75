//! Integer parsing and re-rendering across bases.
//!
//! `binary` and `hexadecimal` are stored bare (`"1010"`, `"a"`, `"-ff"`).
//! The `0b`/`0x` prefixes are a display choice, applied by [`Conversion::display_in`].

use super::base::Base;
use crate::calculator::CalcError;
use serde::{Deserialize, Serialize};

/// One integer rendered in all three bases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub binary: String,
    pub decimal: i64,
    pub hexadecimal: String,
}

/// Outcome of a base conversion.
pub type ConversionResult = Result<Conversion, CalcError>;

impl Conversion {
    pub fn from_value(value: i64) -> Self {
        Self {
            binary: render(value, Base::Binary),
            decimal: value,
            hexadecimal: render(value, Base::Hexadecimal),
        }
    }

    /// The value in `base`, optionally with its literal prefix after the sign.
    pub fn display_in(&self, base: Base, prefixes: bool) -> String {
        let bare = match base {
            Base::Binary => self.binary.clone(),
            Base::Decimal => self.decimal.to_string(),
            Base::Hexadecimal => self.hexadecimal.clone(),
        };
        if !prefixes || base.prefix().is_empty() {
            return bare;
        }
        match bare.strip_prefix('-') {
            Some(digits) => format!("-{}{}", base.prefix(), digits),
            None => format!("{}{}", base.prefix(), bare),
        }
    }

    /// Single-line summary, e.g. `binary: 0b1010, decimal: 10, hexadecimal: 0xa`.
    pub fn describe(&self, prefixes: bool) -> String {
        format!(
            "binary: {}, decimal: {}, hexadecimal: {}",
            self.display_in(Base::Binary, prefixes),
            self.display_in(Base::Decimal, prefixes),
            self.display_in(Base::Hexadecimal, prefixes),
        )
    }
}

/// Parse `input` as an integer written in `from` and render it in every base.
pub fn convert(input: &str, from: Base) -> ConversionResult {
    let outcome = parse_integer(input, from).map(Conversion::from_value);
    tracing::debug!(input, base = from.name(), ?outcome, "converted number");
    outcome
}

/// Parse an integer literal strictly in `base`.
///
/// Accepts surrounding whitespace, a leading `-` and the base's own prefix
/// (`0b`, `0x`, either case). Anything else is [`CalcError::InvalidFormat`].
pub fn parse_integer(input: &str, base: Base) -> Result<i64, CalcError> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = strip_radix_prefix(unsigned, base);

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base.radix())) {
        return Err(CalcError::InvalidFormat);
    }

    let magnitude =
        u64::from_str_radix(digits, base.radix()).map_err(|_| CalcError::InvalidFormat)?;

    if negative {
        0i64.checked_sub_unsigned(magnitude)
            .ok_or(CalcError::InvalidFormat)
    } else {
        i64::try_from(magnitude).map_err(|_| CalcError::InvalidFormat)
    }
}

fn strip_radix_prefix(digits: &str, base: Base) -> &str {
    let prefixes: &[&str] = match base {
        Base::Binary => &["0b", "0B"],
        Base::Decimal => &[],
        Base::Hexadecimal => &["0x", "0X"],
    };
    prefixes
        .iter()
        .find_map(|prefix| digits.strip_prefix(prefix))
        .unwrap_or(digits)
}

/// Render `value` in `base` without prefix, lowercase, `-` for negatives.
pub fn render(value: i64, base: Base) -> String {
    let magnitude = value.unsigned_abs();
    let digits = match base {
        Base::Binary => format!("{:b}", magnitude),
        Base::Decimal => magnitude.to_string(),
        Base::Hexadecimal => format!("{:x}", magnitude),
    };
    if value < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}
