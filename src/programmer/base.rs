//! Number bases offered by programmer mode.

use crate::calculator::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric base an integer literal can be written in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    #[value(alias = "bin")]
    Binary,
    #[value(alias = "dec")]
    Decimal,
    #[value(alias = "hex")]
    Hexadecimal,
}

impl Base {
    pub const ALL: [Base; 3] = [Base::Binary, Base::Decimal, Base::Hexadecimal];

    pub fn radix(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }

    /// Display name ("Binary", "Decimal", "Hexadecimal").
    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "Binary",
            Self::Decimal => "Decimal",
            Self::Hexadecimal => "Hexadecimal",
        }
    }

    /// Literal prefix used when prefixes are shown. Decimal has none.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Decimal => "",
            Self::Hexadecimal => "0x",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bin" | "binary" | "2" => Ok(Self::Binary),
            "dec" | "decimal" | "10" => Ok(Self::Decimal),
            "hex" | "hexadecimal" | "16" => Ok(Self::Hexadecimal),
            other => Err(CalcError::syntax(format!("unknown base '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("bin".parse::<Base>(), Ok(Base::Binary));
        assert_eq!("Decimal".parse::<Base>(), Ok(Base::Decimal));
        assert_eq!("16".parse::<Base>(), Ok(Base::Hexadecimal));
        assert!("octal".parse::<Base>().is_err());
    }

    #[test]
    fn test_radix_and_prefix() {
        let radixes: Vec<u32> = Base::ALL.iter().map(|b| b.radix()).collect();
        assert_eq!(radixes, vec![2, 10, 16]);
        assert_eq!(Base::Hexadecimal.prefix(), "0x");
        assert_eq!(Base::Decimal.prefix(), "");
    }
}
