//! Tokenizer for the expression language.
//!
//! Splits input left-to-right into numbers, identifiers, operators and
//! punctuation. Any character outside that set is rejected here, before the
//! parser ever sees it.

use super::error::CalcError;

/// A single lexical token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A numeric literal with the source text it was read from.
    Number { value: f64, text: String },
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl Token {
    /// Source-like rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Number { text, .. } => text.clone(),
            Self::Ident(name) => name.clone(),
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Star => "*".to_string(),
            Self::DoubleStar => "**".to_string(),
            Self::Slash => "/".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::Comma => ",".to_string(),
        }
    }
}

/// A token together with the character offset where it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Tokenize an expression.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        let offset = pos;

        if c.is_ascii_digit() || c == '.' {
            let (value, end) = lex_number(&chars, pos)?;
            tokens.push(Spanned {
                token: Token::Number {
                    value,
                    text: chars[pos..end].iter().collect(),
                },
                offset,
            });
            pos = end;
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let end = chars[pos..]
                .iter()
                .position(|ch| !(ch.is_ascii_alphanumeric() || *ch == '_'))
                .map_or(chars.len(), |len| pos + len);
            tokens.push(Spanned {
                token: Token::Ident(chars[pos..end].iter().collect()),
                offset,
            });
            pos = end;
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(pos + 1) == Some(&'*') => {
                pos += 1;
                Token::DoubleStar
            }
            '*' => Token::Star,
            '/' if chars.get(pos + 1) == Some(&'/') => {
                return Err(CalcError::syntax(format!(
                    "unsupported operator '//' at position {}",
                    offset
                )));
            }
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            '^' => {
                return Err(CalcError::syntax(format!(
                    "unsupported operator '^' at position {} (use '**' for powers)",
                    offset
                )));
            }
            other => {
                return Err(CalcError::syntax(format!(
                    "unexpected character '{}' at position {}",
                    other, offset
                )));
            }
        };
        tokens.push(Spanned { token, offset });
        pos += 1;
    }

    Ok(tokens)
}

/// Lex a numeric literal starting at `start`, returning its value and the end offset.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), CalcError> {
    let mut pos = start;
    let mut seen_digit = false;
    let mut seen_dot = false;

    while let Some(&c) = chars.get(pos) {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
        pos += 1;
    }

    if !seen_digit {
        return Err(CalcError::syntax(format!(
            "unexpected character '.' at position {}",
            start
        )));
    }

    // Exponent only counts when digits follow; `2e` leaves `e` for the parser to reject.
    if let Some('e' | 'E') = chars.get(pos) {
        let mut exp_end = pos + 1;
        if let Some('+' | '-') = chars.get(exp_end) {
            exp_end += 1;
        }
        let digits = chars[exp_end.min(chars.len())..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits > 0 {
            pos = exp_end + digits;
        }
    }

    if let Some('.') = chars.get(pos) {
        return Err(CalcError::syntax(format!(
            "malformed number '{}' at position {}",
            chars[start..=pos].iter().collect::<String>(),
            start
        )));
    }

    let text: String = chars[start..pos].iter().collect();
    text.parse::<f64>().map(|value| (value, pos)).map_err(|_| {
        CalcError::syntax(format!("malformed number '{}' at position {}", text, start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::ErrorKind;

    fn num(value: f64, text: &str) -> Token {
        Token::Number {
            value,
            text: text.to_string(),
        }
    }

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_operators_and_numbers() {
        assert_eq!(
            kinds("2 + 3*4"),
            vec![
                num(2.0, "2"),
                Token::Plus,
                num(3.0, "3"),
                Token::Star,
                num(4.0, "4"),
            ]
        );
        assert_eq!(
            kinds("2**10"),
            vec![num(2.0, "2"), Token::DoubleStar, num(10.0, "10")]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds(".5"), vec![num(0.5, ".5")]);
        assert_eq!(kinds("5."), vec![num(5.0, "5.")]);
        assert_eq!(kinds("1.5e3"), vec![num(1500.0, "1.5e3")]);
        assert_eq!(kinds("2E-2"), vec![num(0.02, "2E-2")]);
    }

    #[test]
    fn test_trailing_e_is_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![num(2.0, "2"), Token::Ident("e".to_string())]
        );
    }

    #[test]
    fn test_identifiers_and_punctuation() {
        assert_eq!(
            kinds("atan2(1, x_1)"),
            vec![
                Token::Ident("atan2".to_string()),
                Token::LParen,
                num(1.0, "1"),
                Token::Comma,
                Token::Ident("x_1".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_offsets() {
        let tokens = tokenize("  1 +  pi").unwrap();
        let offsets: Vec<usize> = tokens.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![2, 4, 7]);
    }

    #[test]
    fn test_rejected_characters() {
        for input in ["2 ^ 3", "7 // 2", "a.b", "x = 1", "'s'", "[1]", "1..2", "5 % 2"] {
            let err = tokenize(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Syntax, "{input}");
        }
        let err = tokenize("1 $ 2").unwrap_err();
        assert!(err.message().contains("'$'"));
    }
}
