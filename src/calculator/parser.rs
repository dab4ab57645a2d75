//! Recursive-descent parser producing an expression tree.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (("+" | "-") term)*
//! term    := factor (("*" | "/") factor)*
//! factor  := unary ("**" factor)?
//! unary   := ("-" | "+") unary | primary
//! primary := NUMBER | IDENT | IDENT "(" args? ")" | "(" expr ")"
//! args    := expr ("," expr)*
//! ```
//!
//! Identifiers are resolved against the whitelist while parsing, so a tree
//! can only ever reference whitelisted constants and functions.

use super::error::CalcError;
use super::functions::{Constant, Function, lookup_constant, lookup_function};
use super::lexer::{Spanned, Token, tokenize};

/// Maximum nesting of parentheses, signs and powers.
pub const MAX_DEPTH: usize = 128;

/// Maximum number of tokens in one expression.
pub const MAX_TOKENS: usize = 4096;

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }
}

/// A parsed expression.
#[derive(Debug)]
pub enum Expr {
    Number(f64),
    Constant(&'static Constant),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: &'static Function,
        args: Vec<Expr>,
    },
}

/// Parse an expression string into a tree.
pub fn parse(input: &str) -> Result<Expr, CalcError> {
    if input.trim().is_empty() {
        return Err(CalcError::syntax("empty expression"));
    }

    let tokens = tokenize(input)?;
    if tokens.len() > MAX_TOKENS {
        return Err(CalcError::syntax(format!(
            "expression too long ({} tokens, at most {})",
            tokens.len(),
            MAX_TOKENS
        )));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
        input_len: input.chars().count(),
    };
    let expr = parser.expr()?;

    match parser.peek() {
        None => Ok(expr),
        Some(spanned) => Err(parser.unexpected(spanned)),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    input_len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&'a Token> {
        self.peek().map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<&'a Spanned> {
        let spanned = self.tokens.get(self.pos);
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek_token() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, spanned: &Spanned) -> CalcError {
        CalcError::syntax(format!(
            "unexpected '{}' at position {}",
            spanned.token.describe(),
            spanned.offset
        ))
    }

    fn end_of_input(&self) -> CalcError {
        CalcError::syntax(format!(
            "unexpected end of expression at position {}",
            self.input_len
        ))
    }

    fn expect(&mut self, token: &Token) -> Result<(), CalcError> {
        match self.advance() {
            Some(spanned) if spanned.token == *token => Ok(()),
            Some(spanned) => Err(CalcError::syntax(format!(
                "expected '{}' but found '{}' at position {}",
                token.describe(),
                spanned.token.describe(),
                spanned.offset
            ))),
            None => Err(CalcError::syntax(format!(
                "expected '{}' at end of expression",
                token.describe()
            ))),
        }
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, CalcError>,
    ) -> Result<T, CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::syntax(format!(
                "expression nested too deeply (more than {} levels)",
                MAX_DEPTH
            )));
        }
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expr(&mut self) -> Result<Expr, CalcError> {
        self.nested(|p| {
            let mut lhs = p.term()?;
            loop {
                let op = match p.peek_token() {
                    Some(Token::Plus) => BinaryOp::Add,
                    Some(Token::Minus) => BinaryOp::Sub,
                    _ => return Ok(lhs),
                };
                p.pos += 1;
                let rhs = p.term()?;
                lhs = Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                };
            }
        })
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        let base = self.unary()?;
        if !self.eat(&Token::DoubleStar) {
            return Ok(base);
        }
        // Right-associative: 2**3**2 == 2**(3**2)
        let exponent = self.nested(|p| p.factor())?;
        Ok(Expr::Binary {
            op: BinaryOp::Pow,
            lhs: Box::new(base),
            rhs: Box::new(exponent),
        })
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        if self.eat(&Token::Minus) {
            let operand = self.nested(|p| p.unary())?;
            return Ok(Expr::Negate(Box::new(operand)));
        }
        if self.eat(&Token::Plus) {
            return self.nested(|p| p.unary());
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let Some(spanned) = self.advance() else {
            return Err(self.end_of_input());
        };

        match &spanned.token {
            Token::Number { value, .. } => Ok(Expr::Number(*value)),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let function = resolve_function(name, spanned.offset)?;
                    let args = self.args()?;
                    Ok(Expr::Call { function, args })
                } else {
                    resolve_constant(name, spanned.offset).map(Expr::Constant)
                }
            }
            _ => Err(self.unexpected(spanned)),
        }
    }

    /// Arguments after an opening parenthesis, through the closing one.
    fn args(&mut self) -> Result<Vec<Expr>, CalcError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            return Ok(args);
        }
    }
}

fn resolve_function(name: &str, offset: usize) -> Result<&'static Function, CalcError> {
    if let Some(function) = lookup_function(name) {
        return Ok(function);
    }
    if lookup_constant(name).is_some() {
        return Err(CalcError::syntax(format!(
            "'{}' is a constant and cannot be called (position {})",
            name, offset
        )));
    }
    Err(CalcError::syntax(format!(
        "unknown function '{}' at position {}",
        name, offset
    )))
}

fn resolve_constant(name: &str, offset: usize) -> Result<&'static Constant, CalcError> {
    if let Some(constant) = lookup_constant(name) {
        return Ok(constant);
    }
    if lookup_function(name).is_some() {
        return Err(CalcError::syntax(format!(
            "function '{}' must be called with parentheses (position {})",
            name, offset
        )));
    }
    Err(CalcError::syntax(format!(
        "unknown identifier '{}' at position {}",
        name, offset
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::ErrorKind;

    /// Render a tree fully parenthesized, for checking structure.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Number(n) => n.to_string(),
            Expr::Constant(c) => c.name.to_string(),
            Expr::Negate(inner) => format!("(-{})", shape(inner)),
            Expr::Binary { op, lhs, rhs } => {
                format!("({} {} {})", shape(lhs), op.symbol(), shape(rhs))
            }
            Expr::Call { function, args } => {
                let args: Vec<String> = args.iter().map(shape).collect();
                format!("{}({})", function.name, args.join(", "))
            }
        }
    }

    fn parsed(input: &str) -> String {
        shape(&parse(input).unwrap())
    }

    fn syntax_error(input: &str) -> String {
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{input}");
        err.message()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parsed("2+3*4"), "(2 + (3 * 4))");
        assert_eq!(parsed("2*3+4"), "((2 * 3) + 4)");
        assert_eq!(parsed("8/4/2"), "((8 / 4) / 2)");
        assert_eq!(parsed("1-2-3"), "((1 - 2) - 3)");
        assert_eq!(parsed("(2+3)*4"), "((2 + 3) * 4)");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(parsed("2**3**2"), "(2 ** (3 ** 2))");
        assert_eq!(parsed("2*3**2"), "(2 * (3 ** 2))");
    }

    #[test]
    fn test_unary_minus_binds_tighter_than_power() {
        assert_eq!(parsed("-2**2"), "((-2) ** 2)");
        assert_eq!(parsed("2**-1"), "(2 ** (-1))");
        assert_eq!(parsed("2 - -3"), "(2 - (-3))");
        assert_eq!(parsed("+4"), "4");
    }

    #[test]
    fn test_calls_and_constants() {
        assert_eq!(parsed("sqrt(9)"), "sqrt(9)");
        assert_eq!(parsed("atan2(1, 2) + pi"), "(atan2(1, 2) + pi)");
        assert_eq!(parsed("gcd()"), "gcd()");
        assert_eq!(parsed("sin(cos(0))**2"), "(sin(cos(0)) ** 2)");
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(syntax_error(""), "empty expression");
        assert_eq!(syntax_error("   \n\t"), "empty expression");
    }

    #[test]
    fn test_whitelist_rejections() {
        assert!(syntax_error("import os").contains("'import'"));
        assert!(syntax_error("__import__(1)").contains("'__import__'"));
        assert!(syntax_error("foo(1)").contains("unknown function 'foo'"));
        assert!(syntax_error("pi()").contains("constant"));
        assert!(syntax_error("sqrt").contains("parentheses"));
        assert!(syntax_error("Sin(1)").contains("'Sin'"));
    }

    #[test]
    fn test_malformed() {
        assert!(syntax_error("2 +").contains("end of expression"));
        assert!(syntax_error("(1 + 2").contains("expected ')'"));
        assert!(syntax_error("1 + 2)").contains("unexpected ')'"));
        assert!(syntax_error("2 3").contains("unexpected '3'"));
        assert!(syntax_error("2 3.50").contains("unexpected '3.50'"));
        assert!(syntax_error("(1 1e3)").contains("found '1e3'"));
        assert!(syntax_error("2e").contains("unexpected 'e'"));
        assert!(syntax_error("sqrt(1,)").contains("unexpected ')'"));
        assert!(syntax_error("* 2").contains("unexpected '*'"));
        assert!(syntax_error("2 ** ** 2").contains("unexpected '**'"));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 5), ")".repeat(MAX_DEPTH + 5));
        assert!(syntax_error(&deep).contains("nested too deeply"));

        let ok = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(parsed(&ok), "1");

        let signs = format!("{}1", "-".repeat(MAX_DEPTH * 2));
        assert!(syntax_error(&signs).contains("nested too deeply"));
    }

    #[test]
    fn test_token_limit() {
        let long = vec!["1"; MAX_TOKENS].join("+");
        assert!(syntax_error(&long).contains("too long"));
    }
}
