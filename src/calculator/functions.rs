//! The fixed whitelist of constants and functions the evaluator may resolve.
//!
//! Nothing outside these two tables is ever reachable from an expression.
//! Adding a name means adding a row here.

use super::error::CalcError;
use super::special;
use std::f64::consts;

/// A named constant.
#[derive(Debug)]
pub struct Constant {
    pub name: &'static str,
    pub value: f64,
}

/// Number of arguments a function accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::Range(min, max) => (min..=max).contains(&count),
            Self::AtLeast(min) => count >= min,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Exact(1) => "takes exactly 1 argument".to_string(),
            Self::Exact(n) => format!("takes exactly {} arguments", n),
            Self::Range(min, max) => format!("takes {} to {} arguments", min, max),
            Self::AtLeast(min) => format!("takes at least {} arguments", min),
        }
    }
}

type Apply = fn(&[f64]) -> Result<f64, CalcError>;

/// A named function.
pub struct Function {
    pub name: &'static str,
    pub arity: Arity,
    apply: Apply,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Function {
    /// Call the function, checking arity and the shape of the result.
    ///
    /// NaN arguments propagate. Otherwise a NaN result is a domain error and an
    /// infinite result from finite arguments is an overflow.
    pub fn call(&self, args: &[f64]) -> Result<f64, CalcError> {
        if !self.arity.accepts(args.len()) {
            return Err(CalcError::domain(format!(
                "{}() {} ({} given)",
                self.name,
                self.arity.describe(),
                args.len()
            )));
        }

        let value = (self.apply)(args)?;

        if args.iter().any(|a| a.is_nan()) {
            return Ok(value);
        }
        if value.is_nan() {
            return Err(CalcError::domain(format!(
                "math domain error in {}()",
                self.name
            )));
        }
        if value.is_infinite() && args.iter().all(|a| a.is_finite()) {
            return Err(CalcError::overflow(format!(
                "math range error in {}()",
                self.name
            )));
        }
        Ok(value)
    }
}

macro_rules! unary {
    ($name:expr, $f:expr) => {
        Function {
            name: $name,
            arity: Arity::Exact(1),
            apply: |args| Ok(($f)(args[0])),
        }
    };
}

macro_rules! binary {
    ($name:expr, $f:expr) => {
        Function {
            name: $name,
            arity: Arity::Exact(2),
            apply: |args| Ok(($f)(args[0], args[1])),
        }
    };
}

pub static CONSTANTS: &[Constant] = &[
    Constant {
        name: "pi",
        value: consts::PI,
    },
    Constant {
        name: "e",
        value: consts::E,
    },
    Constant {
        name: "tau",
        value: consts::TAU,
    },
    Constant {
        name: "inf",
        value: f64::INFINITY,
    },
    Constant {
        name: "nan",
        value: f64::NAN,
    },
];

pub static FUNCTIONS: &[Function] = &[
    // Trigonometric
    unary!("sin", f64::sin),
    unary!("cos", f64::cos),
    unary!("tan", f64::tan),
    unary!("asin", f64::asin),
    unary!("acos", f64::acos),
    unary!("atan", f64::atan),
    binary!("atan2", f64::atan2),
    unary!("degrees", f64::to_degrees),
    unary!("radians", f64::to_radians),
    // Hyperbolic
    unary!("sinh", f64::sinh),
    unary!("cosh", f64::cosh),
    unary!("tanh", f64::tanh),
    unary!("asinh", f64::asinh),
    unary!("acosh", f64::acosh),
    Function {
        name: "atanh",
        arity: Arity::Exact(1),
        apply: |args| {
            if args[0].abs() >= 1.0 {
                return Err(CalcError::domain("atanh() argument must be in (-1, 1)"));
            }
            Ok(args[0].atanh())
        },
    },
    // Powers and logarithms
    unary!("sqrt", f64::sqrt),
    unary!("cbrt", f64::cbrt),
    unary!("exp", f64::exp),
    unary!("exp2", f64::exp2),
    unary!("expm1", f64::exp_m1),
    Function {
        name: "pow",
        arity: Arity::Exact(2),
        apply: |args| {
            if args[0] == 0.0 && args[1] < 0.0 {
                return Err(CalcError::domain("pow() of zero to a negative power"));
            }
            Ok(args[0].powf(args[1]))
        },
    },
    Function {
        name: "log",
        arity: Arity::Range(1, 2),
        apply: |args| {
            let x = positive("log", args[0])?;
            match args.get(1) {
                None => Ok(x.ln()),
                Some(&base) => {
                    let base = positive("log", base)?;
                    if base == 1.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    Ok(x.ln() / base.ln())
                }
            }
        },
    },
    Function {
        name: "log10",
        arity: Arity::Exact(1),
        apply: |args| Ok(positive("log10", args[0])?.log10()),
    },
    Function {
        name: "log2",
        arity: Arity::Exact(1),
        apply: |args| Ok(positive("log2", args[0])?.log2()),
    },
    Function {
        name: "log1p",
        arity: Arity::Exact(1),
        apply: |args| {
            if args[0] <= -1.0 {
                return Err(CalcError::domain("log1p() argument must be greater than -1"));
            }
            Ok(args[0].ln_1p())
        },
    },
    Function {
        name: "ldexp",
        arity: Arity::Exact(2),
        apply: |args| {
            let (x, i) = (args[0], integral("ldexp", args[1])?);
            if x == 0.0 || !x.is_finite() {
                return Ok(x);
            }
            // Two half-steps keep 2^i representable for extreme exponents.
            let i = i.clamp(-4_000.0, 4_000.0) as i32;
            let half = i / 2;
            Ok(x * 2f64.powi(half) * 2f64.powi(i - half))
        },
    },
    // Rounding and sign
    unary!("floor", f64::floor),
    unary!("ceil", f64::ceil),
    unary!("trunc", f64::trunc),
    unary!("fabs", f64::abs),
    unary!("abs", f64::abs),
    binary!("copysign", f64::copysign),
    Function {
        name: "round",
        arity: Arity::Range(1, 2),
        apply: |args| match args.get(1) {
            None => Ok(args[0].round_ties_even()),
            Some(&digits) => round_to(args[0], integral("round", digits)?),
        },
    },
    // Remainders
    binary!("fmod", |x: f64, y: f64| x % y),
    Function {
        name: "remainder",
        arity: Arity::Exact(2),
        apply: |args| remainder(args[0], args[1]),
    },
    // Special functions
    Function {
        name: "gamma",
        arity: Arity::Exact(1),
        apply: |args| {
            pole_check("gamma", args[0])?;
            Ok(special::gamma(args[0]))
        },
    },
    Function {
        name: "lgamma",
        arity: Arity::Exact(1),
        apply: |args| {
            pole_check("lgamma", args[0])?;
            Ok(special::lgamma(args[0]))
        },
    },
    unary!("erf", special::erf),
    unary!("erfc", special::erfc),
    // Number theory
    Function {
        name: "factorial",
        arity: Arity::Exact(1),
        apply: |args| {
            let n = natural("factorial", args[0])?;
            if n > 170.0 {
                return Err(CalcError::overflow("factorial() result too large"));
            }
            Ok((2..=n as u32).fold(1.0, |acc, k| acc * k as f64))
        },
    },
    Function {
        name: "isqrt",
        arity: Arity::Exact(1),
        apply: |args| isqrt(natural("isqrt", args[0])?),
    },
    Function {
        name: "comb",
        arity: Arity::Exact(2),
        apply: |args| comb(natural("comb", args[0])?, natural("comb", args[1])?),
    },
    Function {
        name: "perm",
        arity: Arity::Range(1, 2),
        apply: |args| {
            let n = natural("perm", args[0])?;
            let k = match args.get(1) {
                Some(&k) => natural("perm", k)?,
                None => n,
            };
            perm(n, k)
        },
    },
    Function {
        name: "gcd",
        arity: Arity::AtLeast(0),
        apply: |args| {
            let mut acc = 0u64;
            for &x in args {
                acc = gcd(acc, integer_magnitude("gcd", x)?);
            }
            Ok(acc as f64)
        },
    },
    Function {
        name: "lcm",
        arity: Arity::AtLeast(0),
        apply: |args| {
            let mut acc = 1u64;
            for &x in args {
                let m = integer_magnitude("lcm", x)?;
                if m == 0 || acc == 0 {
                    acc = 0;
                    continue;
                }
                acc = (acc / gcd(acc, m))
                    .checked_mul(m)
                    .ok_or_else(|| CalcError::overflow("lcm() result too large"))?;
            }
            Ok(acc as f64)
        },
    },
    Function {
        name: "hypot",
        arity: Arity::AtLeast(0),
        apply: |args| Ok(args.iter().fold(0.0, |acc: f64, &x| acc.hypot(x))),
    },
    // Classification
    unary!("isfinite", |x: f64| f64::from(u8::from(x.is_finite()))),
    unary!("isinf", |x: f64| f64::from(u8::from(x.is_infinite()))),
    unary!("isnan", |x: f64| f64::from(u8::from(x.is_nan()))),
];

/// Look up a whitelisted function by exact name.
pub fn lookup_function(name: &str) -> Option<&'static Function> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// Look up a whitelisted constant by exact name.
pub fn lookup_constant(name: &str) -> Option<&'static Constant> {
    CONSTANTS.iter().find(|c| c.name == name)
}

/// All whitelisted function names, sorted.
pub fn function_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = FUNCTIONS.iter().map(|f| f.name).collect();
    names.sort_unstable();
    names
}

/// All whitelisted constant names in declaration order.
pub fn constant_names() -> Vec<&'static str> {
    CONSTANTS.iter().map(|c| c.name).collect()
}

fn positive(name: &str, x: f64) -> Result<f64, CalcError> {
    if x <= 0.0 {
        return Err(CalcError::domain(format!(
            "{}() argument must be positive",
            name
        )));
    }
    Ok(x)
}

fn pole_check(name: &str, x: f64) -> Result<(), CalcError> {
    if x <= 0.0 && x == x.floor() {
        return Err(CalcError::domain(format!(
            "{}() is undefined at non-positive integers",
            name
        )));
    }
    Ok(())
}

fn integral(name: &str, x: f64) -> Result<f64, CalcError> {
    if x.is_nan() {
        return Ok(x);
    }
    if x.is_infinite() || x.fract() != 0.0 {
        return Err(CalcError::domain(format!(
            "{}() only accepts integral values",
            name
        )));
    }
    Ok(x)
}

fn natural(name: &str, x: f64) -> Result<f64, CalcError> {
    if x.is_nan() {
        return Err(CalcError::domain(format!(
            "{}() only accepts integral values",
            name
        )));
    }
    let x = integral(name, x)?;
    if x < 0.0 {
        return Err(CalcError::domain(format!(
            "{}() not defined for negative values",
            name
        )));
    }
    Ok(x)
}

fn integer_magnitude(name: &str, x: f64) -> Result<u64, CalcError> {
    let x = natural(name, x.abs())?;
    if x >= u64::MAX as f64 {
        return Err(CalcError::overflow(format!("{}() argument too large", name)));
    }
    Ok(x as u64)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn isqrt(n: f64) -> Result<f64, CalcError> {
    // Exact integer refinement only where f64 still holds every integer.
    if n > 9_007_199_254_740_992.0 {
        return Ok(n.sqrt().floor());
    }
    let n = n as u64;
    let mut r = (n as f64).sqrt() as u64;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    Ok(r as f64)
}

fn comb(n: f64, k: f64) -> Result<f64, CalcError> {
    if k > n {
        return Ok(0.0);
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    let mut i = 1.0;
    while i <= k {
        result = result * (n - k + i) / i;
        if result.is_infinite() {
            return Err(CalcError::overflow("comb() result too large"));
        }
        i += 1.0;
    }
    Ok(result.round())
}

fn perm(n: f64, k: f64) -> Result<f64, CalcError> {
    if k > n {
        return Ok(0.0);
    }
    // Counted in integers: an f64 counter stalls past 2**53.
    let mut result = 1.0;
    for i in 0..k as u64 {
        result *= n - i as f64;
        if result.is_infinite() {
            return Err(CalcError::overflow("perm() result too large"));
        }
    }
    Ok(result)
}

fn round_to(x: f64, digits: f64) -> Result<f64, CalcError> {
    if !x.is_finite() || digits.is_nan() {
        return Ok(x);
    }
    let scale = 10f64.powf(digits.abs().min(400.0));
    if digits < 0.0 {
        if scale.is_infinite() {
            return Ok(0.0f64.copysign(x));
        }
        return Ok((x / scale).round_ties_even() * scale);
    }
    let scaled = x * scale;
    if !scaled.is_finite() {
        return Ok(x);
    }
    Ok(scaled.round_ties_even() / scale)
}

/// IEEE 754 remainder: `x - n*y` with `n` the integer nearest `x/y`, ties to even.
fn remainder(x: f64, y: f64) -> Result<f64, CalcError> {
    if x.is_nan() || y.is_nan() {
        return Ok(f64::NAN);
    }
    if y == 0.0 || x.is_infinite() {
        return Err(CalcError::domain("math domain error in remainder()"));
    }
    if y.is_infinite() {
        return Ok(x);
    }
    let y = y.abs();
    let r = x % y;
    let m = r.abs();
    let half = y / 2.0;
    let quotient_is_odd = ((x - r) / y) % 2.0 != 0.0;
    let result = if m > half || (m == half && quotient_is_odd) {
        m - y
    } else {
        m
    };
    Ok(if x.is_sign_negative() { -result } else { result })
}
