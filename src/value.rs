//! Runtime value types for WTFScript

use std::fmt;

/// A float that always lies in [0.0, 1.0]
///
/// The only way to build one is [`Unofloat::new`], which clamps, so no
/// out-of-range unofloat can exist at runtime. NaN becomes 0.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Unofloat(f64);

impl Unofloat {
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Unofloat(0.0)
        } else {
            Unofloat(value.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// True when `value` is representable without clamping
    pub fn in_range(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }
}

impl fmt::Display for Unofloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

/// Runtime values in WTFScript
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Unofloat(Unofloat),
    Bool(bool),
    String(String),

    /// Result of statements and of builtins that return nothing
    Nil,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Unofloat(_) => "unofloat",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Nil => "nil",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Unofloat(_))
    }

    /// Numeric value widened to f64, `None` for non-numeric kinds
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Uint(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Unofloat(u) => Some(u.get()),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Uint(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Unofloat(u) => u.get() != 0.0,
            Value::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{:.6}", n),
            Value::Unofloat(u) => write!(f, "{}", u),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Nil => write!(f, "nil"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unofloat_clamps() {
        assert_eq!(Unofloat::new(1.3).get(), 1.0);
        assert_eq!(Unofloat::new(-0.2).get(), 0.0);
        assert_eq!(Unofloat::new(0.25).get(), 0.25);
        assert_eq!(Unofloat::new(f64::NAN).get(), 0.0);
        assert_eq!(Unofloat::new(f64::INFINITY).get(), 1.0);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(!Value::Uint(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::Unofloat(Unofloat::new(0.1)).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Bool(true).is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Uint(7).to_string(), "7");
        assert_eq!(Value::Float(3.14).to_string(), "3.140000");
        assert_eq!(Value::Unofloat(Unofloat::new(0.5)).to_string(), "0.500000");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Unofloat(Unofloat::default()).type_name(), "unofloat");
        assert_eq!(Value::Nil.type_name(), "nil");
    }
}
