//! Declared variable types and the rules for storing values into them
//!
//! Storing goes through three steps: a compatibility check, a strict or
//! lenient range validation, then a cast into the declared kind.

use crate::error::{ErrorKind, Result, WtfError};
use crate::token::{Span, TokenKind};
use crate::value::{Unofloat, Value};
use std::fmt;

/// Type a variable was declared with. Fixed for the variable's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Uint,
    Float,
    Unofloat,
    Bool,
    String,
    Unknown,
}

impl VarType {
    pub fn from_token(kind: &TokenKind) -> Self {
        match kind {
            TokenKind::TypeInt => VarType::Int,
            TokenKind::TypeUint => VarType::Uint,
            TokenKind::TypeFloat => VarType::Float,
            TokenKind::TypeUnofloat => VarType::Unofloat,
            TokenKind::TypeBool => VarType::Bool,
            TokenKind::TypeString => VarType::String,
            _ => VarType::Unknown,
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
            VarType::Uint => write!(f, "uint"),
            VarType::Float => write!(f, "float"),
            VarType::Unofloat => write!(f, "unofloat"),
            VarType::Bool => write!(f, "bool"),
            VarType::String => write!(f, "string"),
            VarType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A stored binding: its declared type and current value
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub var_type: VarType,
    pub value: Value,
}

impl Variable {
    pub fn new(var_type: VarType, value: Value) -> Self {
        Self { var_type, value }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Convert `value` for storage in a variable declared as `declared`.
///
/// `strict` is true when the value came straight from a literal or a bare
/// identifier; out-of-range values are then rejected instead of clamped
/// or wrapped.
pub fn coerce(declared: VarType, value: Value, strict: bool, span: Span) -> Result<Value> {
    check_compatibility(declared, &value, span)?;
    let value = validate(declared, value, strict, span)?;
    Ok(cast(declared, value))
}

/// Numeric kinds accept each other; bool and string need an exact match
pub fn check_compatibility(declared: VarType, value: &Value, span: Span) -> Result<()> {
    let compatible = match declared {
        VarType::Int | VarType::Uint | VarType::Float | VarType::Unofloat => value.is_numeric(),
        VarType::Bool => matches!(value, Value::Bool(_)),
        VarType::String => matches!(value, Value::String(_)),
        VarType::Unknown => true,
    };

    if compatible {
        Ok(())
    } else {
        Err(WtfError::new(
            ErrorKind::TypeMismatch {
                left: declared.to_string(),
                right: value.type_name().to_string(),
            },
            span,
        ))
    }
}

fn validate(declared: VarType, value: Value, strict: bool, span: Span) -> Result<Value> {
    match declared {
        VarType::Unofloat => match value.as_f64() {
            Some(n) if strict && !Unofloat::in_range(n) => {
                Err(WtfError::new(ErrorKind::InvalidUnofloatAssignment(n), span))
            }
            _ => Ok(value),
        },

        VarType::Uint => match value {
            Value::Int(n) if n < 0 => {
                if strict {
                    Err(WtfError::new(ErrorKind::NegativeUintAssignment(n), span))
                } else {
                    Ok(Value::Uint(n as u64))
                }
            }
            Value::Float(n) if n < 0.0 => {
                if strict {
                    Err(WtfError::new(ErrorKind::NegativeUintAssignment(n as i64), span))
                } else {
                    Ok(Value::Uint((n as i64) as u64))
                }
            }
            other => Ok(other),
        },

        _ => Ok(value),
    }
}

/// Narrow or widen a numeric value into the declared kind. Non-numeric
/// values pass through unchanged.
pub fn cast(declared: VarType, value: Value) -> Value {
    match (declared, value) {
        (VarType::Int, Value::Uint(n)) => Value::Int(n as i64),
        (VarType::Int, Value::Float(n)) => Value::Int(n as i64),
        (VarType::Int, Value::Unofloat(u)) => Value::Int(u.get() as i64),

        (VarType::Uint, Value::Int(n)) => Value::Uint(n as u64),
        (VarType::Uint, Value::Float(n)) => Value::Uint(n as u64),
        (VarType::Uint, Value::Unofloat(u)) => Value::Uint(u.get() as u64),

        (VarType::Float, Value::Int(n)) => Value::Float(n as f64),
        (VarType::Float, Value::Uint(n)) => Value::Float(n as f64),
        (VarType::Float, Value::Unofloat(u)) => Value::Float(u.get()),

        (VarType::Unofloat, value) => match value.as_f64() {
            Some(n) => Value::Unofloat(Unofloat::new(n)),
            None => value,
        },

        (_, value) => value,
    }
}
