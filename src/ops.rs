//! Operator semantics
//!
//! Binary operators coerce the right operand to the left operand's kind
//! before applying ("first come, first served"): `5 + 2.9` is `7` while
//! `2.9 + 5` is `7.9`. Integer arithmetic wraps on overflow. Anything
//! with an unofloat on the left is clamped back into [0, 1].

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::{ErrorKind, Result, WtfError};
use crate::token::Span;
use crate::value::{Unofloat, Value};
use std::cmp::Ordering;

/// Both operands of a binary operator, converted to a common kind
enum Operands<'a> {
    Int(i64, i64),
    Uint(u64, u64),
    Float(f64, f64),
    /// Left is an unofloat; the right side is widened to f64
    Unofloat(f64, f64),
    Str(&'a str, &'a str),
    Bool(bool, bool),
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(n) => Some(*n),
        Value::Uint(n) => Some(*n as i64),
        Value::Float(n) => Some(*n as i64),
        Value::Unofloat(u) => Some(u.get() as i64),
        _ => None,
    }
}

fn to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Int(n) => Some(*n as u64),
        Value::Uint(n) => Some(*n),
        Value::Float(n) => Some((*n as i64) as u64),
        Value::Unofloat(u) => Some(u.get() as u64),
        _ => None,
    }
}

fn mismatch(left: &Value, right: &Value, span: Span) -> WtfError {
    WtfError::new(
        ErrorKind::TypeMismatch {
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        },
        span,
    )
}

fn unknown_operator(op: BinaryOp, left: &Value, right: &Value, span: Span) -> WtfError {
    WtfError::new(
        ErrorKind::UnknownOperator {
            op: op.to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        },
        span,
    )
}

fn coerce_operands<'a>(
    op: BinaryOp,
    left: &'a Value,
    right: &'a Value,
    span: Span,
) -> Result<Operands<'a>> {
    let operands = match left {
        Value::Int(l) => to_i64(right).map(|r| Operands::Int(*l, r)),
        Value::Uint(l) => to_u64(right).map(|r| Operands::Uint(*l, r)),
        Value::Float(l) => right.as_f64().map(|r| Operands::Float(*l, r)),
        Value::Unofloat(l) => right.as_f64().map(|r| Operands::Unofloat(l.get(), r)),
        Value::String(l) => match right {
            Value::String(r) => Some(Operands::Str(l, r)),
            _ => None,
        },
        Value::Bool(l) => match right {
            Value::Bool(r) => Some(Operands::Bool(*l, *r)),
            _ => None,
        },
        Value::Nil => return Err(unknown_operator(op, left, right, span)),
    };

    operands.ok_or_else(|| mismatch(left, right, span))
}

/// Apply a binary operator to two evaluated operands.
///
/// `&&` and `||` are accepted here without short-circuiting; the
/// interpreter handles them before evaluating the right side.
pub fn binary(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value> {
    match op {
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        op if op.is_comparison() => compare(op, left, right, span),
        op => arithmetic(op, left, right, span),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value> {
    let division_by_zero = || WtfError::new(ErrorKind::DivisionByZero, span);

    let result = match coerce_operands(op, left, right, span)? {
        Operands::Int(l, r) => Value::Int(match op {
            BinaryOp::Add => l.wrapping_add(r),
            BinaryOp::Sub => l.wrapping_sub(r),
            BinaryOp::Mul => l.wrapping_mul(r),
            BinaryOp::Div if r == 0 => return Err(division_by_zero()),
            BinaryOp::Div => l.wrapping_div(r),
            _ => return Err(unknown_operator(op, left, right, span)),
        }),

        Operands::Uint(l, r) => Value::Uint(match op {
            BinaryOp::Add => l.wrapping_add(r),
            BinaryOp::Sub => l.wrapping_sub(r),
            BinaryOp::Mul => l.wrapping_mul(r),
            BinaryOp::Div if r == 0 => return Err(division_by_zero()),
            BinaryOp::Div => l / r,
            _ => return Err(unknown_operator(op, left, right, span)),
        }),

        Operands::Float(l, r) => Value::Float(match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div if r == 0.0 => return Err(division_by_zero()),
            BinaryOp::Div => l / r,
            _ => return Err(unknown_operator(op, left, right, span)),
        }),

        Operands::Unofloat(l, r) => Value::Unofloat(Unofloat::new(match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div if r == 0.0 => return Err(division_by_zero()),
            BinaryOp::Div => l / r,
            _ => return Err(unknown_operator(op, left, right, span)),
        })),

        Operands::Str(l, r) if op == BinaryOp::Add => Value::String(format!("{}{}", l, r)),

        Operands::Str(..) | Operands::Bool(..) => {
            return Err(unknown_operator(op, left, right, span));
        }
    };

    Ok(result)
}

fn compare(op: BinaryOp, left: &Value, right: &Value, span: Span) -> Result<Value> {
    let ordering = match coerce_operands(op, left, right, span)? {
        Operands::Int(l, r) => l.partial_cmp(&r),
        Operands::Uint(l, r) => l.partial_cmp(&r),
        Operands::Float(l, r) | Operands::Unofloat(l, r) => l.partial_cmp(&r),
        Operands::Str(l, r) => l.partial_cmp(r),
        Operands::Bool(l, r) => {
            return match op {
                BinaryOp::Eq => Ok(Value::Bool(l == r)),
                BinaryOp::NotEq => Ok(Value::Bool(l != r)),
                _ => Err(unknown_operator(op, left, right, span)),
            };
        }
    };

    // NaN compares unequal to everything
    let result = match (op, ordering) {
        (BinaryOp::NotEq, None) => true,
        (_, None) => false,
        (BinaryOp::Eq, Some(o)) => o == Ordering::Equal,
        (BinaryOp::NotEq, Some(o)) => o != Ordering::Equal,
        (BinaryOp::Lt, Some(o)) => o == Ordering::Less,
        (BinaryOp::LtEq, Some(o)) => o != Ordering::Greater,
        (BinaryOp::Gt, Some(o)) => o == Ordering::Greater,
        (BinaryOp::GtEq, Some(o)) => o != Ordering::Less,
        _ => return Err(unknown_operator(op, left, right, span)),
    };

    Ok(Value::Bool(result))
}

/// Apply a prefix operator. Negating an unofloat gives a plain float and
/// is not clamped.
pub fn unary(op: UnaryOp, operand: &Value, span: Span) -> Result<Value> {
    let result = match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => Some(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Uint(n)) => Some(Value::Uint(0u64.wrapping_sub(*n))),
        (UnaryOp::Neg, Value::Float(n)) => Some(Value::Float(-n)),
        (UnaryOp::Neg, Value::Unofloat(u)) => Some(Value::Float(-u.get())),
        (UnaryOp::Not, Value::Bool(b)) => Some(Value::Bool(!b)),
        _ => None,
    };

    result.ok_or_else(|| {
        WtfError::new(
            ErrorKind::UnknownUnaryOperator {
                op: op.to_string(),
                operand: operand.type_name().to_string(),
            },
            span,
        )
    })
}
