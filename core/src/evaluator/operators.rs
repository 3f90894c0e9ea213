//! Binary, comparison and unary operator implementations.

use crate::evaluator::EvalError;
use crate::parser::{BinaryOp, ComparisonOp, UnaryOp};
use crate::values::Datum;
use std::borrow::Cow;
use std::cmp::Ordering;

/// Evaluate a binary operation on two integers.
///
/// Uses wrapping arithmetic to prevent panics on overflow. `/` always
/// divides as floats, so it is not handled here.
pub(super) fn eval_binary_int(op: BinaryOp, left: i64, right: i64) -> Result<i64, EvalError> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Sub => Ok(left.wrapping_sub(right)),
        BinaryOp::Mul => Ok(left.wrapping_mul(right)),
        BinaryOp::Rem => {
            if right == 0 {
                Err(EvalError::ModuloByZero)
            } else {
                // wrapping_rem handles i64::MIN % -1
                Ok(left.wrapping_rem(right))
            }
        }
        BinaryOp::Div => Err(EvalError::InvalidOperands {
            op: op.to_string(),
            left: "integer",
            right: "integer",
        }),
    }
}

/// Evaluate a binary operation on two floats.
///
/// Follows IEEE 754 semantics (produces inf/nan rather than panicking).
pub(super) fn eval_binary_float(op: BinaryOp, left: f64, right: f64) -> f64 {
    match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => left / right,
        BinaryOp::Rem => left % right,
    }
}

pub(super) fn eval_binary<'a>(
    op: BinaryOp,
    left: Datum<'a>,
    right: Datum<'a>,
) -> Result<Datum<'a>, EvalError> {
    match (&left, &right) {
        (Datum::Int(a), Datum::Int(b)) if op != BinaryOp::Div => {
            eval_binary_int(op, *a, *b).map(Datum::Int)
        }
        (Datum::Int(_) | Datum::Float(_), Datum::Int(_) | Datum::Float(_)) => {
            match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => Ok(Datum::Float(eval_binary_float(op, a, b))),
                _ => Err(invalid_operands(op, &left, &right)),
            }
        }
        (Datum::Str(a), Datum::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Datum::Str(Cow::Owned(joined)))
        }
        _ => Err(invalid_operands(op, &left, &right)),
    }
}

fn invalid_operands(op: BinaryOp, left: &Datum<'_>, right: &Datum<'_>) -> EvalError {
    EvalError::InvalidOperands {
        op: op.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

/// Compare two values. Equality never fails; ordering between unrelated
/// kinds (or involving NaN) is simply false.
pub(super) fn eval_comparison(op: ComparisonOp, left: &Datum<'_>, right: &Datum<'_>) -> bool {
    let ordering = || -> Option<Ordering> {
        match (left, right) {
            (Datum::Int(a), Datum::Int(b)) => Some(a.cmp(b)),
            (Datum::Str(a), Datum::Str(b)) => Some(a.as_ref().cmp(b.as_ref())),
            _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
        }
    };
    match op {
        ComparisonOp::Eq => left == right,
        ComparisonOp::Neq => left != right,
        ComparisonOp::Lt => ordering() == Some(Ordering::Less),
        ComparisonOp::Le => matches!(ordering(), Some(Ordering::Less | Ordering::Equal)),
        ComparisonOp::Gt => ordering() == Some(Ordering::Greater),
        ComparisonOp::Ge => matches!(ordering(), Some(Ordering::Greater | Ordering::Equal)),
    }
}

pub(super) fn eval_unary<'a>(op: UnaryOp, operand: Datum<'a>) -> Result<Datum<'a>, EvalError> {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Datum::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Datum::Int(i)) => Ok(Datum::Int(i.wrapping_neg())),
        (UnaryOp::Neg, Datum::Float(x)) => Ok(Datum::Float(-x)),
        (UnaryOp::Neg, other) => Err(EvalError::InvalidOperand {
            op: op.to_string(),
            operand: other.type_name(),
        }),
    }
}
