//! Runtime values produced while evaluating an expression.

use super::{Mapping, Record, Sequence, Value};
use core::fmt;
use std::borrow::Cow;

/// A value flowing through the evaluator.
///
/// Scalars are normalized: every integer that fits becomes `Int`, larger
/// unsigned integers become `Float`. Composite host values are carried by
/// reference so that `len()` and `nil` comparisons still see them.
#[derive(Clone)]
pub enum Datum<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Cow<'a, str>),
    Record(&'a dyn Record),
    Seq(&'a dyn Sequence),
    Map(&'a dyn Mapping),
}

impl<'a> Datum<'a> {
    pub fn str(s: impl Into<Cow<'a, str>>) -> Self {
        Datum::Str(s.into())
    }

    /// Truthiness used for the final verdict of a rule and for `!`, `&&`, `||`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Datum::Nil => false,
            Datum::Bool(b) => *b,
            Datum::Int(i) => *i != 0,
            Datum::Float(x) => *x != 0.0,
            Datum::Str(s) => !s.is_empty(),
            Datum::Record(_) | Datum::Seq(_) | Datum::Map(_) => true,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Datum::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Datum::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Numeric view, coercing integers to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Int(i) => Some(*i as f64),
            Datum::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Datum::Nil => "nil",
            Datum::Bool(_) => "bool",
            Datum::Int(_) => "integer",
            Datum::Float(_) => "float",
            Datum::Str(_) => "string",
            Datum::Record(_) => "record",
            Datum::Seq(_) => "sequence",
            Datum::Map(_) => "map",
        }
    }
}

impl<'a> From<Value<'a>> for Datum<'a> {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Nil => Datum::Nil,
            Value::Bool(b) => Datum::Bool(b),
            Value::Int(i) => Datum::Int(i),
            Value::Uint(u) => match i64::try_from(u) {
                Ok(i) => Datum::Int(i),
                Err(_) => Datum::Float(u as f64),
            },
            Value::Float(x) => Datum::Float(x),
            Value::Str(s) => Datum::Str(Cow::Borrowed(s)),
            Value::Record(r) => Datum::Record(r),
            Value::Seq(s) => Datum::Seq(s),
            Value::Map(m) => Datum::Map(m),
        }
    }
}

impl From<bool> for Datum<'_> {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<i64> for Datum<'_> {
    fn from(i: i64) -> Self {
        Datum::Int(i)
    }
}

impl From<f64> for Datum<'_> {
    fn from(x: f64) -> Self {
        Datum::Float(x)
    }
}

impl PartialEq for Datum<'_> {
    /// Equality as seen by `==` in annotations: numbers compare across
    /// integer and float kinds, composites compare by identity, and values
    /// of unrelated kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Datum::Nil, Datum::Nil) => true,
            (Datum::Bool(a), Datum::Bool(b)) => a == b,
            (Datum::Int(a), Datum::Int(b)) => a == b,
            (Datum::Int(_) | Datum::Float(_), Datum::Int(_) | Datum::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            (Datum::Str(a), Datum::Str(b)) => a == b,
            (Datum::Record(_) | Datum::Seq(_) | Datum::Map(_), _) => {
                let lhs = Value::from(self).identity();
                lhs.is_some() && lhs == Value::from(other).identity()
            }
            _ => false,
        }
    }
}

impl<'a> From<&Datum<'a>> for Value<'a> {
    /// Composite view of a datum; scalars map to `Nil` since they no longer
    /// borrow host data.
    fn from(datum: &Datum<'a>) -> Self {
        match *datum {
            Datum::Record(r) => Value::Record(r),
            Datum::Seq(s) => Value::Seq(s),
            Datum::Map(m) => Value::Map(m),
            _ => Value::Nil,
        }
    }
}

impl fmt::Display for Datum<'_> {
    /// Plain rendering used in messages: strings unquoted, whole floats
    /// without a fractional part (`2.0` renders as `2`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Nil => write!(f, "<nil>"),
            Datum::Bool(b) => write!(f, "{b}"),
            Datum::Int(i) => write!(f, "{i}"),
            Datum::Float(x) => write!(f, "{x}"),
            Datum::Str(s) => write!(f, "{s}"),
            Datum::Record(r) => write!(f, "{{{}}}", r.type_name()),
            Datum::Seq(s) => write!(f, "[{} items]", s.len()),
            Datum::Map(m) => write!(f, "map[{} entries]", m.len()),
        }
    }
}

impl fmt::Debug for Datum<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Str(s) => write!(f, "Str({s:?})"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}
