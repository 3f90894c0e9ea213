//! Read-only views over host values.
//!
//! The engine never knows the concrete Rust types it validates. Everything it
//! needs goes through [`Inspect`], which turns a host value into a [`Value`]:
//! either a scalar, `Nil` for absent data, or one of the object-safe composite
//! views ([`Record`], [`Sequence`], [`Mapping`]).
//!
//! Pointer-like wrappers (`Option`, `Box`, `Rc`, `Arc`, references, `OnceCell`)
//! are transparent: they inspect as whatever they point to, or `Nil` when empty.

mod datum;
mod descriptor;
mod impls;


pub use datum::Datum;
pub use descriptor::{FieldDescriptor, TypeDescriptor};

use core::any::TypeId;
use core::fmt;
use core::ptr;

/// A borrowed view of one host value.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Absent data: `None`, an unset cell, or anything without a view.
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    Record(&'a dyn Record),
    Seq(&'a dyn Sequence),
    Map(&'a dyn Mapping),
}

impl<'a> Value<'a> {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Record(_) | Value::Seq(_) | Value::Map(_))
    }

    /// Identity of a composite value, used to detect cycles.
    ///
    /// Two views share an identity only if they sit at the same address and
    /// have the same concrete type, so a record and its first field never
    /// collide.
    pub fn identity(&self) -> Option<Identity> {
        match *self {
            Value::Record(r) => Some(Identity::of(ptr::from_ref(r).cast(), r.type_name())),
            Value::Seq(s) => Some(Identity::of(ptr::from_ref(s).cast(), s.type_name())),
            Value::Map(m) => Some(Identity::of(ptr::from_ref(m).cast(), m.type_name())),
            _ => None,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Uint(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Record(_) => "record",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Uint(u) => write!(f, "Uint({u})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Record(r) => write!(f, "Record({})", r.type_name()),
            Value::Seq(s) => write!(f, "Seq({}; len {})", s.type_name(), s.len()),
            Value::Map(m) => write!(f, "Map({}; len {})", m.type_name(), m.len()),
        }
    }
}

/// Stable identity token of a composite value on the current descent path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_name: &'static str,
}

impl Identity {
    fn of(p: *const (), type_name: &'static str) -> Self {
        Self {
            addr: p as usize,
            type_name,
        }
    }
}

/// Conversion of a host value into a [`Value`] view.
///
/// Implemented for the standard scalar, string, pointer and collection types.
/// Records get theirs from `#[derive(Inspect)]`.
pub trait Inspect {
    fn inspect(&self) -> Value<'_>;

    /// The descriptor of the record type this type eventually holds, if any.
    ///
    /// Wrappers and collections forward to their element type, so a field of
    /// type `Option<Vec<Box<T>>>` reports `T`'s descriptor. The schema cache
    /// follows these links to discover nested record types.
    fn record_descriptor() -> Option<TypeDescriptor> {
        None
    }
}

/// A record (struct) with an ordered, statically known field list.
pub trait Record {
    /// Key of the concrete type in the schema cache.
    fn type_key(&self) -> TypeId;

    /// Declared fields of the concrete type.
    fn descriptor(&self) -> TypeDescriptor;

    /// Value of the field at `index` in declaration order; `Nil` when out of range.
    fn field(&self, index: usize) -> Value<'_>;

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An ordered collection addressed by index.
pub trait Sequence {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Value<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An associative collection. Only values take part in validation.
pub trait Mapping {
    fn len(&self) -> usize;

    fn values(&self) -> Box<dyn Iterator<Item = Value<'_>> + '_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
