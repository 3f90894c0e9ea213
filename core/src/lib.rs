//! Declarative field validation.
//!
//! Fields of host types carry small annotation expressions such as
//! `len($) > 0`, `email($)` or `@:$ != nil;msg:'required'`. A [`Validator`]
//! compiles the annotations of each type once and then walks values of that
//! type, reporting every field whose rule does not hold.
//!
//! The pipeline, leaves first:
//!
//! - [`parser`]: annotation grammar and syntax tree
//! - [`registry`] and [`stdlib`]: callable functions
//! - [`compiler`]: resolves names and checks arity
//! - [`schema`]: per-type compiled rules, compiled once
//! - [`walker`]: traversal with path tracking and cycle detection
//! - [`evaluator`]: rule evaluation
//! - [`api`]: the [`Validator`] entry point
//!
//! [`Validator`]: api::Validator

pub mod api;
pub mod compiler;
pub mod evaluator;
pub mod parser;
pub mod registry;
pub mod schema;
pub mod stdlib;
pub mod values;
pub mod walker;

pub use api::{
    Error, FieldError, FieldErrors, Validator, ValidatorOptions, default_validator,
    register_func, validate,
};
pub use registry::{Function, Registry};
pub use values::{
    Datum, FieldDescriptor, Inspect, Mapping, Record, Sequence, TypeDescriptor, Value,
};
