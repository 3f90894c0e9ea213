//! fieldcheck - declarative field validation
//!
//! # Overview
//!
//! Struct fields carry small rule expressions in `#[tag(...)]` attributes.
//! A [`Validator`] compiles the rules of each type on first use and checks
//! every annotated field of a value, descending into nested records,
//! sequences and maps.
//!
//! # Quick Start
//!
//! ```ignore
//! use fieldcheck::Inspect;
//!
//! #[derive(Inspect)]
//! struct Signup {
//!     #[tag(vd = "email($)")]
//!     email: String,
//!     #[tag(vd = "@:$>=18;msg:'must be an adult'")]
//!     age: u32,
//!     #[tag(vd = "@:len($)>=8;msg:sprintf('password too short: %d',len($))")]
//!     password: String,
//! }
//!
//! let signup = Signup {
//!     email: "someone@example.com".to_string(),
//!     age: 16,
//!     password: "hunter2".to_string(),
//! };
//! let err = fieldcheck::validate(&signup, true).unwrap_err();
//! assert_eq!(err.to_string(), "must be an adult\tpassword too short: 7");
//! ```
//!
//! # Rules
//!
//! - `$` is the field's value, `(Name)$` a sibling field of the same record
//! - `+ - * / %`, comparisons, `&& || !`, literals and `nil`
//! - functions: `len`, `mblen`, `regexp`, `email`, `phone`, `in`, `range`,
//!   `sprintf`, plus anything added with [`register_func`]
//! - `@:<rule>;msg:<message>` replaces the failure message
//!
//! A rule on an absent field (`None`, an unset cell) only runs when it
//! compares against `nil` or passes `$` to a function, so `$!=nil`,
//! `len($)>0` and `email($)` reject a missing value while `$>10` lets it
//! through.
//!
//! # Custom functions
//!
//! ```ignore
//! use fieldcheck::{Datum, Validator};
//!
//! let validator = Validator::new("vd");
//! validator.register_func("even", |args: &[Datum<'_>]| match args.first() {
//!     Some(Datum::Int(n)) if n % 2 == 0 => Ok(()),
//!     _ => Err("not even".to_string()),
//! });
//! ```
//!
//! The generated code of `#[derive(Inspect)]` names `fieldcheck_core`
//! directly, so crates using the derive also depend on `fieldcheck-core`.

// Re-export public API from fieldcheck_core
pub use fieldcheck_core::api::{
    Error, FieldError, FieldErrors, Validator, ValidatorOptions, default_validator, register_func,
    validate,
};

// Re-export the value model and function registry
pub use fieldcheck_core::registry::{Function, Registry};
pub use fieldcheck_core::values::{
    self, Datum, FieldDescriptor, Inspect, Mapping, Record, Sequence, TypeDescriptor, Value,
};

// Re-export errors
pub use fieldcheck_core::compiler::CompileError;
pub use fieldcheck_core::evaluator::EvalError;
pub use fieldcheck_core::parser::ParseError;

#[cfg(feature = "derive")]
pub use fieldcheck_macros::Inspect;
