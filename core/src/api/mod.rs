//! Public API for validating annotated values.
//!
//! # Example
//!
//! ```ignore
//! use fieldcheck::{Inspect, Validator};
//!
//! #[derive(Inspect)]
//! struct Signup {
//!     #[tag(vd = "email($)")]
//!     email: String,
//!     #[tag(vd = "@:$ >= 18;msg:'too young'")]
//!     age: u8,
//! }
//!
//! let validator = Validator::new("vd");
//! let err = validator
//!     .validate(&Signup { email: "a@b.cn".into(), age: 12 }, false)
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "too young");
//! ```

pub mod error;
pub mod options;
pub mod validator;

pub use error::{Error, FieldError, FieldErrors};
pub use options::ValidatorOptions;
pub use validator::{Validator, default_validator, register_func, validate};
