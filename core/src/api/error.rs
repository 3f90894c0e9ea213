//! Public error types for the validation API.

use crate::compiler::CompileError;
use std::fmt;
use thiserror::Error;

/// Public error type for all validation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The root value is absent.
    #[error("unsupported data: nil")]
    Unsupported,

    /// An annotation of the validated type (or of a type it contains) does
    /// not compile. Rendered exactly as the compiler reports it.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// One or more fields failed their rules.
    #[error("{0}")]
    Invalid(FieldErrors),
}

impl Error {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A failed field: where it is and, if known, why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    /// Custom or predicate message. `None` renders the default text.
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: Option<String>) -> Self {
        Self {
            path: path.into(),
            message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => f.write_str(message),
            None => write!(f, "invalid parameter: {}", self.path),
        }
    }
}

impl std::error::Error for FieldError {}

/// Field failures in visit order, displayed joined by a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
    separator: String,
}

impl FieldErrors {
    pub fn new(errors: Vec<FieldError>, separator: impl Into<String>) -> Self {
        Self {
            errors,
            separator: separator.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separator)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl<'e> IntoIterator for &'e FieldErrors {
    type Item = &'e FieldError;
    type IntoIter = std::slice::Iter<'e, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
