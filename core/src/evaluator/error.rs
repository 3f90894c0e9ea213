//! Runtime evaluation errors.
//!
//! An evaluation error never aborts validation: the rule that raised it
//! fails with its default message and the error is logged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Integer `%` with a zero divisor.
    #[error("integer modulo by zero")]
    ModuloByZero,

    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperands {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot apply `{op}` to {operand}")]
    InvalidOperand { op: String, operand: &'static str },

    /// A value function rejected its arguments.
    #[error("{function}: {message}")]
    Function { function: String, message: String },
}

impl EvalError {
    pub fn function(function: &str, message: impl Into<String>) -> Self {
        EvalError::Function {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
