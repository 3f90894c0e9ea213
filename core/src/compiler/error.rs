//! Annotation compilation errors.

use crate::parser::ParseError;
use thiserror::Error;

/// Errors raised while turning an annotation into a [`CompiledRule`].
///
/// They are cached with the type schema and surface unchanged from every
/// later validation of that type.
///
/// [`CompiledRule`]: super::CompiledRule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("undefined function: {name}")]
    UnknownFunction { name: String },

    #[error("input parameters of the {function} function are at least {}", number_word(.min))]
    TooFewArguments { function: String, min: usize },

    #[error("input parameters of the {function} function are at most {}", number_word(.max))]
    TooManyArguments { function: String, max: usize },

    /// A sibling selector names a field the record does not declare.
    #[error("undefined field `{field}` in {type_name}")]
    UnknownField { type_name: String, field: String },
}

fn number_word(n: &usize) -> String {
    const WORDS: [&str; 11] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS
        .get(*n)
        .map_or_else(|| n.to_string(), |word| word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_messages() {
        let err = CompileError::TooFewArguments {
            function: "in".to_string(),
            min: 2,
        };
        assert_eq!(
            err.to_string(),
            "input parameters of the in function are at least two"
        );
        let err = CompileError::TooManyArguments {
            function: "range".to_string(),
            max: 12,
        };
        assert_eq!(
            err.to_string(),
            "input parameters of the range function are at most 12"
        );
    }

    #[test]
    fn test_unknown_function_message() {
        let err = CompileError::UnknownFunction {
            name: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "undefined function: nope");
    }
}
