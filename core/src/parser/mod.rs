mod parsed_expr;
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::parse;

pub use parsed_expr::{Expr, Literal, ParsedAnnotation, PathStep};
pub use syntax::{BinaryOp, BoolOp, ComparisonOp, UnaryOp};
pub use error::{ParseError, ParseErrorKind};

#[cfg(test)]
mod parse_test;
