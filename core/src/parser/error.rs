use crate::parser::Rule;
use thiserror::Error;

/// Syntax error in an annotation, with the position pest reported.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("syntax error in `{annotation}` at {line}:{column}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub annotation: String,
    pub line: usize,
    pub column: usize,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("invalid number literal '{text}'")]
    InvalidNumber { text: String },

    /// Catch-all for pest custom errors raised while building the tree.
    #[error("{message}")]
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, annotation: &str, (line, column): (usize, usize)) -> Self {
        Self {
            kind,
            annotation: annotation.to_string(),
            line,
            column,
        }
    }
}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, annotation: &str) -> ParseError {
    use pest::error::{ErrorVariant, LineColLocation};

    let position = match err.line_col {
        LineColLocation::Pos(pos) => pos,
        LineColLocation::Span(start, _) => start,
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError {
            positives,
            negatives,
        } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: format_found_rules(&negatives, annotation, &err.location),
        },
        ErrorVariant::CustomError { message } => {
            if let Some(text) = message.strip_prefix("invalid number literal ") {
                ParseErrorKind::InvalidNumber {
                    text: text.trim_matches('\'').to_string(),
                }
            } else {
                ParseErrorKind::Other { message }
            }
        }
    };

    ParseError::new(kind, annotation, position)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "something else".to_string();
    }

    // Group related rules into higher-level concepts
    let mut concepts = Vec::new();
    for rule in rules {
        let concept = match rule {
            Rule::integer | Rule::float | Rule::boolean | Rule::string | Rule::nil => "literal",
            Rule::current | Rule::sibling => "selector",
            Rule::ident | Rule::field_path => "identifier",
            Rule::or
            | Rule::and
            | Rule::eq
            | Rule::ne
            | Rule::le
            | Rule::ge
            | Rule::lt
            | Rule::gt
            | Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div
            | Rule::rem => "operator",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => "something else".to_string(),
    }
}

/// Describe what sits at the error position.
fn format_found_rules(
    rules: &[Rule],
    annotation: &str,
    location: &pest::error::InputLocation,
) -> String {
    if let Some(rule) = rules.first() {
        return format!("{:?}", rule);
    }

    let pos = match location {
        pest::error::InputLocation::Pos(pos) => *pos,
        pest::error::InputLocation::Span((start, _)) => *start,
    };
    match annotation.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_expected_rules() {
        let rules = vec![Rule::integer, Rule::float];
        assert_eq!(format_expected_rules(&rules), "literal");

        let rules = vec![Rule::integer, Rule::current, Rule::EOI];
        assert_eq!(
            format_expected_rules(&rules),
            "literal, selector or end of input"
        );
    }

    #[test]
    fn test_syntax_error_reports_position() {
        let err = crate::parser::parse("$ ==").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 5);
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
        assert!(err.to_string().starts_with("syntax error in `$ ==` at 1:5:"));
    }

    #[test]
    fn test_found_character_is_reported() {
        let err = crate::parser::parse("$ == 1 )").unwrap_err();
        match err.kind {
            ParseErrorKind::UnexpectedToken { found, .. } => assert_eq!(found, "')'"),
            other => panic!("expected UnexpectedToken, got {:?}", other),
        }
    }
}
