use crate::parser::{
    BinaryOp, BoolOp, ComparisonOp, Expr, Literal, ParseErrorKind, PathStep, UnaryOp, parse,
};
use pretty_assertions::assert_eq;

fn int(value: i64) -> Box<Expr> {
    Box::new(Expr::Literal(Literal::Int(value)))
}

fn string(value: &str) -> Expr {
    Expr::Literal(Literal::Str(value.to_string()))
}

#[test]
fn test_parse_current_comparison() {
    let parsed = parse("$ > 1").unwrap();
    assert_eq!(
        parsed.expr,
        Expr::Comparison {
            op: ComparisonOp::Gt,
            left: Box::new(Expr::Current),
            right: int(1),
        }
    );
    assert_eq!(parsed.message, None);
}

#[test]
fn test_parse_sibling_path() {
    let parsed = parse("(Users[2].Name)$").unwrap();
    assert_eq!(
        parsed.expr,
        Expr::Sibling(vec![
            PathStep::Field("Users".to_string()),
            PathStep::Index(2),
            PathStep::Field("Name".to_string()),
        ])
    );
}

#[test]
fn test_parse_call_arguments() {
    let parsed = parse("in($, 'a', 2, 3.5, nil, true)").unwrap();
    assert_eq!(
        parsed.expr,
        Expr::Call {
            name: "in".to_string(),
            args: vec![
                Expr::Current,
                string("a"),
                Expr::Literal(Literal::Int(2)),
                Expr::Literal(Literal::Float(3.5)),
                Expr::Literal(Literal::Nil),
                Expr::Literal(Literal::Bool(true)),
            ],
        }
    );
}

#[test]
fn test_parse_extended_form() {
    let parsed = parse("@:$ != 0 && $ % 2 == 0;msg:'must be even'").unwrap();
    assert_eq!(parsed.message, Some(string("must be even")));
    assert_eq!(
        parsed.expr,
        Expr::Boolean {
            op: BoolOp::And,
            left: Box::new(Expr::Comparison {
                op: ComparisonOp::Neq,
                left: Box::new(Expr::Current),
                right: int(0),
            }),
            right: Box::new(Expr::Comparison {
                op: ComparisonOp::Eq,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Rem,
                    left: Box::new(Expr::Current),
                    right: int(2),
                }),
                right: int(0),
            }),
        }
    );
}

#[test]
fn test_parse_extended_form_with_trailing_semicolon() {
    let parsed = parse("@: $ ; msg: sprintf('%v', $);").unwrap();
    assert_eq!(parsed.expr, Expr::Current);
    assert_eq!(
        parsed.message,
        Some(Expr::Call {
            name: "sprintf".to_string(),
            args: vec![string("%v"), Expr::Current],
        })
    );
}

#[test]
fn test_parse_unary_operators() {
    let parsed = parse("!(Flag)$").unwrap();
    assert_eq!(
        parsed.expr,
        Expr::Unary {
            op: UnaryOp::Not,
            expr: Box::new(Expr::Sibling(vec![PathStep::Field("Flag".to_string())])),
        }
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(parse(r"'it\'s'").unwrap().expr, string("it's"));
    assert_eq!(parse(r#""say \"hi\"""#).unwrap().expr, string("say \"hi\""));
    assert_eq!(parse(r"'a\tb\n'").unwrap().expr, string("a\tb\n"));
    // Unknown escapes are kept so regular expressions read naturally.
    assert_eq!(parse(r"'^\d+$'").unwrap().expr, string(r"^\d+$"));
    assert_eq!(parse(r"'\\'").unwrap().expr, string(r"\"));
}

#[test]
fn test_integer_overflow_becomes_float() {
    assert_eq!(
        parse("99999999999999999999").unwrap().expr,
        Expr::Literal(Literal::Float(99999999999999999999.0))
    );
}

#[test]
fn test_syntax_errors() {
    for source in ["", "$ +", "len(", "(A.)$", "@:$;msg:"] {
        let err = parse(source).unwrap_err();
        assert!(
            matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }),
            "{}: {:?}",
            source,
            err
        );
        assert_eq!(err.annotation, source);
    }
}
