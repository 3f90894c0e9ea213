//! Tests for the annotation compiler.

use crate::compiler::{CompileError, Node, Step, compile};
use crate::parser::ParseErrorKind;
use crate::registry::Registry;
use crate::values::{FieldDescriptor, TypeDescriptor};

struct Inner;
struct Outer;

fn inner_descriptor() -> Option<TypeDescriptor> {
    Some(TypeDescriptor::new::<Inner>(
        "Inner",
        vec![
            FieldDescriptor::new("Code", &[], || None),
            FieldDescriptor::new("Tags", &[], || None),
        ],
    ))
}

fn outer() -> TypeDescriptor {
    TypeDescriptor::new::<Outer>(
        "Outer",
        vec![
            FieldDescriptor::new("Name", &[("vd", "len($) > 0")], || None),
            FieldDescriptor::new("Items", &[], inner_descriptor),
            FieldDescriptor::new("Count", &[], || None),
        ],
    )
}

fn compile_err(annotation: &str) -> CompileError {
    compile(annotation, &outer(), &Registry::with_builtins()).unwrap_err()
}

#[test]
fn test_compile_resolves_sibling_fields() {
    let rule = compile("(Items[1].Tags)$ != nil", &outer(), &Registry::with_builtins()).unwrap();
    match &rule.expr {
        Node::Comparison { left, .. } => match left.as_ref() {
            Node::Sibling(steps) => {
                assert_eq!(steps, &vec![Step::Field(1), Step::Index(1), Step::Field(1)])
            }
            other => panic!("expected a sibling selector, got {:?}", other),
        },
        other => panic!("expected a comparison, got {:?}", other),
    }
    assert!(!rule.has_custom_message());
    assert_eq!(rule.source(), "(Items[1].Tags)$ != nil");
}

#[test]
fn test_compile_resolves_calls() {
    let rule = compile("len($) <= (Count)$", &outer(), &Registry::with_builtins()).unwrap();
    match &rule.expr {
        Node::Comparison { left, right, .. } => {
            assert!(matches!(left.as_ref(), Node::Call { function, args } if function.name() == "len" && args.len() == 1));
            assert!(matches!(right.as_ref(), Node::Sibling(steps) if steps == &vec![Step::Field(2)]));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

#[test]
fn test_compile_extended_form() {
    let rule = compile("@:$ != nil;msg:'name is required'", &outer(), &Registry::with_builtins())
        .unwrap();
    assert!(rule.has_custom_message());
}

#[test]
fn test_rules_that_run_on_absent_fields() {
    let registry = Registry::with_builtins();
    let tests_absence = |annotation: &str| {
        compile(annotation, &outer(), &registry)
            .unwrap_or_else(|e| panic!("compiling `{}` failed: {}", annotation, e))
            .tests_absence()
    };

    assert!(tests_absence("$ != nil"));
    assert!(tests_absence("len($) > 0"));
    assert!(tests_absence("email($)"));
    assert!(tests_absence("phone($, 'CN')"));
    assert!(tests_absence("!in($ + '', 'a')"));
    assert!(tests_absence("@:mblen($) <= 3;msg:'too long'"));

    assert!(!tests_absence("$ > 10"));
    assert!(!tests_absence("$ % 2 == 0 && $ < (Count)$"));
    assert!(!tests_absence("len((Name)$) > 0"));
    // Only the rule expression counts, not the message.
    assert!(!tests_absence("@:$ > 1;msg:sprintf('%v', nil)"));
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        compile_err("nope($)"),
        CompileError::UnknownFunction {
            name: "nope".to_string()
        }
    );
    assert_eq!(compile_err("nope($)").to_string(), "undefined function: nope");
}

#[test]
fn test_arity_is_checked() {
    assert_eq!(
        compile_err("in($)").to_string(),
        "input parameters of the in function are at least two"
    );
    assert_eq!(
        compile_err("len($, 1)").to_string(),
        "input parameters of the len function are at most one"
    );
    // Nested calls are checked too.
    assert_eq!(
        compile_err("len(mblen()) > 0").to_string(),
        "input parameters of the mblen function are at least one"
    );
}

#[test]
fn test_unknown_fields() {
    assert_eq!(
        compile_err("(Missing)$ == 1"),
        CompileError::UnknownField {
            type_name: "Outer".to_string(),
            field: "Missing".to_string()
        }
    );
    assert_eq!(
        compile_err("(Items[0].Nope)$ == 1"),
        CompileError::UnknownField {
            type_name: "Inner".to_string(),
            field: "Nope".to_string()
        }
    );
    assert_eq!(
        compile_err("(Name.Length)$ == 1"),
        CompileError::UnknownField {
            type_name: "Outer.Name".to_string(),
            field: "Length".to_string()
        }
    );
}

#[test]
fn test_syntax_errors_keep_position() {
    match compile_err("$ >") {
        CompileError::Syntax(err) => {
            assert_eq!((err.line, err.column), (1, 4));
            assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}
