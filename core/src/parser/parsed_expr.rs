use super::syntax::{BinaryOp, BoolOp, ComparisonOp, UnaryOp};

/// A parsed annotation: the rule expression and an optional message
/// expression from the `@:<expr>;msg:<expr>` form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAnnotation {
    pub expr: Expr,
    pub message: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// `$`, the value under validation.
    Current,
    /// `(Name.Sub[0])$`, a field of the enclosing record.
    Sibling(Vec<PathStep>),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Boolean {
        op: BoolOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Field(String),
    Index(usize),
}
