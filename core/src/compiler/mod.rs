//! Annotation compiler.
//!
//! Turns the parsed form of an annotation into a [`CompiledRule`] bound to
//! one record type:
//!
//! - sibling selectors are resolved to field indices against the record's
//!   [`TypeDescriptor`], so evaluation never looks names up;
//! - calls are resolved against the [`Registry`] into shared function
//!   references, with their arity checked;
//! - literals are kept as parsed.
//!
//! Compilation never touches live data.

mod error;

#[cfg(test)]
mod tests;

pub use error::CompileError;

use crate::parser::{self, BinaryOp, BoolOp, ComparisonOp, Expr, Literal, PathStep, UnaryOp};
use crate::registry::{Function, Registry};
use crate::values::TypeDescriptor;
use std::sync::Arc;

/// A resolved expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    Literal(Literal),
    Current,
    Sibling(Vec<Step>),
    Unary {
        op: UnaryOp,
        expr: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Comparison {
        op: ComparisonOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Boolean {
        op: BoolOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Call {
        function: Arc<Function>,
        args: Vec<Node>,
    },
}

/// One step of a resolved sibling selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Field position within the record reached so far.
    Field(usize),
    Index(usize),
}

/// The compiled form of one field annotation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    source: String,
    pub(crate) expr: Node,
    pub(crate) message: Option<Node>,
    tests_absence: bool,
}

impl CompiledRule {
    /// The annotation text this rule was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn has_custom_message(&self) -> bool {
        self.message.is_some()
    }

    /// Whether the rule also runs when the field is absent: it compares
    /// against `nil` or hands `$` to a function, as in `len($)>0` or
    /// `email($)`.
    pub fn tests_absence(&self) -> bool {
        self.tests_absence
    }
}

/// Compile `annotation` for a field of the record described by `record`.
pub fn compile(
    annotation: &str,
    record: &TypeDescriptor,
    registry: &Registry,
) -> Result<CompiledRule, CompileError> {
    let parsed = parser::parse(annotation)?;
    let compiler = Compiler { record, registry };
    let expr = compiler.node(&parsed.expr)?;
    let message = parsed
        .message
        .as_ref()
        .map(|message| compiler.node(message))
        .transpose()?;
    Ok(CompiledRule {
        source: annotation.to_string(),
        expr,
        message,
        tests_absence: targets_absence(&parsed.expr),
    })
}

struct Compiler<'c> {
    record: &'c TypeDescriptor,
    registry: &'c Registry,
}

impl Compiler<'_> {
    fn node(&self, expr: &Expr) -> Result<Node, CompileError> {
        Ok(match expr {
            Expr::Literal(literal) => Node::Literal(literal.clone()),
            Expr::Current => Node::Current,
            Expr::Sibling(path) => Node::Sibling(self.resolve_path(path)?),
            Expr::Unary { op, expr } => Node::Unary {
                op: *op,
                expr: Box::new(self.node(expr)?),
            },
            Expr::Binary { op, left, right } => Node::Binary {
                op: *op,
                left: Box::new(self.node(left)?),
                right: Box::new(self.node(right)?),
            },
            Expr::Comparison { op, left, right } => Node::Comparison {
                op: *op,
                left: Box::new(self.node(left)?),
                right: Box::new(self.node(right)?),
            },
            Expr::Boolean { op, left, right } => Node::Boolean {
                op: *op,
                left: Box::new(self.node(left)?),
                right: Box::new(self.node(right)?),
            },
            Expr::Call { name, args } => {
                let function = self
                    .registry
                    .lookup(name)
                    .ok_or_else(|| CompileError::UnknownFunction { name: name.clone() })?;
                function.check_arity(args.len())?;
                let args = args
                    .iter()
                    .map(|arg| self.node(arg))
                    .collect::<Result<_, _>>()?;
                Node::Call { function, args }
            }
        })
    }

    /// Resolve field names to positions, following each field to the record
    /// type it holds (through options, pointers and collections).
    fn resolve_path(&self, path: &[PathStep]) -> Result<Vec<Step>, CompileError> {
        let mut owner = self.record.name.to_string();
        let mut current = Some(self.record.clone());
        let mut steps = Vec::with_capacity(path.len());
        for step in path {
            match step {
                PathStep::Index(index) => steps.push(Step::Index(*index)),
                PathStep::Field(name) => {
                    let unknown = || CompileError::UnknownField {
                        type_name: owner.clone(),
                        field: name.clone(),
                    };
                    let descriptor = current.as_ref().ok_or_else(unknown)?;
                    let index = descriptor.field_index(name).ok_or_else(unknown)?;
                    let next = (descriptor.fields[index].element)();
                    owner = match &next {
                        Some(next) => next.name.to_string(),
                        None => format!("{}.{}", owner, name),
                    };
                    current = next;
                    steps.push(Step::Field(index));
                }
            }
        }
        Ok(steps)
    }
}

fn targets_absence(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Literal::Nil) => true,
        Expr::Literal(_) | Expr::Current | Expr::Sibling(_) => false,
        Expr::Unary { expr, .. } => targets_absence(expr),
        Expr::Binary { left, right, .. }
        | Expr::Comparison { left, right, .. }
        | Expr::Boolean { left, right, .. } => targets_absence(left) || targets_absence(right),
        Expr::Call { args, .. } => args
            .iter()
            .any(|arg| mentions_current(arg) || targets_absence(arg)),
    }
}

fn mentions_current(expr: &Expr) -> bool {
    match expr {
        Expr::Current => true,
        Expr::Literal(_) | Expr::Sibling(_) => false,
        Expr::Unary { expr, .. } => mentions_current(expr),
        Expr::Binary { left, right, .. }
        | Expr::Comparison { left, right, .. }
        | Expr::Boolean { left, right, .. } => mentions_current(left) || mentions_current(right),
        Expr::Call { args, .. } => args.iter().any(mentions_current),
    }
}
