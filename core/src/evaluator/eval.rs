use crate::compiler::{Node, Step};
use crate::evaluator::EvalError;
use crate::evaluator::operators::{eval_binary, eval_comparison, eval_unary};
use crate::parser::{BoolOp, Literal};
use crate::registry::FunctionImpl;
use crate::values::{Datum, Record, Value};
use std::borrow::Cow;

/// Bindings visible to an expression: `$` and the record holding the field.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub current: Value<'a>,
    pub record: &'a dyn Record,
}

impl<'a> Scope<'a> {
    pub fn new(current: Value<'a>, record: &'a dyn Record) -> Self {
        Self { current, record }
    }
}

/// Tree-walking evaluator for one rule.
///
/// Remembers the message of the last predicate that failed so the caller can
/// report it when the rule as a whole fails.
pub struct Evaluator<'a> {
    scope: Scope<'a>,
    failed_message: Option<String>,
}

impl<'a> Evaluator<'a> {
    pub fn new(scope: Scope<'a>) -> Self {
        Self {
            scope,
            failed_message: None,
        }
    }

    pub fn failed_message(&self) -> Option<&str> {
        self.failed_message.as_deref()
    }

    pub(super) fn take_failed_message(&mut self) -> Option<String> {
        self.failed_message.take()
    }

    /// Evaluate `node`.
    ///
    /// A predicate message recorded inside `node` survives only if `node`
    /// comes out falsy; otherwise the message from before is put back, so
    /// `!in(...)` or a satisfied `||` never leave a stale message behind.
    pub fn eval(&mut self, node: &'a Node) -> Result<Datum<'a>, EvalError> {
        let before = self.failed_message.take();
        let result = self.eval_node(node)?;
        if result.is_truthy() || self.failed_message.is_none() {
            self.failed_message = before;
        }
        Ok(result)
    }

    fn eval_node(&mut self, node: &'a Node) -> Result<Datum<'a>, EvalError> {
        match node {
            Node::Literal(literal) => Ok(match literal {
                Literal::Nil => Datum::Nil,
                Literal::Bool(b) => Datum::Bool(*b),
                Literal::Int(i) => Datum::Int(*i),
                Literal::Float(x) => Datum::Float(*x),
                Literal::Str(s) => Datum::Str(Cow::Borrowed(s.as_str())),
            }),

            Node::Current => Ok(Datum::from(self.scope.current)),

            Node::Sibling(steps) => Ok(Datum::from(self.select(steps))),

            Node::Unary { op, expr } => {
                let operand = self.eval(expr)?;
                eval_unary(*op, operand)
            }

            Node::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, left, right)
            }

            Node::Comparison { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(Datum::Bool(eval_comparison(*op, &left, &right)))
            }

            Node::Boolean { op, left, right } => {
                let left = self.eval(left)?.is_truthy();
                let result = match op {
                    BoolOp::And => left && self.eval(right)?.is_truthy(),
                    BoolOp::Or => left || self.eval(right)?.is_truthy(),
                };
                Ok(Datum::Bool(result))
            }

            Node::Call { function, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                match function.implementation() {
                    FunctionImpl::Predicate(predicate) => match predicate(&args) {
                        Ok(()) => Ok(Datum::Bool(true)),
                        Err(message) => {
                            self.failed_message = Some(message);
                            Ok(Datum::Bool(false))
                        }
                    },
                    FunctionImpl::Value(f) => f(&args),
                }
            }
        }
    }

    /// Follow a resolved sibling path from the enclosing record. Anything
    /// missing along the way (an absent field, an index past the end)
    /// selects nil.
    fn select(&self, steps: &[Step]) -> Value<'a> {
        let mut value = Value::Record(self.scope.record);
        for step in steps {
            value = match (*step, value) {
                (Step::Field(index), Value::Record(record)) => record.field(index),
                (Step::Index(index), Value::Seq(seq)) if index < seq.len() => seq.get(index),
                _ => Value::Nil,
            };
        }
        value
    }
}
