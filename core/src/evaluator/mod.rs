//! Tree-walking evaluator for compiled rules.
//!
//! ## Design Principles
//!
//! - **Never panic**: operator misuse and failing functions surface as
//!   [`EvalError`], which fails the rule instead of aborting validation
//! - **Short-circuit**: `&&` and `||` skip their right operand when the left
//!   one decides the result
//! - **Predicate messages**: a failing predicate leaves its message behind;
//!   the most recent one becomes the rule's message

mod error;
mod eval;
mod operators;


pub use error::EvalError;
pub use eval::{Evaluator, Scope};

use crate::compiler::CompiledRule;
use tracing::debug;

/// Result of checking one rule against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    /// The rule failed. `message` is the custom or predicate message; `None`
    /// asks the caller for its default text.
    Fail { message: Option<String> },
}

/// Evaluate `rule` in `scope`.
///
/// The rule passes when its expression evaluates to a truthy value. On
/// failure a custom `msg` expression takes precedence over the message of
/// the last failed predicate.
pub fn check<'a>(rule: &'a CompiledRule, scope: Scope<'a>) -> Verdict {
    let mut evaluator = Evaluator::new(scope);
    let passed = match evaluator.eval(&rule.expr) {
        Ok(result) => result.is_truthy(),
        Err(err) => {
            debug!(rule = rule.source(), error = %err, "rule evaluation failed");
            evaluator.take_failed_message();
            false
        }
    };
    if passed {
        return Verdict::Pass;
    }

    let predicate_message = evaluator.take_failed_message();
    let message = match &rule.message {
        Some(node) => match Evaluator::new(scope).eval(node) {
            Ok(message) => Some(message.to_string()),
            Err(err) => {
                debug!(rule = rule.source(), error = %err, "message evaluation failed");
                predicate_message
            }
        },
        None => predicate_message,
    };
    Verdict::Fail { message }
}
