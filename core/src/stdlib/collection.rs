//! Membership and range predicates.

use crate::registry::Function;
use crate::values::Datum;

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::predicate("in", 2, None, is_in),
        Function::predicate("range", 3, Some(3), in_range),
    ]
}

/// `in(subject, candidates...)`: the subject equals one of the candidates.
fn is_in(args: &[Datum<'_>]) -> Result<(), String> {
    let (subject, candidates) = match args.split_first() {
        Some(split) => split,
        None => return Err("[] range exceeded".to_string()),
    };
    if candidates.iter().any(|candidate| candidate == subject) {
        return Ok(());
    }
    let listed: Vec<String> = candidates.iter().map(ToString::to_string).collect();
    Err(format!("[{}] range exceeded", listed.join(" ")))
}

/// `range(subject, lo, hi)`: the subject is a number within `[lo, hi]`.
fn in_range(args: &[Datum<'_>]) -> Result<(), String> {
    let [subject, lo, hi] = args else {
        return Err("range expects a subject and two bounds".to_string());
    };
    let within = match (subject.as_f64(), lo.as_f64(), hi.as_f64()) {
        (Some(x), Some(lo), Some(hi)) => lo <= x && x <= hi,
        _ => false,
    };
    if within {
        Ok(())
    } else {
        Err(format!("[{}, {}] range exceeded", lo, hi))
    }
}
