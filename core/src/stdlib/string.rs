//! String functions: `len`, `mblen`, `regexp` and `sprintf`.
//!
//! `len` counts bytes like a byte-oriented length would; `mblen` counts
//! characters. Both also accept sequences, maps and nil.

use crate::evaluator::EvalError;
use crate::registry::Function;
use crate::values::Datum;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::RwLock;
use tracing::trace;

pub(super) fn functions() -> Vec<Function> {
    vec![
        Function::value("len", 1, Some(1), len),
        Function::value("mblen", 1, Some(1), mblen),
        Function::value("regexp", 2, Some(2), regexp),
        Function::value("sprintf", 1, None, sprintf),
    ]
}

fn count(n: usize) -> Datum<'static> {
    Datum::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn length_of<'a>(name: &str, value: &Datum<'a>, text_len: fn(&str) -> usize) -> Result<Datum<'a>, EvalError> {
    match value {
        Datum::Str(s) => Ok(count(text_len(s))),
        Datum::Seq(s) => Ok(count(s.len())),
        Datum::Map(m) => Ok(count(m.len())),
        Datum::Nil => Ok(Datum::Int(0)),
        other => Err(EvalError::function(
            name,
            format!("unsupported argument of type {}", other.type_name()),
        )),
    }
}

/// Byte length of a string, or element count of a collection.
fn len<'a>(args: &[Datum<'a>]) -> Result<Datum<'a>, EvalError> {
    length_of("len", &args[0], str::len)
}

/// Character length of a string, or element count of a collection.
fn mblen<'a>(args: &[Datum<'a>]) -> Result<Datum<'a>, EvalError> {
    length_of("mblen", &args[0], |s| s.chars().count())
}

/// Most patterns kept in [`PATTERNS`]. Patterns seen after the cache is full
/// are compiled on every use.
const PATTERN_CACHE_LIMIT: usize = 256;

static PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> = Lazy::new(|| RwLock::new(HashMap::new()));

fn compiled_pattern(pattern: &str) -> Result<Regex, EvalError> {
    if let Some(regex) = PATTERNS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(pattern)
    {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern).map_err(|err| EvalError::function("regexp", err.to_string()))?;
    let mut patterns = PATTERNS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if patterns.len() < PATTERN_CACHE_LIMIT {
        patterns.insert(pattern.to_string(), regex.clone());
    } else {
        trace!(pattern, "regexp pattern cache full");
    }
    Ok(regex)
}

/// `regexp(pattern, value)`: whether `value` is a string matching `pattern`.
fn regexp<'a>(args: &[Datum<'a>]) -> Result<Datum<'a>, EvalError> {
    let pattern = args[0]
        .as_str()
        .ok_or_else(|| EvalError::function("regexp", "the pattern must be a string"))?;
    let regex = compiled_pattern(pattern)?;
    Ok(Datum::Bool(
        args[1].as_str().is_some_and(|value| regex.is_match(value)),
    ))
}

/// `sprintf(format, args...)` with `%v`, `%s`, `%d`, `%f`, `%q` and `%%`.
fn sprintf<'a>(args: &[Datum<'a>]) -> Result<Datum<'a>, EvalError> {
    let format = args[0]
        .as_str()
        .ok_or_else(|| EvalError::function("sprintf", "the format must be a string"))?;
    let mut rest = args[1..].iter();
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        let Some(arg) = rest.next() else {
            let _ = write!(out, "%!{}(MISSING)", verb);
            continue;
        };
        let _ = match verb {
            'v' | 's' | 'd' => write!(out, "{}", arg),
            'f' => match arg.as_f64() {
                Some(x) => write!(out, "{:.6}", x),
                None => write!(out, "%!f({})", arg),
            },
            'q' => write!(out, "{:?}", arg.to_string()),
            other => write!(out, "%!{}({})", other, arg),
        };
    }
    Ok(Datum::Str(Cow::Owned(out)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_bytes() {
        assert_eq!(len(&[Datum::str("abc")]).unwrap(), Datum::Int(3));
        assert_eq!(len(&[Datum::str("中文")]).unwrap(), Datum::Int(6));
        assert_eq!(len(&[Datum::Nil]).unwrap(), Datum::Int(0));
        assert!(len(&[Datum::Int(3)]).is_err());
    }

    #[test]
    fn test_mblen_counts_characters() {
        assert_eq!(mblen(&[Datum::str("中文")]).unwrap(), Datum::Int(2));
        assert_eq!(mblen(&[Datum::str("")]).unwrap(), Datum::Int(0));
    }

    #[test]
    fn test_len_of_collections() {
        let items = vec![1, 2, 3];
        let datum = Datum::Seq(&items);
        assert_eq!(len(&[datum]).unwrap(), Datum::Int(3));
    }

    #[test]
    fn test_regexp() {
        assert_eq!(
            regexp(&[Datum::str(r"^\w+$"), Datum::str("abc_1")]).unwrap(),
            Datum::Bool(true)
        );
        assert_eq!(
            regexp(&[Datum::str(r"^\w+$"), Datum::str("a b")]).unwrap(),
            Datum::Bool(false)
        );
        assert_eq!(
            regexp(&[Datum::str(r"^\d+$"), Datum::Int(12)]).unwrap(),
            Datum::Bool(false)
        );
        assert!(regexp(&[Datum::str("("), Datum::str("x")]).is_err());
    }

    #[test]
    fn test_pattern_cache_is_bounded() {
        for n in 0..PATTERN_CACHE_LIMIT + 50 {
            let pattern = format!("^bounded-{}$", n);
            let subject = format!("bounded-{}", n);
            assert_eq!(
                regexp(&[Datum::str(pattern), Datum::str(subject)]).unwrap(),
                Datum::Bool(true)
            );
        }
        let cached = PATTERNS
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        assert!(cached <= PATTERN_CACHE_LIMIT);
    }

    #[test]
    fn test_sprintf() {
        let out = sprintf(&[Datum::str("%v is %d%% of %s"), Datum::str("x"), Datum::Int(50), Datum::Float(2.0)])
            .unwrap();
        assert_eq!(out, Datum::str("x is 50% of 2"));
        assert_eq!(
            sprintf(&[Datum::str("%q"), Datum::str("a")]).unwrap(),
            Datum::str("\"a\"")
        );
        assert_eq!(
            sprintf(&[Datum::str("%f"), Datum::Int(1)]).unwrap(),
            Datum::str("1.000000")
        );
        assert_eq!(
            sprintf(&[Datum::str("missing %v")]).unwrap(),
            Datum::str("missing %!v(MISSING)")
        );
    }
}
