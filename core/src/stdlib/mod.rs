//! Built-in functions available to every annotation.
//!
//! - String: `len`, `mblen`, `regexp`, `sprintf`
//! - Collection: `in`, `range`
//! - Format: `email`, `phone`
//!
//! Each group registers itself into a [`Registry`]; validators start from a
//! registry holding all of them and callers may add or replace functions.

use crate::registry::{Function, Registry};

pub mod collection;
pub mod format;
pub mod string;

/// Register every built-in function in `registry`.
pub fn register_builtins(registry: &Registry) {
    for function in builtins() {
        registry.register(function);
    }
}

fn builtins() -> Vec<Function> {
    let mut functions = Vec::new();
    functions.extend(string::functions());
    functions.extend(collection::functions());
    functions.extend(format::functions());
    functions
}
