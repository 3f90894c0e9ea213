//! Procedural macros for fieldcheck
//!
//! This crate provides `#[derive(Inspect)]`, which makes a struct visible to
//! the validator: it implements `Inspect` and `Record` for the struct and
//! records each field's annotations in its type descriptor.

extern crate proc_macro;

use proc_macro::TokenStream;

mod derive;

/// Derive `Inspect` and `Record` for a struct.
///
/// # Example
///
/// ```ignore
/// #[derive(Inspect)]
/// struct Account {
///     #[tag(vd = "email($)")]
///     email: String,
///     #[tag(vd = "@:$ >= 18;msg:'too young'", alt = "$ > 0")]
///     age: u32,
///     #[inspect(rename = "Tags")]
///     labels: Vec<String>,
///     #[inspect(skip)]
///     cache: NotInspectable,
/// }
/// ```
///
/// # Field attributes
///
/// - `#[tag(name = "annotation", ...)]`: annotations keyed by tag name. A
///   validator reads the annotation under its own tag name (`vd` by default).
/// - `#[inspect(rename = "Name")]`: the name used in error paths and
///   sibling selectors. Defaults to the field name (`0`, `1`, ... for tuple
///   structs).
/// - `#[inspect(skip)]`: hide the field. Its type need not implement
///   `Inspect`.
///
/// Every type parameter gets an `Inspect + 'static` bound. Enums, unions
/// and structs with lifetime parameters are rejected.
///
/// The generated code refers to `::fieldcheck_core`, which must be a
/// dependency of the crate using the derive.
#[proc_macro_derive(Inspect, attributes(tag, inspect))]
pub fn derive_inspect(item: TokenStream) -> TokenStream {
    derive::derive_inspect_impl(item)
}
