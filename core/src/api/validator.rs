//! The validation entry points.

use crate::api::{Error, FieldErrors, ValidatorOptions};
use crate::registry::{Function, Registry};
use crate::schema::SchemaCache;
use crate::values::{Datum, Inspect, Value};
use crate::walker::WalkContext;
use once_cell::sync::Lazy;
use tracing::{debug, trace};

/// Validates values against the annotations found under one tag name.
///
/// Each validator owns its function registry and its schema cache, so
/// validators with different tags or functions never interfere. A validator
/// is `Send + Sync` and meant to be shared.
#[derive(Debug)]
pub struct Validator {
    options: ValidatorOptions,
    registry: Registry,
    cache: SchemaCache,
}

impl Validator {
    /// A validator reading annotations under `tag_name`.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self::with_options(ValidatorOptions::default().with_tag_name(tag_name))
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            registry: Registry::with_builtins(),
            cache: SchemaCache::new(options.tag_name.clone()),
            options,
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add or replace a function. Types compiled before the call keep the
    /// function they were compiled with.
    pub fn register(&self, function: Function) {
        self.registry.register(function);
    }

    /// Register a predicate: `Err(message)` fails the rule with `message`.
    pub fn register_func<F>(&self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&[Datum<'_>]) -> Result<(), String> + Send + Sync + 'static,
    {
        self.registry.register_func(name, predicate);
    }

    /// Validate `value`.
    ///
    /// With `collect_all` false, stops at the first failing field; otherwise
    /// reports every failing field in visit order.
    pub fn validate<T: Inspect + ?Sized>(&self, value: &T, collect_all: bool) -> Result<(), Error> {
        self.validate_value(value.inspect(), collect_all)
    }

    /// Validate an already inspected value.
    pub fn validate_value(&self, value: Value<'_>, collect_all: bool) -> Result<(), Error> {
        if value.is_nil() {
            debug!("rejecting nil root value");
            return Err(Error::Unsupported);
        }
        if !value.is_composite() {
            trace!(kind = value.kind_name(), "scalar root value, nothing to check");
            return Ok(());
        }

        let mut ctx = WalkContext::new(&self.cache, &self.registry, collect_all);
        trace!(?value, collect_all, "walking");
        if ctx.walk(value)?.is_break() {
            trace!("stopped at the first failure");
        }

        let errors = ctx.into_errors();
        trace!(failures = errors.len(), "aggregating");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(FieldErrors::new(
                errors,
                self.options.separator.clone(),
            )))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_options(ValidatorOptions::default())
    }
}

static DEFAULT: Lazy<Validator> = Lazy::new(Validator::default);

/// The process-wide validator behind [`validate`] and [`register_func`],
/// reading the `vd` tag.
pub fn default_validator() -> &'static Validator {
    &DEFAULT
}

/// Validate `value` with the default validator.
pub fn validate<T: Inspect + ?Sized>(value: &T, collect_all: bool) -> Result<(), Error> {
    DEFAULT.validate(value, collect_all)
}

/// Register a predicate on the default validator.
pub fn register_func<F>(name: impl Into<String>, predicate: F)
where
    F: Fn(&[Datum<'_>]) -> Result<(), String> + Send + Sync + 'static,
{
    DEFAULT.register_func(name, predicate);
}
