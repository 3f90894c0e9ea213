//! Named functions callable from annotations.
//!
//! The compiler resolves every call against a [`Registry`] once, storing the
//! returned `Arc<Function>` in the compiled rule. Evaluation never goes back
//! to the registry, so late registrations only affect types compiled later.

use crate::compiler::CompileError;
use crate::evaluator::EvalError;
use crate::values::Datum;
use hashbrown::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Predicate implementation: `Err(message)` fails the rule with `message`.
pub type PredicateFn = dyn Fn(&[Datum<'_>]) -> Result<(), String> + Send + Sync;

/// Value implementation: produces a datum consumed by the surrounding expression.
pub type ValueFn = dyn for<'a> Fn(&[Datum<'a>]) -> Result<Datum<'a>, EvalError> + Send + Sync;

#[derive(Clone)]
pub enum FunctionImpl {
    Predicate(Arc<PredicateFn>),
    Value(Arc<ValueFn>),
}

/// A registered function with its declared arity.
#[derive(Clone)]
pub struct Function {
    name: String,
    min_args: usize,
    max_args: Option<usize>,
    imp: FunctionImpl,
}

impl Function {
    pub fn predicate<F>(name: impl Into<String>, min_args: usize, max_args: Option<usize>, f: F) -> Self
    where
        F: Fn(&[Datum<'_>]) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            min_args,
            max_args,
            imp: FunctionImpl::Predicate(Arc::new(f)),
        }
    }

    pub fn value<F>(name: impl Into<String>, min_args: usize, max_args: Option<usize>, f: F) -> Self
    where
        F: for<'a> Fn(&[Datum<'a>]) -> Result<Datum<'a>, EvalError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            min_args,
            max_args,
            imp: FunctionImpl::Value(Arc::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    pub fn max_args(&self) -> Option<usize> {
        self.max_args
    }

    pub fn implementation(&self) -> &FunctionImpl {
        &self.imp
    }

    /// Reject calls whose argument count falls outside the declared bounds.
    pub fn check_arity(&self, given: usize) -> Result<(), CompileError> {
        if given < self.min_args {
            return Err(CompileError::TooFewArguments {
                function: self.name.clone(),
                min: self.min_args,
            });
        }
        match self.max_args {
            Some(max) if given > max => Err(CompileError::TooManyArguments {
                function: self.name.clone(),
                max,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.imp {
            FunctionImpl::Predicate(_) => "predicate",
            FunctionImpl::Value(_) => "value",
        };
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .finish()
    }
}

/// Name to function table, read by the compiler.
pub struct Registry {
    functions: RwLock<HashMap<String, Arc<Function>>>,
}

impl Registry {
    /// An empty registry, without the built-in functions.
    pub fn empty() -> Self {
        Self {
            functions: RwLock::new(HashMap::new()),
        }
    }

    /// A registry preloaded with the standard functions.
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        crate::stdlib::register_builtins(&registry);
        registry
    }

    /// Add or replace a function.
    pub fn register(&self, function: Function) {
        let mut functions = self
            .functions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if functions.contains_key(function.name()) {
            debug!(name = function.name(), "replacing registered function");
        }
        functions.insert(function.name().to_string(), Arc::new(function));
    }

    /// Register a predicate taking any number of arguments.
    pub fn register_func<F>(&self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&[Datum<'_>]) -> Result<(), String> + Send + Sync + 'static,
    {
        self.register(Function::predicate(name, 0, None, predicate));
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Function>> {
        self.functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .functions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("functions", &self.names())
            .finish()
    }
}
