//! Traversal of host values against their compiled schemas.
//!
//! The walker visits records field by field in declaration order, checks
//! each field's rule, then descends into the field's value. Sequences add an
//! `[index]` segment to the path, maps a `{}` segment. Absent values are
//! never descended into, and a rule on an absent field only runs when it
//! tests for absence (see [`CompiledRule::tests_absence`]).
//!
//! [`CompiledRule::tests_absence`]: crate::compiler::CompiledRule::tests_absence
//!
//! Termination on cyclic data comes from the [`CycleGuard`]: a composite
//! value already on the current descent path is skipped.

mod path;


pub use path::{FieldPath, Segment};

use crate::api::FieldError;
use crate::compiler::CompileError;
use crate::evaluator::{self, Scope, Verdict};
use crate::registry::Registry;
use crate::schema::{FieldSchema, SchemaCache};
use crate::values::{Identity, Mapping, Record, Sequence, Value};
use hashbrown::HashSet;
use std::ops::ControlFlow;
use tracing::trace;

/// Identities of the composite values on the active descent path.
#[derive(Debug, Default)]
pub struct CycleGuard {
    on_path: HashSet<Identity>,
}

impl CycleGuard {
    /// Mark `identity` as on the path. Returns `false` if it already was.
    pub fn enter(&mut self, identity: Identity) -> bool {
        self.on_path.insert(identity)
    }

    pub fn leave(&mut self, identity: Identity) {
        self.on_path.remove(&identity);
    }

    pub fn depth(&self) -> usize {
        self.on_path.len()
    }
}

/// Whether the walk should go on after a visit.
pub type Flow = ControlFlow<()>;

/// State of one validation call.
pub struct WalkContext<'c> {
    cache: &'c SchemaCache,
    registry: &'c Registry,
    collect_all: bool,
    path: FieldPath,
    guard: CycleGuard,
    errors: Vec<FieldError>,
}

impl<'c> WalkContext<'c> {
    pub fn new(cache: &'c SchemaCache, registry: &'c Registry, collect_all: bool) -> Self {
        Self {
            cache,
            registry,
            collect_all,
            path: FieldPath::default(),
            guard: CycleGuard::default(),
            errors: Vec::new(),
        }
    }

    /// Failures collected so far, in visit order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Visit `value` and everything below it. Stops early with
    /// `ControlFlow::Break` on the first failure unless collecting all.
    pub fn walk(&mut self, value: Value<'_>) -> Result<Flow, CompileError> {
        match value {
            Value::Record(record) => self.guarded(value, |ctx| ctx.walk_record(record)),
            Value::Seq(seq) => self.guarded(value, |ctx| ctx.walk_sequence(seq)),
            Value::Map(map) => self.guarded(value, |ctx| ctx.walk_map(map)),
            _ => Ok(Flow::Continue(())),
        }
    }

    fn guarded(
        &mut self,
        value: Value<'_>,
        visit: impl FnOnce(&mut Self) -> Result<Flow, CompileError>,
    ) -> Result<Flow, CompileError> {
        let Some(identity) = value.identity() else {
            return visit(self);
        };
        if !self.guard.enter(identity) {
            trace!(path = %self.path, kind = value.kind_name(), "skipping value already on the path");
            return Ok(Flow::Continue(()));
        }
        let flow = visit(self);
        self.guard.leave(identity);
        flow
    }

    fn walk_record(&mut self, record: &dyn Record) -> Result<Flow, CompileError> {
        let schema = self.cache.schema_for_record(record, self.registry)?;
        trace!(type_name = schema.name, depth = self.guard.depth(), "walking record");
        for field in &schema.fields {
            self.path.push(Segment::Field(field.name));
            let flow = self.visit_field(record, field);
            self.path.pop();
            if flow?.is_break() {
                return Ok(Flow::Break(()));
            }
        }
        Ok(Flow::Continue(()))
    }

    fn visit_field(&mut self, record: &dyn Record, field: &FieldSchema) -> Result<Flow, CompileError> {
        let value = record.field(field.index);
        if let Some(rule) = &field.rule {
            if !value.is_nil() || rule.tests_absence() {
                if let Verdict::Fail { message } = evaluator::check(rule, Scope::new(value, record)) {
                    trace!(path = %self.path, rule = rule.source(), "rule failed");
                    self.errors.push(FieldError::new(self.path.to_string(), message));
                    if !self.collect_all {
                        return Ok(Flow::Break(()));
                    }
                }
            } else {
                trace!(path = %self.path, rule = rule.source(), "skipping rule on absent field");
            }
        }
        self.walk(value)
    }

    fn walk_sequence(&mut self, seq: &dyn Sequence) -> Result<Flow, CompileError> {
        for index in 0..seq.len() {
            let item = seq.get(index);
            if !item.is_composite() {
                continue;
            }
            self.path.push(Segment::Index(index));
            let flow = self.walk(item);
            self.path.pop();
            if flow?.is_break() {
                return Ok(Flow::Break(()));
            }
        }
        Ok(Flow::Continue(()))
    }

    fn walk_map(&mut self, map: &dyn Mapping) -> Result<Flow, CompileError> {
        for item in map.values() {
            if !item.is_composite() {
                continue;
            }
            self.path.push(Segment::MapValue);
            let flow = self.walk(item);
            self.path.pop();
            if flow?.is_break() {
                return Ok(Flow::Break(()));
            }
        }
        Ok(Flow::Continue(()))
    }
}
