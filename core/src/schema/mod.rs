//! Per-type cache of compiled annotations.
//!
//! The first time a record type is validated, the cache walks its declared
//! fields breadth-first and compiles every record type reachable from it, so
//! that recursive types terminate and nested types compile once. Each type
//! owns a compute-or-wait cell: concurrent first users block until the
//! schema (or the compile error) is ready and then share it.

use crate::compiler::{self, CompileError, CompiledRule};
use crate::registry::Registry;
use crate::values::{Record, TypeDescriptor};
use hashbrown::{HashMap, HashSet};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// The compiled rules of one record type, in declaration order.
#[derive(Debug)]
pub struct TypeSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug)]
pub struct FieldSchema {
    pub name: &'static str,
    /// Position of the field in its record.
    pub index: usize,
    pub rule: Option<CompiledRule>,
}

impl TypeSchema {
    /// Number of fields carrying a rule.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().filter(|field| field.rule.is_some()).count()
    }
}

type SchemaResult = Result<Arc<TypeSchema>, CompileError>;

struct Entry {
    descriptor: TypeDescriptor,
    schema: OnceCell<SchemaResult>,
    /// Set once every type reachable from this one has been compiled.
    closure: OnceCell<Result<(), CompileError>>,
}

/// Compiled schemas keyed by type, for one annotation tag.
pub struct SchemaCache {
    tag_name: String,
    entries: RwLock<HashMap<TypeId, Arc<Entry>>>,
}

impl SchemaCache {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Number of record types seen so far.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The schema of the record type described by `descriptor`, compiling it
    /// and every record type it reaches if this is the first use.
    pub fn schema_for(&self, descriptor: &TypeDescriptor, registry: &Registry) -> SchemaResult {
        let root = self.entry(descriptor);
        root.closure
            .get_or_init(|| self.compile_reachable(descriptor, registry))
            .clone()?;
        self.compile_type(&root, registry)
    }

    /// Schema lookup for a live record, skipping descriptor construction when
    /// the type is already compiled.
    pub fn schema_for_record(&self, record: &dyn Record, registry: &Registry) -> SchemaResult {
        let cached = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&record.type_key())
            .cloned();
        if let Some(entry) = cached {
            if let (Some(Ok(())), Some(schema)) = (entry.closure.get(), entry.schema.get()) {
                return schema.clone();
            }
        }
        self.schema_for(&record.descriptor(), registry)
    }

    fn entry(&self, descriptor: &TypeDescriptor) -> Arc<Entry> {
        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&descriptor.key)
        {
            return entry.clone();
        }
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(descriptor.key)
            .or_insert_with(|| {
                Arc::new(Entry {
                    descriptor: descriptor.clone(),
                    schema: OnceCell::new(),
                    closure: OnceCell::new(),
                })
            })
            .clone()
    }

    /// Compile one type without looking at the types it contains.
    fn compile_type(&self, entry: &Entry, registry: &Registry) -> SchemaResult {
        entry
            .schema
            .get_or_init(|| self.build(&entry.descriptor, registry).map(Arc::new))
            .clone()
    }

    fn build(&self, descriptor: &TypeDescriptor, registry: &Registry) -> Result<TypeSchema, CompileError> {
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        for (index, field) in descriptor.fields.iter().enumerate() {
            let rule = match field.tag(&self.tag_name) {
                Some(annotation) => Some(compiler::compile(annotation, descriptor, registry).inspect_err(
                    |err| {
                        warn!(
                            type_name = descriptor.name,
                            field = field.name,
                            annotation,
                            error = %err,
                            "annotation failed to compile"
                        )
                    },
                )?),
                None => None,
            };
            fields.push(FieldSchema {
                name: field.name,
                index,
                rule,
            });
        }
        let schema = TypeSchema {
            name: descriptor.name,
            fields,
        };
        debug!(
            type_name = schema.name,
            rules = schema.rule_count(),
            tag = %self.tag_name,
            "compiled type schema"
        );
        Ok(schema)
    }

    /// Breadth-first over the declared field types starting at `root`.
    fn compile_reachable(&self, root: &TypeDescriptor, registry: &Registry) -> Result<(), CompileError> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(root.key);
        queue.push_back(root.clone());
        while let Some(descriptor) = queue.pop_front() {
            let entry = self.entry(&descriptor);
            self.compile_type(&entry, registry)?;
            for field in &descriptor.fields {
                if let Some(nested) = (field.element)() {
                    if seen.insert(nested.key) {
                        queue.push_back(nested);
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCache")
            .field("tag_name", &self.tag_name)
            .field("types", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
