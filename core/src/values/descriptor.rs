//! Static shape of record types.

use core::any::TypeId;
use core::fmt;

/// Declared shape of one record type: its name and ordered fields.
#[derive(Clone)]
pub struct TypeDescriptor {
    pub key: TypeId,
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new<T: 'static>(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            key: TypeId::of::<T>(),
            name,
            fields,
        }
    }

    /// Position of the field called `name`, if declared.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// One declared field: its path name, its annotations keyed by tag name, and
/// a link to the record type it (eventually) holds.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub tags: &'static [(&'static str, &'static str)],
    pub element: fn() -> Option<TypeDescriptor>,
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        tags: &'static [(&'static str, &'static str)],
        element: fn() -> Option<TypeDescriptor>,
    ) -> Self {
        Self {
            name,
            tags,
            element,
        }
    }

    /// The annotation stored under `tag_name`. The first one wins if the tag
    /// is repeated.
    pub fn tag(&self, tag_name: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == tag_name)
            .map(|(_, annotation)| *annotation)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}
