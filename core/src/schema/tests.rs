use super::*;
use crate::values::FieldDescriptor;

struct Leaf;
struct Branch;
struct Tree;
struct Broken;
struct Holder;

fn leaf() -> Option<TypeDescriptor> {
    Some(TypeDescriptor::new::<Leaf>(
        "Leaf",
        vec![FieldDescriptor::new("Weight", &[("vd", "$ > 0"), ("alt", "$ < 0")], || None)],
    ))
}

fn branch() -> TypeDescriptor {
    TypeDescriptor::new::<Branch>(
        "Branch",
        vec![
            FieldDescriptor::new("Name", &[("vd", "len($) > 0")], || None),
            FieldDescriptor::new("Leaves", &[], leaf),
            FieldDescriptor::new("Note", &[], || None),
        ],
    )
}

/// A self-referential type: every tree holds child trees.
fn tree() -> Option<TypeDescriptor> {
    Some(TypeDescriptor::new::<Tree>(
        "Tree",
        vec![
            FieldDescriptor::new("Value", &[("vd", "$ != 0")], || None),
            FieldDescriptor::new("Children", &[], tree),
        ],
    ))
}

fn broken() -> Option<TypeDescriptor> {
    Some(TypeDescriptor::new::<Broken>(
        "Broken",
        vec![FieldDescriptor::new("Code", &[("vd", "in($)")], || None)],
    ))
}

fn holder() -> TypeDescriptor {
    TypeDescriptor::new::<Holder>(
        "Holder",
        vec![FieldDescriptor::new("Inner", &[], broken)],
    )
}

#[test]
fn test_schema_in_declaration_order() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let schema = cache.schema_for(&branch(), &registry).unwrap();
    assert_eq!(schema.name, "Branch");
    let names: Vec<_> = schema.fields.iter().map(|f| (f.name, f.index, f.rule.is_some())).collect();
    assert_eq!(
        names,
        vec![("Name", 0, true), ("Leaves", 1, false), ("Note", 2, false)]
    );
    assert_eq!(schema.rule_count(), 1);
}

#[test]
fn test_schema_is_compiled_once() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let first = cache.schema_for(&branch(), &registry).unwrap();
    let second = cache.schema_for(&branch(), &registry).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_nested_types_are_compiled_with_the_root() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    assert!(cache.is_empty());
    cache.schema_for(&branch(), &registry).unwrap();
    assert_eq!(cache.len(), 2);

    let root_entry = cache.entry(&branch());
    assert!(root_entry.closure.get().is_some());
    let leaf_entry = cache.entry(&leaf().unwrap());
    assert!(leaf_entry.schema.get().is_some());
}

#[test]
fn test_recursive_types_terminate() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let schema = cache.schema_for(&tree().unwrap(), &registry).unwrap();
    assert_eq!(schema.rule_count(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_tag_name_selects_annotations() {
    let registry = Registry::with_builtins();
    let schema = SchemaCache::new("alt")
        .schema_for(&leaf().unwrap(), &registry)
        .unwrap();
    assert_eq!(schema.fields[0].rule.as_ref().map(|r| r.source()), Some("$ < 0"));

    let schema = SchemaCache::new("other")
        .schema_for(&leaf().unwrap(), &registry)
        .unwrap();
    assert_eq!(schema.rule_count(), 0);
}

#[test]
fn test_compile_errors_are_cached() {
    crate::test_utils::init_test_logging();
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let first = cache.schema_for(&broken().unwrap(), &registry).unwrap_err();
    let second = cache.schema_for(&broken().unwrap(), &registry).unwrap_err();
    assert_eq!(first, second);
    assert_eq!(
        first.to_string(),
        "input parameters of the in function are at least two"
    );
}

#[test]
fn test_nested_compile_error_surfaces_from_root() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let err = cache.schema_for(&holder(), &registry).unwrap_err();
    assert!(matches!(err, CompileError::TooFewArguments { .. }));
}

#[test]
fn test_concurrent_first_use_shares_one_schema() {
    let cache = SchemaCache::new("vd");
    let registry = Registry::with_builtins();
    let schemas: Vec<Arc<TypeSchema>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.schema_for(&branch(), &registry).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for schema in &schemas[1..] {
        assert!(Arc::ptr_eq(&schemas[0], schema));
    }
    assert_eq!(cache.len(), 2);
}
