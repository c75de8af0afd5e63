//! Golden Tests for Compiled Contexts
//!
//! Compiles small vocabularies and compares the output, key order included,
//! against the JSON fixtures.

use std::sync::Arc;

use ld_context::{
    CompileOptions, CompilerConfig, Context, ContextError, Entity, OutputFormat, RelationKind,
    Schema,
};
use serde_json::Value;

fn fixture(text: &str) -> String {
    // Re-render so the comparison ignores whitespace but not key order
    let value: Value = serde_json::from_str(text).unwrap();
    serde_json::to_string(&value).unwrap()
}

fn sage() -> Arc<Schema> {
    Arc::new(Schema::new("sage", "http://sage.org/").unwrap())
}

fn melanoma_context() -> Context {
    let melanoma = Entity::builder()
        .source_schema(sage())
        .name("Melanoma")
        .thing_type("Melanoma")
        .build()
        .unwrap();

    let mut context = Context::new("cancer").unwrap();
    context.set_vocab(Some("http://schema.org/".to_string()));
    let _ = context.add_schema(sage());
    let _ = context.add_entity(melanoma);
    context
}

// =============================================================================
// Output Shape
// =============================================================================

#[test]
fn test_melanoma_context_matches_fixture() {
    let compiled = melanoma_context().compile().unwrap();

    assert_eq!(
        compiled.to_json_string(OutputFormat::Compact).unwrap(),
        fixture(include_str!("fixtures/melanoma_context.json"))
    );
}

#[test]
fn test_neurofibromatosis_document_matches_fixture() {
    let cancer = Arc::new(Schema::new("sage.cancer", "http://sage.org/cancer/").unwrap());

    let nf = Arc::new(
        Entity::builder()
            .source_schema(sage())
            .name("Neurofibromatosis")
            .thing_type("schema:MedicalCondition")
            .build()
            .unwrap(),
    );
    let pnf = Entity::builder()
        .source_schema(sage())
        .name("PlexiformNeurofibromatosis")
        .thing_type("Neurofibromatosis")
        .relationship(RelationKind::IsSubclassOf, nf.clone())
        .build()
        .unwrap();
    let melanoma = Entity::new(cancer.clone(), "sage.cancer:Melanoma").unwrap();

    let context = Context::builder("neurofibromatosis")
        .schema(sage())
        .schema(cancer)
        .vocab("http://schema.org/")
        .entity(nf)
        .entity(pnf)
        .entity(melanoma)
        .build()
        .unwrap();

    let mut config = CompilerConfig::default();
    config.output.format = OutputFormat::Compact;
    config.output.wrap_document = true;

    let rendered = context.compile().unwrap().render(&config.output).unwrap();
    assert_eq!(
        rendered,
        fixture(include_str!("fixtures/neurofibromatosis_context.json"))
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_compile_is_idempotent() {
    let context = melanoma_context();
    let first = context.compile().unwrap();
    let second = context.compile().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.checksum(), second.checksum());
    assert_eq!(context.things().len(), 1);
}

#[test]
fn test_registration_order_drives_key_order() {
    let a = Arc::new(Entity::new(sage(), "Alpha").unwrap());
    let b = Arc::new(Entity::new(sage(), "Beta").unwrap());

    let mut ab = Context::new("ab").unwrap();
    let _ = ab.add_entity(a.clone());
    let _ = ab.add_entity(b.clone());

    let mut ba = Context::new("ba").unwrap();
    let _ = ba.add_entity(b);
    let _ = ba.add_entity(a);

    let ab = ab.compile().unwrap();
    let ba = ba.compile().unwrap();
    assert_eq!(ab.keys().collect::<Vec<_>>(), vec!["Alpha", "Beta"]);
    assert_eq!(ba.keys().collect::<Vec<_>>(), vec!["Beta", "Alpha"]);
    assert_ne!(ab.checksum(), ba.checksum());
}

#[test]
fn test_removed_entity_is_not_compiled() {
    let mut context = melanoma_context();
    let probe = Entity::new(sage(), "Melanoma").unwrap();
    assert!(!context.remove_entity(&probe).is_noop());

    let compiled = context.compile().unwrap();
    assert!(compiled.get("Melanoma").is_none());
    assert_eq!(compiled.keys().collect::<Vec<_>>(), vec!["sage", "@vocab"]);
}

// =============================================================================
// Registration Semantics
// =============================================================================

#[test]
fn test_duplicate_schema_keeps_first_iri() {
    let mut context = melanoma_context();
    let mirror = Schema::new("sage", "https://mirror.sage.org/").unwrap();
    assert!(context.add_schema(mirror).is_noop());

    let compiled = context.compile().unwrap();
    assert_eq!(compiled.get("sage"), Some(&Value::String("http://sage.org/".into())));
}

#[test]
fn test_entity_schema_need_not_be_registered() {
    let unregistered = Arc::new(Schema::new("mondo", "http://purl.obolibrary.org/obo/").unwrap());
    let mut context = Context::new("loose").unwrap();
    let _ = context.add_entity(Entity::new(unregistered, "Glioma").unwrap());

    let compiled = context
        .compile_with(&CompileOptions { null_vocab: true })
        .unwrap();
    assert_eq!(
        compiled.to_json_string(OutputFormat::Compact).unwrap(),
        r#"{"@vocab":null,"Glioma":{"@id":"mondo:Glioma"}}"#
    );
}

#[test]
fn test_shared_schema_is_not_copied() {
    let shared = sage();
    let mut first = Context::new("first").unwrap();
    let mut second = Context::new("second").unwrap();
    let _ = first.add_schema(shared.clone());
    let _ = second.add_schema(shared.clone());

    assert!(Arc::ptr_eq(first.schemas().get("sage").unwrap(), &shared));
    assert!(Arc::ptr_eq(second.schemas().get("sage").unwrap(), &shared));
}

#[test]
fn test_entity_without_schema_never_reaches_compile() {
    let err = Entity::builder().name("Orphan").build().unwrap_err();
    assert!(err.is_missing_field());
    assert!(matches!(
        err,
        ContextError::MissingField { component: "Entity", field: "source_schema" }
    ));
}
