//! Entities defined by a schema
//!
//! An entity is a named concept (e.g. `Melanoma`) that originates from one
//! [`Schema`]. It may carry a type tag and typed relationships to other
//! entities. The context compiler turns each entity into a term definition
//! using the two generators on this type.
//!
//! ## Compact names
//!
//! A name or type that already contains a `:` (e.g. `sage.cancer:Melanoma`)
//! is treated as a compact IRI and used as-is, so generators never produce
//! `sage:sage.cancer:Melanoma`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, Result};
use crate::members::Member;
use crate::schema::Schema;

/// Kind of relationship between two entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationKind {
    IsSubclassOf,
    IsRelatedTo,
    AdditionalType,
    /// Any relation not known to the compiler, kept verbatim
    Other(String),
}

impl RelationKind {
    pub fn as_str(&self) -> &str {
        match self {
            RelationKind::IsSubclassOf => "isSubclassOf",
            RelationKind::IsRelatedTo => "isRelatedTo",
            RelationKind::AdditionalType => "additionalType",
            RelationKind::Other(name) => name,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(RelationKind::from(s.to_string()))
    }
}

impl From<String> for RelationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "isSubclassOf" => RelationKind::IsSubclassOf,
            "isRelatedTo" => RelationKind::IsRelatedTo,
            "additionalType" => RelationKind::AdditionalType,
            _ => RelationKind::Other(s),
        }
    }
}

impl From<RelationKind> for String {
    fn from(kind: RelationKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Relationships of one entity, grouped by kind in insertion order
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<(RelationKind, Vec<Arc<Entity>>)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relate to `entity` under `kind`. Repeating an entity under the same
    /// kind is ignored.
    pub fn add(&mut self, kind: RelationKind, entity: impl Into<Arc<Entity>>) {
        let entity = entity.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, related)) => {
                if !related.iter().any(|e| **e == *entity) {
                    related.push(entity);
                }
            }
            None => self.entries.push((kind, vec![entity])),
        }
    }

    pub fn get(&self, kind: &RelationKind) -> &[Arc<Entity>] {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, related)| related.as_slice())
            .unwrap_or(&[])
    }

    pub fn kinds(&self) -> impl Iterator<Item = &RelationKind> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelationKind, &[Arc<Entity>])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named concept originating from a schema
///
/// Equality and hashing use the name only: two entities with the same name
/// from different schemas are the same term in a compiled context.
#[derive(Debug, Clone)]
pub struct Entity {
    source_schema: Arc<Schema>,
    name: String,
    thing_type: Option<String>,
    relationships: Relationships,
}

impl Entity {
    /// Create an untyped entity without relationships
    pub fn new(source_schema: impl Into<Arc<Schema>>, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            source_schema: source_schema.into(),
            name: local_name(name.into())?,
            thing_type: None,
            relationships: Relationships::new(),
        })
    }

    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    pub fn source_schema(&self) -> &Arc<Schema> {
        &self.source_schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thing_type(&self) -> Option<&str> {
        self.thing_type.as_deref()
    }

    /// Relationships, or `None` when the entity has none
    pub fn relationships(&self) -> Option<&Relationships> {
        if self.relationships.is_empty() {
            None
        } else {
            Some(&self.relationships)
        }
    }

    /// Entities related under `kind`
    pub fn related(&self, kind: &RelationKind) -> &[Arc<Entity>] {
        self.relationships.get(kind)
    }

    pub fn set_source_schema(
        &mut self,
        source_schema: Option<Arc<Schema>>,
    ) -> Result<&Arc<Schema>> {
        self.source_schema =
            source_schema.ok_or(ContextError::missing("Entity", "source_schema"))?;
        Ok(&self.source_schema)
    }

    /// Replace the name. An empty or `@` name is rejected and the old one kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&str> {
        self.name = local_name(name.into())?;
        Ok(&self.name)
    }

    /// Set or clear the type tag. An empty tag clears it.
    pub fn set_thing_type(&mut self, thing_type: Option<String>) -> Option<&str> {
        self.thing_type = thing_type.filter(|t| !t.is_empty());
        self.thing_type.as_deref()
    }

    pub fn set_relationships(&mut self, relationships: Relationships) -> Option<&Relationships> {
        self.relationships = relationships;
        self.relationships()
    }

    pub fn add_relationship(&mut self, kind: RelationKind, entity: impl Into<Arc<Entity>>) {
        self.relationships.add(kind, entity);
    }

    /// JSON-LD `@id` for this entity: `<schema>:<name>`
    pub fn generate_identifier(&self) -> Result<String> {
        if self.name.is_empty() {
            return Err(ContextError::missing("Entity", "name"));
        }
        let prefix = self.schema_prefix()?;
        Ok(qualify(prefix, &self.name))
    }

    /// JSON-LD `@type` for this entity: `<schema>:<thing_type>`, or `None`
    /// when the entity is untyped
    pub fn generate_qualified_type(&self) -> Result<Option<String>> {
        let Some(thing_type) = self.thing_type.as_deref() else {
            return Ok(None);
        };
        let prefix = self.schema_prefix()?;
        Ok(Some(qualify(prefix, thing_type)))
    }

    fn schema_prefix(&self) -> Result<&str> {
        let prefix = self.source_schema.name();
        if prefix.is_empty() {
            return Err(ContextError::missing("Entity", "source_schema"));
        }
        Ok(prefix)
    }
}

fn qualify(prefix: &str, term: &str) -> String {
    if term.contains(':') {
        term.to_string()
    } else {
        format!("{}:{}", prefix, term)
    }
}

/// Entity names become context keys, so `@` keywords are off limits
fn local_name(name: String) -> Result<String> {
    let name = required(name, "name")?;
    if name.starts_with('@') {
        return Err(ContextError::ReservedName { name });
    }
    Ok(name)
}

fn required(value: String, field: &'static str) -> Result<String> {
    if value.is_empty() {
        return Err(ContextError::missing("Entity", field));
    }
    Ok(value)
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Member for Entity {
    const KIND: &'static str = "entity";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Builder for entities with optional fields
#[derive(Debug, Default)]
pub struct EntityBuilder {
    source_schema: Option<Arc<Schema>>,
    name: Option<String>,
    thing_type: Option<String>,
    relationships: Relationships,
}

impl EntityBuilder {
    pub fn source_schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.source_schema = Some(schema.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn thing_type(mut self, thing_type: impl Into<String>) -> Self {
        self.thing_type = Some(thing_type.into());
        self
    }

    pub fn relationship(mut self, kind: RelationKind, entity: impl Into<Arc<Entity>>) -> Self {
        self.relationships.add(kind, entity);
        self
    }

    /// Fails with `MissingField` when the schema or name was not given
    pub fn build(self) -> Result<Entity> {
        let source_schema = self
            .source_schema
            .ok_or(ContextError::missing("Entity", "source_schema"))?;
        let name = local_name(self.name.unwrap_or_default())?;

        let mut entity = Entity::new(source_schema, name)?;
        entity.set_thing_type(self.thing_type);
        entity.relationships = self.relationships;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sage() -> Arc<Schema> {
        Arc::new(Schema::new("sage", "http://sage.org/").unwrap())
    }

    #[test]
    fn test_generate_identifier() {
        let melanoma = Entity::new(sage(), "Melanoma").unwrap();
        assert_eq!(melanoma.generate_identifier().unwrap(), "sage:Melanoma");
    }

    #[test]
    fn test_compact_name_is_not_prefixed_twice() {
        let melanoma = Entity::new(sage(), "sage.cancer:Melanoma").unwrap();
        assert_eq!(melanoma.generate_identifier().unwrap(), "sage.cancer:Melanoma");
    }

    #[test]
    fn test_qualified_type_uses_thing_type() {
        let mut melanoma = Entity::new(sage(), "Melanoma").unwrap();
        assert_eq!(melanoma.generate_qualified_type().unwrap(), None);

        melanoma.set_thing_type(Some("Disease".to_string()));
        assert_eq!(
            melanoma.generate_qualified_type().unwrap().as_deref(),
            Some("sage:Disease")
        );

        melanoma.set_thing_type(Some("schema:MedicalCondition".to_string()));
        assert_eq!(
            melanoma.generate_qualified_type().unwrap().as_deref(),
            Some("schema:MedicalCondition")
        );

        melanoma.set_thing_type(Some(String::new()));
        assert_eq!(melanoma.thing_type(), None);
    }

    #[test]
    fn test_builder_requires_schema_and_name() {
        let err = Entity::builder().name("Melanoma").build().unwrap_err();
        assert!(matches!(
            err,
            ContextError::MissingField { field: "source_schema", .. }
        ));

        let err = Entity::builder().source_schema(sage()).build().unwrap_err();
        assert!(matches!(err, ContextError::MissingField { field: "name", .. }));

        assert!(Entity::new(sage(), "").is_err());
    }

    #[test]
    fn test_keyword_names_are_rejected() {
        let err = Entity::new(sage(), "@vocab").unwrap_err();
        assert!(matches!(err, ContextError::ReservedName { ref name } if name == "@vocab"));

        let err = Entity::builder()
            .source_schema(sage())
            .name("@id")
            .build()
            .unwrap_err();
        assert!(matches!(err, ContextError::ReservedName { .. }));

        let mut entity = Entity::new(sage(), "Melanoma").unwrap();
        assert!(entity.set_name("@type").is_err());
        assert_eq!(entity.name(), "Melanoma");
    }

    #[test]
    fn test_setters_reject_missing_values() {
        let mut entity = Entity::new(sage(), "Melanoma").unwrap();

        assert!(entity.set_source_schema(None).is_err());
        assert_eq!(entity.source_schema().name(), "sage");

        assert!(entity.set_name("").is_err());
        assert_eq!(entity.name(), "Melanoma");

        let schema = Arc::new(Schema::new("schema", "http://schema.org/").unwrap());
        entity.set_source_schema(Some(schema)).unwrap();
        assert_eq!(entity.generate_identifier().unwrap(), "schema:Melanoma");
    }

    #[test]
    fn test_equality_by_name_only() {
        let other = Arc::new(Schema::new("other", "http://other.org/").unwrap());
        let a = Entity::new(sage(), "Melanoma").unwrap();
        let b = Entity::builder()
            .source_schema(other)
            .name("Melanoma")
            .thing_type("Disease")
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_relationships() {
        let nf = Arc::new(Entity::new(sage(), "Neurofibromatosis").unwrap());
        let cnf = Arc::new(Entity::new(sage(), "CutaneousNeurofibromatosis").unwrap());

        let pnf = Entity::builder()
            .source_schema(sage())
            .name("PlexiformNeurofibromatosis")
            .relationship(RelationKind::IsSubclassOf, nf.clone())
            .relationship(RelationKind::IsRelatedTo, cnf)
            .relationship(RelationKind::IsSubclassOf, nf)
            .build()
            .unwrap();

        let parents = pnf.related(&RelationKind::IsSubclassOf);
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].name(), "Neurofibromatosis");

        let kinds: Vec<_> = pnf.relationships().unwrap().kinds().map(|k| k.as_str()).collect();
        assert_eq!(kinds, vec!["isSubclassOf", "isRelatedTo"]);
        assert!(pnf.related(&RelationKind::AdditionalType).is_empty());

        let plain = Entity::new(sage(), "Melanoma").unwrap();
        assert!(plain.relationships().is_none());
    }

    #[test]
    fn test_relation_kind_strings() {
        assert_eq!("isRelatedTo".parse::<RelationKind>().unwrap(), RelationKind::IsRelatedTo);
        assert_eq!(
            "hasPart".parse::<RelationKind>().unwrap(),
            RelationKind::Other("hasPart".to_string())
        );
        let json = serde_json::to_string(&RelationKind::AdditionalType).unwrap();
        assert_eq!(json, r#""additionalType""#);
    }
}
