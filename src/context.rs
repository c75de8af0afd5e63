//! JSON-LD context aggregate and compiler
//!
//! A [`Context`] collects schemas and entities and compiles them into the
//! term map of a JSON-LD context:
//!
//! ```text
//! {
//!   "sage": "http://sage.org/",                  <- one entry per schema
//!   "@vocab": "http://schema.org/",              <- when a vocab is set
//!   "Melanoma": {                                <- one entry per entity
//!     "@id": "sage:Melanoma",
//!     "@type": "sage:Disease"                    <- only for typed entities
//!   }
//! }
//! ```
//!
//! Registration is idempotent: adding a member whose name is already
//! registered, or removing one that is not, reports [`Update::NoOp`] and
//! leaves the context untouched. Whether an entity's schema is registered
//! in the same context is not checked.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::compiled::CompiledContext;
use crate::config::CompilerConfig;
use crate::entity::Entity;
use crate::error::{ContextError, Result};
use crate::members::{Member, MemberSet};
use crate::schema::Schema;

/// Outcome of an add or remove
#[must_use]
pub enum Update<'a, T> {
    /// The member set changed; holds the updated set
    Changed(&'a MemberSet<T>),
    /// The member was already present (add) or absent (remove)
    NoOp,
}

impl<'a, T> Update<'a, T> {
    pub fn is_noop(&self) -> bool {
        matches!(self, Update::NoOp)
    }

    pub fn changed(self) -> Option<&'a MemberSet<T>> {
        match self {
            Update::Changed(set) => Some(set),
            Update::NoOp => None,
        }
    }
}

impl<T> fmt::Debug for Update<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Changed(_) => f.write_str("Changed"),
            Update::NoOp => f.write_str("NoOp"),
        }
    }
}

/// Options that change the shape of compiled output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit `"@vocab": null` when no vocab is set instead of omitting it
    pub null_vocab: bool,
}

/// An aggregate of schemas and entities
#[derive(Debug, Clone)]
pub struct Context {
    /// Bookkeeping name of this context
    name: String,
    schemas: MemberSet<Schema>,
    things: MemberSet<Entity>,
    /// Default vocabulary IRI
    vocab: Option<String>,
}

impl Context {
    /// Create an empty context
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required(name.into())?,
            schemas: MemberSet::new(),
            things: MemberSet::new(),
            vocab: None,
        })
    }

    pub fn builder(name: impl Into<String>) -> ContextBuilder {
        ContextBuilder {
            name: name.into(),
            schemas: Vec::new(),
            things: Vec::new(),
            vocab: None,
        }
    }

    /// Create an empty context using the configured default vocab
    pub fn from_config(name: impl Into<String>, config: &CompilerConfig) -> Result<Self> {
        let mut context = Self::new(name)?;
        context.set_vocab(config.context.default_vocab.clone());
        Ok(context)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&str> {
        self.name = required(name.into())?;
        Ok(&self.name)
    }

    pub fn vocab(&self) -> Option<&str> {
        self.vocab.as_deref()
    }

    /// Set or clear the default vocab. An empty IRI clears it.
    pub fn set_vocab(&mut self, vocab: Option<String>) -> Option<&str> {
        self.vocab = vocab.filter(|v| !v.is_empty());
        self.vocab.as_deref()
    }

    pub fn schemas(&self) -> &MemberSet<Schema> {
        &self.schemas
    }

    pub fn things(&self) -> &MemberSet<Entity> {
        &self.things
    }

    /// Register a schema unless one with the same name is present
    pub fn add_schema(&mut self, schema: impl Into<Arc<Schema>>) -> Update<'_, Schema> {
        add(&self.name, &mut self.schemas, schema.into())
    }

    /// Unregister the schema with the same name as `schema`
    pub fn remove_schema(&mut self, schema: &Schema) -> Update<'_, Schema> {
        remove(&self.name, &mut self.schemas, schema)
    }

    /// Register an entity unless one with the same name is present
    pub fn add_entity(&mut self, entity: impl Into<Arc<Entity>>) -> Update<'_, Entity> {
        add(&self.name, &mut self.things, entity.into())
    }

    /// Unregister the entity with the same name as `entity`
    pub fn remove_entity(&mut self, entity: &Entity) -> Update<'_, Entity> {
        remove(&self.name, &mut self.things, entity)
    }

    /// Replace all schemas. Fails without changing anything if two of the
    /// given schemas share a name.
    pub fn set_schemas<I>(&mut self, schemas: I) -> Result<&MemberSet<Schema>>
    where
        I: IntoIterator<Item = Arc<Schema>>,
    {
        self.schemas = MemberSet::try_from_members(schemas)?;
        debug!(context = %self.name, count = self.schemas.len(), "replaced schemas");
        Ok(&self.schemas)
    }

    /// Replace all entities. Fails without changing anything if two of the
    /// given entities share a name.
    pub fn set_entities<I>(&mut self, things: I) -> Result<&MemberSet<Entity>>
    where
        I: IntoIterator<Item = Arc<Entity>>,
    {
        self.things = MemberSet::try_from_members(things)?;
        debug!(context = %self.name, count = self.things.len(), "replaced entities");
        Ok(&self.things)
    }

    /// Compile into a JSON-LD context term map
    pub fn compile(&self) -> Result<CompiledContext> {
        self.compile_with(&CompileOptions::default())
    }

    pub fn compile_with(&self, options: &CompileOptions) -> Result<CompiledContext> {
        let mut terms = Map::new();

        for schema in &self.schemas {
            terms.insert(schema.name().to_string(), Value::String(schema.iri().to_string()));
        }

        match &self.vocab {
            Some(vocab) => {
                terms.insert("@vocab".to_string(), Value::String(vocab.clone()));
            }
            None if options.null_vocab => {
                terms.insert("@vocab".to_string(), Value::Null);
            }
            None => {}
        }

        for thing in &self.things {
            let definition = self
                .term_definition(thing)
                .map_err(|e| ContextError::InvalidMember {
                    kind: Entity::KIND,
                    name: thing.name().to_string(),
                    source: Box::new(e),
                })?;
            terms.insert(thing.name().to_string(), definition);
        }

        let compiled = CompiledContext::new(terms);
        debug!(
            context = %self.name,
            schemas = self.schemas.len(),
            entities = self.things.len(),
            checksum = %compiled.checksum(),
            "compiled context"
        );
        Ok(compiled)
    }

    /// Term definition for one entity. An entity may not shadow a
    /// registered schema prefix.
    fn term_definition(&self, thing: &Entity) -> Result<Value> {
        if self.schemas.contains_key(thing.name()) {
            return Err(ContextError::TermCollision {
                term: thing.name().to_string(),
            });
        }
        let mut definition = Map::new();
        definition.insert("@id".to_string(), Value::String(thing.generate_identifier()?));
        if let Some(qualified_type) = thing.generate_qualified_type()? {
            definition.insert("@type".to_string(), Value::String(qualified_type));
        }
        Ok(Value::Object(definition))
    }
}

fn add<'a, T: Member>(context: &str, set: &'a mut MemberSet<T>, member: Arc<T>) -> Update<'a, T> {
    let key = member.key().to_string();
    if !set.insert(member) {
        trace!(context, kind = T::KIND, name = %key, "already registered");
        return Update::NoOp;
    }
    debug!(context, kind = T::KIND, name = %key, "registered");
    Update::Changed(set)
}

fn remove<'a, T: Member>(context: &str, set: &'a mut MemberSet<T>, member: &T) -> Update<'a, T> {
    if set.remove(member).is_none() {
        trace!(context, kind = T::KIND, name = member.key(), "not registered");
        return Update::NoOp;
    }
    debug!(context, kind = T::KIND, name = member.key(), "unregistered");
    Update::Changed(set)
}

fn required(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(ContextError::missing("Context", "name"));
    }
    Ok(name)
}

/// Builder for a context with initial members
#[derive(Debug)]
pub struct ContextBuilder {
    name: String,
    schemas: Vec<Arc<Schema>>,
    things: Vec<Arc<Entity>>,
    vocab: Option<String>,
}

impl ContextBuilder {
    pub fn schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.schemas.push(schema.into());
        self
    }

    pub fn entity(mut self, entity: impl Into<Arc<Entity>>) -> Self {
        self.things.push(entity.into());
        self
    }

    pub fn vocab(mut self, vocab: impl Into<String>) -> Self {
        self.vocab = Some(vocab.into());
        self
    }

    /// Fails on an empty name or on duplicate initial members
    pub fn build(self) -> Result<Context> {
        let mut context = Context::new(self.name)?;
        context.set_schemas(self.schemas)?;
        context.set_entities(self.things)?;
        context.set_vocab(self.vocab);
        Ok(context)
    }
}
