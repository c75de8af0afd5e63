//! Schema references
//!
//! A schema is an external vocabulary known by a short prefix name and the
//! IRI the prefix expands to (e.g. `schema` -> `http://schema.org/`).

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, Result};
use crate::members::Member;

/// A named reference to an external vocabulary
///
/// Two schemas are the same schema when their names match; the IRI takes no
/// part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    /// Prefix used as the JSON-LD shorthand (e.g. "sage")
    name: String,
    /// Base IRI of the vocabulary (e.g. "http://sage.org/")
    iri: String,
}

/// Unvalidated wire form, checked through `Schema::new` on deserialize
#[derive(Deserialize)]
struct SchemaDef {
    #[serde(default)]
    name: String,
    #[serde(default)]
    iri: String,
}

impl TryFrom<SchemaDef> for Schema {
    type Error = ContextError;

    fn try_from(def: SchemaDef) -> Result<Self> {
        Schema::new(def.name, def.iri)
    }
}

impl Schema {
    /// Create a schema, failing if either field is empty
    pub fn new(name: impl Into<String>, iri: impl Into<String>) -> Result<Self> {
        let name = required(name.into(), "name")?;
        let iri = required(iri.into(), "iri")?;
        Ok(Self { name, iri })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// Replace the name. An empty name is rejected and the old one kept.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&str> {
        self.name = required(name.into(), "name")?;
        Ok(&self.name)
    }

    /// Replace the IRI. An empty IRI is rejected and the old one kept.
    pub fn set_iri(&mut self, iri: impl Into<String>) -> Result<&str> {
        self.iri = required(iri.into(), "iri")?;
        Ok(&self.iri)
    }
}

fn required(value: String, field: &'static str) -> Result<String> {
    if value.is_empty() {
        return Err(ContextError::missing("Schema", field));
    }
    Ok(value)
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Member for Schema {
    const KIND: &'static str = "schema";

    fn key(&self) -> &str {
        &self.name
    }
}
