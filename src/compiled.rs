//! Compiled JSON-LD contexts

use serde::Serialize;
use serde_json::{Map, Value};

use crate::checksum::Checksum;
use crate::config::{OutputFormat, OutputSettings};
use crate::error::Result;

/// The term map produced by [`crate::Context::compile`]
///
/// Keys keep the order they were emitted in: schema prefixes, `@vocab`,
/// then one term definition per entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompiledContext {
    terms: Map<String, Value>,
}

impl CompiledContext {
    pub(crate) fn new(terms: Map<String, Value>) -> Self {
        Self { terms }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.terms
    }

    pub fn get(&self, term: &str) -> Option<&Value> {
        self.terms.get(term)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.terms)
    }

    /// Wrap the term map as a standalone document: `{"@context": {...}}`
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("@context".to_string(), Value::Object(self.terms.clone()));
        Value::Object(doc)
    }

    pub fn to_json_string(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&self.terms)?,
            OutputFormat::Compact => serde_json::to_string(&self.terms)?,
        })
    }

    /// Render according to the output settings
    pub fn render(&self, settings: &OutputSettings) -> Result<String> {
        if !settings.wrap_document {
            return self.to_json_string(settings.format);
        }
        let doc = self.to_document();
        Ok(match settings.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&doc)?,
            OutputFormat::Compact => serde_json::to_string(&doc)?,
        })
    }

    /// SHA256 of the compact term map
    pub fn checksum(&self) -> Checksum {
        Checksum::from_bytes(&serde_json::to_vec(&self.terms).unwrap_or_default())
    }
}
