//! Error types for context compilation

use thiserror::Error;

/// Result type for context operations
pub type Result<T> = std::result::Result<T, ContextError>;

/// Context compilation errors
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("{component} is missing required field `{field}`")]
    MissingField {
        component: &'static str,
        field: &'static str,
    },

    #[error("Duplicate {kind} `{name}` in replacement set")]
    DuplicateMember { kind: &'static str, name: String },

    #[error("Entity name `{name}` is a JSON-LD keyword")]
    ReservedName { name: String },

    #[error("Term `{term}` is already defined as a schema prefix")]
    TermCollision { term: String },

    #[error("Cannot compile {kind} `{name}`: {source}")]
    InvalidMember {
        kind: &'static str,
        name: String,
        #[source]
        source: Box<ContextError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextError {
    pub(crate) fn missing(component: &'static str, field: &'static str) -> Self {
        ContextError::MissingField { component, field }
    }

    /// True for required-field violations, including ones wrapped by `compile`
    pub fn is_missing_field(&self) -> bool {
        match self {
            ContextError::MissingField { .. } => true,
            ContextError::InvalidMember { source, .. } => source.is_missing_field(),
            _ => false,
        }
    }
}
