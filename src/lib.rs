//! JSON-LD Context Compiler
//!
//! Models a small metadata vocabulary (schemas, the entities they define, and
//! relationships between entities) and compiles it into a JSON-LD context.
//!
//! ## Features
//!
//! - **Name-keyed registration**: schemas and entities are unique by name;
//!   duplicate adds and absent removes are reported as no-ops, not errors
//! - **Deterministic output**: terms are emitted in registration order
//! - **Fail-fast validation**: required fields are checked on construction
//! - **Checksums**: SHA256 fingerprints of compiled contexts
//!
//! ## Example
//!
//! ```
//! use ld_context::{Context, Entity, Schema};
//!
//! let sage = Schema::new("sage", "http://sage.org/")?;
//! let melanoma = Entity::builder()
//!     .source_schema(sage.clone())
//!     .name("Melanoma")
//!     .thing_type("Disease")
//!     .build()?;
//!
//! let mut context = Context::new("cancer")?;
//! context.set_vocab(Some("http://schema.org/".to_string()));
//! let _ = context.add_schema(sage);
//! let _ = context.add_entity(melanoma);
//!
//! let compiled = context.compile()?;
//! assert_eq!(compiled.keys().collect::<Vec<_>>(), vec!["sage", "@vocab", "Melanoma"]);
//! # Ok::<(), ld_context::ContextError>(())
//! ```

pub mod checksum;
pub mod compiled;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod members;
pub mod schema;

pub use checksum::Checksum;
pub use compiled::CompiledContext;
pub use config::{CompilerConfig, OutputFormat};
pub use context::{CompileOptions, Context, ContextBuilder, Update};
pub use entity::{Entity, EntityBuilder, RelationKind, Relationships};
pub use error::{ContextError, Result};
pub use members::{Member, MemberSet};
pub use schema::Schema;
