//! Configuration management for the context compiler
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (ldctx.toml)
//! - Environment variables (LDCTX_*)
//!
//! ## Example config file (ldctx.toml):
//! ```toml
//! [context]
//! default_vocab = "http://schema.org/"
//!
//! [output]
//! format = "compact"
//! wrap_document = true
//! null_vocab = false
//! ```
//!
//! Environment overrides use `__` between section and key, e.g.
//! `LDCTX_OUTPUT__FORMAT=compact`.

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::context::CompileOptions;
use crate::error::Result;

/// Main configuration for the context compiler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Defaults applied to new contexts
    #[serde(default)]
    pub context: ContextSettings,

    /// Rendering of compiled contexts
    #[serde(default)]
    pub output: OutputSettings,
}

/// Defaults for contexts created through [`crate::Context::from_config`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Initial `vocab` of contexts built with `Context::from_config`
    #[serde(default)]
    pub default_vocab: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// JSON layout (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Wrap the term map in a `{"@context": ...}` document
    #[serde(default)]
    pub wrap_document: bool,

    /// Emit `"@vocab": null` instead of omitting an unset vocab
    #[serde(default)]
    pub null_vocab: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            wrap_document: false,
            null_vocab: false,
        }
    }
}

impl CompilerConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["ldctx.toml", ".ldctx.toml", "config/ldctx.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "ldctx") {
            let xdg_config = config_dir.config_dir().join("ldctx.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("LDCTX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let loaded: Self = config.try_deserialize()?;
        tracing::debug!(
            format = ?loaded.output.format,
            wrap_document = loaded.output.wrap_document,
            "loaded compiler configuration"
        );
        Ok(loaded)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Compile options derived from the output section
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            null_vocab: self.output.null_vocab,
        }
    }
}
