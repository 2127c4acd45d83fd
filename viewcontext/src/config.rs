//! Declarative view context configuration.
//!
//! A [`ContextConfig`] describes shared values and per-template compositions
//! as data, typically loaded from a JSON file at startup:
//!
//! ```json
//! {
//!   "shared": { "app_name": "Acme" },
//!   "composers": [
//!     { "templates": "dashboard", "context": { "section": "home" } },
//!     { "templates": ["dashboard", "dashboard/user"], "context": { "nav": true } }
//!   ]
//! }
//! ```
//!
//! Unknown fields are ignored so newer files load in older builds.

use crate::bootstrap::ContextProvider;
use crate::context::{ContextMap, Targets};
use crate::errors::{ConfigurationError, ViewContextError};
use crate::registry::ContextRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One composition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Template identifier or list of identifiers; `"*"` targets all.
    pub templates: Targets,
    /// Context registered for those templates.
    #[serde(default)]
    pub context: ContextMap,
}

/// Shared and composed context to register at bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Values shared with every template.
    #[serde(default)]
    pub shared: ContextMap,
    /// Per-template compositions, applied in order after `shared`.
    #[serde(default)]
    pub composers: Vec<ComposerConfig>,
}

impl ContextConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shared value.
    #[must_use]
    pub fn with_shared(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.shared.insert(key.into(), value);
        self
    }

    /// Adds a composition.
    #[must_use]
    pub fn with_composer(mut self, templates: impl Into<Targets>, context: ContextMap) -> Self {
        self.composers.push(ComposerConfig {
            templates: templates.into(),
            context,
        });
        self
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` for malformed JSON or invalid
    /// identifiers.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigurationError::invalid_file("<inline>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ViewContextError::Io` if the file cannot be read and
    /// `ViewContextError::Configuration` if its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ViewContextError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ConfigurationError::invalid_file(&path.display().to_string(), e.to_string())
        })?;
        config.validate()?;
        debug!(
            path = %path.display(),
            shared_keys = config.shared.len(),
            composers = config.composers.len(),
            "Loaded view context configuration"
        );
        Ok(config)
    }

    /// Checks every composer's identifiers.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigurationError` found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for composer in &self.composers {
            composer.templates.parse()?;
        }
        Ok(())
    }

    /// Registers this configuration with `registry`.
    ///
    /// Validation runs first, so an invalid configuration registers nothing.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any identifier is invalid.
    pub fn apply(&self, registry: &ContextRegistry) -> Result<(), ConfigurationError> {
        self.validate()?;
        if !self.shared.is_empty() {
            registry.share(self.shared.clone());
        }
        for composer in &self.composers {
            registry.compose(composer.templates.clone(), composer.context.clone())?;
        }
        Ok(())
    }
}

impl ContextProvider for ContextConfig {
    fn name(&self) -> &str {
        "config"
    }

    fn register(&self, registry: &ContextRegistry) -> anyhow::Result<()> {
        self.apply(registry)?;
        Ok(())
    }
}
