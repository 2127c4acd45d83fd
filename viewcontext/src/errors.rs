//! Error types for view context composition.
//!
//! Registration problems surface as [`ConfigurationError`] at bootstrap time;
//! resolution itself never fails. Rendering failures belong to the renderer
//! and are carried as [`RenderError`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for viewcontext operations.
#[derive(Debug, Error)]
pub enum ViewContextError {
    /// A registration was rejected.
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    /// The rendering engine failed.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagnostic metadata attached to configuration errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Error code (e.g., "CONFIG-001-EMPTY-IDENTIFIER").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ErrorInfo {
    /// Creates new error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// Error raised when a registration is misconfigured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigurationError {
    /// The error message.
    pub message: String,
    /// The identifier that caused the error, if any.
    pub identifier: Option<String>,
    /// Optional diagnostic info.
    pub error_info: Option<ErrorInfo>,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            identifier: None,
            error_info: None,
        }
    }

    /// Sets the offending identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the diagnostic info.
    #[must_use]
    pub fn with_error_info(mut self, info: ErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the error code, if diagnostic info is attached.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }

    /// The identifier was empty or whitespace-only.
    #[must_use]
    pub fn empty_identifier() -> Self {
        Self::new("Template identifier cannot be empty or whitespace-only").with_error_info(
            ErrorInfo::new("CONFIG-001-EMPTY-IDENTIFIER", "Empty template identifier")
                .with_fix_hint("Pass a template path such as \"dashboard/user\" or \"*\"."),
        )
    }

    /// The identifier is not a well-formed template path.
    #[must_use]
    pub fn invalid_identifier(identifier: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(format!("Invalid template identifier '{identifier}': {reason}"))
            .with_identifier(identifier)
            .with_error_info(
                ErrorInfo::new("CONFIG-002-INVALID-IDENTIFIER", reason)
                    .with_fix_hint(
                        "Use slash-separated, non-empty path segments relative to the template root.",
                    )
                    .with_context_entry("identifier", identifier),
            )
    }

    /// A context was supplied that is not a mapping.
    #[must_use]
    pub fn not_a_mapping(kind: &str) -> Self {
        Self::new(format!("Context must be a mapping of names to values, got {kind}"))
            .with_error_info(
                ErrorInfo::new("CONFIG-003-NOT-A-MAPPING", "Context is not a mapping")
                    .with_fix_hint("Pass a JSON object or a struct that serializes to one.")
                    .with_context_entry("kind", kind),
            )
    }

    /// A composition named no templates at all.
    #[must_use]
    pub fn empty_targets() -> Self {
        Self::new("Composition must name at least one template identifier").with_error_info(
            ErrorInfo::new("CONFIG-004-EMPTY-TARGETS", "No template identifiers given")
                .with_fix_hint("Use \"*\" to target every template."),
        )
    }

    /// A configuration file could not be read or parsed.
    #[must_use]
    pub fn invalid_file(path: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::new(format!("Invalid context configuration '{path}': {reason}")).with_error_info(
            ErrorInfo::new("CONFIG-005-INVALID-FILE", reason).with_context_entry("path", path),
        )
    }
}

/// Error reported by a rendering engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to render '{template}': {message}")]
pub struct RenderError {
    /// The template being rendered.
    pub template: String,
    /// The renderer's message.
    pub message: String,
}

impl RenderError {
    /// Creates a new render error.
    #[must_use]
    pub fn new(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            message: message.into(),
        }
    }

    /// The template could not be located.
    #[must_use]
    pub fn not_found(template: impl Into<String>) -> Self {
        Self::new(template, "template not found")
    }
}

/// Result alias for viewcontext operations.
pub type Result<T, E = ViewContextError> = std::result::Result<T, E>;
