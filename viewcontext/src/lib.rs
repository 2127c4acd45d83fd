//! # Viewcontext
//!
//! Injects named values into template renders without every call site
//! passing them explicitly.
//!
//! Three ways to register context:
//!
//! - **Sharing**: values merged into every render
//! - **Composition**: values merged only into renders of named templates
//! - **Wildcard composition**: composition for `"*"`, identical to sharing
//!
//! At render time the registry merges global, then scoped (in registration
//! order), then call-site context, with later layers winning on conflict.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use viewcontext::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ContextRegistry::new());
//! registry.share_value(json!({"app": "Acme"}))?;
//! registry.compose_value(["dashboard", "dashboard/user"], json!({"nav": true}))?;
//!
//! let views = ViewFactory::new(Arc::clone(&registry), my_renderer);
//! let html = views.render("dashboard", ContextMap::new())?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod errors;
pub mod observability;
pub mod registry;
pub mod render;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bootstrap::{Bootstrap, ContextProvider};
    pub use crate::config::{ComposerConfig, ContextConfig};
    pub use crate::context::{ContextMap, Target, Targets, TemplateId, WILDCARD};
    pub use crate::errors::{ConfigurationError, RenderError, ViewContextError};
    pub use crate::observability::{init_logging, LogFormat};
    pub use crate::registry::{ContextRegistry, RegistrySnapshot, ScopedEntry};
    pub use crate::render::{TemplateRenderer, ViewFactory};
}
