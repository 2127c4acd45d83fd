//! Testing utilities for code that renders through a context registry.
//!
//! This module provides:
//! - A recording renderer that captures every resolved context
//! - Assertions over resolved contexts

mod assertions;
mod renderer;

pub use assertions::{assert_context_eq, assert_context_lacks, assert_context_value, context};
pub use renderer::RecordingRenderer;
