//! View factory.

use super::TemplateRenderer;
use crate::context::{ContextMap, TemplateId};
use crate::errors::ViewContextError;
use crate::registry::ContextRegistry;
use std::sync::Arc;
use tracing::debug;

/// Renders templates with registry context merged in.
#[derive(Debug)]
pub struct ViewFactory<R> {
    registry: Arc<ContextRegistry>,
    renderer: R,
}

impl<R: TemplateRenderer> ViewFactory<R> {
    /// Creates a factory over an existing registry.
    #[must_use]
    pub fn new(registry: Arc<ContextRegistry>, renderer: R) -> Self {
        Self { registry, renderer }
    }

    /// The registry this factory reads from.
    #[must_use]
    pub fn registry(&self) -> &Arc<ContextRegistry> {
        &self.registry
    }

    /// The underlying renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the context `template` would be rendered with.
    #[must_use]
    pub fn resolve(&self, template: &str, call_context: ContextMap) -> ContextMap {
        self.registry.resolve(template, call_context)
    }

    /// Resolves the context for `template` and renders it.
    ///
    /// # Errors
    ///
    /// Returns `ViewContextError::Configuration` for a malformed identifier
    /// and `ViewContextError::Render` when the renderer fails.
    pub fn render(
        &self,
        template: &str,
        call_context: ContextMap,
    ) -> Result<String, ViewContextError> {
        let id = TemplateId::parse(template)?;
        let context = self.registry.resolve(id.as_str(), call_context);
        debug!(template = %id, keys = context.len(), "Rendering view");
        Ok(self.renderer.render(&id, &context)?)
    }
}
