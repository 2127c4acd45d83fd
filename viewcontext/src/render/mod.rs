//! Rendering with composed context.
//!
//! The rendering engine itself is a collaborator behind
//! [`TemplateRenderer`]; [`ViewFactory`] resolves the effective context and
//! hands it over.

mod factory;

pub use factory::ViewFactory;

use crate::context::{ContextMap, TemplateId};
use crate::errors::RenderError;

/// Contract for template rendering engines.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` with the fully merged `context`.
    ///
    /// # Errors
    ///
    /// Returns a `RenderError` if the template cannot be located or
    /// rendered.
    fn render(&self, template: &TemplateId, context: &ContextMap) -> Result<String, RenderError>;
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for Box<R> {
    fn render(&self, template: &TemplateId, context: &ContextMap) -> Result<String, RenderError> {
        (**self).render(template, context)
    }
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for std::sync::Arc<R> {
    fn render(&self, template: &TemplateId, context: &ContextMap) -> Result<String, RenderError> {
        (**self).render(template, context)
    }
}
