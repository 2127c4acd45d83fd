//! Test renderers.

use crate::context::{ContextMap, TemplateId};
use crate::errors::RenderError;
use crate::render::TemplateRenderer;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};

/// A renderer that records every call and renders the context as JSON.
///
/// Keys are sorted so output is deterministic. When constructed with
/// [`with_templates`](Self::with_templates), unknown templates fail with
/// [`RenderError::not_found`].
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    known: Option<HashSet<String>>,
    calls: RwLock<Vec<(TemplateId, ContextMap)>>,
}

impl RecordingRenderer {
    /// Creates a renderer that accepts any template.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that only knows the given templates.
    #[must_use]
    pub fn with_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: Some(templates.into_iter().map(Into::into).collect()),
            calls: RwLock::default(),
        }
    }

    /// Returns all recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<(TemplateId, ContextMap)> {
        self.calls.read().clone()
    }

    /// Returns the context of the most recent call.
    #[must_use]
    pub fn last_context(&self) -> Option<ContextMap> {
        self.calls.read().last().map(|(_, ctx)| ctx.clone())
    }

    /// Returns the number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    /// Returns true if nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }
}

impl TemplateRenderer for RecordingRenderer {
    fn render(&self, template: &TemplateId, context: &ContextMap) -> Result<String, RenderError> {
        if let Some(ref known) = self.known {
            if !known.contains(template.as_str()) {
                return Err(RenderError::not_found(template.as_str()));
            }
        }

        self.calls.write().push((template.clone(), context.clone()));

        let sorted: BTreeMap<&String, &serde_json::Value> = context.iter().collect();
        serde_json::to_string(&sorted).map_err(|e| RenderError::new(template.as_str(), e.to_string()))
    }
}
