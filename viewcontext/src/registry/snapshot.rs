//! Immutable registry state.

use crate::context::{merge_into, ContextMap, TemplateId};
use std::collections::HashMap;
use std::sync::Arc;

/// A context registered for one template.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedEntry {
    template: TemplateId,
    context: Arc<ContextMap>,
}

impl ScopedEntry {
    /// The template this entry applies to.
    #[must_use]
    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    /// The registered context.
    #[must_use]
    pub fn context(&self) -> &ContextMap {
        &self.context
    }
}

/// A point-in-time view of the registry.
///
/// Snapshots are never mutated once published; writers build a new one.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    global: ContextMap,
    entries: Vec<ScopedEntry>,
    // template -> positions in `entries`, ascending
    index: HashMap<TemplateId, Vec<usize>>,
}

impl RegistrySnapshot {
    /// The context applied to every template.
    #[must_use]
    pub fn global(&self) -> &ContextMap {
        &self.global
    }

    /// All scoped entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[ScopedEntry] {
        &self.entries
    }

    /// Scoped entries for one template, in registration order.
    pub fn entries_for<'a>(&'a self, template: &str) -> impl Iterator<Item = &'a ScopedEntry> + 'a {
        self.index
            .get(template)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.entries[i])
    }

    /// True if nothing has been shared or composed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.entries.is_empty()
    }

    /// Merges global, scoped, then call context into a fresh mapping.
    #[must_use]
    pub fn resolve(&self, template: &str, call_context: ContextMap) -> ContextMap {
        let mut merged = self.global.clone();
        for entry in self.entries_for(template) {
            merge_into(&mut merged, &entry.context);
        }
        merged.extend(call_context);
        merged
    }

    pub(crate) fn share(&mut self, context: &ContextMap) -> Vec<String> {
        merge_into(&mut self.global, context)
    }

    pub(crate) fn push(&mut self, template: TemplateId, context: Arc<ContextMap>) {
        let position = self.entries.len();
        self.index.entry(template.clone()).or_default().push(position);
        self.entries.push(ScopedEntry { template, context });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::context_from_value;
    use serde_json::json;

    fn id(raw: &str) -> TemplateId {
        TemplateId::parse(raw).unwrap()
    }

    fn ctx(value: serde_json::Value) -> Arc<ContextMap> {
        Arc::new(context_from_value(value).unwrap())
    }

    #[test]
    fn test_empty_snapshot() {
        let snap = RegistrySnapshot::default();
        assert!(snap.is_empty());
        assert!(snap.resolve("any", ContextMap::new()).is_empty());
        assert_eq!(snap.entries_for("any").count(), 0);
    }

    #[test]
    fn test_entries_for_keeps_order() {
        let mut snap = RegistrySnapshot::default();
        snap.push(id("a"), ctx(json!({"n": 1})));
        snap.push(id("b"), ctx(json!({"n": 2})));
        snap.push(id("a"), ctx(json!({"n": 3})));

        let values: Vec<_> = snap.entries_for("a").map(|e| e.context()["n"].clone()).collect();
        assert_eq!(values, vec![json!(1), json!(3)]);
        assert_eq!(snap.entries().len(), 3);
        assert_eq!(snap.entries_for("b").count(), 1);
    }

    #[test]
    fn test_resolve_precedence() {
        let mut snap = RegistrySnapshot::default();
        snap.share(&context_from_value(json!({"x": "global", "y": "global", "z": "global"})).unwrap());
        snap.push(id("page"), ctx(json!({"y": "scoped", "z": "scoped"})));

        let call = context_from_value(json!({"z": "call"})).unwrap();
        let merged = snap.resolve("page", call);

        assert_eq!(merged["x"], json!("global"));
        assert_eq!(merged["y"], json!("scoped"));
        assert_eq!(merged["z"], json!("call"));
    }
}
