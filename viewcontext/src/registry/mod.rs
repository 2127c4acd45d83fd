//! The context registry.
//!
//! Holds the global context shared with every template and the ordered list
//! of per-template contexts, and merges them for a render call:
//!
//! 1. global context (lowest precedence)
//! 2. every scoped entry for the template, in registration order
//! 3. the call context (highest precedence)
//!
//! Writers are serialized behind a mutex and publish a fresh
//! [`RegistrySnapshot`]; readers load the current snapshot without locking.

mod snapshot;

pub use snapshot::{RegistrySnapshot, ScopedEntry};

use crate::context::{
    context_from_serialize, context_from_value, ContextMap, Target, Targets,
};
use crate::errors::ConfigurationError;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Registry of shared and per-template view context.
///
/// Construct one at the composition root and hand it to the renderer side
/// behind an `Arc`.
pub struct ContextRegistry {
    snap: ArcSwap<RegistrySnapshot>,
    write_lock: Mutex<()>,
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
            write_lock: Mutex::new(()),
        }
    }
}

impl fmt::Debug for ContextRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.snap.load();
        f.debug_struct("ContextRegistry")
            .field("global_keys", &snap.global().len())
            .field("scoped_entries", &snap.entries().len())
            .finish()
    }
}

impl ContextRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }

    /// Merges `context` into the global context; later keys win.
    pub fn share(&self, context: ContextMap) {
        let key_count = context.len();
        let overwritten = self.update(|next| next.share(&context));

        debug!(keys = key_count, "Shared view context");
        if !overwritten.is_empty() {
            debug!(keys = ?overwritten, "Shared view context overrides existing keys");
        }
    }

    /// Shares a dynamic value, which must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the value is not a mapping.
    pub fn share_value(&self, value: serde_json::Value) -> Result<(), ConfigurationError> {
        self.share(context_from_value(value)?);
        Ok(())
    }

    /// Shares any value that serializes to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the value is not a mapping.
    pub fn share_serialized<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<(), ConfigurationError> {
        self.share(context_from_serialize(value)?);
        Ok(())
    }

    /// Registers `context` for one or more templates.
    ///
    /// The wildcard `"*"` is the same as [`share`](Self::share). A list
    /// registers an independent entry per identifier, in order; a `"*"`
    /// inside a list is shared at that position. Every identifier is
    /// validated before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` for an empty list or a malformed
    /// identifier.
    pub fn compose(
        &self,
        targets: impl Into<Targets>,
        context: ContextMap,
    ) -> Result<(), ConfigurationError> {
        let targets = targets.into();
        let parsed = targets.parse()?;

        if targets.is_wildcard() {
            self.share(context);
            return Ok(());
        }

        let key_count = context.len();
        let context = Arc::new(context);
        let overwritten = self.update(|next| {
            let mut overwritten = Vec::new();
            for target in parsed {
                match target {
                    Target::Wildcard => overwritten.extend(next.share(&context)),
                    Target::Template(id) => next.push(id, Arc::clone(&context)),
                }
            }
            overwritten
        });

        debug!(templates = ?targets.raw(), keys = key_count, "Composed view context");
        if !overwritten.is_empty() {
            debug!(keys = ?overwritten, "Composed view context overrides existing shared keys");
        }
        Ok(())
    }

    /// Composes a dynamic value, which must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the value is not a mapping or an
    /// identifier is malformed.
    pub fn compose_value(
        &self,
        targets: impl Into<Targets>,
        value: serde_json::Value,
    ) -> Result<(), ConfigurationError> {
        self.compose(targets, context_from_value(value)?)
    }

    /// Composes any value that serializes to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the value is not a mapping or an
    /// identifier is malformed.
    pub fn compose_serialized<T: Serialize + ?Sized>(
        &self,
        targets: impl Into<Targets>,
        value: &T,
    ) -> Result<(), ConfigurationError> {
        self.compose(targets, context_from_serialize(value)?)
    }

    /// Produces the effective context for rendering `template`.
    ///
    /// Never fails; a template with no scoped entries gets the global
    /// context merged with `call_context`. The result is an owned copy.
    #[must_use]
    pub fn resolve(&self, template: &str, call_context: ContextMap) -> ContextMap {
        let snap = self.snap.load();
        let merged = snap.resolve(template, call_context);
        trace!(
            template = %template,
            scoped_entries = snap.entries_for(template).count(),
            keys = merged.len(),
            "Resolved view context"
        );
        merged
    }

    /// Returns a shared value by key.
    #[must_use]
    pub fn shared_value(&self, key: &str) -> Option<serde_json::Value> {
        self.snap.load().global().get(key).cloned()
    }

    /// Returns true if nothing has been shared or composed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snap.load().is_empty()
    }

    /// Remove all registrations (primarily for tests).
    pub fn clear(&self) {
        let _guard = self.write_lock.lock();
        self.snap.store(Arc::new(RegistrySnapshot::default()));
    }

    fn update<R>(&self, f: impl FnOnce(&mut RegistrySnapshot) -> R) -> R {
        let _guard = self.write_lock.lock();
        let mut next = RegistrySnapshot::clone(&self.snap.load());
        let result = f(&mut next);
        self.snap.store(Arc::new(next));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_context_eq, context};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_share_applies_to_every_template() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"request": "R"})));

        assert_context_eq(&registry.resolve("about", ContextMap::new()), json!({"request": "R"}));
        assert_context_eq(
            &registry.resolve("dashboard/user", ContextMap::new()),
            json!({"request": "R"}),
        );
    }

    #[test]
    fn test_compose_single_template() {
        let registry = ContextRegistry::new();
        registry
            .compose("dashboard", context(json!({"request": "R"})))
            .unwrap();

        assert_context_eq(
            &registry.resolve("dashboard", ContextMap::new()),
            json!({"request": "R"}),
        );
        assert_context_eq(&registry.resolve("other", ContextMap::new()), json!({}));
    }

    #[test]
    fn test_compose_many_templates() {
        let registry = ContextRegistry::new();
        registry
            .compose(["dashboard", "dashboard/user"], context(json!({"request": "R"})))
            .unwrap();

        assert_context_eq(
            &registry.resolve("dashboard/user", ContextMap::new()),
            json!({"request": "R"}),
        );
        assert_context_eq(
            &registry.resolve("dashboard", ContextMap::new()),
            json!({"request": "R"}),
        );
        assert_eq!(registry.snapshot().entries().len(), 2);
    }

    #[test]
    fn test_call_context_overrides_shared() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"request": "R"})));

        let resolved = registry.resolve("dashboard", context(json!({"request": "Override"})));
        assert_context_eq(&resolved, json!({"request": "Override"}));
    }

    #[test]
    fn test_wildcard_is_share() {
        let registry = ContextRegistry::new();
        registry.compose("*", context(json!({"app": "demo"}))).unwrap();

        assert!(registry.snapshot().entries().is_empty());
        assert_eq!(registry.shared_value("app"), Some(json!("demo")));
    }

    #[test]
    fn test_wildcard_inside_list_is_shared() {
        let registry = ContextRegistry::new();
        registry
            .compose(vec!["*", "dashboard"], context(json!({"k": 1})))
            .unwrap();

        assert_eq!(registry.shared_value("k"), Some(json!(1)));
        assert_eq!(registry.snapshot().entries_for("dashboard").count(), 1);
    }

    #[test]
    fn test_later_composition_wins() {
        let registry = ContextRegistry::new();
        registry.compose("page", context(json!({"title": "first", "a": 1}))).unwrap();
        registry.compose("page", context(json!({"title": "second"}))).unwrap();

        assert_context_eq(
            &registry.resolve("page", ContextMap::new()),
            json!({"title": "second", "a": 1}),
        );
    }

    #[test]
    fn test_duplicate_identifier_in_one_list() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"a": 0})));
        registry
            .compose(["a", "a"], context(json!({"k": 1})))
            .unwrap();

        let snap = registry.snapshot();
        assert_eq!(snap.entries_for("a").count(), 2);
        assert_context_eq(
            &registry.resolve("a", ContextMap::new()),
            json!({"a": 0, "k": 1}),
        );
    }

    #[test]
    fn test_compose_unrestricted_identifiers() {
        let registry = ContextRegistry::new();
        for id in ["pages/über", "user profile", "emails/welcome@2x", "robots.txt"] {
            registry.compose(id, context(json!({"k": id}))).unwrap();
        }

        assert_context_eq(
            &registry.resolve("pages/über", ContextMap::new()),
            json!({"k": "pages/über"}),
        );
        assert_context_eq(
            &registry.resolve("robots.txt", ContextMap::new()),
            json!({"k": "robots.txt"}),
        );
        assert_eq!(registry.snapshot().entries().len(), 4);
    }

    #[test]
    fn test_scoped_overrides_shared_regardless_of_order() {
        let registry = ContextRegistry::new();
        registry.compose("page", context(json!({"title": "scoped"}))).unwrap();
        registry.share(context(json!({"title": "shared"})));

        assert_context_eq(
            &registry.resolve("page", ContextMap::new()),
            json!({"title": "scoped"}),
        );
        assert_context_eq(
            &registry.resolve("other", ContextMap::new()),
            json!({"title": "shared"}),
        );
    }

    #[test]
    fn test_invalid_identifier_registers_nothing() {
        let registry = ContextRegistry::new();
        let result = registry.compose(vec!["ok", ""], context(json!({"k": 1})));

        assert!(result.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_share_value_rejects_scalar() {
        let registry = ContextRegistry::new();
        let err = registry.share_value(json!(42)).unwrap_err();
        assert_eq!(err.code(), Some("CONFIG-003-NOT-A-MAPPING"));
        assert!(registry.is_empty());

        let err = registry.compose_value("page", json!("nope")).unwrap_err();
        assert_eq!(err.code(), Some("CONFIG-003-NOT-A-MAPPING"));
    }

    #[test]
    fn test_serialized_contexts() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
        }

        let registry = ContextRegistry::new();
        registry.share_serialized(&User { name: "ada" }).unwrap();
        registry
            .compose_serialized("profile", &json!({"tab": "posts"}))
            .unwrap();

        assert_context_eq(
            &registry.resolve("profile", ContextMap::new()),
            json!({"name": "ada", "tab": "posts"}),
        );
    }

    #[test]
    fn test_resolved_context_is_detached() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"a": 1})));

        let before = registry.resolve("page", ContextMap::new());
        registry.share(context(json!({"a": 2, "b": 3})));
        registry.compose("page", context(json!({"c": 4}))).unwrap();

        assert_context_eq(&before, json!({"a": 1}));
        assert_context_eq(
            &registry.resolve("page", ContextMap::new()),
            json!({"a": 2, "b": 3, "c": 4}),
        );
    }

    #[test]
    fn test_snapshot_is_stable_across_writes() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"a": 1})));
        let snap = registry.snapshot();

        registry.share(context(json!({"a": 2})));

        assert_eq!(snap.global()["a"], json!(1));
        assert_eq!(registry.snapshot().global()["a"], json!(2));
    }

    #[test]
    fn test_clear() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"a": 1})));
        registry.compose("page", context(json!({"b": 1}))).unwrap();
        assert!(!registry.is_empty());

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concurrent_resolve_during_registration() {
        let registry = Arc::new(ContextRegistry::new());
        registry.share(context(json!({"base": true})));

        thread::scope(|s| {
            for i in 0..4 {
                let registry = Arc::clone(&registry);
                s.spawn(move || {
                    registry
                        .compose(format!("page{i}"), context(json!({"n": i})))
                        .unwrap();
                });
            }
            for _ in 0..4 {
                let registry = Arc::clone(&registry);
                s.spawn(move || {
                    for _ in 0..100 {
                        let resolved = registry.resolve("page0", ContextMap::new());
                        assert_eq!(resolved["base"], json!(true));
                    }
                });
            }
        });

        assert_eq!(registry.snapshot().entries().len(), 4);
        for i in 0..4 {
            assert_eq!(
                registry.resolve(&format!("page{i}"), ContextMap::new())["n"],
                json!(i)
            );
        }
    }

    #[test]
    fn test_debug_output() {
        let registry = ContextRegistry::new();
        registry.share(context(json!({"a": 1})));
        let debug = format!("{registry:?}");
        assert!(debug.contains("global_keys: 1"));
    }
}
