//! Test assertions for resolved contexts.

use crate::context::{context_from_value, ContextMap};

/// Builds a context from a JSON object literal.
///
/// Panics if `value` is not an object.
#[must_use]
pub fn context(value: serde_json::Value) -> ContextMap {
    match context_from_value(value) {
        Ok(ctx) => ctx,
        Err(e) => panic!("Expected a JSON object for a test context: {e}"),
    }
}

/// Asserts that the context equals the expected JSON object exactly.
pub fn assert_context_eq(actual: &ContextMap, expected: serde_json::Value) {
    let expected = context(expected);
    assert_eq!(
        actual, &expected,
        "Expected context {:?}, got {:?}",
        expected, actual
    );
}

/// Asserts that the context holds `expected` under `key`.
pub fn assert_context_value(actual: &ContextMap, key: &str, expected: &serde_json::Value) {
    let value = actual.get(key);
    assert_eq!(
        value,
        Some(expected),
        "Expected value {:?} for key '{}', got {:?}",
        expected,
        key,
        value
    );
}

/// Asserts that the context has no entry for `key`.
pub fn assert_context_lacks(actual: &ContextMap, key: &str) {
    assert!(
        !actual.contains_key(key),
        "Expected context to lack key '{}', but it holds {:?}",
        key,
        actual.get(key)
    );
}
