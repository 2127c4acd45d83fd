//! Context mappings handed to the rendering engine.

use crate::errors::ConfigurationError;
use serde::Serialize;
use std::collections::HashMap;

/// A flat mapping of variable names to opaque JSON values.
pub type ContextMap = HashMap<String, serde_json::Value>;

/// Returns the JSON type name of a value.
#[must_use]
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Converts a dynamic value into a context mapping.
///
/// # Errors
///
/// Returns a `ConfigurationError` unless the value is a JSON object.
pub fn context_from_value(value: serde_json::Value) -> Result<ContextMap, ConfigurationError> {
    match value {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(ConfigurationError::not_a_mapping(value_kind(&other))),
    }
}

/// Converts any serializable value into a context mapping.
///
/// Structs become one entry per field.
///
/// # Errors
///
/// Returns a `ConfigurationError` if serialization fails or the value does
/// not serialize to a JSON object.
pub fn context_from_serialize<T: Serialize + ?Sized>(
    value: &T,
) -> Result<ContextMap, ConfigurationError> {
    let value = serde_json::to_value(value)
        .map_err(|e| ConfigurationError::new(format!("Context failed to serialize: {e}")))?;
    context_from_value(value)
}

/// Copies every entry of `source` into `target`, overwriting on conflict.
///
/// Returns the keys that were overwritten.
pub fn merge_into(target: &mut ContextMap, source: &ContextMap) -> Vec<String> {
    let mut overwritten = Vec::new();
    for (key, value) in source {
        if target.insert(key.clone(), value.clone()).is_some() {
            overwritten.push(key.clone());
        }
    }
    overwritten
}
