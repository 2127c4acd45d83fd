//! Context values and template identifiers.
//!
//! This module provides:
//! - Validated template identifiers and composition targets
//! - The flat context mapping passed to renderers, with conversions

mod data;
mod identifier;

pub use data::{context_from_serialize, context_from_value, merge_into, value_kind, ContextMap};
pub use identifier::{Target, Targets, TemplateId, WILDCARD};
