//! Template identifiers and composition targets.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// The reserved identifier that targets every template.
pub const WILDCARD: &str = "*";

/// A validated, slash-delimited template path relative to the template root.
///
/// Identifiers are non-empty, never equal the wildcard and have no empty
/// segments. Any other characters are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    /// Parses and validates an identifier.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` when the identifier is empty, is the
    /// wildcard, or has an empty path segment.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        if raw.trim().is_empty() {
            return Err(ConfigurationError::empty_identifier());
        }
        if raw == WILDCARD {
            return Err(ConfigurationError::invalid_identifier(
                raw,
                "the wildcard is not a template path",
            ));
        }
        if raw.split('/').any(str::is_empty) {
            return Err(ConfigurationError::invalid_identifier(
                raw,
                "empty path segment",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TemplateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for TemplateId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TemplateId {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

/// A single validated composition target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Every template.
    Wildcard,
    /// One named template.
    Template(TemplateId),
}

impl Target {
    /// Parses a raw target, recognising the wildcard.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` for malformed identifiers.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        if raw == WILDCARD {
            Ok(Self::Wildcard)
        } else {
            TemplateId::parse(raw).map(Self::Template)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTargets {
    One(String),
    Many(Vec<String>),
}

/// The unvalidated identifier argument of a composition: one string or many.
///
/// Deserializes from either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    raw: Vec<String>,
    single: bool,
}

impl Targets {
    /// Targets every template.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::from(WILDCARD)
    }

    /// Returns the raw identifiers in the order given.
    #[must_use]
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// True when this is exactly the wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.raw.len() == 1 && self.raw[0] == WILDCARD
    }

    /// Validates every identifier before any is used.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the list is empty or any identifier
    /// is malformed.
    pub fn parse(&self) -> Result<Vec<Target>, ConfigurationError> {
        if self.raw.is_empty() {
            return Err(ConfigurationError::empty_targets());
        }
        self.raw.iter().map(|raw| Target::parse(raw)).collect()
    }

    fn many(raw: Vec<String>) -> Self {
        Self { raw, single: false }
    }
}

impl Serialize for Targets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.single && self.raw.len() == 1 {
            self.raw[0].serialize(serializer)
        } else {
            self.raw.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Targets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawTargets::deserialize(deserializer)? {
            RawTargets::One(id) => Self::from(id),
            RawTargets::Many(ids) => Self::many(ids),
        })
    }
}

impl From<&str> for Targets {
    fn from(id: &str) -> Self {
        Self::from(id.to_string())
    }
}

impl From<String> for Targets {
    fn from(id: String) -> Self {
        Self {
            raw: vec![id],
            single: true,
        }
    }
}

impl From<&String> for Targets {
    fn from(id: &String) -> Self {
        Self::from(id.as_str())
    }
}

impl From<TemplateId> for Targets {
    fn from(id: TemplateId) -> Self {
        Self::from(String::from(id))
    }
}

impl From<Vec<String>> for Targets {
    fn from(ids: Vec<String>) -> Self {
        Self::many(ids)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(ids: Vec<&str>) -> Self {
        Self::from(ids.as_slice())
    }
}

impl From<&[&str]> for Targets {
    fn from(ids: &[&str]) -> Self {
        Self::many(ids.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(ids: [&str; N]) -> Self {
        Self::from(ids.as_slice())
    }
}
