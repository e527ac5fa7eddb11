//! Fingerprint generation for cache keys

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Value;

/// Deterministic cache key derived from the request fields that affect a
/// producer's output.
///
/// The encoding is a JSON object with keys in sorted order, so two builders fed
/// the same fields in any order produce byte-identical fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the canonical string form used as the cache key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short, stable digest suitable for log fields (never logs request content)
    pub fn digest(&self) -> String {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.0.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Types that describe a cacheable request
pub trait Fingerprinted {
    /// Builds the fingerprint over the semantically significant fields only
    fn fingerprint(&self) -> Fingerprint;
}

/// Collects named request fields and encodes them canonically
#[derive(Debug, Clone, Default)]
pub struct FingerprintBuilder {
    /// Fields keyed by name (sorted for consistency)
    fields: BTreeMap<String, String>,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Adding the same name twice keeps the last value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Adds a field only when present; absent fields are left out of the encoding
    pub fn optional_field(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn build(self) -> Fingerprint {
        let body = self
            .fields
            .into_iter()
            .map(|(name, value)| format!("{}:{}", Value::String(name), Value::String(value)))
            .collect::<Vec<_>>()
            .join(",");

        Fingerprint(format!("{{{}}}", body))
    }
}
