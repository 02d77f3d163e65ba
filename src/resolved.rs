use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::EnvfigError;

/// The output of resolution: every declared key mapped to its value.
///
/// Keys iterate optional-first, then required, each group in declaration
/// order. An undefined value is stored as `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedEnv {
    values: Map<String, Value>,
    #[serde(skip)]
    raw: HashMap<String, String>,
}

impl ResolvedEnv {
    /// Record `key`. `raw` is the string the value came from, before any
    /// transform, when there was one.
    pub(crate) fn insert(&mut self, key: &str, value: Value, raw: Option<&str>) {
        match raw {
            Some(raw) => {
                self.raw.insert(key.to_string(), raw.to_string());
            }
            None => {
                self.raw.remove(key);
            }
        }
        self.values.insert(key.to_string(), value);
    }

    /// The stored value, or `None` when the key is undefined or undeclared.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    /// The stored value when it is a plain string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// The raw string behind `key` before any transform.
    ///
    /// Falls back to the stored value's text for defaults given in their
    /// already-typed form.
    pub fn raw(&self, key: &str) -> Option<String> {
        if let Some(raw) = self.raw.get(key) {
            return Some(raw.clone());
        }
        self.get(key).map(value_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Deserialize the resolved values into a caller-defined struct.
    ///
    /// Undefined keys arrive as `null`, so they fit `Option<T>` fields.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, EnvfigError> {
        serde_json::from_value(Value::Object(self.values))
            .map_err(|source| EnvfigError::Deserialize { source })
    }
}

/// The string form of a stored value: strings as-is, anything else as JSON text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
