//! Keyword-style arguments passed to tools.

use serde_json::{Map, Value};

use crate::error::RocError;

/// Coerced parameters keyed by name, with typed extraction helpers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an argument.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// The arguments as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, RocError> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| RocError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument.
    pub fn get_i64(&self, key: &str) -> Result<i64, RocError> {
        self.values
            .get(key)
            .and_then(|v| v.as_i64())
            .ok_or_else(|| RocError::InvalidArgument(format!("Missing integer argument: {key}")))
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, RocError> {
        self.values
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| RocError::InvalidArgument(format!("Missing boolean argument: {key}")))
    }

    /// Get an array argument.
    ///
    /// `array` parameters can recover to an object or stay a raw string, so
    /// tools that accept those shapes should use [`ToolArguments::get`].
    pub fn get_array(&self, key: &str) -> Result<&Vec<Value>, RocError> {
        self.values
            .get(key)
            .and_then(|v| v.as_array())
            .ok_or_else(|| RocError::InvalidArgument(format!("Missing array argument: {key}")))
    }

    /// Deserialize the entire argument set into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, RocError> {
        serde_json::from_value(self.to_value()).map_err(|e| {
            RocError::InvalidArgument(format!("Failed to deserialize arguments: {e}"))
        })
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, Value)> for ToolArguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
