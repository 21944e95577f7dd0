//! The variables map sent alongside the query text.

use crate::value::Value;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// Ordered mapping from token to value, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Variables(IndexMap<String, Value, FxBuildHasher>);

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token`, returning the value it replaced. A replaced token keeps
    /// its original position.
    pub(crate) fn insert(&mut self, token: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(token.into(), value)
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Value> {
        self.0.get(token)
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains_key(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens in binding order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(token, value)| (token.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl IntoIterator for Variables {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
