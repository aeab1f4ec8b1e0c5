//! Assembled key/value parameters.
//!
//! [`QueryParams`] is the output of request assembly. It keeps insertion
//! order and can be rendered as URL query pairs or as a JSON body.

use crate::param::ParamValue;
use serde_json::{Map, Value};

/// Ordered collection of assembled parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create a new, empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert a key/value pair, replacing an earlier value under the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Insert a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: Into<ParamValue>,
    {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append every pair of `other`, replacing duplicates.
    pub fn extend(&mut self, other: Self) {
        for (key, value) in other.pairs {
            self.push(key, value);
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as string pairs for a URL query.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
            .into_iter()
            .map(|(k, v)| {
                let rendered = v.to_string();
                (k, rendered)
            })
            .collect()
    }

    /// Render as a JSON object for a request body.
    #[must_use]
    pub fn into_json_map(self) -> Map<String, Value> {
        self.pairs
            .into_iter()
            .map(|(k, v)| (k, v.to_json()))
            .collect()
    }
}
