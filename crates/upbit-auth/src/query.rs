//! Request parameters and their canonical encoding
//!
//! The string produced by [`QueryParams::encode`] is both what gets hashed
//! into the token and what goes on the wire, so the two can never drift.

use sha2::{Digest, Sha512};
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::AuthResult;

/// Parameter mapping from key to an ordered list of values
///
/// Keys encode in ascending byte order. Values of a repeated key (such as
/// `uuids[]`) keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to a single value, replacing any previous values
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries.insert(key.into(), vec![value.to_string()]);
        self
    }

    /// Set `key` only when `value` is present
    pub fn set_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Append a value to `key`
    pub fn add(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.entries
            .entry(key.into())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Append every value to `key`
    pub fn add_all<I, V>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let mut values = values.into_iter().map(|v| v.to_string()).peekable();
        // an empty list contributes nothing to the query
        if values.peek().is_some() {
            self.entries.entry(key.into()).or_default().extend(values);
        }
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.set(key, value);
        self
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `key`, in insertion order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of encoded pairs
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Canonical `application/x-www-form-urlencoded` string
    pub fn encode(&self) -> AuthResult<String> {
        let pairs: Vec<(&str, &str)> = self.iter().collect();
        Ok(serde_urlencoded::to_string(pairs)?)
    }

    /// Lowercase hex SHA-512 of the canonical string
    pub fn query_hash(&self) -> AuthResult<String> {
        let encoded = self.encode()?;
        Ok(hex::encode(Sha512::digest(encoded.as_bytes())))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.add(k, v);
        }
        params
    }
}
