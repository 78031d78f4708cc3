//! Form fields sent to the gateway and fed to the token signer.
//!
//! Every request type (and [`Notification`](crate::notification::Notification))
//! lists its own fields through [`FormFields`], using the `push_*` helpers of
//! [`Form`] which apply the gateway's encoding rules:
//!
//! | Field type   | Encoding                     | Omitted when  |
//! |--------------|------------------------------|---------------|
//! | string       | as is                        | empty         |
//! | integer      | base 10                      | zero          |
//! | boolean      | `Y`                          | `false`       |
//! | request data | single `DATA` value          | `None`        |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::RequestData;

/// Form key holding the encoded [`RequestData`].
pub const DATA_KEY: &str = "DATA";

/// Literal sent for a `true` boolean. There is no literal for `false`.
pub const TRUE_LITERAL: &str = "Y";

/// A set of form fields keyed by name.
///
/// Keys are kept in byte-wise ascending order, which is the order the token
/// signer concatenates values in. Inserting under an existing key replaces
/// its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Form(BTreeMap<String, String>);

impl Form {
    pub fn new() -> Self {
        Form(BTreeMap::new())
    }

    /// Sets `key` to `value` unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Adds a string field unless it is empty.
    pub fn push_str(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.set(key, value);
        }
    }

    /// Adds an integer field unless it is zero.
    pub fn push_int(&mut self, key: &str, value: i64) {
        if value != 0 {
            self.set(key, value.to_string());
        }
    }

    /// Adds a boolean field as `Y` when `true`, nothing otherwise.
    pub fn push_bool(&mut self, key: &str, value: bool) {
        if value {
            self.set(key, TRUE_LITERAL);
        }
    }

    /// Adds the encoded request data under [`DATA_KEY`] when present.
    pub fn push_data(&mut self, data: Option<&RequestData>) {
        if let Some(data) = data {
            self.set(DATA_KEY, data.encode());
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Form(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Form {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A record that can be flattened into form fields.
pub trait FormFields {
    /// Writes this record's non-empty fields into `form`.
    fn write_fields(&self, form: &mut Form);

    /// Collects this record's fields into a fresh [`Form`].
    fn to_form(&self) -> Form {
        let mut form = Form::new();
        self.write_fields(&mut form);
        form
    }
}
