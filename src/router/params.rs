//! Path parameter bindings.

use std::fmt;

/// A single bound path parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Ordered `(name, value)` bindings for the variable segments of a matched
/// route, root to leaf.
///
/// Entries are recycled: [`Params::reset`] only forgets them, and later
/// bindings overwrite the retained strings in place, so a warmed-up buffer
/// binds without allocating.
#[derive(Clone, Default)]
pub struct Params {
    entries: Vec<Param>,
    len: usize,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Value of the first binding named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Append a binding. Duplicate names are kept; [`Params::get`] sees the first.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.get_mut(self.len) {
            Some(slot) => {
                slot.key.clear();
                slot.key.push_str(key);
                slot.value.clear();
                slot.value.push_str(value);
            }
            None => self.entries.push(Param {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
        self.len += 1;
    }

    /// Forget all bindings, keeping their storage.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries[..self.len]
            .iter()
            .map(|param| (param.key.as_str(), param.value.as_str()))
    }

    /// Owned copies of the live bindings.
    pub fn to_vec(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }
}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}
