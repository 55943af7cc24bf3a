use crate::error::{DumpError, Result};
use crate::models::Namespace;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Namespace declarations seen so far in one parse, indexed both ways.
#[derive(Debug, Default)]
pub struct NamespaceRegistry {
    key_to_name: FxHashMap<String, String>,
    name_to_key: FxHashMap<String, String>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, name: String) {
        debug!(key = %key, name = %name, "Registered namespace");
        self.name_to_key.insert(name.clone(), key.clone());
        self.key_to_name.insert(key, name);
    }

    /// Resolves a page's `<ns>` key. Unknown keys are fatal for the parse.
    pub fn namespace(&self, key: &str, title: &str) -> Result<Namespace> {
        match self.key_to_name.get(key) {
            Some(name) => Ok(Namespace {
                key: key.to_string(),
                name: name.clone(),
            }),
            None => Err(DumpError::UnknownNamespaceKey {
                key: key.to_string(),
                title: title.to_string(),
            }),
        }
    }

    pub fn name_for_key(&self, key: &str) -> Option<&str> {
        self.key_to_name.get(key).map(String::as_str)
    }

    pub fn key_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_key.get(name).map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.key_to_name.len()
    }

    /// Number of distinct names; lower than [`len`](Self::len) if two keys share a name.
    pub fn name_count(&self) -> usize {
        self.name_to_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_name.is_empty()
    }

    /// All declarations as `(key, name)`, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.key_to_name
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.key_to_name.clear();
        self.name_to_key.clear();
    }
}
