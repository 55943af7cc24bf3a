use crate::models::Page;
use crate::namespace::NamespaceRegistry;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Counters collected while walking a dump
#[derive(Debug, Default)]
pub struct DumpStats {
    pages: u64,
    redirects: u64,
    without_text: u64,
    by_namespace: FxHashMap<String, u64>,
}

/// Serializable summary of a finished walk.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsSummary {
    pub pages: u64,
    pub redirects: u64,
    pub without_text: u64,
    pub namespaces_declared: usize,
    pub namespaces: Vec<NamespaceCount>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NamespaceCount {
    pub key: String,
    pub name: String,
    pub pages: u64,
}

impl DumpStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, page: &Page) {
        self.pages += 1;
        if page.is_redirect() {
            self.redirects += 1;
        } else if page.text.is_none() {
            self.without_text += 1;
        }
        *self
            .by_namespace
            .entry(page.namespace.key.clone())
            .or_insert(0) += 1;
    }

    pub fn pages(&self) -> u64 {
        self.pages
    }

    pub fn redirects(&self) -> u64 {
        self.redirects
    }

    pub fn without_text(&self) -> u64 {
        self.without_text
    }

    pub fn pages_in(&self, key: &str) -> u64 {
        self.by_namespace.get(key).copied().unwrap_or(0)
    }

    /// Per-namespace counts named through `registry`, busiest namespace first.
    pub fn summarize(&self, registry: &NamespaceRegistry) -> StatsSummary {
        let mut namespaces: Vec<NamespaceCount> = self
            .by_namespace
            .iter()
            .map(|(key, &pages)| NamespaceCount {
                key: key.clone(),
                name: registry.name_for_key(key).unwrap_or_default().to_string(),
                pages,
            })
            .collect();
        namespaces.sort_by(|a, b| b.pages.cmp(&a.pages).then_with(|| a.key.cmp(&b.key)));

        StatsSummary {
            pages: self.pages,
            redirects: self.redirects,
            without_text: self.without_text,
            namespaces_declared: registry.len(),
            namespaces,
        }
    }
}
