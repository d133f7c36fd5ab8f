//! Pre-loaded hazard/risk catalog used by the fast-track assessment workflow.
//!
//! The catalog is read wholesale into an immutable snapshot and injected as
//! `Arc<dyn RiskCatalog>`. Refreshing it means building a new snapshot; there
//! is no per-call re-read.

mod loader;

pub use loader::{load_dir, CatalogLoadError};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One catalog row, addressable by a stable integer id assigned at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub group: String,
    pub topic: String,
    pub hazard: String,
    pub risk: String,
    pub legal_basis: String,
    pub measure: String,
    pub affected: String,
    pub source_file: String,
}

/// Search parameters for catalog browsing.
#[derive(Debug, Clone)]
pub struct CatalogFilter {
    pub query: String,
    pub category: String,
    pub limit: usize,
    pub offset: usize,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: String::new(),
            limit: 100,
            offset: 0,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub results: Vec<CatalogEntry>,
    pub total: usize,
    pub has_more: bool,
}

/// Read-only catalog interface, kept behind a trait so tests can substitute
/// a fixture snapshot.
pub trait RiskCatalog: Send + Sync {
    fn entry(&self, id: u32) -> Option<&CatalogEntry>;
    fn categories(&self) -> Vec<String>;
    fn search(&self, filter: &CatalogFilter) -> CatalogPage;
}

/// Immutable in-memory catalog.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<u32, usize>,
}

impl CatalogSnapshot {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id, index))
            .collect();
        Self { entries, by_id }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RiskCatalog for CatalogSnapshot {
    fn entry(&self, id: u32) -> Option<&CatalogEntry> {
        self.by_id.get(&id).map(|index| &self.entries[*index])
    }

    fn categories(&self) -> Vec<String> {
        let mut groups: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.group.trim())
            .filter(|group| !group.is_empty())
            .map(str::to_string)
            .collect();
        groups.sort();
        groups.dedup();
        groups
    }

    fn search(&self, filter: &CatalogFilter) -> CatalogPage {
        let query = filter.query.trim().to_lowercase();
        let category = filter.category.trim().to_lowercase();

        let matched: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| {
                if !category.is_empty() && !entry.group.to_lowercase().contains(&category) {
                    return false;
                }
                if query.is_empty() {
                    return true;
                }
                entry.hazard.to_lowercase().contains(&query)
                    || entry.risk.to_lowercase().contains(&query)
                    || entry.topic.to_lowercase().contains(&query)
            })
            .collect();

        let total = matched.len();
        let results = matched
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();

        CatalogPage {
            results,
            total,
            has_more: filter.offset + filter.limit < total,
        }
    }
}

#[cfg(test)]
pub(crate) fn fixture_entry(id: u32, group: &str, hazard: &str, risk: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        group: group.to_string(),
        topic: String::new(),
        hazard: hazard.to_string(),
        risk: risk.to_string(),
        legal_basis: "6331 sayılı kanun".to_string(),
        measure: "Koruyucu ekipman sağlanmalı".to_string(),
        affected: "Tüm çalışanlar".to_string(),
        source_file: "fixture.json".to_string(),
    }
}
