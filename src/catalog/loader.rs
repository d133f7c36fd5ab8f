use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::{CatalogEntry, CatalogSnapshot};

/// Raised when the catalog directory itself cannot be enumerated. Individual
/// files that fail to parse are skipped, not fatal.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog directory: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk row shape. Source files keep the Turkish column names of the
/// published hazard lists; absent columns default to empty text.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "Grup Adı", default)]
    group: String,
    #[serde(rename = "Konu", default)]
    topic: String,
    #[serde(rename = "Tehlike", default)]
    hazard: String,
    #[serde(rename = "Risk", default)]
    risk: String,
    #[serde(rename = "Mevzuat", default)]
    legal_basis: String,
    #[serde(rename = "Önlem", default)]
    measure: String,
    #[serde(rename = "Etkilenenler", default)]
    affected: String,
}

/// Read every `*.json` file in `dir` (each a JSON array of catalog rows) and
/// combine them into one snapshot with sequential ids starting at 1.
///
/// A missing directory yields an empty snapshot; malformed files are logged
/// and skipped so one bad export cannot take the whole catalog down.
pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<CatalogSnapshot, CatalogLoadError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        warn!(path = %dir.display(), "catalog directory missing, starting empty");
        return Ok(CatalogSnapshot::default());
    }

    let mut files: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut entries = Vec::new();
    let mut next_id: u32 = 0;

    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(file = %file_name, error = %err, "skipping unreadable catalog file");
                continue;
            }
        };

        let rows: Vec<RawEntry> = match serde_json::from_str(&text) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(file = %file_name, error = %err, "skipping malformed catalog file");
                continue;
            }
        };

        for row in rows {
            next_id += 1;
            entries.push(CatalogEntry {
                id: next_id,
                group: row.group,
                topic: row.topic,
                hazard: row.hazard,
                risk: row.risk,
                legal_basis: row.legal_basis,
                measure: row.measure,
                affected: row.affected,
                source_file: file_name.clone(),
            });
        }
    }

    info!(entries = entries.len(), "risk catalog loaded");
    Ok(CatalogSnapshot::new(entries))
}
