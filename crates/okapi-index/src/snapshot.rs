use std::collections::HashMap;
use std::path::Path;

use okapi_core::{DocId, Document};
use serde::{Deserialize, Serialize};

use crate::error::IndexerError;

const MARKER_FILE: &str = ".index_complete";
const SNAPSHOT_FILE: &str = "index.json";

/// On-disk shape of `index.json`, exactly as spec.md §6.3 describes.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexSnapshot {
    #[serde(default = "default_docid_counter")]
    pub docid_counter: u64,
    #[serde(default)]
    pub documents: Vec<Document>,
}

fn default_docid_counter() -> u64 {
    1
}

pub fn marker_path(index_path: &Path) -> std::path::PathBuf {
    index_path.join(MARKER_FILE)
}

pub fn snapshot_path(index_path: &Path) -> std::path::PathBuf {
    index_path.join(SNAPSHOT_FILE)
}

pub fn marker_exists(index_path: &Path) -> bool {
    marker_path(index_path).exists()
}

/// Write `index.json` then drop the completion marker, in that order, so a
/// partial snapshot is never mistaken for a complete one.
pub fn save(
    index_path: &Path,
    docid_counter: u64,
    documents: &HashMap<DocId, Document>,
) -> Result<(), IndexerError> {
    std::fs::create_dir_all(index_path)?;

    let snapshot = IndexSnapshot {
        docid_counter,
        documents: documents.values().cloned().collect(),
    };

    let file = std::fs::File::create(snapshot_path(index_path))?;
    serde_json::to_writer_pretty(file, &snapshot)
        .map_err(|e| IndexerError::IndexCorruption { reason: e.to_string() })?;

    std::fs::write(marker_path(index_path), b"\n")?;
    Ok(())
}

/// Load `index.json`. Callers are expected to have already checked the
/// completion marker.
pub fn load(index_path: &Path) -> Result<IndexSnapshot, IndexerError> {
    let bytes = std::fs::read(snapshot_path(index_path))?;
    serde_json::from_slice(&bytes).map_err(|e| IndexerError::IndexCorruption {
        reason: format!("failed to parse index.json: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use okapi_core::Document;
    use std::collections::HashMap;

    #[test]
    fn missing_docid_counter_defaults_to_one() {
        let json = r#"{"documents": []}"#;
        let snapshot: IndexSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.docid_counter, 1);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut documents = HashMap::new();
        documents.insert(
            DocId(1),
            Document::new(
                DocId(1),
                "a.txt".to_string(),
                ".txt".to_string(),
                HashMap::from([("fox".to_string(), 1)]),
                1,
                0,
                "hash".to_string(),
            ),
        );

        save(dir.path(), 2, &documents).unwrap();
        assert!(marker_exists(dir.path()));

        let snapshot = load(dir.path()).unwrap();
        assert_eq!(snapshot.docid_counter, 2);
        assert_eq!(snapshot.documents.len(), 1);
        assert_eq!(snapshot.documents[0].docid, DocId(1));
    }

    #[test]
    fn marker_absent_before_save() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!marker_exists(dir.path()));
    }
}
