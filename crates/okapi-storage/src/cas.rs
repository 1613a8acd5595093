use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha2::{Digest, Sha256};

use crate::error::StorageError;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Content-addressed, zlib-compressed blob store.
///
/// Keys are the lowercase hex SHA-256 of the *uncompressed* content, so the
/// content address is independent of the compression format. Writes go to
/// a temporary file and are renamed into place, so concurrent `store` calls
/// for identical content never observe a partially written blob.
#[derive(Debug, Clone)]
pub struct ContentStore {
    storage_dir: PathBuf,
}

impl ContentStore {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn blob_path(&self, hash: &str) -> PathBuf {
        self.storage_dir.join(format!("{hash}.z"))
    }

    /// Compress and persist `content`, returning its SHA-256 hex digest.
    ///
    /// A no-op if a blob for this hash already exists — the filename is
    /// content-derived, so re-storing identical content is always safe.
    pub fn store(&self, content: &str) -> Result<String, StorageError> {
        let hash = Self::compute_hash(content);
        let dest = self.blob_path(&hash);

        if dest.exists() {
            return Ok(hash);
        }

        let compressed = compress(content.as_bytes())?;

        let tmp_name = format!(
            ".tmp-{}-{}-{hash}.z",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        );
        let tmp_path = self.storage_dir.join(tmp_name);

        std::fs::write(&tmp_path, &compressed)?;
        std::fs::rename(&tmp_path, &dest)?;

        tracing::debug!(hash = %hash, bytes = compressed.len(), "stored content blob");
        Ok(hash)
    }

    /// Load and decompress the blob for `hash`, verifying the decompressed
    /// content's SHA-256 matches the requested hash before returning it.
    pub fn load(&self, hash: &str) -> Result<String, StorageError> {
        let path = self.blob_path(hash);
        if !path.exists() {
            return Err(StorageError::NotFound {
                hash: hash.to_string(),
            });
        }

        let compressed = std::fs::read(&path)?;
        let content = decompress(&compressed).map_err(|reason| StorageError::Corruption {
            hash: hash.to_string(),
            reason,
        })?;

        let actual = Self::compute_hash(&content);
        if actual != hash {
            return Err(StorageError::Corruption {
                hash: hash.to_string(),
                reason: format!("decompressed content hashes to {actual}"),
            });
        }

        Ok(content)
    }

    pub fn exists(&self, hash: &str) -> bool {
        self.blob_path(hash).exists()
    }

    pub fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>, StorageError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| StorageError::Compression {
            reason: e.to_string(),
        })?;
    encoder.finish().map_err(|e| StorageError::Compression {
        reason: e.to_string(),
    })
}

fn decompress(data: &[u8]) -> Result<String, String> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = String::new();
    decoder
        .read_to_string(&mut out)
        .map_err(|e| e.to_string())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_content() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        let hash = cas.store("the quick brown fox").unwrap();
        assert_eq!(cas.load(&hash).unwrap(), "the quick brown fox");
    }

    #[test]
    fn hash_is_deterministic_and_compression_independent() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        let h1 = cas.store("identical content").unwrap();
        let h2 = cas.store("identical content").unwrap();
        assert_eq!(h1, h2);
        assert_eq!(ContentStore::compute_hash("identical content"), h1);
    }

    #[test]
    fn identical_content_writes_one_blob() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        cas.store("same text").unwrap();
        cas.store("same text").unwrap();

        let blob_files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map(|x| x == "z").unwrap_or(false))
            .collect();
        assert_eq!(blob_files.len(), 1);
    }

    #[test]
    fn exists_reflects_filesystem_state() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        let hash = ContentStore::compute_hash("probe");
        assert!(!cas.exists(&hash));
        cas.store("probe").unwrap();
        assert!(cas.exists(&hash));
    }

    #[test]
    fn load_missing_hash_fails_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        let err = cas.load("0".repeat(64).as_str()).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn load_detects_corrupted_blob() {
        let dir = tempfile::tempdir().unwrap();
        let cas = ContentStore::new(dir.path());
        let hash = cas.store("original content").unwrap();

        // Overwrite with a validly-compressed but different payload.
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"tampered content").unwrap();
        let tampered = encoder.finish().unwrap();
        std::fs::write(dir.path().join(format!("{hash}.z")), tampered).unwrap();

        let err = cas.load(&hash).unwrap_err();
        assert!(matches!(err, StorageError::Corruption { .. }));
    }
}
