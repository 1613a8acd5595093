use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::IndexerError;

/// Recursively enumerate every regular file under `root`.
///
/// Unlike a source-tree crawl, this walk does not apply `.gitignore` or
/// hidden-file filtering — a document root has no VCS semantics, and
/// spec.md makes no mention of skipping dotfiles. Symlinks are not
/// followed.
pub fn scan_files(root: &Path) -> Result<Vec<PathBuf>, IndexerError> {
    if !root.is_dir() {
        return Err(IndexerError::IndexBuildFailed {
            root: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
        if is_file {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
