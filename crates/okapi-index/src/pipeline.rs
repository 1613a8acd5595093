use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use okapi_core::{tokenise, DocId, Document};
use okapi_extract::ContentStrategy;
use okapi_storage::ContentStore;
use rayon::prelude::*;

use crate::error::IndexerError;
use crate::report::{IndexReport, SkipReason};
use crate::scanner::scan_files;

/// Result of a full indexing build pass: the assembled document map, the
/// summed term count across all documents, and a report for logging.
pub struct BuildOutcome {
    pub documents: HashMap<DocId, Document>,
    pub total_term_count: u64,
    pub docid_counter: u64,
    pub report: IndexReport,
}

/// Shared state protected by a single mutex. The critical section per file
/// covers only this struct's update — text extraction and tokenisation run
/// outside the lock.
struct BuildState {
    documents: HashMap<DocId, Document>,
    total_term_count: u64,
    report: IndexReport,
}

/// Crawl `root`, extract and tokenise every file in parallel, and assemble
/// the in-memory document set. A failure for a single file is logged and
/// the file is skipped; a failure to even walk `root` is fatal.
pub fn build(root: &Path, content_store: &ContentStore) -> Result<BuildOutcome, IndexerError> {
    let start = Instant::now();
    let files = scan_files(root)?;
    let total_files_scanned = files.len();
    tracing::info!(files = total_files_scanned, root = %root.display(), "index build started");

    let docid_counter = AtomicU64::new(1);
    let state = Mutex::new(BuildState {
        documents: HashMap::new(),
        total_term_count: 0,
        report: IndexReport {
            total_files_scanned,
            ..Default::default()
        },
    });

    files.par_iter().for_each(|path| {
        index_one_file(path, content_store, &docid_counter, &state);
    });

    let mut state = state.into_inner().expect("build mutex never poisoned");
    state.report.duration = start.elapsed();
    state.report.files_indexed = state.documents.len();

    tracing::info!(
        indexed = state.report.files_indexed,
        skipped = state.report.total_skipped(),
        duration_ms = state.report.duration.as_millis(),
        "index build finished"
    );

    Ok(BuildOutcome {
        documents: state.documents,
        total_term_count: state.total_term_count,
        docid_counter: docid_counter.load(Ordering::SeqCst),
        report: state.report,
    })
}

fn index_one_file(
    path: &PathBuf,
    content_store: &ContentStore,
    docid_counter: &AtomicU64,
    state: &Mutex<BuildState>,
) {
    let _span = tracing::debug_span!("index_file", path = %path.display()).entered();

    let ext = extension_of(path);
    let strategy = match ContentStrategy::for_extension(&ext) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping unsupported extension");
            state.lock().unwrap().report.record_skip(SkipReason::UnsupportedExtension);
            return;
        }
    };

    let content = match strategy.read_content(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping file, extraction failed");
            state.lock().unwrap().report.record_skip(SkipReason::ExtractionFailed);
            return;
        }
    };

    let content_hash = match content_store.store(&content) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "skipping file, storage failed");
            state.lock().unwrap().report.record_skip(SkipReason::StorageFailed);
            return;
        }
    };

    let terms = tokenise(&content);
    let mut concordance: HashMap<String, u32> = HashMap::new();
    for term in &terms {
        *concordance.entry(term.clone()).or_insert(0) += 1;
    }
    let total_term_count = terms.len() as u32;

    let docid = DocId(docid_counter.fetch_add(1, Ordering::SeqCst));
    let indexed_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    let document = Document::new(
        docid,
        path.to_string_lossy().into_owned(),
        ext,
        concordance,
        total_term_count,
        indexed_at,
        content_hash,
    );

    let mut guard = state.lock().unwrap();
    guard.total_term_count += total_term_count as u64;
    guard.documents.insert(docid, document);
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_ascii_lowercase()))
        .unwrap_or_default()
}
