use std::collections::HashMap;
use std::path::{Path, PathBuf};

use okapi_core::{DocId, Document};
use okapi_storage::ContentStore;

use crate::error::IndexerError;
use crate::pipeline::build;
use crate::report::IndexReport;
use crate::snapshot;

const STOPWORDS_FILE: &str = "stopwords.txt";

/// The process-wide, read-only-after-build document index.
///
/// Owns the [`ContentStore`] for its full lifetime. Built synchronously
/// before a server starts accepting connections, so the query path never
/// needs to lock `documents`.
pub struct Indexer {
    documents: HashMap<DocId, Document>,
    docid_counter: u64,
    total_term_count: u64,
    avg_doc_length: u64,
    stopwords: Vec<String>,
    index_path: PathBuf,
    content_store: ContentStore,
    report: Option<IndexReport>,
}

impl Indexer {
    /// Open the index at `index_path`. If a completion marker is present,
    /// restores from `index.json`; otherwise crawls `root` and builds a
    /// fresh index, then persists it.
    pub fn open(root: &Path, index_path: &Path) -> Result<Self, IndexerError> {
        std::fs::create_dir_all(index_path)?;
        let content_store = ContentStore::new(index_path);
        let stopwords = read_stopwords(index_path);

        if snapshot::marker_exists(index_path) {
            tracing::info!(index_path = %index_path.display(), "loading existing index");
            Self::restore(index_path, content_store, stopwords)
        } else {
            tracing::info!(root = %root.display(), "building new index");
            Self::build_new(root, index_path, content_store, stopwords)
        }
    }

    fn build_new(
        root: &Path,
        index_path: &Path,
        content_store: ContentStore,
        stopwords: Vec<String>,
    ) -> Result<Self, IndexerError> {
        let outcome = build(root, &content_store)?;
        let avg_doc_length = compute_avg_doc_length(outcome.total_term_count, outcome.documents.len());

        snapshot::save(index_path, outcome.docid_counter, &outcome.documents)?;

        Ok(Self {
            documents: outcome.documents,
            docid_counter: outcome.docid_counter,
            total_term_count: outcome.total_term_count,
            avg_doc_length,
            stopwords,
            index_path: index_path.to_path_buf(),
            content_store,
            report: Some(outcome.report),
        })
    }

    fn restore(
        index_path: &Path,
        content_store: ContentStore,
        stopwords: Vec<String>,
    ) -> Result<Self, IndexerError> {
        let snapshot = snapshot::load(index_path)?;

        let mut documents = HashMap::with_capacity(snapshot.documents.len());
        let mut total_term_count: u64 = 0;
        let mut max_docid: u64 = 0;

        for doc in snapshot.documents {
            total_term_count += doc.total_term_count as u64;
            max_docid = max_docid.max(doc.docid.as_u64());
            documents.insert(doc.docid, doc);
        }

        if snapshot.docid_counter <= max_docid {
            return Err(IndexerError::IndexCorruption {
                reason: format!(
                    "docid_counter {} is not greater than the largest loaded docid {max_docid}",
                    snapshot.docid_counter
                ),
            });
        }

        let avg_doc_length = compute_avg_doc_length(total_term_count, documents.len());

        Ok(Self {
            documents,
            docid_counter: snapshot.docid_counter,
            total_term_count,
            avg_doc_length,
            stopwords,
            index_path: index_path.to_path_buf(),
            content_store,
            report: None,
        })
    }

    pub fn get_document(&self, docid: DocId) -> Result<&Document, IndexerError> {
        self.documents
            .get(&docid)
            .ok_or(IndexerError::DocumentNotFound { docid })
    }

    pub fn documents(&self) -> &HashMap<DocId, Document> {
        &self.documents
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn total_term_count(&self) -> u64 {
        self.total_term_count
    }

    pub fn avg_doc_length(&self) -> u64 {
        self.avg_doc_length
    }

    pub fn avg_doc_length_f64(&self) -> f64 {
        self.avg_doc_length as f64
    }

    pub fn docid_counter(&self) -> u64 {
        self.docid_counter
    }

    pub fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.content_store
    }

    /// Build statistics, present only for a run that built fresh (not one
    /// restored from a snapshot).
    pub fn report(&self) -> Option<&IndexReport> {
        self.report.as_ref()
    }
}

fn compute_avg_doc_length(total_term_count: u64, document_count: usize) -> u64 {
    if document_count == 0 {
        0
    } else {
        total_term_count / document_count as u64
    }
}

fn read_stopwords(index_path: &Path) -> Vec<String> {
    let path = index_path.join(STOPWORDS_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => content.split_whitespace().map(String::from).collect(),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no stopwords file, continuing without one");
            Vec::new()
        }
    }
}
