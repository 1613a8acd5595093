use std::cmp::Ordering;
use std::collections::HashMap;

use okapi_core::{DocId, Document};

/// BM25 term-frequency saturation parameter.
const K1: f64 = 1.2;
/// BM25 length-normalisation parameter.
const B: f64 = 0.75;

/// A document's accumulated BM25 score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentScore {
    pub docid: DocId,
    pub score: f64,
}

/// Rank `documents` against already-tokenised `terms` with Okapi BM25.
///
/// Returns results sorted by score descending, ties broken by `docid`
/// ascending so output is deterministic for a frozen index. Empty `terms`,
/// an empty corpus, or an `avg_doc_length` of zero all yield an empty
/// result — the last case guards the division inside the BM25 formula.
#[tracing::instrument(skip(documents, terms), fields(term_count = terms.len(), doc_count = documents.len()))]
pub fn query(
    terms: &[String],
    documents: &HashMap<DocId, Document>,
    avg_doc_length: f64,
) -> Vec<DocumentScore> {
    if terms.is_empty() || documents.is_empty() || avg_doc_length == 0.0 {
        return Vec::new();
    }

    let total_docs = documents.len() as f64;
    let mut scores: HashMap<DocId, f64> = HashMap::new();

    for term in terms {
        let doc_freq = documents
            .values()
            .filter(|doc| doc.contains_term(term))
            .count() as f64;

        let idf = compute_idf(total_docs, doc_freq);

        for doc in documents.values() {
            let tf = doc.term_frequency(term);
            if tf == 0 {
                continue;
            }

            let contribution = compute_bm25(
                tf as f64,
                doc.total_term_count as f64,
                avg_doc_length,
                idf,
            );
            *scores.entry(doc.docid).or_insert(0.0) += contribution;
        }
    }

    let mut results: Vec<DocumentScore> = scores
        .into_iter()
        .map(|(docid, score)| DocumentScore { docid, score })
        .collect();

    results.sort_by(|a, b| match b.score.partial_cmp(&a.score) {
        Some(Ordering::Equal) | None => a.docid.cmp(&b.docid),
        Some(order) => order,
    });

    tracing::debug!(results = results.len(), "query complete");
    results
}

/// `ln( (N - df + 0.5) / (df + 0.5) + 1 )`, always non-negative.
fn compute_idf(total_docs: f64, doc_freq: f64) -> f64 {
    ((total_docs - doc_freq + 0.5) / (doc_freq + 0.5) + 1.0).ln()
}

fn compute_bm25(term_freq: f64, doc_length: f64, avg_doc_len: f64, idf: f64) -> f64 {
    let numerator = term_freq * (K1 + 1.0);
    let denominator = term_freq + K1 * (1.0 - B + B * doc_length / avg_doc_len);
    idf * (numerator / denominator)
}
