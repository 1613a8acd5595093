use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::docid::DocId;

/// One indexed file.
///
/// Plain record with getters/setters; the only behaviour beyond field
/// access is [`Document::contains_term`] and [`Document::term_frequency`].
/// `content_hash` defaults to an empty string and `indexed_at` is required
/// on deserialisation; readers of the index snapshot tolerate a missing
/// `content_hash` per the on-disk format's compatibility rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub docid: DocId,
    pub filepath: String,
    pub file_extension: String,
    pub total_term_count: u32,
    pub concordance: HashMap<String, u32>,
    pub indexed_at: i64,
    #[serde(default)]
    pub content_hash: String,
}

impl Document {
    pub fn new(
        docid: DocId,
        filepath: String,
        file_extension: String,
        concordance: HashMap<String, u32>,
        total_term_count: u32,
        indexed_at: i64,
        content_hash: String,
    ) -> Self {
        Self {
            docid,
            filepath,
            file_extension,
            total_term_count,
            concordance,
            indexed_at,
            content_hash,
        }
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.concordance.contains_key(term)
    }

    pub fn term_frequency(&self, term: &str) -> u32 {
        self.concordance.get(term).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut concordance = HashMap::new();
        concordance.insert("the".to_string(), 2);
        concordance.insert("fox".to_string(), 1);
        Document::new(
            DocId(1),
            "a.txt".to_string(),
            ".txt".to_string(),
            concordance,
            3,
            1_700_000_000,
            "deadbeef".to_string(),
        )
    }

    #[test]
    fn contains_term_reflects_concordance() {
        let doc = sample();
        assert!(doc.contains_term("fox"));
        assert!(!doc.contains_term("dog"));
    }

    #[test]
    fn term_frequency_defaults_to_zero() {
        let doc = sample();
        assert_eq!(doc.term_frequency("the"), 2);
        assert_eq!(doc.term_frequency("dog"), 0);
    }

    #[test]
    fn deserialises_missing_content_hash_as_empty() {
        let json = r#"{
            "docid": 5,
            "filepath": "b.txt",
            "file_extension": ".txt",
            "total_term_count": 1,
            "concordance": {"x": 1},
            "indexed_at": 0
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.content_hash, "");
        assert_eq!(doc.docid, DocId(5));
    }

    #[test]
    fn serialises_docid_as_plain_integer() {
        let doc = sample();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["docid"], 1);
    }
}
