use serde::Serialize;
use std::collections::BTreeMap;

/// Postings for one term: document id -> term frequency.
pub type Postings = BTreeMap<i32, f64>;

/// Inverted index: term -> documents containing it, weighted by term frequency.
///
/// A term is present only while at least one document contains it, so every
/// postings map is non-empty.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    index: BTreeMap<String, Postings>,
    doc_count: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's analyzed tokens to the index.
    ///
    /// Each occurrence contributes `1 / tokens.len()` to the term's weight, so
    /// the weights of one document sum to 1. A document without tokens is
    /// counted but adds no postings.
    pub fn add_document(&mut self, doc_id: i32, tokens: &[&str]) {
        let mut frequencies: BTreeMap<&str, f64> = BTreeMap::new();
        if !tokens.is_empty() {
            let inv_word_count = 1.0 / tokens.len() as f64;
            for &token in tokens {
                *frequencies.entry(token).or_insert(0.0) += inv_word_count;
            }
        }

        for (term, tf) in frequencies {
            self.index
                .entry(term.to_string())
                .or_default()
                .insert(doc_id, tf);
        }

        self.doc_count += 1;
    }

    /// Get the postings of a term
    pub fn postings(&self, term: &str) -> Option<&Postings> {
        self.index.get(term)
    }

    /// Whether `term` occurs in document `doc_id`
    pub fn contains(&self, term: &str, doc_id: i32) -> bool {
        self.index
            .get(term)
            .map_or(false, |postings| postings.contains_key(&doc_id))
    }

    pub fn term_frequency(&self, term: &str, doc_id: i32) -> Option<f64> {
        self.index.get(term)?.get(&doc_id).copied()
    }

    /// Get number of documents containing a term (for IDF calculation)
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.index.get(term).map_or(0, BTreeMap::len)
    }

    /// Inverse document frequency, `ln(N / df)`. `None` for unknown terms.
    pub fn inverse_document_frequency(&self, term: &str) -> Option<f64> {
        let doc_frequency = self.doc_frequency(term);
        if doc_frequency == 0 {
            return None;
        }
        Some((self.doc_count as f64 / doc_frequency as f64).ln())
    }

    /// Get total number of indexed documents, including those with no terms
    pub fn total_documents(&self) -> usize {
        self.doc_count
    }

    pub fn total_terms(&self) -> usize {
        self.index.len()
    }

    /// All indexed terms in lexicographic order
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.doc_count,
            total_terms: self.index.len(),
            avg_docs_per_term: if self.index.is_empty() {
                0.0
            } else {
                self.index.values().map(BTreeMap::len).sum::<usize>() as f64
                    / self.index.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub avg_docs_per_term: f64,
}
