use crate::document::{Document, DocumentStatus, DocumentStore};
use crate::index::InvertedIndex;
use crate::query::Query;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Upper bound on the number of documents a top-documents query returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are tied and ordered by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// A filter chosen at runtime, for callers that cannot pass a closure.
#[derive(Debug, Clone, Copy)]
pub enum DocumentFilter {
    /// Keep documents with exactly this status
    Status(DocumentStatus),
    /// Keep documents accepted by the function, given `(id, status, rating)`
    Predicate(fn(i32, DocumentStatus, i32) -> bool),
    /// Keep everything
    Always,
}

impl DocumentFilter {
    pub fn matches(&self, document_id: i32, status: DocumentStatus, rating: i32) -> bool {
        match self {
            DocumentFilter::Status(wanted) => *wanted == status,
            DocumentFilter::Predicate(predicate) => predicate(document_id, status, rating),
            DocumentFilter::Always => true,
        }
    }
}

impl Default for DocumentFilter {
    fn default() -> Self {
        DocumentFilter::Status(DocumentStatus::Actual)
    }
}

impl From<DocumentStatus> for DocumentFilter {
    fn from(status: DocumentStatus) -> Self {
        DocumentFilter::Status(status)
    }
}

/// Score every document matching the query and accepted by `predicate`.
///
/// Relevance is the sum of `tf * idf` over the plus words a document holds.
/// A document holding any minus word is dropped whatever its score.
/// Results come back in ascending id order.
pub fn find_all_documents<P>(
    query: &Query,
    index: &InvertedIndex,
    store: &DocumentStore,
    predicate: P,
) -> Vec<Document>
where
    P: Fn(i32, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: BTreeMap<i32, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let (Some(postings), Some(idf)) =
            (index.postings(word), index.inverse_document_frequency(word))
        else {
            continue;
        };
        for (&document_id, &tf) in postings {
            let Ok(data) = store.get(document_id) else {
                continue;
            };
            if predicate(document_id, data.status, data.rating) {
                *document_to_relevance.entry(document_id).or_insert(0.0) += tf * idf;
            }
        }
    }

    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for document_id in postings.keys() {
                document_to_relevance.remove(document_id);
            }
        }
    }

    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            store
                .get(id)
                .ok()
                .map(|data| Document::new(id, relevance, data.rating))
        })
        .collect()
}

/// Order by relevance descending, with near-equal relevances by rating descending.
///
/// `compare_documents` is not transitive, so it cannot drive `sort_by`.
/// Documents are first sorted by relevance alone, then an insertion pass
/// with `compare_documents` leaves every neighbouring pair in order.
/// Both passes are stable, so full ties keep ascending id order.
pub fn sort_documents(documents: &mut [Document]) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));

    for i in 1..documents.len() {
        let mut j = i;
        while j > 0 && compare_documents(&documents[j - 1], &documents[j]) == Ordering::Greater {
            documents.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Compare two ranked documents the way `sort_documents` orders neighbours.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

/// Sort and keep at most `MAX_RESULT_DOCUMENT_COUNT` documents.
pub fn rank_documents(mut documents: Vec<Document>) -> Vec<Document> {
    sort_documents(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}

/// Plus words of `query` found in `document_id`, or nothing if a minus word is found.
pub fn match_words(query: &Query, index: &InvertedIndex, document_id: i32) -> Vec<String> {
    if query
        .minus_words
        .iter()
        .any(|word| index.contains(word, document_id))
    {
        return Vec::new();
    }
    query
        .plus_words
        .iter()
        .filter(|word| index.contains(word, document_id))
        .cloned()
        .collect()
}
