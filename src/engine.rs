use crate::document::{compute_average_rating, Document, DocumentData, DocumentStatus, DocumentStore};
use crate::error::Result;
use crate::index::{IndexStats, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::ranking::{find_all_documents, match_words, rank_documents, DocumentFilter};
use crate::stop_words::StopWords;
use crate::tokenizer::Tokenizer;

/// In-memory TF-IDF search server.
///
/// Adds take `&mut self` and queries take `&self`. Callers sharing one
/// server across threads wrap it in a lock.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    tokenizer: Tokenizer,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    /// Create a server with the given stop words
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::new(stop_words)?))
    }

    /// Create a server from space-separated stop words, e.g. `"и в на"`
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(text)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self {
            tokenizer: Tokenizer::new(stop_words),
            index: InvertedIndex::new(),
            documents: DocumentStore::new(),
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        self.tokenizer.stop_words()
    }

    /// Add a document
    ///
    /// The id and text are validated before anything is written, so a
    /// rejected document leaves the server unchanged.
    pub fn add_document(
        &mut self,
        document_id: i32,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let tokens = self
            .documents
            .check_new_id(document_id)
            .and_then(|()| self.tokenizer.analyze(document))
            .map_err(|err| {
                tracing::debug!(document_id, error = %err, "document rejected");
                err
            })?;

        let data = DocumentData {
            rating: compute_average_rating(ratings),
            status,
        };

        self.index.add_document(document_id, &tokens);
        self.documents.insert(document_id, data);

        tracing::debug!(
            document_id,
            tokens = tokens.len(),
            rating = data.rating,
            %status,
            "document added"
        );
        Ok(())
    }

    /// Top documents with status `ACTUAL`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Top documents with the given status
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by a runtime-selected filter
    pub fn find_top_documents_filtered(
        &self,
        raw_query: &str,
        filter: DocumentFilter,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |id, status, rating| {
            filter.matches(id, status, rating)
        })
    }

    /// Top documents accepted by `predicate(document_id, status, rating)`
    ///
    /// At most `MAX_RESULT_DOCUMENT_COUNT` documents are returned, by
    /// relevance descending and, for near-equal relevance, rating descending.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let matched = find_all_documents(&query, &self.index, &self.documents, predicate);
        let matched_count = matched.len();
        let top = rank_documents(matched);

        tracing::debug!(matched = matched_count, returned = top.len(), "top documents");
        Ok(top)
    }

    /// Plus words of the query present in the document, with its status
    ///
    /// The word list is empty if any minus word is present in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: i32,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self.documents.get(document_id)?.status;
        Ok((match_words(&query, &self.index, document_id), status))
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, self.tokenizer.stop_words())
    }

    /// Get total document count
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Id of the `position`-th added document
    pub fn document_id_at(&self, position: usize) -> Result<i32> {
        self.documents.id_at(position)
    }

    /// Ids in the order they were added
    pub fn document_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.documents.ids()
    }

    pub fn document_data(&self, document_id: i32) -> Result<DocumentData> {
        self.documents.get(document_id).copied()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
