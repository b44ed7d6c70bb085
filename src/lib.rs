// Re-export main components
pub mod api;
pub mod corpus;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod ranking;
pub mod stop_words;
pub mod tokenizer;

// Re-export commonly used types
pub use document::{Document, DocumentData, DocumentStatus};
pub use engine::SearchServer;
pub use error::{Result, SearchError};
pub use index::{IndexStats, InvertedIndex};
pub use query::Query;
pub use ranking::{DocumentFilter, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use stop_words::StopWords;
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
