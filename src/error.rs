use thiserror::Error;

/// Errors produced by the search server.
///
/// Every fallible operation either succeeds completely or returns one of
/// these without touching the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("stop word {0:?} contains forbidden characters")]
    InvalidStopWord(String),

    #[error("invalid document id {id}: {reason}")]
    InvalidDocumentId { id: i32, reason: IdRejection },

    #[error("{0:?} contains forbidden characters")]
    InvalidCharacter(String),

    #[error("query is empty")]
    EmptyQuery,

    #[error("query word {0:?} is malformed")]
    MalformedQueryTerm(String),

    #[error("document {0} not found")]
    DocumentNotFound(i32),

    #[error("position {position} is out of range (document count is {count})")]
    PositionOutOfRange { position: usize, count: usize },
}

/// Why a document id was refused by `add_document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRejection {
    Negative,
    Duplicate,
}

impl std::fmt::Display for IdRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdRejection::Negative => f.write_str("id is negative"),
            IdRejection::Duplicate => f.write_str("id is already in use"),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
