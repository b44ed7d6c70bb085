use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// A parsed query: terms that score a document and terms that exclude it.
///
/// Both sets iterate in lexicographic order. A word given both with and
/// without `-` lands in both sets; exclusion wins when the query runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(text: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with('-') {
        return Err(SearchError::MalformedQueryTerm(text.to_string()));
    }
    if !is_valid_word(data) {
        return Err(SearchError::InvalidCharacter(text.to_string()));
    }
    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

/// Parse a raw query into plus and minus terms, dropping stop words.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut words = split_into_words(text).peekable();
    if words.peek().is_none() {
        return Err(SearchError::EmptyQuery);
    }

    let mut query = Query::default();
    for word in words {
        let query_word = parse_query_word(word, stop_words)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.insert(query_word.data.to_string());
        } else {
            query.plus_words.insert(query_word.data.to_string());
        }
    }

    tracing::trace!(
        plus = query.plus_words.len(),
        minus = query.minus_words.len(),
        "parsed query"
    );
    Ok(query)
}
