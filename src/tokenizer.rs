use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;

/// Split text into words on single spaces, dropping empty fragments.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it holds no control characters (U+0000..U+001F).
pub fn is_valid_word(text: &str) -> bool {
    !text.chars().any(|c| c < ' ')
}

/// Turns document text into the sequence of indexable terms.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Remove stop words
    fn stopword_filter<'a>(&self, tokens: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        tokens.filter(|t| !self.stop_words.contains(t)).collect()
    }

    /// Full analysis pipeline: validate the whole text, split, drop stop words.
    ///
    /// Order is preserved and repeated words are kept, so the result length
    /// is the document's indexed token count.
    pub fn analyze<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        if !is_valid_word(text) {
            return Err(SearchError::InvalidCharacter(text.to_string()));
        }
        Ok(self.stopword_filter(split_into_words(text)))
    }
}
