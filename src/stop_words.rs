use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Words that are never indexed and never treated as query terms.
///
/// Fixed at construction; empty strings are discarded and duplicates collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build from any collection of words, rejecting words with control characters.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Build from a single space-separated string, e.g. `"и в на"`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_duplicate_words_collapse() -> Result<()> {
        let stop_words = StopWords::new(["и", "", "в", "и", "на"])?;
        assert_eq!(stop_words.len(), 3);
        assert!(stop_words.contains("и"));
        assert!(!stop_words.contains(""));
        Ok(())
    }

    #[test]
    fn test_from_text() -> Result<()> {
        let stop_words = StopWords::from_text("  и в   на ")?;
        assert_eq!(stop_words.iter().collect::<Vec<_>>(), vec!["в", "и", "на"]);
        Ok(())
    }

    #[test]
    fn test_invalid_stop_word() {
        let err = StopWords::from_text("и в н\x12а").unwrap_err();
        assert_eq!(err, SearchError::InvalidStopWord("н\x12а".to_string()));
    }

    #[test]
    fn test_accepts_owned_strings() -> Result<()> {
        let words = vec!["a".to_string(), "the".to_string()];
        let stop_words = StopWords::new(&words)?;
        assert!(stop_words.contains("the"));
        Ok(())
    }
}
