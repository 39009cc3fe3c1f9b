//! Stop word set.
//!
//! Stop words are dropped from documents before indexing and from queries
//! before ranking. The set is built once and shared read-only afterwards.
//!
//! # Examples
//!
//! ```
//! use search_server::analysis::stop::StopWordSet;
//!
//! let stop_words = StopWordSet::from_text("in the").unwrap();
//! assert!(stop_words.contains("the"));
//! assert!(!stop_words.contains("cat"));
//! ```

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::tokenizer::{is_valid_term, split_into_words};
use crate::error::{Result, SearchError};

/// An immutable set of terms excluded from indexing and querying.
#[derive(Clone, Debug, Default)]
pub struct StopWordSet {
    words: Arc<AHashSet<String>>,
}

impl StopWordSet {
    /// Build a set from a collection of words.
    ///
    /// Empty words are discarded. Fails with [`SearchError::InvalidInput`] if
    /// any word contains a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_term(word) {
                return Err(SearchError::invalid_input(format!(
                    "stop word {word:?} contains a control character"
                )));
            }
            set.insert(word.to_string());
        }

        Ok(StopWordSet {
            words: Arc::new(set),
        })
    }

    /// Build a set from space separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    /// Check if a term is a stop word.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
