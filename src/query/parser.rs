//! Query parser for converting raw query strings to require/exclude term sets.
//!
//! Syntax is a space separated list of terms. A term prefixed with `-` is an
//! exclude term: documents containing it are dropped from the results. Every
//! other term is a require term and contributes to relevance.
//!
//! # Examples
//!
//! ```
//! use search_server::analysis::stop::StopWordSet;
//! use search_server::query::QueryParser;
//!
//! let stop_words = StopWordSet::from_text("the").unwrap();
//! let parser = QueryParser::new(&stop_words);
//!
//! let query = parser.parse("fluffy -cat the fluffy").unwrap();
//! assert_eq!(query.require.iter().copied().collect::<Vec<_>>(), vec!["fluffy"]);
//! assert_eq!(query.exclude.iter().copied().collect::<Vec<_>>(), vec!["cat"]);
//! ```

use std::collections::BTreeSet;

use crate::analysis::stop::StopWordSet;
use crate::analysis::tokenizer::{is_valid_term, split_into_words};
use crate::error::{Result, SearchError};

/// A parsed query borrowing its terms from the raw query string.
///
/// Both sets are deduplicated. A term may legally appear in both; exclusion
/// then takes precedence during ranking and matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    /// Terms that contribute to relevance.
    pub require: BTreeSet<&'q str>,
    /// Terms that veto any document containing them.
    pub exclude: BTreeSet<&'q str>,
}

impl Query<'_> {
    /// Check if the query has no terms left after stop word removal.
    pub fn is_empty(&self) -> bool {
        self.require.is_empty() && self.exclude.is_empty()
    }
}

/// Parses raw query strings, dropping stop words.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    stop_words: &'a StopWordSet,
}

impl<'a> QueryParser<'a> {
    /// Create a parser filtering the given stop words.
    pub fn new(stop_words: &'a StopWordSet) -> Self {
        QueryParser { stop_words }
    }

    /// Parse a raw query string.
    ///
    /// Fails with [`SearchError::InvalidQuery`] for a bare `-` or a `--`
    /// prefix, and with [`SearchError::InvalidTerm`] for a term holding a
    /// control character.
    pub fn parse<'q>(&self, raw_query: &'q str) -> Result<Query<'q>> {
        let mut query = Query::default();

        for token in split_into_words(raw_query) {
            let (term, is_exclude) = match token.strip_prefix('-') {
                Some(rest) => (rest, true),
                None => (token, false),
            };

            if term.is_empty() || term.starts_with('-') {
                return Err(SearchError::invalid_query(format!(
                    "query word {token:?} is invalid"
                )));
            }
            if !is_valid_term(term) {
                return Err(SearchError::InvalidTerm(term.to_string()));
            }
            if self.stop_words.contains(term) {
                continue;
            }

            if is_exclude {
                query.exclude.insert(term);
            } else {
                query.require.insert(term);
            }
        }

        Ok(query)
    }
}
