//! In-memory inverted index.
//!
//! The index keeps three tables:
//!
//! - the inverted table, term -> (document -> term frequency), read by ranking;
//! - the forward table, document -> (term -> term frequency), used for removal
//!   in O(document size) and for exposing per-document profiles;
//! - the metadata table, document -> [`DocumentData`], whose key set is the
//!   set of live document ids.
//!
//! The inverted and forward tables are only ever changed together through
//! [`InvertedIndex::update_postings`]. The index holds no locks: concurrent
//! mutation must be serialized by the caller.

use std::collections::{BTreeMap, btree_map};
use std::iter::Copied;

use ahash::AHashMap;
use rayon::prelude::*;
use tracing::debug;

use crate::analysis::stop::StopWordSet;
use crate::analysis::tokenizer::{is_valid_term, split_into_words};
use crate::document::{DocumentData, DocumentId, DocumentStatus, Rating, compute_average_rating};
use crate::error::{Result, SearchError};
use crate::execution::ExecutionMode;

/// Term -> term frequency profile of a single document.
pub type TermFrequencies = BTreeMap<String, f64>;

/// Document -> term frequency postings of a single term.
pub type PostingList = BTreeMap<DocumentId, f64>;

static EMPTY_FREQUENCIES: TermFrequencies = BTreeMap::new();

enum PostingChange {
    Insert(TermFrequencies),
    Remove,
}

/// Inverted index over short text documents.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    stop_words: StopWordSet,
    postings: AHashMap<String, PostingList>,
    forward: BTreeMap<DocumentId, TermFrequencies>,
    documents: BTreeMap<DocumentId, DocumentData>,
}

impl InvertedIndex {
    /// Create an empty index filtering the given stop words.
    pub fn new(stop_words: StopWordSet) -> Self {
        InvertedIndex {
            stop_words,
            ..Default::default()
        }
    }

    /// Get the stop words filtered by this index.
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Index a document.
    ///
    /// Fails with [`SearchError::DuplicateOrInvalidId`] for a negative or known
    /// id, [`SearchError::InvalidTerm`] if a term contains a control character
    /// and [`SearchError::EmptyDocument`] if nothing is left after stop word
    /// removal or no ratings are given. A failed call leaves the index untouched.
    pub fn add(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        if id < 0 || self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateOrInvalidId(id));
        }

        let words = self.split_into_words_no_stop(text)?;
        if words.is_empty() {
            return Err(SearchError::empty_document(format!(
                "document {id} has no indexable terms"
            )));
        }
        let rating = compute_average_rating(ratings)?;

        let inv_word_count = 1.0 / words.len() as f64;
        let mut frequencies = TermFrequencies::new();
        for word in &words {
            *frequencies.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
        }

        debug!(
            target: "search_server",
            id,
            words = words.len(),
            terms = frequencies.len(),
            "indexing document"
        );

        self.documents.insert(
            id,
            DocumentData {
                rating,
                status,
                text: text.to_string(),
            },
        );
        self.update_postings(id, PostingChange::Insert(frequencies), ExecutionMode::Sequential);

        Ok(())
    }

    /// Remove a document. Unknown ids are ignored.
    ///
    /// In parallel mode the per-term posting removals run on rayon workers;
    /// the call returns once all of them are done.
    pub fn remove(&mut self, id: DocumentId, mode: ExecutionMode) {
        if self.documents.remove(&id).is_none() {
            return;
        }
        self.update_postings(id, PostingChange::Remove, mode);
        debug!(target: "search_server", id, ?mode, "removed document");
    }

    /// The only place that writes the inverted and forward tables.
    fn update_postings(&mut self, id: DocumentId, change: PostingChange, mode: ExecutionMode) {
        match change {
            PostingChange::Insert(frequencies) => {
                for (term, &frequency) in &frequencies {
                    self.postings
                        .entry(term.clone())
                        .or_default()
                        .insert(id, frequency);
                }
                self.forward.insert(id, frequencies);
            }
            PostingChange::Remove => {
                let Some(frequencies) = self.forward.remove(&id) else {
                    return;
                };

                // Detach the affected lists so workers own disjoint entries.
                let mut lists: Vec<(String, PostingList)> = frequencies
                    .keys()
                    .filter_map(|term| self.postings.remove_entry(term.as_str()))
                    .collect();

                match mode {
                    ExecutionMode::Sequential => lists.iter_mut().for_each(|(_, docs)| {
                        docs.remove(&id);
                    }),
                    ExecutionMode::Parallel => lists.par_iter_mut().for_each(|(_, docs)| {
                        docs.remove(&id);
                    }),
                }

                // Vocabulary that only this document used is dropped.
                for (term, docs) in lists {
                    if !docs.is_empty() {
                        self.postings.insert(term, docs);
                    }
                }
            }
        }
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_term(word) {
                return Err(SearchError::InvalidTerm(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// Term frequencies of a document, or an empty map for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.forward.get(&id).unwrap_or(&EMPTY_FREQUENCIES)
    }

    /// Postings of a term, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.postings.get(term)
    }

    /// Natural log of (document count / documents containing `term`).
    pub fn inverse_document_frequency(&self, term: &str) -> Option<f64> {
        self.postings(term)
            .map(|docs| (self.document_count() as f64 / docs.len() as f64).ln())
    }

    /// Whether the document contains the term.
    pub fn document_contains(&self, id: DocumentId, term: &str) -> bool {
        self.forward
            .get(&id)
            .is_some_and(|frequencies| frequencies.contains_key(term))
    }

    /// Metadata of a document.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Number of live documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Live document ids in ascending order.
    pub fn ids(&self) -> Copied<btree_map::Keys<'_, DocumentId, DocumentData>> {
        self.documents.keys().copied()
    }
}
