//! Search engine façade.
//!
//! [`SearchEngine`] ties the inverted index, the query parser and the ranker
//! together. Reads take `&self` and may run from many threads at once; writes
//! take `&mut self`, so overlapping mutation is ruled out by the borrow checker
//! rather than by internal locks.

use std::collections::btree_map;
use std::iter::Copied;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::stop::StopWordSet;
use crate::config::SearchEngineConfig;
use crate::document::{Document, DocumentData, DocumentId, DocumentStatus, Rating};
use crate::error::{Result, SearchError};
use crate::execution::ExecutionMode;
use crate::index::{InvertedIndex, TermFrequencies};
use crate::query::{Query, QueryParser};
use crate::search::ranker::{DocumentPredicate, Ranker};

/// Result of matching a query against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMatch {
    /// Require terms found in the document, sorted and deduplicated.
    /// Empty when the document contains an exclude term.
    pub terms: Vec<String>,
    pub status: DocumentStatus,
}

/// An embeddable TF-IDF search engine.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    index: InvertedIndex,
    config: SearchEngineConfig,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl SearchEngine {
    /// Create an engine with the default configuration.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWordSet::new(stop_words)?, SearchEngineConfig::default())
    }

    /// Create an engine from space separated stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::with_config(StopWordSet::from_text(text)?, SearchEngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(stop_words: StopWordSet, config: SearchEngineConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool = match config.thread_pool_size {
            Some(size) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(size)
                    .thread_name(|i| format!("search-worker-{i}"))
                    .build()
                    .map_err(|e| {
                        SearchError::ThreadPool(format!("Failed to create thread pool: {e}"))
                    })?;
                Some(Arc::new(pool))
            }
            None => None,
        };

        Ok(SearchEngine {
            index: InvertedIndex::new(stop_words),
            config,
            thread_pool,
        })
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &SearchEngineConfig {
        &self.config
    }

    /// Get the stop words.
    pub fn stop_words(&self) -> &StopWordSet {
        self.index.stop_words()
    }

    /// Get the underlying index.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Index a document. See [`InvertedIndex::add`] for the failure modes.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        self.index.add(id, text, status, ratings)
    }

    /// Top documents with status [`DocumentStatus::Active`], ranked sequentially.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(ExecutionMode::Sequential, raw_query, DocumentStatus::Active)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_admitted(mode, raw_query, &status)
    }

    /// Top documents admitted by `predicate(id, status, rating)`.
    ///
    /// Exclude terms veto documents regardless of the predicate.
    pub fn find_top_documents_with<F>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
    {
        self.find_top_admitted(mode, raw_query, &predicate)
    }

    fn find_top_admitted<P>(&self, mode: ExecutionMode, raw_query: &str, predicate: &P) -> Result<Vec<Document>>
    where
        P: DocumentPredicate + ?Sized,
    {
        let query = self.parse_query(raw_query)?;
        let ranker = Ranker::new(&self.index, &self.config);
        Ok(self.install(mode, || ranker.find_top(&query, predicate, mode)))
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Indexed document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.ids()
    }

    /// Metadata of a document.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentData> {
        self.index.document(id)
    }

    /// Require terms of `raw_query` present in document `id`, matched sequentially.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<DocumentMatch> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, id)
    }

    /// Match a query against one document.
    ///
    /// Fails with [`SearchError::UnknownDocument`] for an unknown id. A
    /// document holding any exclude term yields an empty term list.
    pub fn match_document_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<DocumentMatch> {
        let query = self.parse_query(raw_query)?;
        let status = self
            .index
            .document(id)
            .ok_or(SearchError::UnknownDocument(id))?
            .status;

        let terms = match mode {
            ExecutionMode::Sequential => self.match_sequential(&query, id),
            ExecutionMode::Parallel => self.install(mode, || self.match_parallel(&query, id)),
        };

        Ok(DocumentMatch {
            terms: terms.into_iter().map(str::to_string).collect(),
            status,
        })
    }

    fn match_sequential<'q>(&self, query: &Query<'q>, id: DocumentId) -> Vec<&'q str> {
        let in_document = |term: &str| {
            self.index
                .postings(term)
                .is_some_and(|docs| docs.contains_key(&id))
        };

        if query.exclude.iter().any(|term| in_document(*term)) {
            return Vec::new();
        }
        query
            .require
            .iter()
            .copied()
            .filter(|term| in_document(*term))
            .collect()
    }

    fn match_parallel<'q>(&self, query: &Query<'q>, id: DocumentId) -> Vec<&'q str> {
        if query
            .exclude
            .par_iter()
            .any(|term| self.index.document_contains(id, term))
        {
            return Vec::new();
        }

        let mut terms: Vec<&'q str> = query
            .require
            .par_iter()
            .copied()
            .filter(|term| self.index.document_contains(id, term))
            .collect();
        terms.par_sort_unstable();
        terms.dedup();
        terms
    }

    /// Remove a document sequentially. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.remove_document_with(ExecutionMode::Sequential, id);
    }

    /// Remove a document, fanning per-term removal out in parallel mode.
    pub fn remove_document_with(&mut self, mode: ExecutionMode, id: DocumentId) {
        let index = &mut self.index;
        match (&self.thread_pool, mode) {
            (Some(pool), ExecutionMode::Parallel) => pool.install(|| index.remove(id, mode)),
            _ => index.remove(id, mode),
        }
    }

    /// Term frequencies of a document, or an empty map for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &TermFrequencies {
        self.index.word_frequencies(id)
    }

    fn parse_query<'q>(&self, raw_query: &'q str) -> Result<Query<'q>> {
        QueryParser::new(self.index.stop_words()).parse(raw_query)
    }

    /// Run `op` inside the dedicated pool when parallel work was requested.
    pub(crate) fn install<R, OP>(&self, mode: ExecutionMode, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match (&self.thread_pool, mode) {
            (Some(pool), ExecutionMode::Parallel) => pool.install(op),
            _ => op(),
        }
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = DocumentId;
    type IntoIter = Copied<btree_map::Keys<'a, DocumentId, DocumentData>>;

    fn into_iter(self) -> Self::IntoIter {
        self.index.ids()
    }
}
