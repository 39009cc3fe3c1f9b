//! TF-IDF ranking.
//!
//! Ranking runs in two phases. The require phase adds `tf * idf` of every
//! require term to each admitted document; the exclude phase then drops every
//! document holding an exclude term, whether or not it was admitted. In
//! parallel mode both phases fan out over rayon workers writing into a
//! [`ConcurrentAccumulator`], and the exclude phase starts only after the
//! require phase has fully completed.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::trace;

use crate::config::SearchEngineConfig;
use crate::document::{Document, DocumentId, DocumentStatus, Rating};
use crate::execution::ExecutionMode;
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::search::accumulator::ConcurrentAccumulator;

/// Decides whether a document may enter the ranking.
///
/// Implemented for [`DocumentStatus`] (status equality) and for closures
/// `Fn(DocumentId, DocumentStatus, Rating) -> bool`.
pub trait DocumentPredicate: Sync {
    fn admit(&self, id: DocumentId, status: DocumentStatus, rating: Rating) -> bool;
}

impl DocumentPredicate for DocumentStatus {
    fn admit(&self, _id: DocumentId, status: DocumentStatus, _rating: Rating) -> bool {
        *self == status
    }
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocumentId, DocumentStatus, Rating) -> bool + Sync,
{
    fn admit(&self, id: DocumentId, status: DocumentStatus, rating: Rating) -> bool {
        self(id, status, rating)
    }
}

/// Computes relevance of indexed documents for a parsed query.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    max_results: usize,
    relevance_epsilon: f64,
    accumulator_shards: usize,
}

impl<'a> Ranker<'a> {
    pub fn new(index: &'a InvertedIndex, config: &SearchEngineConfig) -> Self {
        Ranker {
            index,
            max_results: config.max_results,
            relevance_epsilon: config.relevance_epsilon,
            accumulator_shards: config.accumulator_shards,
        }
    }

    /// Rank the query and keep the best `max_results` documents.
    pub fn find_top<P>(&self, query: &Query<'_>, predicate: &P, mode: ExecutionMode) -> Vec<Document>
    where
        P: DocumentPredicate + ?Sized,
    {
        let mut documents = self.rank(query, predicate, mode);
        sort_by_relevance(&mut documents, self.relevance_epsilon);
        documents.truncate(self.max_results);
        documents
    }

    /// Every candidate of the query, in ascending id order.
    pub fn rank<P>(&self, query: &Query<'_>, predicate: &P, mode: ExecutionMode) -> Vec<Document>
    where
        P: DocumentPredicate + ?Sized,
    {
        let relevance = match mode {
            ExecutionMode::Sequential => self.accumulate_sequential(query, predicate),
            ExecutionMode::Parallel => self.accumulate_parallel(query, predicate),
        };

        trace!(
            target: "search_server",
            ?mode,
            require = query.require.len(),
            exclude = query.exclude.len(),
            candidates = relevance.len(),
            "ranked query"
        );

        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index
                    .document(id)
                    .map(|data| Document::new(id, relevance, data.rating))
            })
            .collect()
    }

    fn accumulate_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: DocumentPredicate + ?Sized,
    {
        let mut relevance = BTreeMap::new();

        for term in &query.require {
            self.for_each_admitted(term, predicate, |id, score| {
                *relevance.entry(id).or_insert(0.0) += score;
            });
        }

        for term in &query.exclude {
            if let Some(docs) = self.index.postings(term) {
                for id in docs.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
    }

    fn accumulate_parallel<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocumentId, f64>
    where
        P: DocumentPredicate + ?Sized,
    {
        let accumulator = ConcurrentAccumulator::new(self.accumulator_shards);

        query.require.par_iter().for_each(|term| {
            self.for_each_admitted(term, predicate, |id, score| accumulator.add(id, score));
        });

        // `for_each` returns once every require worker is done.
        query.exclude.par_iter().for_each(|term| {
            if let Some(docs) = self.index.postings(term) {
                for id in docs.keys() {
                    accumulator.erase(id);
                }
            }
        });

        accumulator.into_snapshot()
    }

    /// Call `sink(id, tf * idf)` for every admitted posting of `term`.
    fn for_each_admitted<P, F>(&self, term: &str, predicate: &P, mut sink: F)
    where
        P: DocumentPredicate + ?Sized,
        F: FnMut(DocumentId, f64),
    {
        let (Some(docs), Some(idf)) = (
            self.index.postings(term),
            self.index.inverse_document_frequency(term),
        ) else {
            return;
        };

        for (&id, &term_frequency) in docs {
            let Some(data) = self.index.document(id) else {
                continue;
            };
            if predicate.admit(id, data.status, data.rating) {
                sink(id, term_frequency * idf);
            }
        }
    }
}

/// Order documents by relevance descending, ties broken by rating descending.
///
/// Relevances closer than `epsilon` tie. Documents are grouped into runs that
/// lie within `epsilon` of the run's most relevant document, so every pair in
/// a run ties; each run is then ordered by rating descending and id ascending.
pub fn sort_by_relevance(documents: &mut [Document], epsilon: f64) {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let mut start = 0;
    while start < documents.len() {
        let anchor = documents[start].relevance;
        let end = documents[start + 1..]
            .iter()
            .position(|doc| anchor - doc.relevance >= epsilon)
            .map_or(documents.len(), |offset| start + 1 + offset);

        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        start = end;
    }
}
