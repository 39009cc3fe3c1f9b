//! Batch query dispatch.
//!
//! Runs many queries against one engine on rayon workers. Results keep the
//! order of the input queries.

use rayon::prelude::*;

use crate::document::Document;
use crate::error::Result;
use crate::execution::ExecutionMode;
use crate::search::engine::SearchEngine;

/// Run [`SearchEngine::find_top_documents`] for every query in parallel.
///
/// Fails if any query fails to parse.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    engine.install(ExecutionMode::Parallel, || {
        queries
            .par_iter()
            .map(|query| engine.find_top_documents(query.as_ref()))
            .collect()
    })
}

/// Like [`process_queries`], with all results flattened in query order.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(engine, queries)?
        .into_iter()
        .flatten()
        .collect())
}
