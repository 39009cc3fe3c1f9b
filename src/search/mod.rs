//! Ranking and the search engine façade.

pub mod accumulator;
pub mod batch;
pub mod duplicates;
pub mod engine;
pub mod ranker;

pub use self::accumulator::ConcurrentAccumulator;
pub use self::batch::{process_queries, process_queries_joined};
pub use self::duplicates::remove_duplicates;
pub use self::engine::{DocumentMatch, SearchEngine};
pub use self::ranker::{DocumentPredicate, Ranker, sort_by_relevance};
