//! # search-server
//!
//! An embeddable full-text search engine for short text documents.
//!
//! ## Features
//!
//! - Inverted index with add/remove kept consistent across its tables
//! - TF-IDF relevance with require (`term`) and exclude (`-term`) queries
//! - Deterministic top-K ordering with rating tie-breaks
//! - Sequential and parallel execution of ranking, matching and removal
//! - Sharded concurrent accumulator for parallel ranking
//!
//! ## Example
//!
//! ```
//! use search_server::prelude::*;
//!
//! let mut engine = SearchEngine::from_stop_words_text("and in on").unwrap();
//! engine
//!     .add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7])
//!     .unwrap();
//! engine
//!     .add_document(2, "curly dog and fancy collar", DocumentStatus::Active, &[1, 2, 3])
//!     .unwrap();
//!
//! let found = engine.find_top_documents("curly -collar").unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, 1);
//!
//! let parallel = engine
//!     .find_top_documents_by_status(ExecutionMode::Parallel, "curly -collar", DocumentStatus::Active)
//!     .unwrap();
//! assert_eq!(found, parallel);
//! ```

pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod query;
pub mod search;

pub mod prelude {
    pub use crate::config::SearchEngineConfig;
    pub use crate::document::{Document, DocumentId, DocumentStatus, Rating};
    pub use crate::error::{Result, SearchError};
    pub use crate::execution::ExecutionMode;
    pub use crate::search::{DocumentMatch, SearchEngine};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
