//! Index module.
//!
//! Holds the in-memory inverted index: term postings, per-document term
//! frequency profiles and document metadata.

pub mod inverted;

// Re-export commonly used types
pub use inverted::{InvertedIndex, TermFrequencies};
