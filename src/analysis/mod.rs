//! Text analysis for the search engine.
//!
//! Text is split on ASCII spaces by the [`tokenizer`] and filtered through a
//! [`StopWordSet`]. There is no stemming or case folding: a term is exactly
//! the byte sequence between spaces.

pub mod stop;
pub mod tokenizer;

// Re-export commonly used types
pub use stop::StopWordSet;
pub use tokenizer::{is_valid_term, split_into_words};
