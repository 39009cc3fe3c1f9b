//! Document records stored by the index and returned by ranked queries.
//!
//! # Examples
//!
//! ```
//! use search_server::document::{Document, compute_average_rating};
//!
//! let hit = Document::new(23, 0.5, compute_average_rating(&[1, 4, 8, 8]).unwrap());
//! assert_eq!(hit.to_string(), "{ document_id = 23, relevance = 0.5, rating = 5 }");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Identifier of an indexed document. Negative values are rejected on insert.
pub type DocumentId = i32;

/// Average user rating of a document.
pub type Rating = i32;

/// Moderation status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Visible to default queries.
    #[default]
    Active,
    /// Hidden by moderation.
    Banned,
    /// Kept but considered off-topic.
    Irrelevant,
    /// Waiting for removal review.
    RemovedForReview,
}

/// A ranked query hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: DocumentId,
    /// TF-IDF relevance for the query that produced this hit.
    pub relevance: f64,
    /// Average rating of the document.
    pub rating: Rating,
}

impl Document {
    pub fn new(id: DocumentId, relevance: f64, rating: Rating) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Per-document metadata kept by the inverted index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    /// Floor of the mean of the ratings supplied on insert.
    pub rating: Rating,
    pub status: DocumentStatus,
    /// Raw document text as given to `add`.
    pub text: String,
}

/// Floor of the arithmetic mean of `ratings`.
///
/// An empty list has no mean and is rejected with
/// [`SearchError::EmptyDocument`].
pub fn compute_average_rating(ratings: &[Rating]) -> Result<Rating> {
    if ratings.is_empty() {
        return Err(SearchError::empty_document("rating list is empty"));
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // The mean of i32 values always fits back into i32.
    Ok(sum.div_euclid(ratings.len() as i64) as Rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(compute_average_rating(&[1, 4, 8, 8]).unwrap(), 5);
        assert_eq!(compute_average_rating(&[7]).unwrap(), 7);
        assert_eq!(compute_average_rating(&[1, 2]).unwrap(), 1);
    }

    #[test]
    fn test_average_rating_floors_negative_means() {
        // -21 / 4 = -5.25
        assert_eq!(compute_average_rating(&[-1, -4, -8, -8]).unwrap(), -6);
        // -11 / 4 = -2.75
        assert_eq!(compute_average_rating(&[1, 4, -8, -8]).unwrap(), -3);
    }

    #[test]
    fn test_average_rating_does_not_overflow() {
        assert_eq!(
            compute_average_rating(&[i32::MAX, i32::MAX]).unwrap(),
            i32::MAX
        );
    }

    #[test]
    fn test_empty_ratings_rejected() {
        assert!(matches!(
            compute_average_rating(&[]),
            Err(SearchError::EmptyDocument(_))
        ));
    }

    #[test]
    fn test_document_display() {
        let doc = Document::new(1, 0.25, -3);
        assert_eq!(
            doc.to_string(),
            "{ document_id = 1, relevance = 0.25, rating = -3 }"
        );
    }
}
