//! Duplicate document removal.
//!
//! Two documents are duplicates when they index exactly the same set of terms;
//! term frequencies and word order are ignored. The document with the lowest
//! id is kept.

use ahash::AHashSet;
use tracing::info;

use crate::document::DocumentId;
use crate::search::engine::SearchEngine;

/// Remove every document whose term set repeats one of a lower id.
///
/// Returns the removed ids in ascending order.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocumentId> {
    let duplicates: Vec<DocumentId> = {
        let reader: &SearchEngine = engine;
        let mut seen: AHashSet<Vec<&str>> = AHashSet::new();
        let found: Vec<DocumentId> = reader
            .document_ids()
            .filter(|&id| {
                let terms = reader
                    .word_frequencies(id)
                    .keys()
                    .map(String::as_str)
                    .collect();
                !seen.insert(terms)
            })
            .collect();
        found
    };

    for &id in &duplicates {
        info!(target: "search_server", id, "Found duplicate document");
        engine.remove_document(id);
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::document::DocumentStatus;

    #[test]
    fn test_remove_duplicates() {
        let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
        let documents = [
            (1, "funny pet and nasty rat"),
            (2, "funny pet with curly hair"),
            // same terms as 2
            (3, "funny pet with curly hair"),
            // differs from 2 only by stop words
            (4, "funny pet and curly hair"),
            // same term set as 1, different frequencies
            (5, "funny funny pet and nasty nasty rat"),
            (6, "funny pet and not very nasty rat"),
            // same term set as 6, different order
            (7, "very nasty rat and not very funny pet"),
            (8, "pet with rat and rat and rat"),
            // shares terms with 1 and 2 but matches neither
            (9, "nasty rat with curly hair"),
        ];
        for (id, text) in documents {
            engine
                .add_document(id, text, DocumentStatus::Active, &[1, 2])
                .unwrap();
        }

        let removed = remove_duplicates(&mut engine);

        assert_eq!(removed, vec![3, 4, 5, 7]);
        assert_eq!(engine.document_count(), 5);
        assert_eq!(
            engine.document_ids().collect::<Vec<_>>(),
            vec![1, 2, 6, 8, 9]
        );
        assert!(remove_duplicates(&mut engine).is_empty());
    }
}
