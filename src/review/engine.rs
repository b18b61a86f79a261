use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::review::leveling::{apply_session, ReviewState};
use crate::review::session::SessionResult;
use crate::store::{Store, StoreError};

/// Aggregate outcome of one end-of-session batch submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub updated: u64,
    pub skipped_missing: u64,
    pub rejected_invalid: u64,
}

/// Applies the leveling rule to every word in a session batch, in session
/// order, and persists the new states.
///
/// A word that no longer exists is skipped and counted, never aborting the
/// rest of the batch; only store failures propagate as a hard error.
pub fn submit_session(
    store: &Store,
    results: &[SessionResult],
    now: DateTime<Utc>,
) -> Result<BatchSummary, StoreError> {
    let mut summary = BatchSummary::default();

    for result in results {
        // Re-read right before computing so a concurrent edit cannot be
        // silently overwritten with stale level/score values.
        let Some(mut word) = store.get_word(&result.word_id)? else {
            tracing::warn!(
                word_id = %result.word_id,
                "Word missing during session submit, skipping"
            );
            summary.skipped_missing += 1;
            continue;
        };

        let outcome = apply_session(
            ReviewState {
                level: word.level,
                score: word.score,
                incorrect_count: word.incorrect_count,
            },
            result.points,
            now,
        );

        word.level = outcome.level;
        word.score = outcome.score;
        word.incorrect_count = outcome.incorrect_count;
        word.next_review_date = outcome.next_review_date;
        word.last_reviewed_date = outcome.last_reviewed_date;
        word.updated_at = now;

        store.upsert_word(&word)?;
        summary.updated += 1;

        tracing::debug!(
            word_id = %word.id,
            level = word.level,
            score = word.score,
            points = result.points,
            "Applied session result"
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use tempfile::tempdir;

    use crate::store::operations::words::Word;
    use crate::store::Store;

    use super::*;

    fn seed_word(store: &Store, id: &str, level: u8, score: f64, incorrect_count: u32) {
        let now = Utc::now();
        store
            .upsert_word(&Word {
                id: id.to_string(),
                headword: format!("word-{id}"),
                translation: "คำ".to_string(),
                definition: None,
                examples: vec!["One.".to_string(), "Two.".to_string()],
                part_of_speech: "noun".to_string(),
                category: "general".to_string(),
                custom_category: None,
                level,
                score,
                incorrect_count,
                next_review_date: now,
                last_reviewed_date: now,
                created_at: now,
                updated_at: now,
            })
            .unwrap();
    }

    fn result(word_id: &str, points: f64) -> SessionResult {
        SessionResult {
            word_id: word_id.to_string(),
            points,
        }
    }

    #[test]
    fn batch_applies_leveling_per_word() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("engine.sled").to_str().unwrap()).unwrap();
        seed_word(&store, "w1", 2, 4.0, 0);
        seed_word(&store, "w2", 3, 0.0, 0);

        let now = Utc::now();
        let summary =
            submit_session(&store, &[result("w1", 3.0), result("w2", 2.0)], now).unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.skipped_missing, 0);

        let w1 = store.get_word("w1").unwrap().unwrap();
        assert_eq!(w1.level, 3);
        assert_eq!(w1.score, 0.0);
        assert_eq!(w1.next_review_date, now + Duration::days(7));
        assert_eq!(w1.last_reviewed_date, now);

        let w2 = store.get_word("w2").unwrap().unwrap();
        assert_eq!(w2.level, 3);
        assert_eq!(w2.score, 2.0);
    }

    #[test]
    fn missing_word_is_skipped_without_aborting_batch() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("engine-skip.sled").to_str().unwrap()).unwrap();
        seed_word(&store, "w1", 1, 0.0, 0);
        seed_word(&store, "w3", 1, 5.0, 0);

        let summary = submit_session(
            &store,
            &[result("w1", 1.0), result("ghost", 2.0), result("w3", 1.0)],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.skipped_missing, 1);
        assert_eq!(store.get_word("w1").unwrap().unwrap().score, 1.0);
        assert_eq!(store.get_word("w3").unwrap().unwrap().level, 2);
    }

    #[test]
    fn weak_result_increments_incorrect_count() {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("engine-weak.sled").to_str().unwrap()).unwrap();
        seed_word(&store, "w1", 2, 0.5, 0);

        submit_session(&store, &[result("w1", 0.0)], Utc::now()).unwrap();

        let w1 = store.get_word("w1").unwrap().unwrap();
        assert_eq!(w1.level, 2);
        assert_eq!(w1.incorrect_count, 1);
        assert_eq!(w1.score, 0.5);
    }
}
