use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::Transactional;
use std::collections::HashSet;

use crate::store::keys;
use crate::store::{Store, StoreError};

/// A vocabulary word with its own review schedule and mastery state.
///
/// `level`, `score`, `incorrect_count` and the review dates are owned by the
/// review engine; content fields are edited through the manage API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub headword: String,
    pub translation: String,
    pub definition: Option<String>,
    pub examples: Vec<String>,
    pub part_of_speech: String,
    pub category: String,
    pub custom_category: Option<String>,
    pub level: u8,
    pub score: f64,
    pub incorrect_count: u32,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Word {
    /// A freshly created word enters the schedule immediately at level 1.
    pub fn new_scheduled(
        headword: String,
        translation: String,
        definition: Option<String>,
        examples: Vec<String>,
        part_of_speech: String,
        category: String,
        custom_category: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            headword,
            translation,
            definition,
            examples,
            part_of_speech,
            category,
            custom_category,
            level: 1,
            score: 0.0,
            incorrect_count: 0,
            next_review_date: now,
            last_reviewed_date: now,
            created_at: now,
            updated_at: now,
        }
    }
}

fn due_index_key_for(word: &Word) -> String {
    keys::word_due_index_key(word.next_review_date.timestamp_millis(), &word.id)
}

fn map_tx_error(error: sled::transaction::TransactionError<StoreError>) -> StoreError {
    match error {
        sled::transaction::TransactionError::Abort(store_error) => store_error,
        sled::transaction::TransactionError::Storage(storage_error) => {
            StoreError::Sled(storage_error)
        }
    }
}

impl Store {
    /// Inserts or replaces a word, keeping the due index in step with the
    /// word's `next_review_date`.
    pub fn upsert_word(&self, word: &Word) -> Result<(), StoreError> {
        let key = keys::word_key(&word.id);
        let value = Self::serialize(word)?;
        let next_due_key = due_index_key_for(word);

        (&self.words, &self.word_due_index)
            .transaction(|(tx_words, tx_due)| {
                if let Some(old_raw) = tx_words.get(key.as_bytes())? {
                    let old_word: Word = serde_json::from_slice(&old_raw).map_err(|error| {
                        sled::transaction::ConflictableTransactionError::Abort(
                            StoreError::Serialization(error),
                        )
                    })?;
                    tx_due.remove(due_index_key_for(&old_word).as_bytes())?;
                }

                tx_words.insert(key.as_bytes(), value.as_slice())?;
                tx_due.insert(next_due_key.as_bytes(), &[])?;

                Ok(())
            })
            .map_err(map_tx_error)?;

        // Maintain words_by_created_at; the key is derived from immutable
        // fields, so re-upserting the same word is idempotent.
        let idx_key =
            keys::words_by_created_at_key(word.created_at.timestamp_millis(), &word.id);
        self.words_by_created_at
            .insert(idx_key.as_bytes(), word.id.as_bytes())?;
        Ok(())
    }

    pub fn get_word(&self, word_id: &str) -> Result<Option<Word>, StoreError> {
        let key = keys::word_key(word_id);
        match self.words.get(key.as_bytes())? {
            Some(raw) => Ok(Some(Self::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Newest-first page of words via the created-at index, falling back to a
    /// full scan if the index has not been built yet.
    pub fn list_words(&self, limit: usize, offset: usize) -> Result<Vec<Word>, StoreError> {
        if self.words_by_created_at.len() > 0 {
            let mut words = Vec::new();
            let mut skipped = 0usize;
            for item in self.words_by_created_at.iter() {
                let (_, value) = item?;
                let word_id = String::from_utf8(value.to_vec()).unwrap_or_default();
                if skipped < offset {
                    skipped += 1;
                    continue;
                }
                if let Some(word) = self.get_word(&word_id)? {
                    words.push(word);
                }
                if words.len() >= limit {
                    break;
                }
            }
            return Ok(words);
        }

        let mut words = self.list_all_words()?;
        words.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(words.into_iter().skip(offset).take(limit).collect())
    }

    /// Full word set, unordered. Sampling source for repeat mode and stats.
    pub fn list_all_words(&self) -> Result<Vec<Word>, StoreError> {
        let mut words = Vec::new();
        for item in self.words.iter() {
            let (_, v) = item?;
            words.push(Self::deserialize::<Word>(&v)?);
        }
        Ok(words)
    }

    /// Words whose scheduled review date has arrived, earliest-due first.
    ///
    /// Scans the due index and cross-checks each hit against the current word
    /// state; stale index entries are skipped.
    pub fn due_words(&self, now: DateTime<Utc>) -> Result<Vec<Word>, StoreError> {
        let now_ms = now.timestamp_millis().max(0);
        let mut due = Vec::new();
        let mut seen_word_ids = HashSet::new();

        for item in self.word_due_index.iter() {
            let (key, _) = item?;
            let Some((due_ts_ms, word_id)) = keys::parse_due_index_key(&key) else {
                continue;
            };

            if due_ts_ms > now_ms {
                break;
            }

            if let Some(word) = self.get_word(&word_id)? {
                let word_due_ms = word.next_review_date.timestamp_millis().max(0);
                if word_due_ms == due_ts_ms && seen_word_ids.insert(word_id) {
                    due.push(word);
                }
            }
        }

        Ok(due)
    }

    /// Removes a word and both of its index entries. Deleting an unknown id
    /// is a [`StoreError::NotFound`].
    pub fn delete_word(&self, word_id: &str) -> Result<(), StoreError> {
        let key = keys::word_key(word_id);

        let removed = (&self.words, &self.word_due_index)
            .transaction(|(tx_words, tx_due)| {
                let removed = tx_words.remove(key.as_bytes())?;
                if let Some(raw) = &removed {
                    let old_word: Word = serde_json::from_slice(raw).map_err(|error| {
                        sled::transaction::ConflictableTransactionError::Abort(
                            StoreError::Serialization(error),
                        )
                    })?;
                    tx_due.remove(due_index_key_for(&old_word).as_bytes())?;
                }
                Ok(removed)
            })
            .map_err(map_tx_error)?;

        let Some(raw) = removed else {
            return Err(StoreError::NotFound {
                entity: "word".to_string(),
                key: word_id.to_string(),
            });
        };

        // A stale created-at entry would shift pagination offsets, so this
        // removal must not fail silently.
        let old_word: Word = Self::deserialize(&raw)?;
        let idx_key =
            keys::words_by_created_at_key(old_word.created_at.timestamp_millis(), word_id);
        self.words_by_created_at.remove(idx_key.as_bytes())?;

        Ok(())
    }

    pub fn count_words(&self) -> Result<u64, StoreError> {
        Ok(self.words.len() as u64)
    }

    /// Word counts per mastery level 1..=5.
    pub fn count_words_by_level(&self) -> Result<[u64; 5], StoreError> {
        let mut counts = [0u64; 5];
        for item in self.words.iter() {
            let (_, v) = item?;
            let word: Word = Self::deserialize(&v)?;
            let idx = word.level.clamp(1, 5) as usize - 1;
            counts[idx] += 1;
        }
        Ok(counts)
    }

    /// Lowercased headwords of every stored word, used for import dedup.
    ///
    /// Full scan; acceptable at single-learner vocabulary sizes.
    pub fn existing_headwords(&self) -> Result<HashSet<String>, StoreError> {
        let mut headwords = HashSet::new();
        for item in self.words.iter() {
            let (_, v) = item?;
            let word: Word = Self::deserialize(&v)?;
            headwords.insert(word.headword.to_lowercase());
        }
        Ok(headwords)
    }
}
