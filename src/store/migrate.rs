use crate::store::keys;
use crate::store::operations::words::Word;
use crate::store::{Store, StoreError};

const VERSION_KEY: &str = "_meta:version";

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![
        ("001_initial", m001_initial),
        ("002_word_due_index", m002_word_due_index),
    ]
}

/// Runs every migration that has not been applied yet.
///
/// Each migration must be idempotent: the process can crash after `func()`
/// succeeds but before `set_version()`, in which case it runs again on
/// restart. The version is persisted after each successful migration and
/// `set_version` refuses downgrades.
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    let all = migrations();

    for (index, (name, func)) in all.iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.meta.get(VERSION_KEY.as_bytes())? {
        Some(raw) => {
            if raw.len() == 4 {
                let bytes: [u8; 4] = raw.as_ref().try_into().unwrap_or([0; 4]);
                Ok(u32::from_be_bytes(bytes))
            } else {
                Ok(0)
            }
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .meta
        .insert(VERSION_KEY.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

fn m001_initial(_store: &Store) -> Result<(), StoreError> {
    Ok(())
}

/// Rebuilds the due index from the words tree. Idempotent: keys are derived
/// from word state, so re-inserting is a no-op.
fn m002_word_due_index(store: &Store) -> Result<(), StoreError> {
    for item in store.words.iter() {
        let (_, value) = item?;
        let word: Word = Store::deserialize(&value)?;
        let due_key =
            keys::word_due_index_key(word.next_review_date.timestamp_millis(), &word.id);
        store.word_due_index.insert(due_key.as_bytes(), &[])?;
    }
    Ok(())
}
