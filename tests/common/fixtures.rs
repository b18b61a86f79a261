#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use skyvocab_backend::state::AppState;
use skyvocab_backend::store::operations::words::Word;

pub fn word_payload(headword: &str) -> Value {
    json!({
        "headword": headword,
        "translation": "คำแปล",
        "definition": "a sample definition",
        "examples": [
            format!("First sentence using {headword}."),
            format!("Second sentence using {headword}."),
        ],
        "partOfSpeech": "noun",
        "category": "general",
        "customCategory": null,
    })
}

pub fn bulk_entry(headword: &str) -> Value {
    json!({
        "headword": headword,
        "translation": "คำแปล",
        "example1": format!("First sentence using {headword}."),
        "example2": format!("Second sentence using {headword}."),
        "partOfSpeech": "noun",
        "category": "general",
    })
}

/// Stores a word directly with full control over its review state, bypassing
/// the HTTP layer.
pub fn seed_word(
    state: &AppState,
    id: &str,
    headword: &str,
    level: u8,
    score: f64,
    incorrect_count: u32,
    due_in: Duration,
) -> Word {
    let now = Utc::now();
    let word = Word {
        id: id.to_string(),
        headword: headword.to_string(),
        translation: "คำแปล".to_string(),
        definition: None,
        examples: vec![
            format!("First sentence using {headword}."),
            format!("Second sentence using {headword}."),
        ],
        part_of_speech: "noun".to_string(),
        category: "general".to_string(),
        custom_category: None,
        level,
        score,
        incorrect_count,
        next_review_date: now + due_in,
        last_reviewed_date: now,
        created_at: now,
        updated_at: now,
    };
    state.store().upsert_word(&word).expect("seed word");
    word
}

pub fn reload(state: &AppState, id: &str) -> Word {
    state
        .store()
        .get_word(id)
        .expect("get word")
        .expect("word exists")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub fn parse_date(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("date string")
        .parse::<DateTime<Utc>>()
        .expect("rfc3339 date")
}
