use axum::extract::State;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(level_counts))
        .route("/progress", get(progress))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelCount {
    level: u8,
    count: u64,
}

async fn level_counts(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let counts = state.store().count_words_by_level()?;
    let result: Vec<LevelCount> = counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| LevelCount {
            level: idx as u8 + 1,
            count,
        })
        .collect();
    Ok(ok(result))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressEntry {
    headword: String,
    translation: String,
    part_of_speech: String,
    level: u8,
    score: f64,
    last_reviewed_date: DateTime<Utc>,
}

async fn progress(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let words = state.store().list_all_words()?;
    let result: Vec<ProgressEntry> = words
        .into_iter()
        .map(|w| ProgressEntry {
            headword: w.headword,
            translation: w.translation,
            part_of_speech: w.part_of_speech,
            level: w.level,
            score: w.score,
            last_reviewed_date: w.last_reviewed_date,
        })
        .collect();
    Ok(ok(result))
}
