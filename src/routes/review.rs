use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::constants::MAX_SESSION_RESULTS;
use crate::response::{ok, AppError, JsonBody};
use crate::review::engine;
use crate::review::scoring::{score_points, QuizModality};
use crate::review::selector;
use crate::review::session::{RawSessionEntry, SessionAggregator};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/today", get(today_words))
        .route("/repeat", get(repeat_words))
        .route("/submit", post(submit_session))
        .route("/score", post(score_preview))
}

/// Today mode: every word whose scheduled review date has arrived,
/// earliest-due first. An empty list means nothing is due.
async fn today_words(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let words = state.store().due_words(Utc::now())?;
    Ok(ok(words))
}

/// Repeat mode: a stratified sample across mastery bands, independent of due
/// dates.
async fn repeat_words(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let all_words = state.store().list_all_words()?;
    let batch = selector::sample_repeat(&all_words, &mut rand::thread_rng());
    Ok(ok(batch))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitSessionRequest {
    results: Vec<RawSessionEntry>,
}

/// End-of-session batch submission, the only path that persists review
/// results. Invalid entries are rejected individually; missing words are
/// skipped by the engine; both are reported in the summary.
async fn submit_session(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SubmitSessionRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if req.results.len() > MAX_SESSION_RESULTS {
        return Err(AppError::payload_too_large(
            "Too many session results in one submission",
        ));
    }

    let mut aggregator = SessionAggregator::new();
    let mut rejected_invalid = 0u64;

    for entry in &req.results {
        match entry.validate() {
            Some((word_id, points)) => aggregator.record(&word_id, points),
            None => {
                tracing::warn!(?entry, "Rejected malformed session result entry");
                rejected_invalid += 1;
            }
        }
    }

    let results = aggregator.into_results();
    let mut summary = engine::submit_session(state.store(), &results, Utc::now())?;
    summary.rejected_invalid = rejected_invalid;

    tracing::info!(
        updated = summary.updated,
        skipped_missing = summary.skipped_missing,
        rejected_invalid = summary.rejected_invalid,
        "Session submitted"
    );

    Ok(ok(summary))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequest {
    modality: QuizModality,
    correct: bool,
}

/// Stateless point lookup for instant quiz feedback. Nothing is persisted
/// here; the end-of-session submission is the authoritative scoring path.
async fn score_preview(
    JsonBody(req): JsonBody<ScoreRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let points = score_points(req.modality, req.correct);
    Ok(ok(serde_json::json!({
        "modality": req.modality,
        "correct": req.correct,
        "points": points,
    })))
}
