use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_BULK_IMPORT_WORDS, MAX_PAGE_SIZE};
use crate::response::{created, ok, paginated, AppError, JsonBody};
use crate::state::AppState;
use crate::store::operations::words::Word;
use crate::validation;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_words).post(create_word))
        .route("/count", get(count_words))
        .route("/bulk", post(bulk_import))
        .route("/:id", get(get_word).put(update_word).delete(delete_word))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListWordsQuery {
    page: Option<u64>,
    per_page: Option<u64>,
}

impl ListWordsQuery {
    fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    fn per_page(&self) -> u64 {
        self.per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

async fn list_words(
    Query(query): Query<ListWordsQuery>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = query.page();
    let per_page = query.per_page();
    let offset = ((page - 1) * per_page) as usize;
    let limit = per_page as usize;

    let total = state.store().count_words()?;
    let items = state.store().list_words(limit, offset)?;
    Ok(paginated(items, total, page, per_page))
}

async fn count_words(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let total = state.store().count_words()?;
    Ok(ok(serde_json::json!({ "total": total })))
}

async fn get_word(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let word = state
        .store()
        .get_word(&id)?
        .ok_or_else(|| AppError::not_found("Word not found"))?;
    Ok(ok(word))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateWordRequest {
    headword: String,
    translation: String,
    definition: Option<String>,
    examples: Vec<String>,
    part_of_speech: String,
    category: String,
    custom_category: Option<String>,
}

fn validate_content(
    headword: &str,
    translation: &str,
    examples: &[String],
    part_of_speech: &str,
) -> Result<(), AppError> {
    validation::validate_headword(headword)
        .map_err(|msg| AppError::bad_request("INVALID_HEADWORD", msg))?;
    validation::validate_translation(translation)
        .map_err(|msg| AppError::bad_request("INVALID_TRANSLATION", msg))?;
    validation::validate_examples(examples)
        .map_err(|msg| AppError::bad_request("INVALID_EXAMPLES", msg))?;
    validation::validate_part_of_speech(part_of_speech)
        .map_err(|msg| AppError::bad_request("INVALID_PART_OF_SPEECH", msg))?;
    Ok(())
}

async fn create_word(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateWordRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    validate_content(
        &req.headword,
        &req.translation,
        &req.examples,
        &req.part_of_speech,
    )?;

    let word = Word::new_scheduled(
        req.headword.trim().to_string(),
        req.translation.trim().to_string(),
        req.definition,
        req.examples,
        req.part_of_speech,
        req.category,
        req.custom_category,
        Utc::now(),
    );
    state.store().upsert_word(&word)?;

    tracing::info!(word_id = %word.id, headword = %word.headword, "Word created");
    Ok(created(word))
}

/// Content-only update. Level, score and the review dates are owned by the
/// review engine and cannot be edited here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateWordRequest {
    headword: Option<String>,
    translation: Option<String>,
    definition: Option<String>,
    examples: Option<Vec<String>>,
    part_of_speech: Option<String>,
    category: Option<String>,
    custom_category: Option<String>,
}

async fn update_word(
    Path(id): Path<String>,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateWordRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut word = state
        .store()
        .get_word(&id)?
        .ok_or_else(|| AppError::not_found("Word not found"))?;

    if let Some(headword) = req.headword {
        word.headword = headword.trim().to_string();
    }
    if let Some(translation) = req.translation {
        word.translation = translation.trim().to_string();
    }
    if req.definition.is_some() {
        word.definition = req.definition;
    }
    if let Some(examples) = req.examples {
        word.examples = examples;
    }
    if let Some(part_of_speech) = req.part_of_speech {
        word.part_of_speech = part_of_speech;
    }
    if let Some(category) = req.category {
        word.category = category;
    }
    if req.custom_category.is_some() {
        word.custom_category = req.custom_category;
    }

    validate_content(
        &word.headword,
        &word.translation,
        &word.examples,
        &word.part_of_speech,
    )?;

    word.updated_at = Utc::now();
    state.store().upsert_word(&word)?;
    Ok(ok(word))
}

async fn delete_word(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    state.store().delete_word(&id)?;
    Ok(ok(serde_json::json!({ "deleted": true, "id": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkWordEntry {
    headword: String,
    translation: String,
    definition: Option<String>,
    example1: Option<String>,
    example2: Option<String>,
    part_of_speech: String,
    category: String,
    custom_category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkImportResponse {
    added: usize,
    added_words: Vec<String>,
    skipped: Vec<String>,
    rejected: Vec<String>,
}

/// Imports a batch of words, skipping headwords that already exist
/// (case-insensitive) and rejecting entries that fail validation without
/// aborting the rest of the batch.
async fn bulk_import(
    State(state): State<AppState>,
    JsonBody(entries): JsonBody<Vec<BulkWordEntry>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if entries.len() > MAX_BULK_IMPORT_WORDS {
        return Err(AppError::payload_too_large(
            "Too many words in one import request",
        ));
    }

    let mut existing = state.store().existing_headwords()?;
    let now = Utc::now();

    let mut added_words = Vec::new();
    let mut skipped = Vec::new();
    let mut rejected = Vec::new();

    for entry in entries {
        let headword = entry.headword.trim().to_string();
        let lowercase = headword.to_lowercase();

        if existing.contains(&lowercase) {
            skipped.push(headword);
            continue;
        }

        let examples: Vec<String> = [entry.example1, entry.example2]
            .into_iter()
            .flatten()
            .collect();

        if validate_content(
            &headword,
            &entry.translation,
            &examples,
            &entry.part_of_speech,
        )
        .is_err()
        {
            rejected.push(headword);
            continue;
        }

        let word = Word::new_scheduled(
            headword.clone(),
            entry.translation.trim().to_string(),
            entry.definition,
            examples,
            entry.part_of_speech,
            entry.category,
            entry.custom_category,
            now,
        );
        state.store().upsert_word(&word)?;

        existing.insert(lowercase);
        added_words.push(headword);
    }

    tracing::info!(
        added = added_words.len(),
        skipped = skipped.len(),
        rejected = rejected.len(),
        "Bulk import finished"
    );

    Ok(ok(BulkImportResponse {
        added: added_words.len(),
        added_words,
        skipped,
        rejected,
    }))
}
