//! Input validation shared by the word CRUD and bulk import routes.

use crate::constants::REQUIRED_EXAMPLE_COUNT;

pub const PARTS_OF_SPEECH: &[&str] = &[
    "noun",
    "verb",
    "adjective",
    "adverb",
    "preposition",
    "conjunction",
    "interjection",
    "pronoun",
    "determiner",
];

/// Headword: non-empty after trimming, at most 64 characters.
pub fn validate_headword(headword: &str) -> Result<(), &'static str> {
    let trimmed = headword.trim();
    if trimmed.is_empty() {
        return Err("Headword must not be empty");
    }
    if trimmed.chars().count() > 64 {
        return Err("Headword must not exceed 64 characters");
    }
    Ok(())
}

pub fn validate_translation(translation: &str) -> Result<(), &'static str> {
    let trimmed = translation.trim();
    if trimmed.is_empty() {
        return Err("Translation must not be empty");
    }
    if trimmed.chars().count() > 256 {
        return Err("Translation must not exceed 256 characters");
    }
    Ok(())
}

/// Every word carries exactly two example sentences.
pub fn validate_examples(examples: &[String]) -> Result<(), &'static str> {
    if examples.len() != REQUIRED_EXAMPLE_COUNT {
        return Err("Exactly 2 example sentences are required");
    }
    if examples.iter().any(|e| e.trim().is_empty()) {
        return Err("Example sentences must not be empty");
    }
    Ok(())
}

pub fn validate_part_of_speech(part_of_speech: &str) -> Result<(), &'static str> {
    if PARTS_OF_SPEECH.contains(&part_of_speech) {
        Ok(())
    } else {
        Err("Unknown part of speech")
    }
}
