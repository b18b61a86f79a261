use serde::{Deserialize, Serialize};

/// Quiz interaction type. Point values differ by how much production effort
/// the modality demands from the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizModality {
    Flashcard,
    Multiple,
    Fill,
    Typing,
    Listening,
}

impl QuizModality {
    pub const ALL: [QuizModality; 5] = [
        QuizModality::Flashcard,
        QuizModality::Multiple,
        QuizModality::Fill,
        QuizModality::Typing,
        QuizModality::Listening,
    ];

    /// Points awarded for a correct answer in this modality.
    ///
    /// These constants calibrate the leveling thresholds in
    /// [`crate::review::leveling`] and must not be made configurable.
    pub fn correct_points(self) -> f64 {
        match self {
            QuizModality::Flashcard => 1.0,
            QuizModality::Multiple => 2.0,
            QuizModality::Fill => 3.0,
            QuizModality::Typing => 2.5,
            QuizModality::Listening => 1.5,
        }
    }
}

/// Maps a quiz outcome to its point value. Pure and total: an incorrect
/// answer is always worth 0 regardless of modality.
pub fn score_points(modality: QuizModality, correct: bool) -> f64 {
    if correct {
        modality.correct_points()
    } else {
        0.0
    }
}
