use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::store::operations::words::Word;

/// Target size of a repeat-mode batch.
pub const REPEAT_BATCH_SIZE: usize = 10;

/// Band quotas: 6 low / 2 mid / 2 high. The deliberate skew keeps weaker
/// words in heavy rotation while still surfacing mastered ones.
pub const REPEAT_LOW_QUOTA: usize = 6;
pub const REPEAT_MID_QUOTA: usize = 2;
pub const REPEAT_HIGH_QUOTA: usize = 2;

/// Mastery band used for repeat-mode stratification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub fn of_level(level: u8) -> Band {
        match level {
            1 | 2 => Band::Low,
            3 => Band::Mid,
            _ => Band::High,
        }
    }
}

/// Repeat mode: stratified sample across mastery bands, independent of due
/// dates. Samples without replacement 6 from levels {1,2}, 2 from level {3}
/// and 2 from levels {4,5} (each capped at band size), tops up from the
/// unchosen remainder until [`REPEAT_BATCH_SIZE`] words are reached or the
/// pool is exhausted, then shuffles the combined batch.
pub fn sample_repeat<R: Rng + ?Sized>(words: &[Word], rng: &mut R) -> Vec<Word> {
    let low: Vec<&Word> = words
        .iter()
        .filter(|w| Band::of_level(w.level) == Band::Low)
        .collect();
    let mid: Vec<&Word> = words
        .iter()
        .filter(|w| Band::of_level(w.level) == Band::Mid)
        .collect();
    let high: Vec<&Word> = words
        .iter()
        .filter(|w| Band::of_level(w.level) == Band::High)
        .collect();

    let mut combined: Vec<&Word> = Vec::with_capacity(REPEAT_BATCH_SIZE);
    combined.extend(low.choose_multiple(rng, REPEAT_LOW_QUOTA).copied());
    combined.extend(mid.choose_multiple(rng, REPEAT_MID_QUOTA).copied());
    combined.extend(high.choose_multiple(rng, REPEAT_HIGH_QUOTA).copied());

    if combined.len() < REPEAT_BATCH_SIZE {
        let chosen: HashSet<&str> = combined.iter().map(|w| w.id.as_str()).collect();
        let remainder: Vec<&Word> = words
            .iter()
            .filter(|w| !chosen.contains(w.id.as_str()))
            .collect();
        let missing = REPEAT_BATCH_SIZE - combined.len();
        combined.extend(remainder.choose_multiple(rng, missing).copied());
    }

    let mut batch: Vec<Word> = combined.into_iter().cloned().collect();
    batch.shuffle(rng);
    batch
}
