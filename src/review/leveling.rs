use chrono::{DateTime, Duration, Utc};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 5;

/// Accumulated score at or above which a word levels up.
pub const LEVEL_UP_THRESHOLD: f64 = 6.0;

/// Accumulated score at or below which a word is a level-down candidate.
pub const LEVEL_DOWN_THRESHOLD: f64 = 1.0;

/// A word only drops a level after at least this many weak reviews since the
/// last level change. This gate is what makes demotion a ratchet instead of a
/// reaction to a single bad session.
pub const LEVEL_DOWN_MIN_INCORRECT: u32 = 2;

/// Level → days until the next scheduled review.
pub fn interval_days(level: u8) -> i64 {
    match level {
        1 => 1,
        2 => 3,
        3 => 7,
        4 => 14,
        _ => 30,
    }
}

/// The scheduler-owned slice of a word's persisted state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
    pub level: u8,
    pub score: f64,
    pub incorrect_count: u32,
}

/// Result of applying one session's points to a word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewOutcome {
    pub level: u8,
    pub score: f64,
    pub incorrect_count: u32,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed_date: DateTime<Utc>,
}

impl ReviewOutcome {
    pub fn level_changed(&self, previous: &ReviewState) -> bool {
        self.level != previous.level
    }
}

/// Applies the leveling state machine to one word.
///
/// Rules, in order:
/// 1. `new_score = score + session_points`.
/// 2. Level up when `new_score >= 6` below the ceiling; score and incorrect
///    count reset to 0.
/// 3. Otherwise level down when `new_score <= 1`, the word already has two or
///    more weak reviews on record and it is above the floor; score and
///    incorrect count reset to 0.
/// 4. Otherwise the level holds and the score carries over to the next
///    session (leveling up can take several sittings).
///
/// A session with zero points is a weak review and increments the incorrect
/// count, except when a level change zeroes it in the same application. The
/// down-gate reads the count as it was *before* this session's increment.
///
/// At the ceiling a `new_score >= 6` still resets the score to 0 so the
/// accumulator stays bounded, even though the level cannot rise.
pub fn apply_session(
    current: ReviewState,
    session_points: f64,
    now: DateTime<Utc>,
) -> ReviewOutcome {
    let new_score = current.score + session_points;
    let weak = session_points == 0.0;

    let (level, score, incorrect_count) =
        if new_score >= LEVEL_UP_THRESHOLD && current.level < MAX_LEVEL {
            (current.level + 1, 0.0, 0)
        } else if new_score >= LEVEL_UP_THRESHOLD {
            // Ceiling: level holds, accumulator is still drained.
            (MAX_LEVEL, 0.0, current.incorrect_count)
        } else if new_score <= LEVEL_DOWN_THRESHOLD
            && current.incorrect_count >= LEVEL_DOWN_MIN_INCORRECT
            && current.level > MIN_LEVEL
        {
            (current.level - 1, 0.0, 0)
        } else {
            let incorrect = if weak {
                current.incorrect_count + 1
            } else {
                current.incorrect_count
            };
            (current.level, new_score, incorrect)
        };

    ReviewOutcome {
        level,
        score,
        incorrect_count,
        next_review_date: now + Duration::days(interval_days(level)),
        last_reviewed_date: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(level: u8, score: f64, incorrect_count: u32) -> ReviewState {
        ReviewState {
            level,
            score,
            incorrect_count,
        }
    }

    #[test]
    fn level_up_resets_score_and_incorrect_count() {
        let now = Utc::now();
        let out = apply_session(state(2, 4.0, 1), 3.0, now);
        assert_eq!(out.level, 3);
        assert_eq!(out.score, 0.0);
        assert_eq!(out.incorrect_count, 0);
        assert_eq!(out.next_review_date, now + Duration::days(7));
        assert_eq!(out.last_reviewed_date, now);
    }

    #[test]
    fn level_down_requires_repeated_weak_reviews() {
        let now = Utc::now();
        let out = apply_session(state(3, 1.0, 2), 0.0, now);
        assert_eq!(out.level, 2);
        assert_eq!(out.score, 0.0);
        assert_eq!(out.incorrect_count, 0);
        assert_eq!(out.next_review_date, now + Duration::days(3));
    }

    #[test]
    fn single_weak_session_does_not_demote() {
        let out = apply_session(state(3, 0.0, 0), 0.0, Utc::now());
        assert_eq!(out.level, 3);
        assert_eq!(out.score, 0.0);
        assert_eq!(out.incorrect_count, 1);
    }

    #[test]
    fn no_change_carries_score_to_next_session() {
        let out = apply_session(state(3, 0.0, 0), 2.0, Utc::now());
        assert_eq!(out.level, 3);
        assert_eq!(out.score, 2.0);
        assert_eq!(out.incorrect_count, 0);
    }

    #[test]
    fn level_never_drops_below_floor() {
        let out = apply_session(state(1, 0.0, 10), 0.0, Utc::now());
        assert_eq!(out.level, 1);
    }

    #[test]
    fn ceiling_holds_level_but_drains_score() {
        let out = apply_session(state(5, 4.0, 1), 3.0, Utc::now());
        assert_eq!(out.level, 5);
        assert_eq!(out.score, 0.0);
        // No level change, so the incorrect count is untouched.
        assert_eq!(out.incorrect_count, 1);
    }

    #[test]
    fn down_gate_uses_count_before_this_sessions_increment() {
        // One prior weak review plus this one: not enough to demote yet.
        let out = apply_session(state(3, 1.0, 1), 0.0, Utc::now());
        assert_eq!(out.level, 3);
        assert_eq!(out.incorrect_count, 2);

        // The next weak session crosses the gate.
        let next = apply_session(
            state(out.level, out.score, out.incorrect_count),
            0.0,
            Utc::now(),
        );
        assert_eq!(next.level, 2);
        assert_eq!(next.incorrect_count, 0);
    }

    #[test]
    fn interval_mapping_is_fixed() {
        assert_eq!(interval_days(1), 1);
        assert_eq!(interval_days(2), 3);
        assert_eq!(interval_days(3), 7);
        assert_eq!(interval_days(4), 14);
        assert_eq!(interval_days(5), 30);
    }

    #[test]
    fn next_review_date_uses_new_level() {
        let now = Utc::now();
        let out = apply_session(state(3, 5.0, 0), 3.0, now);
        assert_eq!(out.level, 4);
        assert_eq!(out.next_review_date, now + Duration::days(14));
    }

    #[test]
    fn fractional_points_accumulate() {
        let out = apply_session(state(1, 2.5, 0), 1.5, Utc::now());
        assert_eq!(out.level, 1);
        assert_eq!(out.score, 4.0);
    }
}
