use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One validated (word, points) result, aggregated over a whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub word_id: String,
    pub points: f64,
}

/// A raw submission entry as received from the client. Fields are optional
/// and untyped so that one malformed entry can be rejected on its own
/// instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSessionEntry {
    #[serde(default)]
    pub word_id: Option<String>,
    #[serde(default)]
    pub points: Option<serde_json::Value>,
}

impl RawSessionEntry {
    /// Validates one entry: the word id must be non-empty and the points a
    /// finite non-negative number.
    pub fn validate(&self) -> Option<(String, f64)> {
        let word_id = self.word_id.as_deref()?.trim();
        if word_id.is_empty() {
            return None;
        }
        let points = self.points.as_ref()?.as_f64()?;
        if !points.is_finite() || points < 0.0 {
            return None;
        }
        Some((word_id.to_string(), points))
    }
}

/// Accumulates points per word across one review session.
///
/// A word may appear more than once in a session; its points accumulate.
/// First-seen order is preserved so the batch is applied in session order.
#[derive(Debug, Default)]
pub struct SessionAggregator {
    totals: HashMap<String, f64>,
    order: Vec<String>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, word_id: &str, points: f64) {
        match self.totals.get_mut(word_id) {
            Some(total) => *total += points,
            None => {
                self.totals.insert(word_id.to_string(), points);
                self.order.push(word_id.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Drains the aggregator into per-word totals in first-seen order.
    pub fn into_results(self) -> Vec<SessionResult> {
        let SessionAggregator { mut totals, order } = self;
        order
            .into_iter()
            .filter_map(|word_id| {
                totals
                    .remove(&word_id)
                    .map(|points| SessionResult { word_id, points })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_word_ids_accumulate() {
        let mut agg = SessionAggregator::new();
        agg.record("w1", 2.0);
        agg.record("w2", 1.5);
        agg.record("w1", 2.5);

        let results = agg.into_results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word_id, "w1");
        assert_eq!(results[0].points, 4.5);
        assert_eq!(results[1].word_id, "w2");
        assert_eq!(results[1].points, 1.5);
    }

    #[test]
    fn order_is_first_seen() {
        let mut agg = SessionAggregator::new();
        agg.record("b", 0.0);
        agg.record("a", 1.0);
        agg.record("b", 3.0);

        let ids: Vec<String> = agg.into_results().into_iter().map(|r| r.word_id).collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn empty_aggregator_yields_no_results() {
        let agg = SessionAggregator::new();
        assert!(agg.is_empty());
        assert!(agg.into_results().is_empty());
    }

    #[test]
    fn entry_validation_rejects_missing_or_bad_fields() {
        let missing_id: RawSessionEntry =
            serde_json::from_value(serde_json::json!({ "points": 2.0 })).unwrap();
        assert!(missing_id.validate().is_none());

        let empty_id: RawSessionEntry =
            serde_json::from_value(serde_json::json!({ "wordId": "  ", "points": 2.0 })).unwrap();
        assert!(empty_id.validate().is_none());

        let non_numeric: RawSessionEntry =
            serde_json::from_value(serde_json::json!({ "wordId": "w1", "points": "two" }))
                .unwrap();
        assert!(non_numeric.validate().is_none());

        let negative: RawSessionEntry =
            serde_json::from_value(serde_json::json!({ "wordId": "w1", "points": -1.0 }))
                .unwrap();
        assert!(negative.validate().is_none());

        let valid: RawSessionEntry =
            serde_json::from_value(serde_json::json!({ "wordId": "w1", "points": 2.5 })).unwrap();
        assert_eq!(valid.validate(), Some(("w1".to_string(), 2.5)));
    }
}
