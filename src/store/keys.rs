pub fn word_key(word_id: &str) -> String {
    word_id.to_string()
}

/// Reverse-timestamp key so a forward scan yields newest-first.
pub fn words_by_created_at_key(timestamp_ms: i64, word_id: &str) -> String {
    let ts = timestamp_ms.max(0) as u64;
    let reverse_ts = u64::MAX - ts;
    format!("{:020}:{}", reverse_ts, word_id)
}

/// Due-index key: zero-padded due timestamp so a forward scan yields the
/// earliest-due words first.
pub fn word_due_index_key(due_ts_ms: i64, word_id: &str) -> String {
    let ts = due_ts_ms.max(0) as u64;
    format!("{:020}:{}", ts, word_id)
}

pub fn parse_due_index_key(key: &[u8]) -> Option<(i64, String)> {
    let key_str = std::str::from_utf8(key).ok()?;
    let (ts_part, word_id) = key_str.split_once(':')?;
    let ts = ts_part.parse::<u64>().ok()?;
    if word_id.is_empty() {
        return None;
    }
    Some((ts.min(i64::MAX as u64) as i64, word_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_key_orders_newest_first() {
        let k_new = words_by_created_at_key(2000, "w2");
        let k_old = words_by_created_at_key(1000, "w1");
        assert!(k_new < k_old);
    }

    #[test]
    fn due_index_key_orders_earliest_first() {
        let k_soon = word_due_index_key(1000, "w1");
        let k_later = word_due_index_key(2000, "w2");
        assert!(k_soon < k_later);
    }

    #[test]
    fn due_index_key_round_trips() {
        let key = word_due_index_key(123_456, "w9");
        let (ts, word_id) = parse_due_index_key(key.as_bytes()).unwrap();
        assert_eq!(ts, 123_456);
        assert_eq!(word_id, "w9");
    }

    #[test]
    fn malformed_due_index_key_is_rejected() {
        assert!(parse_due_index_key(b"not-a-key").is_none());
        assert!(parse_due_index_key(b"123:").is_none());
    }
}
