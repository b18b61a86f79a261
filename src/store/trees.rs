pub const WORDS: &str = "words";
pub const META: &str = "meta";

// Secondary index trees
pub const WORDS_BY_CREATED_AT: &str = "words_by_created_at";
pub const WORD_DUE_INDEX: &str = "word_due_index";
