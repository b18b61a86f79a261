/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum page size a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Bulk import accepts at most this many entries per request.
pub const MAX_BULK_IMPORT_WORDS: usize = 500;

/// Every word carries exactly this many example sentences.
pub const REQUIRED_EXAMPLE_COUNT: usize = 2;

/// Session submit accepts at most this many result entries per request.
pub const MAX_SESSION_RESULTS: usize = 1000;
