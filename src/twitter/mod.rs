// Twitter search client — authentication, paginated search, rate pacing.
//
// The collector in `search` only depends on the SearchSource trait, so the
// HTTP client in `client` can be replaced by a stub in tests.

pub mod client;
pub mod error;
pub mod rate_limiter;
pub mod search;
