// Typed failures for the search layer.
//
// The CLI wraps these in anyhow, but the collector needs to tell callers
// which kind of failure happened and how far collection got before it.

use thiserror::Error;

/// A single request to the search service failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// `reset_at` is the unix timestamp from the `x-rate-limit-reset` header.
    #[error("rate limited by the search API")]
    RateLimited { reset_at: Option<i64> },

    #[error("search API returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode search response: {0}")]
    Decode(String),
}

impl FetchError {
    /// True for failures a caller could reasonably retry later.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::RateLimited { .. } | FetchError::Network(_) => true,
            FetchError::Http { status, .. } => *status >= 500,
            FetchError::Auth { .. } | FetchError::Decode(_) => false,
        }
    }
}

/// Collecting posts for a topic failed. Nothing collected so far is returned.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("search topic must not be empty")]
    EmptyTopic,

    #[error("search failed on page {page} after collecting {collected} posts")]
    Fetch {
        page: usize,
        collected: usize,
        #[source]
        source: FetchError,
    },
}

impl CollectError {
    /// How many posts had been buffered when collection failed.
    pub fn collected(&self) -> usize {
        match self {
            CollectError::EmptyTopic => 0,
            CollectError::Fetch { collected, .. } => *collected,
        }
    }
}
