// Topic search — paginated tweet collection into a local buffer.
//
// Posts are accumulated in a Vec owned by `collect` and handed to the caller
// only when the whole collection succeeds. A failing page discards the
// buffer and reports how far collection got.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{CollectError, FetchError};

/// Largest page the search endpoint will return.
pub const MAX_PAGE_SIZE: usize = 100;

/// A simplified tweet — just the fields the sentiment pipeline needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_verified: bool,
    pub text: String,
    pub like_count: i64,
    pub repost_count: i64,
    pub author_location: Option<String>,
}

/// Parameters of one topic search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub topic: String,
    /// ISO 639-1 language filter applied by the service
    pub lang: String,
    pub exclude_reposts: bool,
    pub page_size: usize,
}

impl SearchQuery {
    /// English-only, reposts excluded.
    pub fn new(topic: &str, page_size: usize) -> Self {
        Self {
            topic: topic.to_string(),
            lang: "en".to_string(),
            exclude_reposts: true,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The `q` parameter sent to the service.
    pub fn query_string(&self) -> String {
        if self.exclude_reposts {
            format!("{} -filter:retweets", self.topic)
        } else {
            self.topic.clone()
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub posts: Vec<Post>,
    /// Opaque cursor for the next page; `None` when the source is exhausted.
    pub next_cursor: Option<String>,
}

/// Anything that can serve pages of topic search results.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Fetch the page at `cursor` (`None` for the first page).
    async fn search_page(
        &self,
        query: &SearchQuery,
        cursor: Option<&str>,
    ) -> Result<SearchPage, FetchError>;
}

/// Collect up to `max_count` posts about `topic`, in fetch order.
///
/// Stops when `max_count` posts are buffered or the source runs out. Never
/// returns more than `max_count` posts.
pub async fn collect(
    source: &dyn SearchSource,
    topic: &str,
    max_count: usize,
) -> Result<Vec<Post>, CollectError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(CollectError::EmptyTopic);
    }

    let mut posts: Vec<Post> = Vec::with_capacity(max_count.min(1_000));
    if max_count == 0 {
        return Ok(posts);
    }

    let query = SearchQuery::new(topic, max_count);
    let mut cursor: Option<String> = None;
    let mut page = 0;

    loop {
        page += 1;

        let result = source
            .search_page(&query, cursor.as_deref())
            .await
            .map_err(|err| CollectError::Fetch {
                page,
                collected: posts.len(),
                source: err,
            })?;

        let page_len = result.posts.len();
        let remaining = max_count - posts.len();
        posts.extend(result.posts.into_iter().take(remaining));

        debug!(
            page = page,
            page_posts = page_len,
            total_collected = posts.len(),
            "Fetched page of search results for '{}'",
            topic
        );

        if posts.len() >= max_count || page_len == 0 {
            break;
        }

        match result.next_cursor {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                warn!(cursor = %next, "Search cursor did not advance, stopping");
                break;
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!(
        count = posts.len(),
        pages = page,
        topic = topic,
        "Collected posts for analysis"
    );

    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_excludes_reposts() {
        let q = SearchQuery::new("bitcoin", 50);
        assert_eq!(q.query_string(), "bitcoin -filter:retweets");
        assert_eq!(q.lang, "en");
    }

    #[test]
    fn query_string_without_exclusion() {
        let mut q = SearchQuery::new("rust lang", 10);
        q.exclude_reposts = false;
        assert_eq!(q.query_string(), "rust lang");
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(SearchQuery::new("x", 500).page_size, MAX_PAGE_SIZE);
        assert_eq!(SearchQuery::new("x", 0).page_size, 1);
        assert_eq!(SearchQuery::new("x", 25).page_size, 25);
    }
}
