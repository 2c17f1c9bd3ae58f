// Twitter API client — app-only bearer auth over HTTP.
//
// Searching only needs application-level access, so the consumer key/secret
// pair is exchanged for a bearer token once, and every search request
// carries that token. Access token/secret are never sent.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use super::error::FetchError;
use super::rate_limiter::RateLimiter;
use super::search::{Post, SearchPage, SearchQuery, SearchSource};
use crate::config::Credentials;

/// Default Twitter API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com";

/// `created_at` format used by the v1.1 API, e.g. "Wed Oct 10 20:19:24 +0000 2018".
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Connection settings that don't involve secrets.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub requests_per_second: f64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            requests_per_second: 1.0,
        }
    }
}

/// Authenticated client for the v1.1 search endpoint.
pub struct TwitterClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    rate_limiter: RateLimiter,
}

impl TwitterClient {
    /// Create a client from an already-issued bearer token.
    pub fn new(settings: &ClientSettings, bearer_token: String) -> Result<Self> {
        Ok(Self {
            client: build_http_client(settings.timeout)?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            bearer_token,
            rate_limiter: RateLimiter::new(settings.requests_per_second),
        })
    }

    /// Create a client from stored credentials.
    ///
    /// Uses the configured bearer token if there is one, otherwise exchanges
    /// the consumer key/secret for an app-only token.
    pub async fn connect(settings: &ClientSettings, credentials: &Credentials) -> Result<Self> {
        if let Some(token) = &credentials.bearer_token {
            return Self::new(settings, token.clone());
        }

        let http = build_http_client(settings.timeout)?;
        let base_url = settings.base_url.trim_end_matches('/');
        let token = obtain_bearer_token(
            &http,
            base_url,
            &credentials.consumer_key,
            &credentials.consumer_secret,
        )
        .await
        .context("Failed to obtain an app-only bearer token")?;

        info!("Obtained app-only bearer token");

        Ok(Self {
            client: http,
            base_url: base_url.to_string(),
            bearer_token: token,
            rate_limiter: RateLimiter::new(settings.requests_per_second),
        })
    }

    /// Make an authenticated GET request and deserialize the JSON response.
    ///
    /// `path` is relative to the API root (e.g. "1.1/search/tweets.json").
    pub async fn api_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "API GET request");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(format!("{path}: {e}")))
    }
}

#[async_trait]
impl SearchSource for TwitterClient {
    async fn search_page(
        &self,
        query: &SearchQuery,
        cursor: Option<&str>,
    ) -> Result<SearchPage, FetchError> {
        self.rate_limiter.acquire().await;

        let q = query.query_string();
        let count = query.page_size.to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("q", &q),
            ("lang", &query.lang),
            ("count", &count),
            ("result_type", "recent"),
            ("tweet_mode", "extended"),
            ("include_entities", "false"),
        ];
        if let Some(max_id) = cursor {
            params.push(("max_id", max_id));
        }

        let response: SearchResponse = self.api_get("1.1/search/tweets.json", &params).await?;
        response.into_page(query.exclude_reposts)
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("murmur/0.1 (topic-sentiment)")
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Exchange consumer credentials for an app-only bearer token.
async fn obtain_bearer_token(
    client: &reqwest::Client,
    base_url: &str,
    consumer_key: &str,
    consumer_secret: &str,
) -> Result<String, FetchError> {
    let response = client
        .post(format!("{base_url}/oauth2/token"))
        .basic_auth(consumer_key, Some(consumer_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let body = check_status(response).await?.text().await?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(format!("oauth2/token: {e}")))?;

    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(FetchError::Auth {
            status: 200,
            body: format!("unexpected token type '{}'", token.token_type),
        });
    }

    Ok(token.access_token)
}

/// Map non-success statuses onto the FetchError kinds.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let reset_at = response
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());
        return Err(FetchError::RateLimited { reset_at });
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Auth {
            status: status.as_u16(),
            body,
        }),
        _ => Err(FetchError::Http {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Pull the `max_id` cursor out of `search_metadata.next_results`
/// (e.g. "?max_id=1049&q=rust&count=100").
pub fn max_id_from_next_results(next_results: &str) -> Option<String> {
    next_results
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("max_id="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

// -- Serde types for search/tweets.json --

#[derive(Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

/// Response from `1.1/search/tweets.json`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub statuses: Vec<Status>,
    pub search_metadata: SearchMetadata,
}

#[derive(Debug, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub next_results: Option<String>,
}

/// A single status as returned by the API.
#[derive(Debug, Deserialize)]
pub struct Status {
    pub created_at: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Untruncated text, present with `tweet_mode=extended`
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub favorite_count: i64,
    #[serde(default)]
    pub retweet_count: i64,
    pub user: StatusUser,
    #[serde(default)]
    pub retweeted_status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUser {
    pub name: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub location: Option<String>,
}

impl SearchResponse {
    /// Convert into a page of Posts. Reposts that slip past the query
    /// operator are dropped when `exclude_reposts` is set.
    pub fn into_page(self, exclude_reposts: bool) -> Result<SearchPage, FetchError> {
        let next_cursor = self
            .search_metadata
            .next_results
            .as_deref()
            .and_then(max_id_from_next_results);

        let posts = self
            .statuses
            .into_iter()
            .filter(|s| !(exclude_reposts && s.retweeted_status.is_some()))
            .map(Status::into_post)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchPage { posts, next_cursor })
    }
}

impl Status {
    pub fn into_post(self) -> Result<Post, FetchError> {
        let created_at = DateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT)
            .map_err(|e| FetchError::Decode(format!("created_at '{}': {e}", self.created_at)))?
            .with_timezone(&Utc);

        Ok(Post {
            created_at,
            author_name: self.user.name,
            author_verified: self.user.verified,
            text: self.full_text.or(self.text).unwrap_or_default(),
            like_count: self.favorite_count,
            repost_count: self.retweet_count,
            author_location: self.user.location.filter(|l| !l.trim().is_empty()),
        })
    }
}
