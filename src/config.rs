use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::twitter::client::{ClientSettings, DEFAULT_API_URL};

/// Something that can look up a configuration value by key.
///
/// The process environment is the normal source; tests use a HashMap.
pub trait CredentialSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment. Blank values count as unset.
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl CredentialSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

/// Look up the first key that has a value.
fn first_of(source: &dyn CredentialSource, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| source.get(k))
}

/// Twitter API secrets. Debug output never shows them.
#[derive(Clone, Default)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    /// Only needed for user-context endpoints; search doesn't use it.
    pub access_token: String,
    pub access_token_secret: String,
    /// Pre-issued app-only token, skips the consumer key exchange
    pub bearer_token: Option<String>,
}

impl Credentials {
    /// Accepts both `TWITTER_*` names and the bare lower-case names used by
    /// older `.env` files.
    pub fn from_source(source: &dyn CredentialSource) -> Self {
        Self {
            consumer_key: first_of(source, &["TWITTER_CONSUMER_KEY", "consumer_key"])
                .unwrap_or_default(),
            consumer_secret: first_of(source, &["TWITTER_CONSUMER_SECRET", "consumer_secret"])
                .unwrap_or_default(),
            access_token: first_of(source, &["TWITTER_ACCESS_TOKEN", "access_token"])
                .unwrap_or_default(),
            access_token_secret: first_of(
                source,
                &["TWITTER_ACCESS_TOKEN_SECRET", "access_token_secret"],
            )
            .unwrap_or_default(),
            bearer_token: first_of(source, &["TWITTER_BEARER_TOKEN", "bearer_token"]),
        }
    }

    /// True when there's enough to authenticate a search.
    pub fn can_search(&self) -> bool {
        self.bearer_token.is_some()
            || (!self.consumer_key.is_empty() && !self.consumer_secret.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() {
                "<unset>"
            } else {
                "<redacted>"
            }
        }
        f.debug_struct("Credentials")
            .field("consumer_key", &redact(&self.consumer_key))
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &redact(&self.access_token))
            .field("access_token_secret", &redact(&self.access_token_secret))
            .field(
                "bearer_token",
                &redact(self.bearer_token.as_deref().unwrap_or_default()),
            )
            .finish()
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Twitter API root (defaults to https://api.twitter.com)
    pub api_url: String,
    /// Per-request timeout for search calls
    pub http_timeout: Duration,
    /// Pacing for search page requests
    pub requests_per_second: f64,
    /// Optional TSV file of extra `word<TAB>polarity` lexicon entries
    pub lexicon_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_source(&EnvSource)
    }

    /// Load configuration from any key/value source.
    pub fn from_source(source: &dyn CredentialSource) -> Result<Self> {
        let http_timeout = match source.get("MURMUR_HTTP_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("MURMUR_HTTP_TIMEOUT_SECS is not a number: {v}"))?;
                if secs == 0 {
                    anyhow::bail!("MURMUR_HTTP_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        let requests_per_second = match source.get("MURMUR_REQUESTS_PER_SECOND") {
            Some(v) => v
                .trim()
                .parse::<f64>()
                .with_context(|| format!("MURMUR_REQUESTS_PER_SECOND is not a number: {v}"))?,
            None => 1.0,
        };

        Ok(Self {
            credentials: Credentials::from_source(source),
            api_url: source
                .get("TWITTER_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout,
            requests_per_second,
            lexicon_path: source.get("MURMUR_LEXICON").map(PathBuf::from),
        })
    }

    /// Check that search credentials are configured.
    /// Call this before any operation that hits the search API.
    pub fn require_credentials(&self) -> Result<()> {
        if !self.credentials.can_search() {
            anyhow::bail!(
                "Twitter credentials not set. Add TWITTER_CONSUMER_KEY and \
                 TWITTER_CONSUMER_SECRET (or TWITTER_BEARER_TOKEN) to your .env file."
            );
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_url.clone(),
            timeout: self.http_timeout,
            requests_per_second: self.requests_per_second,
        }
    }
}
