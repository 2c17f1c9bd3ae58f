// Token-bucket pacing for search requests.
//
// The app-only search endpoint allows 450 requests per 15-minute window.
// Pacing page requests keeps a long collection from burning through that
// window in a burst and tripping a 429 halfway through.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Enforces a minimum interval between requests.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
}

struct RateLimiterInner {
    /// Minimum time between requests
    interval: Duration,
    /// When the last request was allowed through
    last_request: Option<Instant>,
}

impl RateLimiter {
    /// Allow `requests_per_second` requests per second. Non-positive or
    /// non-finite rates disable pacing.
    pub fn new(requests_per_second: f64) -> Self {
        let interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            inner: Arc::new(Mutex::new(RateLimiterInner {
                interval,
                last_request: None,
            })),
        }
    }

    /// Wait until a request is allowed, then return.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        if let Some(last) = inner.last_request {
            let elapsed = now.duration_since(last);
            if elapsed < inner.interval {
                let sleep_time = inner.interval - elapsed;
                drop(inner);
                tokio::time::sleep(sleep_time).await;
                inner = self.inner.lock().await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}
