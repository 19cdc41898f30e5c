use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use crate::error::{Error, Result};

/// Longest pause a request will sit through before giving up with
/// `Error::RateLimited`.
const MAX_WAIT: Duration = Duration::from_secs(10);

/// Budgets GitHub meters independently, as named by `x-ratelimit-resource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitResource {
    Core,
    GraphQl,
    Search,
}

impl RateLimitResource {
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim() {
            "core" => Some(Self::Core),
            "graphql" => Some(Self::GraphQl),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

/// Tracks GitHub's `x-ratelimit-*` headers per resource and pauses callers
/// once that resource's budget is spent.
pub struct RateLimiter {
    buckets: Arc<Mutex<HashMap<RateLimitResource, RateLimitState>>>,
}

#[derive(Default)]
struct RateLimitState {
    remaining: Option<u64>,
    reset_at: Option<Instant>,
}

/// Rate-limit headers of a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub resource: Option<RateLimitResource>,
    pub remaining: u64,
    /// Seconds until the window resets.
    pub reset_in: u64,
}

impl RateLimitSnapshot {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_u64(headers, "x-ratelimit-remaining")?;
        let reset_in = header_u64(headers, "x-ratelimit-reset")
            .map(|reset| reset.saturating_sub(unix_now()))
            .unwrap_or(0);
        let resource = headers
            .get("x-ratelimit-resource")
            .and_then(|v| v.to_str().ok())
            .and_then(RateLimitResource::from_header);

        Some(Self {
            resource,
            remaining,
            reset_in,
        })
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Waits for `resource` to have budget again. Other resources are never
    /// held back by it.
    pub async fn wait(&self, resource: RateLimitResource) -> Result<()> {
        let mut buckets = self.buckets.lock().await;
        let Some(bucket) = buckets.get(&resource) else {
            return Ok(());
        };

        if bucket.remaining == Some(0) {
            if let Some(reset_at) = bucket.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    if wait_duration > MAX_WAIT {
                        return Err(Error::RateLimited(wait_duration.as_secs()));
                    }
                    drop(buckets);
                    tracing::info!("Rate limited on {:?}, waiting {:?}", resource, wait_duration);
                    sleep(wait_duration).await;
                    buckets = self.buckets.lock().await;
                }
            }
            buckets.remove(&resource);
        }

        Ok(())
    }

    /// Records the budget reported by `response`. The resource named in the
    /// response wins over `requested`.
    pub async fn update_from_response(&self, requested: RateLimitResource, response: &Response) {
        self.record(requested, response.headers()).await;
    }

    async fn record(&self, requested: RateLimitResource, headers: &HeaderMap) {
        let Some(snapshot) = RateLimitSnapshot::from_headers(headers) else {
            return;
        };
        let resource = snapshot.resource.unwrap_or(requested);

        let mut buckets = self.buckets.lock().await;
        buckets.insert(
            resource,
            RateLimitState {
                remaining: Some(snapshot.remaining),
                reset_at: Some(Instant::now() + Duration::from_secs(snapshot.reset_in)),
            },
        );
        tracing::trace!("GitHub {:?} budget remaining: {}", resource, snapshot.remaining);
    }

    /// Seconds to back off when `response` was rejected for an exhausted
    /// budget, `None` for any other response.
    pub fn retry_after(response: &Response) -> Option<u64> {
        retry_after(response.status(), response.headers())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn retry_after(status: StatusCode, headers: &HeaderMap) -> Option<u64> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    if let Some(secs) = header_u64(headers, "retry-after") {
        return Some(secs);
    }

    RateLimitSnapshot::from_headers(headers)
        .filter(|snapshot| snapshot.remaining == 0)
        .map(|snapshot| snapshot.reset_in)
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
