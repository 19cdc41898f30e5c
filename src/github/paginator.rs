use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::check_response;
use crate::github::rate_limiter::{RateLimitResource, RateLimiter};
use crate::models::RestPage;

pub const PER_PAGE: u32 = 100;

/// Page-numbered access to REST listings.
pub struct Paginator<'a> {
    client: &'a Client,
    rate_limiter: &'a RateLimiter,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, rate_limiter: &'a RateLimiter) -> Self {
        Self {
            client,
            rate_limiter,
        }
    }

    /// Fetches page `page` (1-based) of `base_url`.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        base_url: &str,
        page: u32,
    ) -> Result<RestPage<T>> {
        self.rate_limiter.wait(RateLimitResource::Core).await?;

        let url = page_url(base_url, page, PER_PAGE);
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter
            .update_from_response(RateLimitResource::Core, &response)
            .await;
        let response = check_response(response, &url).await?;

        let has_next = has_next_link(response.headers());
        let items: Vec<T> = response.json().await?;

        Ok(RestPage::new(items, has_next))
    }
}

pub fn page_url(base_url: &str, page: u32, per_page: u32) -> String {
    let separator = if base_url.contains('?') { "&" } else { "?" };
    format!("{}{}per_page={}&page={}", base_url, separator, per_page, page)
}

/// True when the `Link` header advertises a `rel="next"` page.
pub fn has_next_link(headers: &HeaderMap) -> bool {
    headers
        .get_all("link")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("rel=\"next\""))
}
