use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::github::graphql::{
    ContributionsUser, GraphQlRequest, GraphQlResponse, LanguagesUser, RepositoryStatsUser,
    UserRoot, CONTRIBUTION_CALENDAR_QUERY, LANGUAGES_QUERY, REPOSITORY_STATS_QUERY,
};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::{RateLimitResource, RateLimitSnapshot, RateLimiter};
use crate::github::source::GitHubSource;
use crate::models::{
    ActivityTotals, ContributionCalendar, GitHubUser, LanguageRepository, Page, PullRequestRef,
    Repository, RepositoryStats, RestPage, Review,
};

const COMMIT_SEARCH_MEDIA_TYPE: &str = "application/vnd.github.cloak-preview+json";

/// Back-off reported for a GraphQL `RATE_LIMITED` error that came without
/// rate-limit headers.
const GRAPHQL_RETRY_FALLBACK_SECS: u64 = 60;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

#[derive(Deserialize)]
struct SearchCount {
    total_count: u64,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, "https://api.github.com")
    }

    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("profile-badges/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        login: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        self.rate_limiter.wait(RateLimitResource::GraphQl).await?;
        let url = format!("{}/graphql", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;
        self.rate_limiter
            .update_from_response(RateLimitResource::GraphQl, &response)
            .await;
        let response = check_response(response, "GraphQL query").await?;
        let reset_in = RateLimitSnapshot::from_headers(response.headers())
            .map(|snapshot| snapshot.reset_in)
            .unwrap_or(GRAPHQL_RETRY_FALLBACK_SECS);

        let body: GraphQlResponse<UserRoot<T>> = response.json().await?;
        body.into_data(login, reset_in)?.into_user(login)
    }

    async fn repository_stats(
        &self,
        login: &str,
        after: Option<&str>,
    ) -> Result<(Page<RepositoryStats>, ActivityTotals)> {
        let user: RepositoryStatsUser = self
            .graphql(
                login,
                REPOSITORY_STATS_QUERY,
                json!({ "login": login, "after": after }),
            )
            .await?;
        Ok(user.into_parts())
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.rate_limiter.wait(RateLimitResource::Core).await?;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter
            .update_from_response(RateLimitResource::Core, &response)
            .await;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        let response = check_response(response, &url).await?;
        Ok(response.json().await?)
    }

    pub async fn search_commit_count(&self, username: &str) -> Result<u64> {
        self.rate_limiter.wait(RateLimitResource::Search).await?;
        let url = format!(
            "{}/search/commits?q=author:{}&per_page=1",
            self.base_url, username
        );
        tracing::debug!("Searching commits for: {}", username);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, COMMIT_SEARCH_MEDIA_TYPE)
            .send()
            .await?;
        self.rate_limiter
            .update_from_response(RateLimitResource::Search, &response)
            .await;
        let response = check_response(response, &url).await?;

        let count: SearchCount = response.json().await?;
        Ok(count.total_count)
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(&self.client, &self.rate_limiter)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn language_page(
        &self,
        login: &str,
        after: Option<&str>,
    ) -> Result<Page<LanguageRepository>> {
        tracing::debug!("Fetching language page for {} after {:?}", login, after);
        let user: LanguagesUser = self
            .graphql(login, LANGUAGES_QUERY, json!({ "login": login, "after": after }))
            .await?;
        Ok(user.repositories.into_page(LanguageRepository::from))
    }

    async fn first_repository_stats_page(
        &self,
        login: &str,
    ) -> Result<(Page<RepositoryStats>, ActivityTotals)> {
        self.repository_stats(login, None).await
    }

    async fn repository_stats_page(
        &self,
        login: &str,
        after: &str,
    ) -> Result<Page<RepositoryStats>> {
        let (page, _) = self.repository_stats(login, Some(after)).await?;
        Ok(page)
    }

    async fn contribution_calendar(
        &self,
        login: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar> {
        tracing::debug!("Fetching contribution calendar for {}: {} .. {}", login, from, to);
        let user: ContributionsUser = self
            .graphql(
                login,
                CONTRIBUTION_CALENDAR_QUERY,
                json!({
                    "login": login,
                    "from": from.to_rfc3339_opts(SecondsFormat::Secs, true),
                    "to": to.to_rfc3339_opts(SecondsFormat::Secs, true),
                }),
            )
            .await?;
        Ok(ContributionCalendar::from(user))
    }

    async fn user(&self, login: &str) -> Result<GitHubUser> {
        self.get_user(login).await
    }

    async fn commit_count(&self, login: &str) -> Result<u64> {
        self.search_commit_count(login).await
    }

    async fn owned_repository_page(
        &self,
        login: &str,
        page: u32,
    ) -> Result<RestPage<Repository>> {
        let url = format!("{}/users/{}/repos?type=owner", self.base_url, login);
        self.paginator().fetch_page(&url, page).await
    }

    async fn pull_request_page(
        &self,
        repo: &Repository,
        page: u32,
    ) -> Result<RestPage<PullRequestRef>> {
        let url = format!(
            "{}/repos/{}/{}/pulls?state=all",
            self.base_url, repo.owner.login, repo.name
        );
        self.paginator().fetch_page(&url, page).await
    }

    async fn review_page(
        &self,
        repo: &Repository,
        pull: u64,
        page: u32,
    ) -> Result<RestPage<Review>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_url, repo.owner.login, repo.name, pull
        );
        self.paginator().fetch_page(&url, page).await
    }
}

/// Passes successful responses through and turns everything else into an
/// `Error`, reading the body for context.
pub(crate) async fn check_response(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let Some(secs) = RateLimiter::retry_after(&response) {
        return Err(Error::RateLimited(secs));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "{} failed: {} - {}",
        context, status, body
    )))
}
