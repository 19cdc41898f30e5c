use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    ActivityTotals, ContributionCalendar, GitHubUser, LanguageRepository, Page, PullRequestRef,
    Repository, RepositoryStats, RestPage, Review,
};

/// Everything the aggregators read from GitHub.
///
/// `GitHubClient` is the production implementation; the aggregators only ever
/// see this trait so that each request gets an explicitly constructed source.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    /// Owned, non-fork repositories with their ten largest languages.
    async fn language_page(
        &self,
        login: &str,
        after: Option<&str>,
    ) -> Result<Page<LanguageRepository>>;

    /// First page of owned repositories plus the account-wide PR and issue
    /// totals that the same query carries.
    async fn first_repository_stats_page(
        &self,
        login: &str,
    ) -> Result<(Page<RepositoryStats>, ActivityTotals)>;

    async fn repository_stats_page(
        &self,
        login: &str,
        after: &str,
    ) -> Result<Page<RepositoryStats>>;

    /// Day-level calendar; `from..=to` must not span more than a year.
    async fn contribution_calendar(
        &self,
        login: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar>;

    async fn user(&self, login: &str) -> Result<GitHubUser>;

    /// Total number of commits authored by `login` according to commit search.
    async fn commit_count(&self, login: &str) -> Result<u64>;

    async fn owned_repository_page(&self, login: &str, page: u32)
        -> Result<RestPage<Repository>>;

    async fn pull_request_page(
        &self,
        repo: &Repository,
        page: u32,
    ) -> Result<RestPage<PullRequestRef>>;

    async fn review_page(
        &self,
        repo: &Repository,
        pull: u64,
        page: u32,
    ) -> Result<RestPage<Review>>;
}
