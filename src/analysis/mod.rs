pub mod contributions;
pub mod languages;
pub mod rank;
pub mod reviews;
pub mod stats;

use std::sync::Arc;

use chrono::Utc;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::GitHubSource;
use crate::models::{LanguageShare, Page, StatsSummary, StreakSummary};

pub use contributions::{collect_contributions, summarize_streaks, year_windows};
pub use languages::{aggregate_languages, LanguageTally};
pub use rank::calculate_rank;
pub use reviews::count_reviews;
pub use stats::aggregate_stats;

/// Cursor of the page after `page`, or `None` when the connection is drained.
/// A page claiming more results without a cursor is an upstream error.
pub(crate) fn following_cursor<T>(page: &Page<T>) -> Result<Option<String>> {
    if !page.page_info.has_next_page {
        return Ok(None);
    }
    page.next_cursor()
        .map(|cursor| Some(cursor.to_string()))
        .ok_or_else(|| Error::GraphQl("page reports more results but no end cursor".to_string()))
}

/// The three card pipelines for one account, sharing an explicitly
/// constructed GitHub source.
pub struct ProfileAggregator {
    source: Arc<dyn GitHubSource>,
    login: String,
    config: PipelineConfig,
}

impl ProfileAggregator {
    pub fn new(source: Arc<dyn GitHubSource>, login: &str, config: PipelineConfig) -> Self {
        Self {
            source,
            login: login.to_string(),
            config,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub async fn languages(&self) -> Result<Vec<LanguageShare>> {
        tracing::info!("Aggregating languages for {}", self.login);
        aggregate_languages(self.source.as_ref(), &self.login).await
    }

    /// Streaks over the account's whole history, from sign-up until now.
    pub async fn streak(&self) -> Result<StreakSummary> {
        let user = self.source.user(&self.login).await?;
        collect_contributions(self.source.as_ref(), &self.login, user.created_at, Utc::now()).await
    }

    pub async fn stats(&self) -> Result<StatsSummary> {
        aggregate_stats(self.source.as_ref(), &self.login, Utc::now(), &self.config).await
    }
}
