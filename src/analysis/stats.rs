use chrono::{DateTime, Duration, Utc};

use crate::analysis::following_cursor;
use crate::analysis::rank::calculate_rank;
use crate::analysis::reviews::count_reviews;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::GitHubSource;
use crate::models::{ActivityTotals, RankInputs, RepoAggregate, RepositoryStats, StatsSummary};

impl RepoAggregate {
    /// Folds one repository in; `active_since` is the cutoff for
    /// `active_repos_last_year`.
    pub fn add(&mut self, repo: &RepositoryStats, active_since: DateTime<Utc>) {
        self.total_stars += repo.stargazers;
        self.total_forks += repo.forks;
        self.repo_count += 1;
        if repo.pushed_at.is_some_and(|pushed| pushed >= active_since) {
            self.active_repos_last_year += 1;
        }
    }
}

/// Star, fork and activity totals over every owned repository, together with
/// the PR and issue counts delivered by the first page.
pub async fn repository_totals(
    source: &dyn GitHubSource,
    login: &str,
    now: DateTime<Utc>,
) -> Result<(RepoAggregate, ActivityTotals)> {
    let active_since = now - Duration::days(365);
    let mut aggregate = RepoAggregate::default();

    let (mut page, activity) = source.first_repository_stats_page(login).await?;
    loop {
        for repo in &page.items {
            aggregate.add(repo, active_since);
        }

        match following_cursor(&page)? {
            Some(cursor) => page = source.repository_stats_page(login, &cursor).await?,
            None => break,
        }
    }

    tracing::debug!(
        "{} repositories, {} stars, {} forks for {}",
        aggregate.repo_count,
        aggregate.total_stars,
        aggregate.total_forks,
        login
    );
    Ok((aggregate, activity))
}

/// Commit-search total, or 0 when the search is unavailable.
pub async fn commit_count_or_zero(source: &dyn GitHubSource, login: &str) -> u64 {
    match source.commit_count(login).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!("Commit search failed for {}, counting 0 commits: {}", login, e);
            0
        }
    }
}

pub async fn aggregate_stats(
    source: &dyn GitHubSource,
    login: &str,
    now: DateTime<Utc>,
    config: &PipelineConfig,
) -> Result<StatsSummary> {
    tracing::info!("Aggregating stats for {}", login);

    let ((repos, activity), reviews, user, total_commits) = futures::try_join!(
        repository_totals(source, login, now),
        count_reviews(source, login, config.review_concurrency),
        source.user(login),
        async { Ok::<_, Error>(commit_count_or_zero(source, login).await) },
    )?;

    let inputs = RankInputs {
        total_commits,
        prs: activity.pull_requests,
        issues: activity.issues,
        reviews,
        stars: repos.total_stars,
        followers: user.followers,
    };
    let rank = calculate_rank(&inputs, config.rank_all_commits);

    tracing::info!(
        "Rank for {}: {} ({:.1} percentile)",
        login,
        rank.level,
        rank.percentile
    );

    Ok(StatsSummary {
        login: user.login,
        name: user.name,
        repos,
        inputs,
        rank,
    })
}
