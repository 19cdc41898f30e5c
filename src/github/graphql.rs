//! GraphQL documents and the response shapes they decode into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{
    ActivityTotals, ContributionCalendar, ContributionDay, LanguageEdge, LanguageRepository, Page,
    PageInfo, RepositoryStats,
};

pub const LANGUAGES_QUERY: &str = r#"
query userLanguages($login: String!, $after: String) {
  user(login: $login) {
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100, after: $after) {
      nodes {
        name
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node {
              name
              color
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

pub const REPOSITORY_STATS_QUERY: &str = r#"
query userRepositoryStats($login: String!, $after: String) {
  user(login: $login) {
    pullRequests(first: 1) {
      totalCount
    }
    issues {
      totalCount
    }
    repositories(ownerAffiliations: OWNER, isFork: false, first: 100, after: $after) {
      nodes {
        stargazerCount
        forkCount
        pushedAt
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

pub const CONTRIBUTION_CALENDAR_QUERY: &str = r#"
query contributionCalendar($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

impl<T> GraphQlResponse<T> {
    /// Unwraps `data`, turning reported errors into `Error`s. Partial data with
    /// errors attached is treated as a failure so that pages are never
    /// silently truncated. `reset_in` is the back-off reported for a
    /// `RATE_LIMITED` error.
    pub fn into_data(self, login: &str, reset_in: u64) -> Result<T> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let has_type = |kind: &str| errors.iter().any(|e| e.error_type.as_deref() == Some(kind));
            if has_type("RATE_LIMITED") {
                return Err(Error::RateLimited(reset_in));
            }
            if has_type("NOT_FOUND") {
                return Err(Error::UserNotFound(login.to_string()));
            }
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::GraphQl(message));
        }

        self.data
            .ok_or_else(|| Error::GraphQl("response carried neither data nor errors".to_string()))
    }
}

/// Every query here is rooted at `user(login:)`.
#[derive(Debug, Deserialize)]
pub struct UserRoot<T> {
    pub user: Option<T>,
}

impl<T> UserRoot<T> {
    pub fn into_user(self, login: &str) -> Result<T> {
        self.user.ok_or_else(|| Error::UserNotFound(login.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<N>>,
    pub page_info: PageInfo,
}

impl<N> Connection<N> {
    pub fn into_page<T>(self, convert: impl Fn(N) -> T) -> Page<T> {
        Page {
            items: self.nodes.into_iter().flatten().map(convert).collect(),
            page_info: self.page_info,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountOnly {
    pub total_count: u64,
}

// Languages

#[derive(Debug, Deserialize)]
pub struct LanguagesUser {
    pub repositories: Connection<LanguageRepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRepositoryNode {
    pub name: String,
    pub languages: Option<LanguageEdges>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEdges {
    #[serde(default = "Vec::new")]
    pub edges: Vec<LanguageEdgeNode>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEdgeNode {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Debug, Deserialize)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

impl From<LanguageRepositoryNode> for LanguageRepository {
    fn from(node: LanguageRepositoryNode) -> Self {
        let languages = node
            .languages
            .map(|l| l.edges)
            .unwrap_or_default()
            .into_iter()
            .map(|edge| LanguageEdge {
                name: edge.node.name,
                color: edge.node.color,
                size: edge.size,
            })
            .collect();

        Self {
            name: node.name,
            languages,
        }
    }
}

// Repository stats

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStatsUser {
    pub pull_requests: CountOnly,
    pub issues: CountOnly,
    pub repositories: Connection<RepositoryStatsNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStatsNode {
    pub stargazer_count: u64,
    pub fork_count: u64,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl From<RepositoryStatsNode> for RepositoryStats {
    fn from(node: RepositoryStatsNode) -> Self {
        Self {
            stargazers: node.stargazer_count,
            forks: node.fork_count,
            pushed_at: node.pushed_at,
        }
    }
}

impl RepositoryStatsUser {
    pub fn into_parts(self) -> (Page<RepositoryStats>, ActivityTotals) {
        let totals = ActivityTotals {
            pull_requests: self.pull_requests.total_count,
            issues: self.issues.total_count,
        };
        (self.repositories.into_page(RepositoryStats::from), totals)
    }
}

// Contribution calendar

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: CalendarNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarNode {
    pub total_contributions: u64,
    pub weeks: Vec<WeekNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekNode {
    pub contribution_days: Vec<DayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayNode {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

impl From<ContributionsUser> for ContributionCalendar {
    fn from(user: ContributionsUser) -> Self {
        let calendar = user.contributions_collection.contribution_calendar;
        let days = calendar
            .weeks
            .into_iter()
            .flat_map(|week| week.contribution_days)
            .map(|day| ContributionDay::new(day.date, day.contribution_count))
            .collect();

        Self {
            total: calendar.total_contributions,
            days,
        }
    }
}
