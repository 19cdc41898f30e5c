#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use profile_badges::models::{
    ActivityTotals, ContributionCalendar, ContributionDay, GitHubUser, LanguageEdge,
    LanguageRepository, Page, PullRequestRef, Repository, RepositoryStats, RestPage, Review,
};
use profile_badges::{Error, GitHubSource, Result};

pub const LOGIN: &str = "octocat";

pub fn cursor(index: usize) -> String {
    format!("cursor-{}", index)
}

/// Splits `pages` into a cursor-linked connection.
pub fn connection<T>(pages: Vec<Vec<T>>) -> Vec<Page<T>> {
    let count = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, items)| {
            if i + 1 < count {
                Page::with_cursor(items, &cursor(i + 1))
            } else {
                Page::last(items)
            }
        })
        .collect()
}

/// Splits `pages` into a numbered REST listing.
pub fn listing<T>(pages: Vec<Vec<T>>) -> Vec<RestPage<T>> {
    let count = pages.len();
    pages
        .into_iter()
        .enumerate()
        .map(|(i, items)| RestPage::new(items, i + 1 < count))
        .collect()
}

pub fn language_repo(name: &str, languages: &[(&str, &str, u64)]) -> LanguageRepository {
    LanguageRepository {
        name: name.to_string(),
        languages: languages
            .iter()
            .map(|(language, color, size)| LanguageEdge::new(language, Some(color), *size))
            .collect(),
    }
}

pub fn day(date: &str, count: u32) -> ContributionDay {
    ContributionDay::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        count,
    )
}

pub fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// In-memory GitHub with canned pages and call counters.
pub struct FakeGitHub {
    pub language_pages: Vec<Page<LanguageRepository>>,
    pub stats_pages: Vec<Page<RepositoryStats>>,
    pub activity: ActivityTotals,
    pub calendar: Vec<ContributionDay>,
    pub user: GitHubUser,
    /// `None` makes commit search fail.
    pub commits: Option<u64>,
    pub repositories: Vec<RestPage<Repository>>,
    pub pulls: HashMap<String, Vec<RestPage<PullRequestRef>>>,
    pub reviews: HashMap<(String, u64), Vec<RestPage<Review>>>,
    pub failing_reviews: Option<(String, u64)>,
    /// Zero-based index of the calendar window that fails.
    pub failing_window: Option<usize>,
    /// Cursor whose repository-stats page fails.
    pub failing_stats_cursor: Option<String>,
    pub windows: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
    pub calls: AtomicUsize,
}

impl Default for FakeGitHub {
    fn default() -> Self {
        Self {
            language_pages: vec![Page::last(Vec::new())],
            stats_pages: vec![Page::last(Vec::new())],
            activity: ActivityTotals::default(),
            calendar: Vec::new(),
            user: GitHubUser {
                login: LOGIN.to_string(),
                name: Some("The Octocat".to_string()),
                followers: 0,
                created_at: utc(2024, 1, 1),
            },
            commits: Some(0),
            repositories: vec![RestPage::new(Vec::new(), false)],
            pulls: HashMap::new(),
            reviews: HashMap::new(),
            failing_reviews: None,
            failing_window: None,
            failing_stats_cursor: None,
            windows: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeGitHub {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn windows(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.windows.lock().unwrap().clone()
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn cursor_page<T: Clone>(pages: &[Page<T>], after: Option<&str>) -> Result<Page<T>> {
        let index = match after {
            None => 0,
            Some(cursor) => cursor
                .strip_prefix("cursor-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| Error::GraphQl(format!("unknown cursor {}", cursor)))?,
        };
        pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::GraphQl(format!("no page at {}", index)))
    }

    fn numbered_page<T: Clone>(pages: Option<&Vec<RestPage<T>>>, page: u32) -> Result<RestPage<T>> {
        let Some(pages) = pages else {
            return Ok(RestPage::new(Vec::new(), false));
        };
        pages
            .get(page as usize - 1)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("page {} requested past the end", page)))
    }
}

#[async_trait]
impl GitHubSource for FakeGitHub {
    async fn language_page(
        &self,
        _login: &str,
        after: Option<&str>,
    ) -> Result<Page<LanguageRepository>> {
        self.record();
        Self::cursor_page(&self.language_pages, after)
    }

    async fn first_repository_stats_page(
        &self,
        _login: &str,
    ) -> Result<(Page<RepositoryStats>, ActivityTotals)> {
        self.record();
        Ok((Self::cursor_page(&self.stats_pages, None)?, self.activity))
    }

    async fn repository_stats_page(
        &self,
        _login: &str,
        after: &str,
    ) -> Result<Page<RepositoryStats>> {
        self.record();
        if self.failing_stats_cursor.as_deref() == Some(after) {
            return Err(Error::GraphQl(format!("repository page after {} failed", after)));
        }
        Self::cursor_page(&self.stats_pages, Some(after))
    }

    async fn contribution_calendar(
        &self,
        _login: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ContributionCalendar> {
        self.record();
        let index = {
            let mut windows = self.windows.lock().unwrap();
            windows.push((from, to));
            windows.len() - 1
        };
        if self.failing_window == Some(index) {
            return Err(Error::GraphQl(format!("calendar window {} failed", index)));
        }

        let days: Vec<ContributionDay> = self
            .calendar
            .iter()
            .copied()
            .filter(|d| d.date >= from.date_naive() && d.date <= to.date_naive())
            .collect();
        let total = days.iter().map(|d| d.count as u64).sum();
        Ok(ContributionCalendar { total, days })
    }

    async fn user(&self, _login: &str) -> Result<GitHubUser> {
        self.record();
        Ok(self.user.clone())
    }

    async fn commit_count(&self, _login: &str) -> Result<u64> {
        self.record();
        self.commits
            .ok_or_else(|| Error::GitHubApi("search unavailable".to_string()))
    }

    async fn owned_repository_page(&self, _login: &str, page: u32) -> Result<RestPage<Repository>> {
        self.record();
        Self::numbered_page(Some(&self.repositories), page)
    }

    async fn pull_request_page(
        &self,
        repo: &Repository,
        page: u32,
    ) -> Result<RestPage<PullRequestRef>> {
        self.record();
        Self::numbered_page(self.pulls.get(&repo.full_name), page)
    }

    async fn review_page(
        &self,
        repo: &Repository,
        pull: u64,
        page: u32,
    ) -> Result<RestPage<Review>> {
        self.record();
        let key = (repo.full_name.clone(), pull);
        if self.failing_reviews.as_ref() == Some(&key) {
            return Err(Error::GitHubApi(format!("reviews of {}#{} failed", key.0, pull)));
        }
        Self::numbered_page(self.reviews.get(&key), page)
    }
}

pub fn reviews(ids: std::ops::Range<u64>) -> Vec<Review> {
    ids.map(|id| Review { id }).collect()
}

pub fn pulls(numbers: &[u64]) -> Vec<PullRequestRef> {
    numbers.iter().map(|&number| PullRequestRef { number }).collect()
}

/// Every day from `from` to `to` inclusive, zero unless listed in `active`.
pub fn dense_calendar(from: &str, to: &str, active: &[(&str, u32)]) -> Vec<ContributionDay> {
    let start = NaiveDate::parse_from_str(from, "%Y-%m-%d").unwrap();
    let end = NaiveDate::parse_from_str(to, "%Y-%m-%d").unwrap();
    let counts: HashMap<NaiveDate, u32> = active
        .iter()
        .map(|(date, count)| (NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), *count))
        .collect();

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| ContributionDay::new(d, counts.get(&d).copied().unwrap_or(0)))
        .collect()
}
