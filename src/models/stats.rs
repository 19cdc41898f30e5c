use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-repository counters used by the stats card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStats {
    pub stargazers: u64,
    pub forks: u64,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Account-wide counts delivered once, alongside the first repository page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub pull_requests: u64,
    pub issues: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoAggregate {
    pub total_stars: u64,
    pub total_forks: u64,
    pub repo_count: u64,
    pub active_repos_last_year: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankInputs {
    pub total_commits: u64,
    pub prs: u64,
    pub issues: u64,
    pub reviews: u64,
    pub stars: u64,
    pub followers: u64,
}

/// Letter grades from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RankLevel {
    S,
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
}

impl RankLevel {
    pub const ALL: [RankLevel; 9] = [
        RankLevel::S,
        RankLevel::APlus,
        RankLevel::A,
        RankLevel::AMinus,
        RankLevel::BPlus,
        RankLevel::B,
        RankLevel::BMinus,
        RankLevel::CPlus,
        RankLevel::C,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RankLevel::S => "S",
            RankLevel::APlus => "A+",
            RankLevel::A => "A",
            RankLevel::AMinus => "A-",
            RankLevel::BPlus => "B+",
            RankLevel::B => "B",
            RankLevel::BMinus => "B-",
            RankLevel::CPlus => "C+",
            RankLevel::C => "C",
        }
    }
}

impl std::fmt::Display for RankLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub level: RankLevel,
    pub percentile: f64,
}

/// Everything the stats card needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub login: String,
    pub name: Option<String>,
    pub repos: RepoAggregate,
    pub inputs: RankInputs,
    pub rank: RankResult,
}
