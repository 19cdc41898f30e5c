use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub github_user: Option<String>,
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub theme: String,
    pub bind_addr: SocketAddr,
    pub cache_seconds: u64,
    pub stale_while_revalidate_seconds: u64,
    pub review_concurrency: usize,
    pub rank_all_commits: bool,
}

/// Account identity and access token, both present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Credentials stay
    /// optional here; `credentials()` validates them per request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = match non_empty("BIND_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| Error::Config(format!("BIND_ADDR is not a socket address: {}", addr)))?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let cache_seconds = non_empty("CACHE_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800);

        let stale_while_revalidate_seconds = non_empty("STALE_WHILE_REVALIDATE_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let review_concurrency = non_empty("REVIEW_CONCURRENCY")
            .and_then(|v| v.parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or(4);

        let rank_all_commits = non_empty("RANK_ALL_COMMITS")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            github_user: non_empty("GITHUB_USER"),
            github_token: non_empty("GITHUB_TOKEN"),
            api_base_url: non_empty("GITHUB_API_URL")
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            theme: non_empty("THEME").unwrap_or_else(|| "default".to_string()),
            bind_addr,
            cache_seconds,
            stale_while_revalidate_seconds,
            review_concurrency,
            rank_all_commits,
        })
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let login = self
            .github_user
            .clone()
            .ok_or_else(|| Error::Config("GITHUB_USER environment variable not set".to_string()))?;

        let token = self
            .github_token
            .clone()
            .ok_or_else(|| Error::Config("GITHUB_TOKEN environment variable not set".to_string()))?;

        Ok(Credentials { login, token })
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_seconds)
    }

    /// Value of the `Cache-Control` header sent with rendered cards.
    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={ttl}, s-maxage={ttl}, stale-while-revalidate={swr}",
            ttl = self.cache_seconds,
            swr = self.stale_while_revalidate_seconds
        )
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub review_concurrency: usize,
    pub rank_all_commits: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            review_concurrency: 4,
            rank_all_commits: true,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            review_concurrency: config.review_concurrency,
            rank_all_commits: config.rank_all_commits,
        }
    }
}
