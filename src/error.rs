use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("GitHub GraphQL error: {0}")]
    GraphQl(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_))
    }

    /// Short text suitable for an error card.
    pub fn card_message(&self) -> String {
        match self {
            Error::Config(msg) => msg.clone(),
            Error::UserNotFound(login) => format!("Could not find GitHub user '{}'", login),
            Error::RateLimited(secs) => {
                format!("GitHub rate limit reached, try again in {}s", secs)
            }
            Error::Network(_) => "Could not reach the GitHub API".to_string(),
            other => other.to_string(),
        }
    }
}
