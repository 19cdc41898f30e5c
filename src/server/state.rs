use std::sync::Arc;

use crate::analysis::ProfileAggregator;
use crate::config::{Config, PipelineConfig};
use crate::error::{Error, Result};
use crate::github::{GitHubClient, GitHubSource};
use crate::render::Theme;
use crate::server::cache::CardCache;

/// Shared by every request: configuration, the GitHub source and the card
/// cache. Nothing else outlives a request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub theme: Theme,
    pub cache: CardCache,
    source: Option<Arc<dyn GitHubSource>>,
}

impl AppState {
    /// Builds the production state. Missing credentials do not stop the
    /// server; every card request reports them instead.
    pub fn from_config(config: Config) -> Result<Self> {
        let source: Option<Arc<dyn GitHubSource>> = match config.credentials() {
            Ok(credentials) => Some(Arc::new(GitHubClient::with_base_url(
                &credentials.token,
                &config.api_base_url,
            )?)),
            Err(e) => {
                tracing::warn!("Cards will render as errors until configured: {}", e);
                None
            }
        };

        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: Config, source: Option<Arc<dyn GitHubSource>>) -> Self {
        Self {
            theme: Theme::named(&config.theme),
            cache: CardCache::new(config.cache_ttl()),
            config: Arc::new(config),
            source,
        }
    }

    /// Fails with `Error::Config` before any request is made when the account
    /// or token is missing.
    pub fn aggregator(&self) -> Result<ProfileAggregator> {
        let credentials = self.config.credentials()?;
        let source = self
            .source
            .clone()
            .ok_or_else(|| Error::Config("GitHub client is not configured".to_string()))?;

        Ok(ProfileAggregator::new(
            source,
            &credentials.login,
            PipelineConfig::from(self.config.as_ref()),
        ))
    }
}
