pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod render;
pub mod server;

pub use config::{Config, Credentials, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, GitHubSource};
pub use analysis::ProfileAggregator;
pub use render::{CardKind, Theme};
pub use server::AppState;
