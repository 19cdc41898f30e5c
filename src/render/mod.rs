pub mod card;
pub mod error_card;
pub mod languages_card;
pub mod stats_card;
pub mod streak_card;
pub mod theme;

use chrono::Utc;

use crate::analysis::ProfileAggregator;
use crate::error::Result;

pub use error_card::render_error_card;
pub use languages_card::render_languages_card;
pub use stats_card::render_stats_card;
pub use streak_card::render_streak_card;
pub use theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum CardKind {
    Stats,
    Streak,
    Languages,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Stats => write!(f, "stats"),
            CardKind::Streak => write!(f, "streak"),
            CardKind::Languages => write!(f, "languages"),
        }
    }
}

/// Runs the pipeline behind `kind` and renders its card.
pub async fn render_card(
    aggregator: &ProfileAggregator,
    kind: CardKind,
    theme: &Theme,
) -> Result<String> {
    let svg = match kind {
        CardKind::Stats => render_stats_card(&aggregator.stats().await?, theme),
        CardKind::Streak => {
            let summary = aggregator.streak().await?;
            render_streak_card(&summary, theme, Utc::now().date_naive())
        }
        CardKind::Languages => render_languages_card(&aggregator.languages().await?, theme),
    };
    Ok(svg)
}
