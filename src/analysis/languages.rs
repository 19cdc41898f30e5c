use std::collections::HashMap;

use crate::analysis::following_cursor;
use crate::error::Result;
use crate::github::GitHubSource;
use crate::models::{
    LanguageEdge, LanguageRepository, LanguageShare, LanguageTotal, DEFAULT_LANGUAGE_COLOR,
};

/// Number of languages shown on the card.
pub const TOP_LANGUAGES: usize = 6;

/// Running byte totals per language name.
#[derive(Debug, Default)]
pub struct LanguageTally {
    totals: HashMap<String, LanguageTotal>,
    repositories: usize,
}

impl LanguageTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, edge: &LanguageEdge) {
        let entry = self
            .totals
            .entry(edge.name.clone())
            .or_insert_with(|| LanguageTotal {
                name: edge.name.clone(),
                color: edge
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LANGUAGE_COLOR.to_string()),
                bytes: 0,
            });
        entry.bytes += edge.size;
    }

    pub fn add_repository(&mut self, repo: &LanguageRepository) {
        self.repositories += 1;
        for edge in &repo.languages {
            self.add(edge);
        }
    }

    pub fn repository_count(&self) -> usize {
        self.repositories
    }

    pub fn total_bytes(&self) -> u64 {
        self.totals.values().map(|t| t.bytes).sum()
    }

    pub fn get(&self, name: &str) -> Option<&LanguageTotal> {
        self.totals.get(name)
    }

    /// The `limit` largest languages as percentages of all bytes seen.
    /// Empty when no bytes were recorded.
    pub fn top_shares(&self, limit: usize) -> Vec<LanguageShare> {
        let total = self.total_bytes();
        if total == 0 {
            return Vec::new();
        }

        let mut shares: Vec<LanguageShare> = self
            .totals
            .values()
            .map(|t| LanguageShare {
                name: t.name.clone(),
                color: t.color.clone(),
                percent: 100.0 * t.bytes as f64 / total as f64,
            })
            .collect();

        shares.sort_by(|a, b| {
            b.percent
                .total_cmp(&a.percent)
                .then_with(|| a.name.cmp(&b.name))
        });
        shares.truncate(limit);
        shares
    }
}

/// Drains the owner's language connection into a tally.
pub async fn collect_language_totals(
    source: &dyn GitHubSource,
    login: &str,
) -> Result<LanguageTally> {
    let mut tally = LanguageTally::new();
    let mut after: Option<String> = None;

    loop {
        let page = source.language_page(login, after.as_deref()).await?;
        for repo in &page.items {
            tally.add_repository(repo);
        }

        match following_cursor(&page)? {
            Some(cursor) => after = Some(cursor),
            None => break,
        }
    }

    tracing::info!(
        "Collected {} languages across {} repositories for {}",
        tally.totals.len(),
        tally.repository_count(),
        login
    );
    Ok(tally)
}

pub async fn aggregate_languages(
    source: &dyn GitHubSource,
    login: &str,
) -> Result<Vec<LanguageShare>> {
    let tally = collect_language_totals(source, login).await?;
    Ok(tally.top_shares(TOP_LANGUAGES))
}
