use serde::{Deserialize, Serialize};

/// Color used when GitHub has none on record for a language.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#858585";

/// A language entry attached to one repository, as reported by GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEdge {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

impl LanguageEdge {
    pub fn new(name: &str, color: Option<&str>, size: u64) -> Self {
        Self {
            name: name.to_string(),
            color: color.map(str::to_string),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRepository {
    pub name: String,
    pub languages: Vec<LanguageEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTotal {
    pub name: String,
    pub color: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub color: String,
    pub percent: f64,
}
