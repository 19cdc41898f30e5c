/// Card palette. Colors are CSS hex values including the leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: "default",
        title: "#2f80ed",
        text: "#434d58",
        icon: "#4c71f1",
        background: "#fffefe",
        border: "#e4e2e2",
    },
    Theme {
        name: "dark",
        title: "#ffffff",
        text: "#9f9f9f",
        icon: "#79ff97",
        background: "#151515",
        border: "#2b2b2b",
    },
    Theme {
        name: "radical",
        title: "#fe428e",
        text: "#a9fef7",
        icon: "#f8d847",
        background: "#141321",
        border: "#2a2740",
    },
    Theme {
        name: "tokyonight",
        title: "#70a5fd",
        text: "#38bdae",
        icon: "#bf91f3",
        background: "#1a1b27",
        border: "#2a2c3e",
    },
    Theme {
        name: "gruvbox",
        title: "#fabd2f",
        text: "#8ec07c",
        icon: "#fe8019",
        background: "#282828",
        border: "#3c3836",
    },
    Theme {
        name: "onedark",
        title: "#e4bf7a",
        text: "#df6d74",
        icon: "#8eb573",
        background: "#282c34",
        border: "#3b4048",
    },
];

impl Theme {
    /// Looks a theme up by name, case-insensitively; unknown names get the
    /// default palette.
    pub fn named(name: &str) -> Theme {
        THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .unwrap_or(THEMES[0])
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lookup() {
        assert_eq!(Theme::named("Radical").name, "radical");
        assert_eq!(Theme::named(" dark ").name, "dark");
        assert_eq!(Theme::named("no-such-theme"), Theme::default());
    }

    #[test]
    fn test_theme_names_unique() {
        let mut names: Vec<_> = THEMES.iter().map(|t| t.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), THEMES.len());
    }
}
