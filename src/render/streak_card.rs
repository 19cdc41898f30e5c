use chrono::{Datelike, NaiveDate};

use crate::models::{DateRange, StreakSummary};
use crate::render::card::{compact_number, escape, frame};
use crate::render::theme::Theme;

const WIDTH: u32 = 495;
const HEIGHT: u32 = 195;
const COLUMNS: [f64; 3] = [82.5, 247.5, 412.5];

/// `Mar 3` within `today`'s year, `Mar 3, 2021` otherwise.
pub fn format_date(date: NaiveDate, today: NaiveDate) -> String {
    if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

/// A range ending today reads `... - Present`; a one-day range is one date.
pub fn format_range(range: Option<DateRange>, today: NaiveDate) -> String {
    let Some(range) = range else {
        return "-".to_string();
    };

    let start = format_date(range.start, today);
    if range.end >= today {
        format!("{} - Present", start)
    } else if range.start == range.end {
        start
    } else {
        format!("{} - {}", start, format_date(range.end, today))
    }
}

pub fn render_streak_card(summary: &StreakSummary, theme: &Theme, today: NaiveDate) -> String {
    let total_range = summary.first_active_date.map(|start| DateRange { start, end: today });

    let columns = [
        (
            compact_number(summary.total_contributions),
            "Total Contributions",
            format_range(total_range, today),
        ),
        (
            summary.current_streak.to_string(),
            "Current Streak",
            format_range(summary.current_range, today),
        ),
        (
            summary.longest_streak.to_string(),
            "Longest Streak",
            format_range(summary.longest_range, today),
        ),
    ];

    let mut body = String::new();
    for (x, (value, label, range)) in COLUMNS.iter().zip(columns.iter()) {
        body.push_str(&format!(
            r#"    <g transform="translate({x}, 0)">
      <text x="0" y="40" text-anchor="middle" class="big">{value}</text>
      <text x="0" y="75" text-anchor="middle" class="stat">{label}</text>
      <text x="0" y="100" text-anchor="middle" class="label">{range}</text>
    </g>
"#,
            x = x,
            value = escape(value),
            label = escape(label),
            range = escape(range),
        ));
    }

    // Ring around the current streak, the card's focal point.
    body.push_str(&format!(
        "    <circle cx=\"{}\" cy=\"30\" r=\"38\" stroke=\"{}\" stroke-width=\"5\" fill=\"none\"/>\n",
        COLUMNS[1], theme.icon
    ));
    for x in [165.0, 330.0] {
        body.push_str(&format!(
            "    <line x1=\"{x}\" y1=\"-10\" x2=\"{x}\" y2=\"115\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            theme.border,
            x = x
        ));
    }

    frame(WIDTH, HEIGHT, "Contribution Streak", theme, &body)
}
