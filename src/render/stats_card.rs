use std::f64::consts::PI;

use crate::models::StatsSummary;
use crate::render::card::{compact_number, escape, frame};
use crate::render::theme::Theme;

const WIDTH: u32 = 467;
const ROW_HEIGHT: u32 = 25;
const RING_RADIUS: f64 = 40.0;

pub fn render_stats_card(summary: &StatsSummary, theme: &Theme) -> String {
    let display_name = summary.name.as_deref().unwrap_or(&summary.login);
    let title = format!("{}'s GitHub Stats", display_name);

    let rows = [
        ("Total Stars Earned", summary.inputs.stars),
        ("Total Commits", summary.inputs.total_commits),
        ("Total PRs", summary.inputs.prs),
        ("Total Issues", summary.inputs.issues),
        ("Total Reviews", summary.inputs.reviews),
        ("Followers", summary.inputs.followers),
        ("Active Repos (last year)", summary.repos.active_repos_last_year),
    ];

    let mut body = String::new();
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = i as u32 * ROW_HEIGHT;
        body.push_str(&format!(
            "    <g transform=\"translate(25, {y})\">\n      <circle cx=\"5\" cy=\"-5\" r=\"4\" class=\"icon\"/>\n      <text x=\"20\" y=\"0\" class=\"stat\">{label}:</text>\n      <text x=\"220\" y=\"0\" class=\"stat\">{value}</text>\n    </g>\n",
            y = y,
            label = escape(label),
            value = compact_number(*value),
        ));
    }
    body.push_str(&rank_ring(summary, theme));

    let height = 55 + rows.len() as u32 * ROW_HEIGHT + 20;
    frame(WIDTH, height, &title, theme, &body)
}

/// Circle whose filled arc grows as the percentile shrinks.
fn rank_ring(summary: &StatsSummary, theme: &Theme) -> String {
    let circumference = 2.0 * PI * RING_RADIUS;
    let progress = (100.0 - summary.rank.percentile).clamp(0.0, 100.0) / 100.0;
    let offset = circumference * (1.0 - progress);

    format!(
        r#"    <g transform="translate(385, 60)">
      <circle r="{r}" stroke="{border}" stroke-width="6" fill="none" opacity="0.3"/>
      <circle r="{r}" stroke="{accent}" stroke-width="6" fill="none" stroke-dasharray="{c:.2}" stroke-dashoffset="{offset:.2}" transform="rotate(-90)"/>
      <text x="0" y="8" text-anchor="middle" class="rank">{level}</text>
      <text x="0" y="62" text-anchor="middle" class="label">Top {percentile:.1}%</text>
    </g>
"#,
        r = RING_RADIUS,
        border = theme.border,
        accent = theme.icon,
        c = circumference,
        offset = offset,
        level = escape(summary.rank.level.label()),
        percentile = summary.rank.percentile,
    )
}
