use crate::models::LanguageShare;
use crate::render::card::{escape, frame};
use crate::render::theme::Theme;

const WIDTH: u32 = 300;
const BAR_WIDTH: f64 = 250.0;
const LEGEND_ROW: u32 = 25;

pub fn render_languages_card(languages: &[LanguageShare], theme: &Theme) -> String {
    if languages.is_empty() {
        let body = "    <text x=\"25\" y=\"10\" class=\"stat\">No languages found</text>\n";
        return frame(WIDTH, 90, "Most Used Languages", theme, body);
    }

    // Segments are scaled to the shares shown so the bar is always full.
    let shown: f64 = languages.iter().map(|l| l.percent).sum();
    let mut body = String::from(
        "    <mask id=\"bar-mask\">\n      <rect x=\"25\" y=\"0\" width=\"250\" height=\"8\" rx=\"5\" fill=\"white\"/>\n    </mask>\n    <g mask=\"url(#bar-mask)\">\n",
    );

    let mut x = 25.0;
    for language in languages {
        let width = if shown > 0.0 {
            BAR_WIDTH * language.percent / shown
        } else {
            0.0
        };
        body.push_str(&format!(
            "      <rect x=\"{:.2}\" y=\"0\" width=\"{:.2}\" height=\"8\" fill=\"{}\"/>\n",
            x,
            width,
            escape(&language.color)
        ));
        x += width;
    }
    body.push_str("    </g>\n");

    for (i, language) in languages.iter().enumerate() {
        let column = (i % 2) as u32;
        let row = (i / 2) as u32;
        body.push_str(&format!(
            r#"    <g transform="translate({x}, {y})">
      <circle cx="5" cy="-4" r="5" fill="{color}"/>
      <text x="15" y="0" class="label">{name} {percent:.2}%</text>
    </g>
"#,
            x = 25 + column * 140,
            y = 35 + row * LEGEND_ROW,
            color = escape(&language.color),
            name = escape(&language.name),
            percent = language.percent,
        ));
    }

    let rows = (languages.len() as u32 + 1) / 2;
    let height = 55 + 35 + rows * LEGEND_ROW;
    frame(WIDTH, height, "Most Used Languages", theme, &body)
}
