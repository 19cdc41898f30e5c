//! Pieces shared by every card: the outer frame, escaping and number
//! formatting.

use crate::render::theme::Theme;

const FONT: &str = "'Segoe UI', Ubuntu, 'Helvetica Neue', Sans-Serif";

/// Escapes text for use in SVG element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `999`, `1.2k`, `3.4M`; fractions are truncated to one decimal.
pub fn compact_number(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => scaled(n, 1_000, "k"),
        _ => scaled(n, 1_000_000, "M"),
    }
}

fn scaled(n: u64, unit: u64, suffix: &str) -> String {
    let tenths = n / (unit / 10);
    match tenths % 10 {
        0 => format!("{}{}", tenths / 10, suffix),
        frac => format!("{}.{}{}", tenths / 10, frac, suffix),
    }
}

/// Wraps `body` in the themed card frame. The body is placed below the
/// title, translated to `(0, 55)`.
pub fn frame(width: u32, height: u32, title: &str, theme: &Theme, body: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" role="img" aria-labelledby="card-title">
  <title id="card-title">{title}</title>
  <style>
    .header {{ font: 600 18px {font}; fill: {title_color}; }}
    .stat {{ font: 600 14px {font}; fill: {text_color}; }}
    .label {{ font: 400 12px {font}; fill: {text_color}; }}
    .big {{ font: 700 28px {font}; fill: {title_color}; }}
    .rank {{ font: 800 24px {font}; fill: {text_color}; }}
    .icon {{ fill: {icon_color}; }}
  </style>
  <rect x="0.5" y="0.5" rx="4.5" width="{inner_width}" height="{inner_height}" fill="{background}" stroke="{border}"/>
  <text x="25" y="35" class="header">{title}</text>
  <g transform="translate(0, 55)">
{body}
  </g>
</svg>
"##,
        width = width,
        height = height,
        inner_width = width - 1,
        inner_height = height - 1,
        title = escape(title),
        font = FONT,
        title_color = theme.title,
        text_color = theme.text,
        icon_color = theme.icon,
        background = theme.background,
        border = theme.border,
        body = body,
    )
}
