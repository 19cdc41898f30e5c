use crate::render::card::{escape, frame};
use crate::render::theme::Theme;

const WIDTH: u32 = 495;
const LINE_CHARS: usize = 60;
const MAX_LINES: usize = 3;

/// Card shown in place of a badge when it could not be produced.
pub fn render_error_card(message: &str, theme: &Theme) -> String {
    let lines = wrap(message, LINE_CHARS, MAX_LINES);

    let mut body = format!(
        "    <path d=\"M25 -2 L35 -20 L45 -2 Z\" class=\"icon\"/>\n    <text x=\"35\" y=\"-5\" text-anchor=\"middle\" style=\"font: 700 12px sans-serif; fill: {}\">!</text>\n",
        theme.background
    );
    for (i, line) in lines.iter().enumerate() {
        body.push_str(&format!(
            "    <text x=\"55\" y=\"{}\" class=\"label\">{}</text>\n",
            -6 + i as i32 * 18,
            escape(line)
        ));
    }

    let height = 80 + lines.len() as u32 * 18;
    frame(WIDTH, height, "Something went wrong", theme, &body)
}

/// Greedy word wrap; the last kept line gets an ellipsis when text is cut.
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str(" ...");
        }
    }
    lines
}
