//! Greedy word wrap against the static metric tables.
//!
//! Explicit line breaks in the text start a new line. A word wider than the
//! line on its own is broken between characters.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_pt` at `size_pt`.
/// Empty text yields no lines.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, size_pt: f64, max_width_pt: f64) -> Vec<String> {
    let max_width = if size_pt > 0.0 { max_width_pt / size_pt } else { 0.0 };
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            continue;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f64;

        for word in words {
            let word_w = f64::from(metrics.measure_str(word));
            let space_w = if current.is_empty() {
                0.0
            } else {
                f64::from(metrics.space_width)
            };

            if current_width + space_w + word_w <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            // Current line is full; push it and start a new one.
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_w <= max_width {
                current.push_str(word);
                current_width = word_w;
            } else {
                let mut pieces = break_word(word, metrics, max_width);
                if let Some(last) = pieces.pop() {
                    current_width = f64::from(metrics.measure_str(&last));
                    lines.extend(pieces);
                    current = last;
                }
            }
        }
        lines.push(current);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Splits a single over-long word into chunks that each fit `max_width` em.
/// Every chunk holds at least one character.
fn break_word(word: &str, metrics: &FontMetricTable, max_width: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f64;

    for c in word.chars() {
        let mut buf = [0u8; 4];
        let w = f64::from(metrics.measure_str(c.encode_utf8(&mut buf)));
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
