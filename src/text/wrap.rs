//! Greedy word wrapping against measured glyph widths

use super::metrics::FontFace;

/// Split `text` into lines no wider than `max_width` points.
///
/// All whitespace, line breaks included, separates words; callers split on
/// `'\n'` first to keep hard breaks. Words are packed greedily, joined by
/// single spaces. A word that is wider than a whole line on its own is
/// broken at character boundaries.
pub fn wrap_text(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            place_word(word, face, size, max_width, &mut lines, &mut current);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if face.text_width(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            place_word(word, face, size, max_width, &mut lines, &mut current);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Start a fresh line with `word`, force-breaking it if it cannot fit
fn place_word(
    word: &str,
    face: FontFace,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
    current: &mut String,
) {
    if face.text_width(word, size) <= max_width {
        current.push_str(word);
        return;
    }

    let mut chunk = String::new();
    for c in word.chars() {
        chunk.push(c);
        // A single glyph wider than the line still gets a line of its own
        if chunk.chars().count() > 1 && face.text_width(&chunk, size) > max_width {
            chunk.pop();
            lines.push(std::mem::replace(&mut chunk, c.to_string()));
        }
    }
    current.push_str(&chunk);
}
