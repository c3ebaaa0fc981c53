/// Reduces raw extracted text to lowercase ASCII letters, digits and
/// single spaces.
///
/// Characters that are neither ASCII alphanumeric nor whitespace are
/// dropped outright, so `"node.js"` becomes `"nodejs"`. Runs of whitespace
/// collapse to one space and the result carries no leading or trailing
/// space. The ASCII information separators (U+001C..=U+001F) count as
/// whitespace. Never fails; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch.to_ascii_lowercase());
        } else if is_separator(ch) {
            pending_space = true;
        }
    }

    out
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1c}'..='\u{1f}')
}
