//! Multi-line title input.

/// Split pasted text into one title per non-blank line.
pub fn titles_from_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
