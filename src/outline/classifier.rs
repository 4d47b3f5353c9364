//! Shape-based heading test.
//!
//! Font size plays no part here; it only decides the level later.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading bullet glyphs: •‣▪●○■▶⁃∙⁌⁍◦, the Symbol-font private-use bullet, `-` and `*`.
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\x{2022}\x{2023}\x{25AA}\x{25CF}\x{25CB}\x{25A0}\x{25B6}\x{2043}\x{2219}\x{204C}\x{204D}\x{25E6}\x{F0B7}\-\*]+")
        .expect("bullet prefix pattern is valid")
});

/// Minimum heading length in characters, after trimming.
pub const MIN_HEADING_CHARS: usize = 3;

/// Maximum heading length in characters, after trimming.
pub const MAX_HEADING_CHARS: usize = 200;

/// Lines that look like headings but never belong in an outline.
const STOPLIST: [&str; 2] = ["table of contents", "index"];

/// Whether the text starts with a bullet or list marker.
pub fn is_bullet_line(text: &str) -> bool {
    BULLET_PREFIX.is_match(text.trim())
}

/// Decide whether a line of text is shaped like a heading.
///
/// Rejects text that is too short or too long, ends with a period, is a
/// stoplisted label, or starts with a bullet. Accepts the rest iff the
/// first character is uppercase.
pub fn is_heading(text: &str) -> bool {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
        return false;
    }
    if trimmed.ends_with('.') {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    if STOPLIST.contains(&lowered.as_str()) {
        return false;
    }
    if is_bullet_line(trimmed) {
        return false;
    }
    trimmed.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_capitalized_lines() {
        assert!(is_heading("Introduction"));
        assert!(is_heading("Things to Do in Nice"));
        assert!(is_heading("  Padded Heading  "));
        assert!(is_heading("Élan vital"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(!is_heading("Hi"));
        assert!(is_heading("Hey"));
        assert!(is_heading(&format!("A{}", "b".repeat(199))));
        assert!(!is_heading(&format!("A{}", "b".repeat(200))));
    }

    #[test]
    fn test_rejects_sentences() {
        assert!(!is_heading("This is a full sentence."));
    }

    #[test]
    fn test_rejects_stoplist_any_case() {
        assert!(!is_heading("Table of Contents"));
        assert!(!is_heading("INDEX"));
        assert!(is_heading("Indexing Strategies"));
    }

    #[test]
    fn test_rejects_bullets() {
        assert!(!is_heading("• Pack light"));
        assert!(!is_heading("- Item"));
        assert!(!is_heading("* Starred"));
        assert!(!is_heading("\u{F0B7} Symbol bullet"));
        assert!(!is_heading("◦◦ Nested"));
    }

    #[test]
    fn test_rejects_lowercase_and_digits() {
        assert!(!is_heading("lowercase start"));
        assert!(!is_heading("1. Numbered"));
        assert!(!is_heading("2024 Highlights"));
    }
}
