//! Body text cleanup for refined subsections.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::Segmenter;

/// Bullet prefix of a sentence: the heading bullet set plus the filled and
/// hollow variants (◆◇►▻□▫), en dash and the replacement glyph, with any
/// trailing spaces.
static SENTENCE_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\x{2022}\x{2023}\x{25AA}\x{25CF}\x{25CB}\x{25A0}\x{25B6}\x{2043}\x{2219}\x{204C}\x{204D}\x{25E6}\x{F0B7}\x{25C6}\x{25C7}\x{25BA}\x{25BB}\x{25A1}\x{25AB}\x{2013}\x{FFFD}\-\*]+\s*")
        .expect("sentence bullet pattern is valid")
});

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// NFC-normalize and expand typographic ligatures.
pub fn normalize_chars(text: &str) -> String {
    let mut result: String = text.nfc().collect();
    for (ligature, replacement) in LIGATURES {
        result = result.replace(ligature, replacement);
    }
    result
}

/// Clean raw region text into one line of content words per sentence.
///
/// Each sentence loses its leading bullet, stop words, punctuation and
/// whitespace tokens; survivors are joined with single spaces. Sentences
/// that end up empty are dropped. The result is empty when nothing is left.
pub fn clean_text(raw: &str, segmenter: &dyn Segmenter) -> String {
    let text = normalize_chars(raw);

    segmenter
        .sentences(&text)
        .into_iter()
        .filter_map(|sentence| {
            let stripped = SENTENCE_BULLET.replace(sentence.trim(), "");
            let words: Vec<String> = segmenter
                .tokenize(&stripped)
                .into_iter()
                .filter(|t| t.is_content())
                .map(|t| t.text)
                .collect();
            (!words.is_empty()).then(|| words.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
