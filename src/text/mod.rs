//! Sentence and word segmentation, and body text cleanup.

mod cleanup;
mod stopwords;

pub use cleanup::{clean_text, normalize_chars};
pub use stopwords::is_stop_word;

use unicode_segmentation::UnicodeSegmentation;

/// A word-level token with its lexical classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_space: bool,
}

impl Token {
    /// Whether the token carries content worth keeping.
    pub fn is_content(&self) -> bool {
        !(self.is_stop || self.is_punct || self.is_space)
    }
}

/// Splits text into sentences and tokens.
pub trait Segmenter: Send + Sync {
    /// Sentences in order, untrimmed.
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Tokens of one sentence, including whitespace and punctuation tokens.
    fn tokenize(&self, sentence: &str) -> Vec<Token>;
}

/// English segmentation on Unicode text boundaries (UAX #29).
///
/// Contractions are split before their clitic (`Don't` -> `Do` `n't`,
/// `It's` -> `It` `'s`), so both halves meet the stop list.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishSegmenter;

/// Clitic suffixes, straight apostrophe form.
const CLITICS: [&str; 7] = ["n't", "'ll", "'re", "'ve", "'s", "'d", "'m"];

/// Split a word into stem and clitic when it ends in one.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    for clitic in CLITICS {
        let n = clitic.chars().count();
        if chars.len() <= n {
            continue;
        }
        let (at, _) = chars[chars.len() - n];
        let tail: String = word[at..]
            .chars()
            .map(|c| if c == '\u{2019}' { '\'' } else { c })
            .flat_map(char::to_lowercase)
            .collect();
        if tail == clitic {
            return (&word[..at], Some(&word[at..]));
        }
    }
    (word, None)
}

fn token(piece: &str) -> Token {
    let is_space = piece.chars().all(char::is_whitespace);
    let is_punct = !is_space
        && piece
            .chars()
            .all(|c| !c.is_alphanumeric() && !c.is_whitespace());
    Token {
        text: piece.to_string(),
        is_stop: !is_space && !is_punct && is_stop_word(piece),
        is_punct,
        is_space,
    }
}

impl Segmenter for EnglishSegmenter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences().collect()
    }

    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for piece in sentence.split_word_bounds() {
            match split_clitic(piece) {
                (stem, Some(clitic)) => {
                    tokens.push(token(stem));
                    tokens.push(token(clitic));
                }
                (word, None) => tokens.push(token(word)),
            }
        }
        tokens
    }
}
