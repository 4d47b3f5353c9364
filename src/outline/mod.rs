//! Title and outline extraction over a [`TextLayer`].
//!
//! Headings are found in two passes. [`is_heading`] decides from the shape
//! of a line alone; a [`LevelStrategy`] then ranks the surviving candidates
//! by font size.

mod classifier;
mod levels;

pub use classifier::{is_bullet_line, is_heading, MAX_HEADING_CHARS, MIN_HEADING_CHARS};
pub use levels::{LevelStrategy, OutOfRange, TopSizes};

use std::sync::Arc;

use crate::model::{HeadingCandidate, Outline, OutlineEntry, UNTITLED};
use crate::parser::TextLayer;

/// Builds [`Outline`]s from a text layer.
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    strategy: Arc<dyn LevelStrategy>,
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new(TopSizes::default())
    }
}

impl OutlineExtractor {
    /// Create an extractor with a level strategy.
    pub fn new(strategy: impl LevelStrategy + 'static) -> Self {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    /// Create an extractor from a shared strategy.
    pub fn with_shared(strategy: Arc<dyn LevelStrategy>) -> Self {
        Self { strategy }
    }

    /// Title and outline in one pass over the layer.
    pub fn process(&self, layer: &dyn TextLayer) -> Outline {
        Outline::new(extract_title(layer), self.extract_outline(layer))
    }

    /// Ordered outline entries for the whole document.
    pub fn extract_outline(&self, layer: &dyn TextLayer) -> Vec<OutlineEntry> {
        let candidates = heading_candidates(layer);
        let levels = self.strategy.assign(&candidates);

        candidates
            .into_iter()
            .zip(levels)
            .filter_map(|(candidate, level)| {
                level.map(|level| OutlineEntry {
                    level,
                    text: candidate.text,
                    page: candidate.page,
                })
            })
            .collect()
    }
}

/// Lines that pass [`is_heading`], in page then line order.
pub fn heading_candidates(layer: &dyn TextLayer) -> Vec<HeadingCandidate> {
    let mut candidates = Vec::new();
    for page in 0..layer.page_count() {
        for line in layer.lines(page) {
            let text = line.text();
            if is_heading(&text) {
                candidates.push(HeadingCandidate {
                    text,
                    size: line.rounded_size(),
                    page,
                });
            }
        }
    }
    candidates
}

/// Title of a document: the largest text on its first page.
///
/// Every first-page span at the maximum rounded size contributes, joined in
/// reading order. Falls back to [`UNTITLED`].
pub fn extract_title(layer: &dyn TextLayer) -> String {
    let spans = layer.spans(0);
    let Some(max_size) = spans.iter().map(|s| s.rounded_size()).max() else {
        return UNTITLED.to_string();
    };

    let title = spans
        .iter()
        .filter(|s| s.rounded_size() == max_size)
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let title = title.trim();

    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}

/// Outline with the default three-tier strategy.
pub fn extract_outline(layer: &dyn TextLayer) -> Outline {
    OutlineExtractor::default().process(layer)
}
