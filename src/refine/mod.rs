//! Body text extraction beneath ranked headings.

use std::sync::Arc;

use crate::model::{RankedSection, Rect, SubsectionAnalysis};
use crate::parser::TextLayer;
use crate::text::{clean_text, EnglishSegmenter, Segmenter};

/// Gap between the heading box and the start of the body region, in points.
pub const DEFAULT_MARGIN: f32 = 5.0;

/// Share of the page height assumed to hold the heading when it cannot be found.
pub const DEFAULT_FALLBACK_FRACTION: f32 = 0.15;

/// Locates a section's heading and cleans the text below it.
#[derive(Clone)]
pub struct SubsectionRefiner {
    segmenter: Arc<dyn Segmenter>,
    margin: f32,
    fallback_fraction: f32,
}

impl Default for SubsectionRefiner {
    fn default() -> Self {
        Self::new(EnglishSegmenter)
    }
}

impl SubsectionRefiner {
    pub fn new(segmenter: impl Segmenter + 'static) -> Self {
        Self {
            segmenter: Arc::new(segmenter),
            margin: DEFAULT_MARGIN,
            fallback_fraction: DEFAULT_FALLBACK_FRACTION,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the fallback heading height as a fraction of the page, clamped to `0..=1`.
    pub fn with_fallback_fraction(mut self, fraction: f32) -> Self {
        self.fallback_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Box of the heading on its page, or the top band of the page.
    pub fn heading_box(&self, layer: &dyn TextLayer, page: usize, title: &str, page_rect: &Rect) -> Rect {
        match layer.search(page, title).into_iter().next() {
            Some(hit) => hit,
            None => {
                log::debug!("Heading {:?} not found on page {}, using top band", title, page);
                Rect::new(
                    0.0,
                    0.0,
                    page_rect.width(),
                    page_rect.height() * self.fallback_fraction,
                )
            }
        }
    }

    /// Region from just below the heading to the bottom of the page.
    pub fn body_region(&self, heading: &Rect, page_rect: &Rect) -> Rect {
        Rect::new(
            0.0,
            heading.y1 + self.margin,
            page_rect.width(),
            page_rect.height(),
        )
    }

    /// Cleaned body text for one ranked section.
    ///
    /// `None` when the page is missing or nothing survives extraction and cleanup.
    pub fn refine(&self, layer: &dyn TextLayer, section: &RankedSection) -> Option<SubsectionAnalysis> {
        let page = section.page_number;
        let Some(page_rect) = layer.page_rect(page) else {
            log::warn!(
                "{}: page {} does not exist, skipping {:?}",
                section.document,
                page,
                section.section_title
            );
            return None;
        };

        let heading = self.heading_box(layer, page, &section.section_title, &page_rect);
        let region = self.body_region(&heading, &page_rect);
        let raw = layer.text_in_region(page, &region);
        if raw.trim().is_empty() {
            log::debug!("{}: no text below {:?}", section.document, section.section_title);
            return None;
        }

        let refined = clean_text(&raw, self.segmenter.as_ref());
        if refined.is_empty() {
            return None;
        }
        Some(SubsectionAnalysis {
            document: section.document.clone(),
            refined_text: refined,
            page_number: page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextSpan;
    use crate::parser::{PageLayer, PageText};

    fn span(text: &str, size: f32, x0: f32, y0: f32) -> TextSpan {
        let width = text.chars().count() as f32 * size * 0.5;
        TextSpan::new(text, size, Rect::new(x0, y0, x0 + width, y0 + size), 0)
    }

    fn ranked(title: &str, page: usize) -> RankedSection {
        RankedSection {
            document: "guide.pdf".into(),
            section_title: title.into(),
            importance_rank: 1,
            page_number: page,
        }
    }

    #[test]
    fn test_refines_text_below_heading() {
        let layer = PageLayer::new(vec![PageText::new(
            600.0,
            800.0,
            vec![
                span("Intro text above the heading.", 10.0, 72.0, 40.0),
                span("Coastal Adventures", 18.0, 72.0, 100.0),
                span("Go beach hopping in Nice.", 10.0, 72.0, 140.0),
            ],
        )]);
        let result = SubsectionRefiner::default()
            .refine(&layer, &ranked("Coastal Adventures", 0))
            .unwrap();
        assert_eq!(result.refined_text, "beach hopping Nice");
        assert_eq!(result.page_number, 0);
    }

    #[test]
    fn test_whitespace_region_yields_nothing() {
        let layer = PageLayer::new(vec![PageText::new(
            600.0,
            800.0,
            vec![span("Last Heading", 18.0, 72.0, 700.0)],
        )]);
        assert!(SubsectionRefiner::default()
            .refine(&layer, &ranked("Last Heading", 0))
            .is_none());
    }

    #[test]
    fn test_stop_words_only_yields_nothing() {
        let layer = PageLayer::new(vec![PageText::new(
            600.0,
            800.0,
            vec![
                span("Notes", 18.0, 72.0, 100.0),
                span("It is what it is.", 10.0, 72.0, 140.0),
            ],
        )]);
        assert!(SubsectionRefiner::default()
            .refine(&layer, &ranked("Notes", 0))
            .is_none());
    }

    #[test]
    fn test_fallback_region_when_heading_missing() {
        let layer = PageLayer::new(vec![PageText::new(
            600.0,
            800.0,
            vec![
                span("Header band", 10.0, 72.0, 50.0),
                span("Body paragraph here.", 10.0, 72.0, 300.0),
            ],
        )]);
        let refiner = SubsectionRefiner::default();
        let page_rect = layer.page_rect(0).unwrap();
        let heading = refiner.heading_box(&layer, 0, "Missing", &page_rect);
        assert_eq!(heading.width(), 600.0);
        assert!((heading.y1 - 120.0).abs() < 1e-3);
        assert!((refiner.body_region(&heading, &page_rect).y0 - 125.0).abs() < 1e-3);

        let result = refiner.refine(&layer, &ranked("Missing", 0)).unwrap();
        assert_eq!(result.refined_text, "Body paragraph");
    }

    #[test]
    fn test_missing_page() {
        let layer = PageLayer::default();
        assert!(SubsectionRefiner::default()
            .refine(&layer, &ranked("Anything", 3))
            .is_none());
    }
}
