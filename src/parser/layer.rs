//! The text layer: per-page spans with search and region extraction.

use crate::model::{Line, Rect, TextSpan};

use super::lines::group_spans_into_lines;

/// Read access to the positioned text of a paginated document.
///
/// Pages are addressed by 0-based index. Out-of-range pages behave as
/// empty pages.
pub trait TextLayer {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Full page rectangle, `None` when the page does not exist.
    fn page_rect(&self, page: usize) -> Option<Rect>;

    /// Spans of a page in reading order.
    fn spans(&self, page: usize) -> Vec<TextSpan>;

    /// Visual lines of a page, top to bottom.
    fn lines(&self, page: usize) -> Vec<Line> {
        group_spans_into_lines(self.spans(page))
    }

    /// Boxes of every case-insensitive occurrence of `needle` on a page.
    fn search(&self, page: usize, needle: &str) -> Vec<Rect>;

    /// Text of the lines whose spans fall inside `region`, one line per row.
    fn text_in_region(&self, page: usize, region: &Rect) -> String;
}

/// One page of extracted text.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    lines: Vec<Line>,
}

impl PageText {
    /// Build a page from its spans.
    pub fn new(width: f32, height: f32, spans: Vec<TextSpan>) -> Self {
        Self {
            width,
            height,
            lines: group_spans_into_lines(spans),
        }
    }

    /// Lines on the page.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether the page carries no text.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// In-memory [`TextLayer`] over pages of spans.
#[derive(Debug, Clone, Default)]
pub struct PageLayer {
    pages: Vec<PageText>,
}

impl PageLayer {
    /// Create a layer from pages.
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push_page(&mut self, page: PageText) {
        self.pages.push(page);
    }

    /// Pages in order.
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }
}

impl TextLayer for PageLayer {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_rect(&self, page: usize) -> Option<Rect> {
        self.pages
            .get(page)
            .map(|p| Rect::new(0.0, 0.0, p.width, p.height))
    }

    fn spans(&self, page: usize) -> Vec<TextSpan> {
        self.pages
            .get(page)
            .map(|p| p.lines.iter().flat_map(|l| l.spans.iter().cloned()).collect())
            .unwrap_or_default()
    }

    fn lines(&self, page: usize) -> Vec<Line> {
        self.pages
            .get(page)
            .map(|p| p.lines.clone())
            .unwrap_or_default()
    }

    fn search(&self, page: usize, needle: &str) -> Vec<Rect> {
        let needle = normalize_for_search(needle);
        if needle.is_empty() {
            return Vec::new();
        }
        let Some(page) = self.pages.get(page) else {
            return Vec::new();
        };

        let mut hits = Vec::new();
        for line in &page.lines {
            let haystack = normalize_for_search(&line.text());
            let total = haystack.chars().count() as f32;
            if total == 0.0 {
                continue;
            }
            for (start, matched) in haystack.match_indices(&needle) {
                let from = haystack[..start].chars().count() as f32;
                let to = from + matched.chars().count() as f32;
                let w = line.bbox.width();
                hits.push(Rect::new(
                    line.bbox.x0 + w * from / total,
                    line.bbox.y0,
                    line.bbox.x0 + w * to / total,
                    line.bbox.y1,
                ));
            }
        }
        hits
    }

    fn text_in_region(&self, page: usize, region: &Rect) -> String {
        let Some(page) = self.pages.get(page) else {
            return String::new();
        };

        page.lines
            .iter()
            .filter_map(|line| {
                let inside: Vec<TextSpan> = line
                    .spans
                    .iter()
                    .filter(|s| region.contains_mostly(&s.bbox))
                    .cloned()
                    .collect();
                Line::from_spans(inside).map(|l| l.text())
            })
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lowercase and collapse whitespace runs to single spaces.
fn normalize_for_search(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32, x0: f32, y0: f32) -> TextSpan {
        let width = text.chars().count() as f32 * size * 0.5;
        TextSpan::new(text, size, Rect::new(x0, y0, x0 + width, y0 + size), 0)
    }

    fn layer() -> PageLayer {
        PageLayer::new(vec![PageText::new(
            600.0,
            800.0,
            vec![
                span("Coastal Adventures", 20.0, 72.0, 100.0),
                span("Beach hopping along the coast.", 10.0, 72.0, 140.0),
                span("Water sports are popular.", 10.0, 72.0, 160.0),
            ],
        )])
    }

    #[test]
    fn test_page_rect_and_count() {
        let layer = layer();
        assert_eq!(layer.page_count(), 1);
        assert_eq!(layer.page_rect(0), Some(Rect::new(0.0, 0.0, 600.0, 800.0)));
        assert_eq!(layer.page_rect(1), None);
        assert!(layer.spans(5).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let layer = layer();
        let hits = layer.search(0, "coastal adventures");
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y1 - 120.0).abs() < 0.01);
        assert!((hits[0].x0 - 72.0).abs() < 0.01);
    }

    #[test]
    fn test_search_sub_rect() {
        let layer = layer();
        let hits = layer.search(0, "Adventures");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].x0 > 72.0);
    }

    #[test]
    fn test_search_miss() {
        assert!(layer().search(0, "Nightlife").is_empty());
        assert!(layer().search(0, "   ").is_empty());
    }

    #[test]
    fn test_text_in_region_below_heading() {
        let layer = layer();
        let text = layer.text_in_region(0, &Rect::new(0.0, 125.0, 600.0, 800.0));
        assert_eq!(text, "Beach hopping along the coast.\nWater sports are popular.");
    }

    #[test]
    fn test_text_in_empty_region() {
        let layer = layer();
        let text = layer.text_in_region(0, &Rect::new(0.0, 500.0, 600.0, 800.0));
        assert!(text.is_empty());
    }
}
