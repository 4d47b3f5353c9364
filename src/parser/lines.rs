//! Span collection: grouping a page's spans into visual lines.

use std::cmp::Ordering;

use crate::model::{Line, TextSpan};

/// Fraction of the font size two span bottoms may differ by and still share a line.
const LINE_TOLERANCE_RATIO: f32 = 0.3;

/// Group spans into lines, top to bottom, each line left to right.
///
/// Spans are expected to come from a single page.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<Line> {
    if spans.is_empty() {
        return Vec::new();
    }

    spans.sort_by(|a, b| {
        a.bbox
            .y1
            .partial_cmp(&b.bbox.y1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_bottom: Option<f32> = None;

    for span in spans {
        let tolerance = span.size * LINE_TOLERANCE_RATIO;
        match current_bottom {
            Some(bottom) if (span.bbox.y1 - bottom).abs() <= tolerance => current.push(span),
            _ => {
                flush_line(&mut current, &mut lines);
                current_bottom = Some(span.bbox.y1);
                current.push(span);
            }
        }
    }
    flush_line(&mut current, &mut lines);

    lines
}

fn flush_line(current: &mut Vec<TextSpan>, lines: &mut Vec<Line>) {
    let mut spans = std::mem::take(current);
    spans.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal));
    if let Some(line) = Line::from_spans(spans) {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn span(text: &str, size: f32, x0: f32, bottom: f32) -> TextSpan {
        TextSpan::new(
            text,
            size,
            Rect::new(x0, bottom - size, x0 + 30.0, bottom),
            0,
        )
    }

    #[test]
    fn test_group_empty() {
        assert!(group_spans_into_lines(Vec::new()).is_empty());
    }

    #[test]
    fn test_group_orders_top_to_bottom_left_to_right() {
        let lines = group_spans_into_lines(vec![
            span("body", 10.0, 72.0, 200.0),
            span("World", 18.0, 150.0, 100.5),
            span("Hello", 18.0, 72.0, 100.0),
        ]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Hello World");
        assert_eq!(lines[1].text(), "body");
    }

    #[test]
    fn test_mixed_sizes_on_one_baseline() {
        let lines = group_spans_into_lines(vec![
            span("Big", 24.0, 72.0, 300.0),
            span("small", 12.0, 140.0, 302.0),
        ]);
        assert_eq!(lines.len(), 1);
        // The line takes the size of its leftmost span.
        assert_eq!(lines[0].size(), 24.0);
    }

    #[test]
    fn test_separate_lines_beyond_tolerance() {
        let lines = group_spans_into_lines(vec![
            span("one", 10.0, 72.0, 100.0),
            span("two", 10.0, 72.0, 112.0),
        ]);
        assert_eq!(lines.len(), 2);
    }
}
