//! Text spans and lines.

use serde::{Deserialize, Serialize};

use super::Rect;

/// Span style flags, using the bit layout common to PDF text tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct StyleFlags(u32);

impl StyleFlags {
    pub const SUPERSCRIPT: u32 = 1;
    pub const ITALIC: u32 = 1 << 1;
    pub const SERIF: u32 = 1 << 2;
    pub const MONOSPACE: u32 = 1 << 3;
    pub const BOLD: u32 = 1 << 4;

    /// Create flags from raw bits.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Derive flags from a base font name such as `Helvetica-BoldOblique`.
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut bits = 0;
        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            bits |= Self::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            bits |= Self::ITALIC;
        }
        if name.contains("courier") || name.contains("mono") {
            bits |= Self::MONOSPACE;
        }
        if name.contains("times") || (name.contains("serif") && !name.contains("sans")) {
            bits |= Self::SERIF;
        }
        Self(bits)
    }

    pub fn is_bold(&self) -> bool {
        self.0 & Self::BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.0 & Self::ITALIC != 0
    }
}

/// Round a point size to the integer bucket used for hierarchy decisions.
///
/// Halves round to even (12.5 -> 12, 13.5 -> 14).
pub fn rounded_size(size: f32) -> i32 {
    size.round_ties_even() as i32
}

/// A contiguous run of text sharing one font size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Style flags
    pub flags: StyleFlags,
    /// Bounding box in page space
    pub bbox: Rect,
    /// Page index (0-based)
    pub page: usize,
}

impl TextSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, bbox: Rect, page: usize) -> Self {
        Self {
            text: text.into(),
            size,
            flags: StyleFlags::default(),
            bbox,
            page,
        }
    }

    /// Set style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Size rounded to the nearest point.
    pub fn rounded_size(&self) -> i32 {
        rounded_size(self.size)
    }
}

/// Spans sharing a visual line, in left-to-right order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The spans in this line, sorted by x position
    pub spans: Vec<TextSpan>,
    /// Page index (0-based)
    pub page: usize,
    /// Union of the span boxes
    pub bbox: Rect,
}

impl Line {
    /// Build a line from spans already in reading order.
    ///
    /// Returns `None` for an empty span list.
    pub fn from_spans(spans: Vec<TextSpan>) -> Option<Self> {
        let first = spans.first()?;
        let page = first.page;
        let bbox = spans
            .iter()
            .skip(1)
            .fold(first.bbox, |acc, s| acc.union(&s.bbox));
        Some(Self { spans, page, bbox })
    }

    /// Trimmed span texts joined with single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Size of the first span; lines inherit the leading run's size.
    pub fn size(&self) -> f32 {
        self.spans.first().map(|s| s.size).unwrap_or(0.0)
    }

    /// Rounded size of the first span.
    pub fn rounded_size(&self) -> i32 {
        rounded_size(self.size())
    }
}
