//! Document model types.
//!
//! Spans and lines come out of the text layer; outlines and sections come
//! out of the outline builder; the report records come out of ranking and
//! refinement.

mod document;
mod geometry;
mod report;
mod span;

pub use document::{
    Document, HeadingCandidate, HeadingLevel, Outline, OutlineEntry, Section, UNTITLED,
};
pub use geometry::Rect;
pub use report::{
    format_timestamp, AnalysisReport, Metadata, RankedSection, SubsectionAnalysis,
};
pub use span::{rounded_size, Line, StyleFlags, TextSpan};
