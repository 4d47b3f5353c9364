//! PDF text layer: loading, span extraction, and line grouping.

pub mod backend;
mod content;
mod layer;
mod lines;
mod options;
mod pdf_parser;

pub use backend::{LopdfBackend, PdfBackend};
pub use content::extract_page_spans;
pub use layer::{PageLayer, PageText, TextLayer};
pub use lines::group_spans_into_lines;
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{check_pdf_header, is_pdf_bytes, PdfParser};
