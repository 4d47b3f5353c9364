//! # docsift
//!
//! Persona-driven section ranking for collections of PDF documents.
//!
//! Every PDF gets a title and an H1-H3 outline inferred from font sizes.
//! The headings of all documents are then scored against a persona and a
//! job to be done; the best section of each document is ranked globally
//! and the text beneath it is extracted and cleaned.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::Docsift;
//!
//! fn main() -> docsift::Result<()> {
//!     let run = Docsift::new().analyze(
//!         "./pdfs",
//!         "Travel Planner",
//!         "Plan a trip of 4 days for a group of 10 college friends.",
//!     )?;
//!
//!     for section in &run.report.extracted_sections {
//!         println!("{} {}", section.importance_rank, section.section_title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline extraction**: title plus heading hierarchy from raw font sizes
//! - **Pluggable levels**: swap the size-to-level rule via [`LevelStrategy`]
//! - **Offline embeddings**: feature-hashing [`HashedEmbedder`] by default,
//!   an in-process MiniLM encoder behind `fastembed`, Ollama behind `ollama`
//! - **Parallel processing**: optional Rayon fan-out over documents

pub mod embed;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod pipeline;
pub mod rank;
pub mod refine;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use embed::{cosine_similarity, Embedder, Embedding, HashedEmbedder};
pub use error::{Error, Result};
pub use model::{
    AnalysisReport, Document, HeadingLevel, Metadata, Outline, OutlineEntry, RankedSection,
    SubsectionAnalysis, TextSpan,
};
pub use outline::{is_heading, LevelStrategy, OutOfRange, OutlineExtractor, TopSizes};
pub use parser::{ErrorMode, PageLayer, ParseOptions, PdfParser, TextLayer};
pub use pipeline::{AnalysisRun, AnalyzeOptions, Analyzer, DocumentFailure};
pub use rank::{Query, Ranker, ScoreOutcome, SkipReason};
pub use refine::SubsectionRefiner;
pub use render::JsonFormat;

#[cfg(feature = "fastembed")]
pub use embed::MiniLmEmbedder;
#[cfg(feature = "ollama")]
pub use embed::OllamaEmbedder;

use std::path::Path;

/// Parse a PDF file into its text layer.
///
/// # Example
///
/// ```no_run
/// use docsift::{parse_file, TextLayer};
///
/// let layer = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", layer.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<PageLayer> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<PageLayer> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docsift::extract_outline_file;
///
/// let outline = extract_outline_file("document.pdf").unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    let layer = parse_file(path)?;
    Ok(outline::extract_outline(&layer))
}

/// Outline of a PDF file as JSON.
pub fn outline_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = extract_outline_file(path)?;
    render::to_json(&outline, format)
}

/// Analyze a directory of PDFs with the default embedder and options.
pub fn analyze_dir<P: AsRef<Path>>(dir: P, persona: &str, job: &str) -> Result<AnalysisRun> {
    Docsift::new().analyze(dir, persona, job)
}

/// Builder for outlining and analyzing documents.
///
/// # Example
///
/// ```no_run
/// use docsift::{Docsift, OutOfRange, TopSizes};
///
/// let json = Docsift::new()
///     .parallel(true)
///     .with_level_strategy(TopSizes::new().with_out_of_range(OutOfRange::Demote))
///     .analyze("./pdfs", "HR professional", "Create fillable forms")?
///     .to_json(docsift::JsonFormat::Pretty)?;
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    options: AnalyzeOptions,
    embedder: Box<dyn Embedder>,
}

impl Docsift {
    /// Create a builder with the hashing embedder.
    pub fn new() -> Self {
        Self {
            options: AnalyzeOptions::default(),
            embedder: Box::new(HashedEmbedder::default()),
        }
    }

    /// Use a different embedder.
    pub fn with_embedder(mut self, embedder: impl Embedder + 'static) -> Self {
        self.embedder = Box::new(embedder);
        self
    }

    /// Use a different heading level strategy.
    pub fn with_level_strategy(mut self, strategy: impl LevelStrategy + 'static) -> Self {
        self.options = self.options.with_level_strategy(strategy);
        self
    }

    /// Set the gap between a heading and its body text.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.options = self.options.with_margin(margin);
        self
    }

    /// Treat undecodable pages as empty.
    pub fn lenient(mut self) -> Self {
        self.options.parse = self.options.parse.lenient();
        self
    }

    /// Fail a document on its first undecodable page.
    pub fn strict(mut self) -> Self {
        self.options.parse = self.options.parse.strict();
        self
    }

    /// Process documents in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options = self.options.with_parallel(parallel);
        self
    }

    fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::with_options(self.embedder.as_ref(), self.options.clone())
    }

    /// Outline of one PDF file.
    pub fn outline<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        self.analyzer().outline_file(path.as_ref())
    }

    /// Analyze every PDF in a directory.
    pub fn analyze<P: AsRef<Path>>(&self, dir: P, persona: &str, job: &str) -> Result<AnalysisRun> {
        self.analyzer().analyze_dir(dir, persona, job)
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRun {
    /// Report as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_rejects_non_pdf() {
        assert!(matches!(parse_bytes(b"plain text"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_builder_options() {
        let builder = Docsift::new().parallel(true).strict().with_margin(3.0);
        assert!(builder.options.parallel);
        assert_eq!(builder.options.parse.error_mode, ErrorMode::Strict);
        assert_eq!(builder.options.margin, 3.0);
        assert_eq!(builder.embedder.dimension(), Some(384));
    }

    #[test]
    fn test_analyze_empty_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let run = analyze_dir(dir.path(), "Analyst", "Summarize").unwrap();
        assert!(run.report.metadata.input_documents.is_empty());
        assert!(run.report.extracted_sections.is_empty());
        assert!(run.failures.is_empty());
        let json = run.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"subsection_analysis\":[]"));
    }
}
