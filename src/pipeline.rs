//! End-to-end analysis of a directory of PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use rayon::prelude::*;

use crate::embed::Embedder;
use crate::error::{Error, Result};
use crate::model::{AnalysisReport, Document, Metadata, Outline};
use crate::outline::{LevelStrategy, OutlineExtractor, TopSizes};
use crate::parser::{PageLayer, ParseOptions, PdfParser};
use crate::rank::{Query, Ranker};
use crate::refine::{SubsectionRefiner, DEFAULT_FALLBACK_FRACTION, DEFAULT_MARGIN};

/// Options for an analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Gap below a located heading before the body region starts
    pub margin: f32,
    /// Fallback heading band height as a fraction of the page
    pub fallback_fraction: f32,
    /// Heading level assignment
    pub level_strategy: Arc<dyn LevelStrategy>,
    /// Load and score documents on the rayon pool
    pub parallel: bool,
    /// PDF loading options
    pub parse: ParseOptions,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            fallback_fraction: DEFAULT_FALLBACK_FRACTION,
            level_strategy: Arc::new(TopSizes::default()),
            parallel: false,
            parse: ParseOptions::default(),
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_fallback_fraction(mut self, fraction: f32) -> Self {
        self.fallback_fraction = fraction;
        self
    }

    pub fn with_level_strategy(mut self, strategy: impl LevelStrategy + 'static) -> Self {
        self.level_strategy = Arc::new(strategy);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// File name
    pub document: String,
    /// Error message
    pub reason: String,
}

/// A document together with its text layer.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub document: Document,
    pub layer: PageLayer,
}

/// Report plus the documents that were left out of it.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub report: AnalysisReport,
    pub failures: Vec<DocumentFailure>,
}

/// PDF files directly inside `dir`, sorted by file name.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| Error::InputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| Error::InputDir {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// File name used in output records.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Loads documents, ranks their sections and refines the winners.
pub struct Analyzer<'a> {
    embedder: &'a dyn Embedder,
    options: AnalyzeOptions,
}

impl<'a> Analyzer<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self::with_options(embedder, AnalyzeOptions::default())
    }

    pub fn with_options(embedder: &'a dyn Embedder, options: AnalyzeOptions) -> Self {
        Self { embedder, options }
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    fn extractor(&self) -> OutlineExtractor {
        OutlineExtractor::with_shared(Arc::clone(&self.options.level_strategy))
    }

    fn refiner(&self) -> SubsectionRefiner {
        SubsectionRefiner::default()
            .with_margin(self.options.margin)
            .with_fallback_fraction(self.options.fallback_fraction)
    }

    /// Load one PDF and extract its outline.
    pub fn load_document(&self, path: &Path) -> Result<LoadedDocument> {
        let parser = PdfParser::open_with_options(path, self.options.parse.clone())?;
        let layer = parser.parse()?;
        let outline = self.extractor().process(&layer);
        log::debug!(
            "{}: {} pages, {} headings",
            path.display(),
            parser.page_count(),
            outline.len()
        );
        Ok(LoadedDocument {
            document: Document::new(document_name(path), path, outline),
            layer,
        })
    }

    /// Outline of one PDF.
    pub fn outline_file(&self, path: &Path) -> Result<Outline> {
        self.load_document(path).map(|d| d.document.outline)
    }

    /// Load every path, setting aside the ones that fail.
    pub fn load_all(&self, paths: &[PathBuf]) -> (Vec<LoadedDocument>, Vec<DocumentFailure>) {
        let results: Vec<Result<LoadedDocument>> = if self.options.parallel {
            paths.par_iter().map(|p| self.load_document(p)).collect()
        } else {
            paths.iter().map(|p| self.load_document(p)).collect()
        };

        let mut loaded = Vec::new();
        let mut failures = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(doc) => loaded.push(doc),
                Err(e) => {
                    log::error!("Failed to load {}: {}", path.display(), e);
                    failures.push(DocumentFailure {
                        document: document_name(path),
                        reason: e.to_string(),
                    });
                }
            }
        }
        (loaded, failures)
    }

    /// Analyze every PDF in a directory.
    pub fn analyze_dir<P: AsRef<Path>>(&self, dir: P, persona: &str, job: &str) -> Result<AnalysisRun> {
        let paths = list_pdfs(dir)?;
        let names: Vec<String> = paths.iter().map(|p| document_name(p)).collect();
        let (loaded, failures) = self.load_all(&paths);
        let report = self.analyze_loaded(names, &loaded, persona, job);
        Ok(AnalysisRun { report, failures })
    }

    /// Rank and refine already loaded documents.
    ///
    /// `input_documents` is reported as given, including documents that
    /// failed to load.
    pub fn analyze_loaded(
        &self,
        input_documents: Vec<String>,
        loaded: &[LoadedDocument],
        persona: &str,
        job: &str,
    ) -> AnalysisReport {
        let query = Query::new(persona, job, self.embedder);
        let documents: Vec<Document> = loaded.iter().map(|d| d.document.clone()).collect();

        let ranked = Ranker::new(self.embedder)
            .with_parallel(self.options.parallel)
            .rank(&query, &documents);

        let refiner = self.refiner();
        let subsections = ranked
            .iter()
            .filter_map(|section| {
                let doc = loaded.iter().find(|d| d.document.name == section.document)?;
                refiner.refine(&doc.layer, section)
            })
            .collect();

        AnalysisReport {
            metadata: Metadata::new(input_documents, persona, job, Local::now()),
            extracted_sections: ranked,
            subsection_analysis: subsections,
        }
    }
}
