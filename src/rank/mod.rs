//! Cross-document section ranking against a persona query.

use std::fmt;

use rayon::prelude::*;

use crate::embed::{cosine_similarity, Embedder, Embedding};
use crate::model::{Document, RankedSection, Section};

/// The persona and task every section is scored against.
#[derive(Debug, Clone)]
pub struct Query {
    pub persona: String,
    pub job: String,
    embedding: Option<Embedding>,
}

impl Query {
    /// Embed `"{job} {persona}"` once for the whole run.
    ///
    /// A query that cannot be embedded (blank or punctuation-only text)
    /// is kept without a vector; every section then skips.
    pub fn new(
        persona: impl Into<String>,
        job: impl Into<String>,
        embedder: &dyn Embedder,
    ) -> Self {
        let persona = persona.into();
        let job = job.into();
        let embedding = match embedder.encode(&Self::text(&persona, &job)) {
            Ok(e) => Some(e),
            Err(e) => {
                log::warn!("Query cannot be embedded, no section will rank: {}", e);
                None
            }
        };
        Self {
            persona,
            job,
            embedding,
        }
    }

    /// Text that gets embedded for a persona and job.
    pub fn text(persona: &str, job: &str) -> String {
        format!("{} {}", job, persona)
    }

    pub fn embedding(&self) -> Option<&Embedding> {
        self.embedding.as_ref()
    }
}

/// Why a section got no score.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The query has no embedding
    NoQuery,
    /// The section text is blank
    EmptyText,
    /// The embedder failed
    Encoding(String),
    /// Section and query vectors differ in size
    DimensionMismatch { query: usize, section: usize },
    /// Similarity is undefined or not a finite number
    NonFinite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoQuery => write!(f, "query has no embedding"),
            SkipReason::EmptyText => write!(f, "empty section text"),
            SkipReason::Encoding(msg) => write!(f, "encoding failed: {}", msg),
            SkipReason::DimensionMismatch { query, section } => {
                write!(f, "dimension mismatch (query {}, section {})", query, section)
            }
            SkipReason::NonFinite => write!(f, "similarity is not a finite number"),
        }
    }
}

/// Result of scoring one section.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(f32),
    Skipped(SkipReason),
}

impl ScoreOutcome {
    pub fn score(&self) -> Option<f32> {
        match self {
            ScoreOutcome::Scored(s) => Some(*s),
            ScoreOutcome::Skipped(_) => None,
        }
    }
}

/// The best section of one document, before global ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSection {
    pub document: String,
    pub section_title: String,
    pub page: usize,
    pub score: f32,
}

/// Scores sections and ranks one winner per document.
pub struct Ranker<'a> {
    embedder: &'a dyn Embedder,
    parallel: bool,
}

impl<'a> Ranker<'a> {
    pub fn new(embedder: &'a dyn Embedder) -> Self {
        Self {
            embedder,
            parallel: false,
        }
    }

    /// Score documents on the rayon pool. Output order is unchanged.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Cosine similarity of a section against the query.
    pub fn score_section(&self, query: &Query, section: &Section) -> ScoreOutcome {
        let Some(query_embedding) = query.embedding() else {
            return ScoreOutcome::Skipped(SkipReason::NoQuery);
        };
        if section.text.trim().is_empty() {
            return ScoreOutcome::Skipped(SkipReason::EmptyText);
        }
        let embedding = match self.embedder.encode(&section.text) {
            Ok(e) => e,
            Err(e) => return ScoreOutcome::Skipped(SkipReason::Encoding(e.to_string())),
        };
        if embedding.dimension() != query_embedding.dimension() {
            return ScoreOutcome::Skipped(SkipReason::DimensionMismatch {
                query: query_embedding.dimension(),
                section: embedding.dimension(),
            });
        }
        match cosine_similarity(query_embedding, &embedding) {
            Some(score) if score.is_finite() => ScoreOutcome::Scored(score),
            _ => ScoreOutcome::Skipped(SkipReason::NonFinite),
        }
    }

    /// The strictly highest scoring section of a document.
    ///
    /// The first section wins ties. Skipped sections are logged and
    /// ignored; `None` when every section was skipped.
    pub fn best_section(&self, query: &Query, document: &Document) -> Option<ScoredSection> {
        let mut best: Option<(f32, Section)> = None;
        let mut best_score = f32::NEG_INFINITY;

        for section in document.sections() {
            match self.score_section(query, &section) {
                ScoreOutcome::Scored(score) => {
                    if score > best_score {
                        best_score = score;
                        best = Some((score, section));
                    }
                }
                ScoreOutcome::Skipped(reason) => {
                    log::debug!(
                        "Skipping section {:?} of {}: {}",
                        section.text,
                        document.name,
                        reason
                    );
                }
            }
        }

        best.map(|(score, section)| ScoredSection {
            document: document.name.clone(),
            section_title: section.text,
            page: section.page,
            score,
        })
    }

    /// Winners of every document, in document order.
    pub fn score_documents(&self, query: &Query, documents: &[Document]) -> Vec<ScoredSection> {
        let winners: Vec<Option<ScoredSection>> = if self.parallel {
            documents
                .par_iter()
                .map(|d| self.best_section(query, d))
                .collect()
        } else {
            documents
                .iter()
                .map(|d| self.best_section(query, d))
                .collect()
        };

        documents
            .iter()
            .zip(winners)
            .filter_map(|(doc, winner)| {
                if winner.is_none() {
                    log::warn!("No scorable section in {}", doc.name);
                }
                winner
            })
            .collect()
    }

    /// Score and rank: one section per document, rank 1 most relevant.
    pub fn rank(&self, query: &Query, documents: &[Document]) -> Vec<RankedSection> {
        assign_ranks(self.score_documents(query, documents))
    }
}

/// Stable sort by descending score, then number from 1.
pub fn assign_ranks(mut scored: Vec<ScoredSection>) -> Vec<RankedSection> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, s)| RankedSection {
            document: s.document,
            section_title: s.section_title,
            importance_rank: i + 1,
            page_number: s.page,
        })
        .collect()
}
