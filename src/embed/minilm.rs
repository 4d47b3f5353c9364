//! In-process sentence embeddings with a MiniLM model.

use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::error::{Error, Result};

use super::{Embedder, Embedding};

/// Output size of all-MiniLM-L6-v2.
pub const MINILM_DIMENSION: usize = 384;

/// all-MiniLM-L6-v2 through ONNX Runtime. The model is downloaded into
/// the cache directory on first use.
pub struct MiniLmEmbedder {
    model: TextEmbedding,
}

impl std::fmt::Debug for MiniLmEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniLmEmbedder").finish_non_exhaustive()
    }
}

impl MiniLmEmbedder {
    /// Load the model using the default cache directory.
    pub fn new() -> Result<Self> {
        Self::load(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
    }

    /// Load the model from, or download it into, `cache_dir`.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::load(InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_cache_dir(cache_dir.into()))
    }

    fn load(options: InitOptions) -> Result<Self> {
        let model = TextEmbedding::try_new(options.with_show_download_progress(false))
            .map_err(|e| Error::Embedding(format!("loading MiniLM: {}", e)))?;
        Ok(Self { model })
    }
}

impl Embedder for MiniLmEmbedder {
    fn encode(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Err(Error::Embedding("empty text".to_string()));
        }
        let mut vectors = self
            .model
            .embed(vec![text], None)
            .map_err(|e| Error::Embedding(e.to_string()))?;
        vectors
            .pop()
            .map(Embedding::new)
            .ok_or_else(|| Error::Embedding("model returned no vector".to_string()))
    }

    fn dimension(&self) -> Option<usize> {
        Some(MINILM_DIMENSION)
    }
}
