//! Offline feature-hashing embedder.

use unicode_segmentation::UnicodeSegmentation;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::error::{Error, Result};
use crate::text::is_stop_word;

use super::{Embedder, Embedding};

/// Default vector size, matching common small sentence encoders.
pub const DEFAULT_DIMENSION: usize = 384;

const WORD_SEED: u64 = 0x5eed_0001;
const TRIGRAM_SEED: u64 = 0x5eed_0003;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Embeds text by hashing lowercase words and character trigrams into a
/// signed bag of features, then L2-normalizing.
///
/// Needs no model files. Texts sharing vocabulary score higher; synonyms do
/// not.
#[derive(Debug, Clone, Copy)]
pub struct HashedEmbedder {
    dimension: usize,
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl HashedEmbedder {
    /// Create an embedder. A zero dimension is raised to one.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn add(&self, vector: &mut [f32], feature: &str, seed: u64, weight: f32) {
        let hash = xxh3_64_with_seed(feature.as_bytes(), seed);
        let index = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[index] += sign * weight;
    }
}

impl Embedder for HashedEmbedder {
    fn encode(&self, text: &str) -> Result<Embedding> {
        let mut vector = vec![0.0f32; self.dimension];
        let mut features = 0usize;

        for word in text.unicode_words() {
            let word = word.to_lowercase();
            let weight = if is_stop_word(&word) { 0.25 } else { 1.0 };
            self.add(&mut vector, &word, WORD_SEED, weight);
            features += 1;

            let padded: Vec<char> = format!(" {} ", word).chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                self.add(&mut vector, &trigram, TRIGRAM_SEED, TRIGRAM_WEIGHT);
            }
        }

        if features == 0 {
            return Err(Error::Embedding("no words to embed".to_string()));
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm == 0.0 {
            return Err(Error::Embedding("features cancelled out".to_string()));
        }
        vector.iter_mut().for_each(|v| *v /= norm);
        Ok(Embedding::new(vector))
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.dimension)
    }
}
