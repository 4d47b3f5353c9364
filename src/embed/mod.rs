//! Sentence embeddings and similarity.

mod hashed;
#[cfg(feature = "fastembed")]
mod minilm;
#[cfg(feature = "ollama")]
pub mod ollama;

pub use hashed::{HashedEmbedder, DEFAULT_DIMENSION};
#[cfg(feature = "fastembed")]
pub use minilm::{MiniLmEmbedder, MINILM_DIMENSION};
#[cfg(feature = "ollama")]
pub use ollama::OllamaEmbedder;

use crate::error::Result;

/// A dense embedding vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|v| v * v).sum::<f32>().sqrt()
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Turns text into fixed-size vectors.
pub trait Embedder: Send + Sync {
    /// Encode one piece of text.
    fn encode(&self, text: &str) -> Result<Embedding>;

    /// Dimension of the vectors this embedder produces, if fixed.
    fn dimension(&self) -> Option<usize> {
        None
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn encode(&self, text: &str) -> Result<Embedding> {
        (**self).encode(text)
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

/// Cosine similarity of two vectors.
///
/// `None` when the dimensions differ or either vector has zero norm.
pub fn cosine_similarity(a: &Embedding, b: &Embedding) -> Option<f32> {
    if a.dimension() != b.dimension() {
        return None;
    }
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        return None;
    }
    let dot: f32 = a.0.iter().zip(&b.0).map(|(x, y)| x * y).sum();
    Some((dot / (na * nb)).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_and_opposite() {
        let a = Embedding::new(vec![1.0, 2.0, 3.0]);
        let b = Embedding::new(vec![-1.0, -2.0, -3.0]);
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&a, &b).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 5.0]);
        assert!(cosine_similarity(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_cosine_undefined() {
        let a = Embedding::new(vec![1.0, 0.0]);
        assert_eq!(cosine_similarity(&a, &Embedding::new(vec![1.0])), None);
        assert_eq!(cosine_similarity(&a, &Embedding::new(vec![0.0, 0.0])), None);
    }
}
