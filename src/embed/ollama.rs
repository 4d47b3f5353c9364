//! Embeddings from a local Ollama server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::{Embedder, Embedding};

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model, a small English sentence encoder.
pub const DEFAULT_MODEL: &str = "all-minilm";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Calls `POST {base}/api/embeddings` for every text.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OllamaEmbedder {
    /// Create an embedder with a 30 second request timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, model, Duration::from_secs(30))
    }

    /// Create an embedder with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Embedding(format!("http client: {}", e)))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Embedder for OllamaEmbedder {
    fn encode(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Err(Error::Embedding("empty text".to_string()));
        }

        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .map_err(|e| Error::Embedding(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Embedding(format!(
                "{} returned {}",
                self.endpoint(),
                status
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .map_err(|e| Error::Embedding(format!("bad response: {}", e)))?;
        if body.embedding.is_empty() {
            return Err(Error::Embedding("server returned an empty vector".to_string()));
        }
        Ok(Embedding::new(body.embedding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let embedder = OllamaEmbedder::new("http://127.0.0.1:11434/", DEFAULT_MODEL).unwrap();
        assert_eq!(embedder.endpoint(), "http://127.0.0.1:11434/api/embeddings");
        assert_eq!(embedder.model(), "all-minilm");
    }

    #[test]
    fn test_empty_text_fails_without_request() {
        let embedder = OllamaEmbedder::new("http://127.0.0.1:9", DEFAULT_MODEL).unwrap();
        assert!(matches!(embedder.encode(" "), Err(Error::Embedding(_))));
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_string(&EmbeddingRequest {
            model: "m",
            prompt: "p",
        })
        .unwrap();
        assert_eq!(json, r#"{"model":"m","prompt":"p"}"#);
    }
}
