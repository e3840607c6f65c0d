//! HTTP client for the Podgen backend service
//!
//! The backend performs content retrieval, script generation and
//! text-to-speech; this module only moves JSON across the wire. Failure
//! recovery lives in the fallback layer, not here.

use async_trait::async_trait;
use podgen_core::DialogueLine;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::BackendConfig;
use crate::fallback;
use crate::types::{
    AudioGenerationResponse, AudioRequest, ContentResponse, PreviewRequest, PreviewResponse,
    ScriptRequest, ScriptResponse, SearchRequest, UrlRequest, WikipediaRequest,
};

/// Errors from talking to the backend service.
///
/// All variants mean "backend unavailable" to the rest of the application;
/// none of them is allowed to reach the user as a raw error.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, malformed body)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// The backend collaborator seam.
///
/// `HttpBackend` is the production implementation; `MockBackend` answers
/// deterministically for tests and offline use.
#[async_trait]
pub trait PodcastBackend: Send + Sync {
    /// Fetch the plain-text content of a Wikipedia article
    async fn fetch_wikipedia(&self, article_title: &str) -> Result<ContentResponse, BackendError>;

    /// Fetch and extract the content behind an arbitrary URL
    async fn fetch_url(&self, url: &str) -> Result<ContentResponse, BackendError>;

    /// Compile content from a web search
    async fn search(&self, query: &str) -> Result<ContentResponse, BackendError>;

    /// Turn source content into a two-host dialogue script
    async fn generate_script(&self, content: &str) -> Result<Vec<DialogueLine>, BackendError>;

    /// Synthesize audio for a script
    async fn generate_audio(
        &self,
        script: &[DialogueLine],
        p1_voice: Option<&str>,
        p2_voice: Option<&str>,
    ) -> Result<AudioGenerationResponse, BackendError>;

    /// Generate a short preview clip for a voice
    async fn preview_voice(&self, voice_id: &str) -> Result<PreviewResponse, BackendError>;
}

// ============================================================================
// HTTP BACKEND
// ============================================================================

/// Production backend client
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: HttpClient,
}

impl HttpBackend {
    /// Create a client from configuration
    pub fn new(config: &BackendConfig) -> Self {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            base_url: config.resolved_base_url(),
            client,
        }
    }

    /// The resolved base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Backend returned {} for {}: {}", status, path, body);
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PodcastBackend for HttpBackend {
    async fn fetch_wikipedia(&self, article_title: &str) -> Result<ContentResponse, BackendError> {
        self.post_json(
            "/api/content/wikipedia",
            &WikipediaRequest {
                article_title: article_title.to_string(),
            },
        )
        .await
    }

    async fn fetch_url(&self, url: &str) -> Result<ContentResponse, BackendError> {
        // Wikipedia URLs go through the dedicated endpoint first; any
        // failure there falls through to the generic extractor
        if url.contains("wikipedia.org") {
            match self.fetch_wikipedia(url).await {
                Ok(content) => return Ok(content),
                Err(e) => log::warn!("Wikipedia endpoint failed for {}: {}", url, e),
            }
        }

        self.post_json(
            "/api/content/url",
            &UrlRequest {
                url: url.to_string(),
            },
        )
        .await
    }

    async fn search(&self, query: &str) -> Result<ContentResponse, BackendError> {
        self.post_json(
            "/api/content/search",
            &SearchRequest {
                query: query.to_string(),
            },
        )
        .await
    }

    async fn generate_script(&self, content: &str) -> Result<Vec<DialogueLine>, BackendError> {
        let response: ScriptResponse = self
            .post_json(
                "/api/script/generate",
                &ScriptRequest {
                    content: content.to_string(),
                },
            )
            .await?;
        Ok(response.script)
    }

    async fn generate_audio(
        &self,
        script: &[DialogueLine],
        p1_voice: Option<&str>,
        p2_voice: Option<&str>,
    ) -> Result<AudioGenerationResponse, BackendError> {
        self.post_json(
            "/api/audio/generate",
            &AudioRequest {
                script: script.to_vec(),
                p1_voice: p1_voice.map(str::to_string),
                p2_voice: p2_voice.map(str::to_string),
            },
        )
        .await
    }

    async fn preview_voice(&self, voice_id: &str) -> Result<PreviewResponse, BackendError> {
        self.post_json(
            "/api/audio/preview",
            &PreviewRequest {
                voice_id: voice_id.to_string(),
            },
        )
        .await
    }
}

// ============================================================================
// MOCK BACKEND
// ============================================================================

/// Deterministic backend for tests and offline demos.
///
/// Answers every request locally with the same data the fallback layer
/// serves when the real backend is unreachable.
#[derive(Debug, Clone, Default)]
pub struct MockBackend;

#[async_trait]
impl PodcastBackend for MockBackend {
    async fn fetch_wikipedia(&self, article_title: &str) -> Result<ContentResponse, BackendError> {
        Ok(fallback::url_fallback_content(article_title))
    }

    async fn fetch_url(&self, url: &str) -> Result<ContentResponse, BackendError> {
        Ok(fallback::url_fallback_content(url))
    }

    async fn search(&self, query: &str) -> Result<ContentResponse, BackendError> {
        Ok(fallback::search_fallback_content(query))
    }

    async fn generate_script(&self, _content: &str) -> Result<Vec<DialogueLine>, BackendError> {
        Ok(fallback::mock_script())
    }

    async fn generate_audio(
        &self,
        _script: &[DialogueLine],
        _p1_voice: Option<&str>,
        _p2_voice: Option<&str>,
    ) -> Result<AudioGenerationResponse, BackendError> {
        Ok(fallback::fallback_audio_response())
    }

    async fn preview_voice(&self, _voice_id: &str) -> Result<PreviewResponse, BackendError> {
        Ok(PreviewResponse {
            audio_url: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend_is_deterministic() {
        let backend = MockBackend;

        let first = backend.generate_script("anything").await.unwrap();
        let second = backend.generate_script("anything else").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[tokio::test]
    async fn test_mock_search_mentions_query() {
        let backend = MockBackend;
        let response = backend.search("rust ownership").await.unwrap();

        assert!(response.content.contains("rust ownership"));
        assert_eq!(response.source, "Search: rust ownership");
    }

    #[test]
    fn test_http_backend_uses_configured_base_url() {
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://backend:9000".to_string(),
            ..Default::default()
        });

        assert_eq!(backend.base_url(), "http://backend:9000");
    }
}
