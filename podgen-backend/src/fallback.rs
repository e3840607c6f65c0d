//! Deterministic local fallbacks
//!
//! The workflow must never get stuck on a dead backend: any failed or
//! rejected call is answered with locally-synthesized content, and in-flight
//! calls are represented by placeholder entries that are always replaced,
//! never left behind.

use async_trait::async_trait;
use podgen_core::{AudioVersion, DialogueLine};

use crate::client::{BackendError, PodcastBackend};
use crate::types::{AudioGenerationResponse, ContentResponse, PreviewResponse};

/// Duration of the fallback audio version ("2:30")
const FALLBACK_DURATION_SECONDS: f64 = 150.0;

/// Size of the fallback audio version
const FALLBACK_SIZE_MB: f64 = 4.5;

/// Rough per-segment size estimate when the backend omits a total
const SEGMENT_SIZE_ESTIMATE_MB: f64 = 0.5;

// ============================================================================
// PLACEHOLDERS
// ============================================================================

/// Synthetic script line shown while generation is in flight
pub fn loading_script_line() -> DialogueLine {
    DialogueLine::new("Loading", "Generating script with Priya & Arjun...")
}

/// Synthetic audio version shown while synthesis is in flight
pub fn loading_audio_version() -> AudioVersion {
    AudioVersion {
        id: "loading".to_string(),
        name: "Generating audio with Priya & Arjun voices...".to_string(),
        duration_seconds: 0.0,
        size_mb: 0.0,
        audio_url: None,
        segments: Vec::new(),
    }
}

// ============================================================================
// FALLBACK CONTENT
// ============================================================================

/// The bilingual two-host script served when generation fails
pub fn mock_script() -> Vec<DialogueLine> {
    vec![
        DialogueLine::new(
            "P1",
            "Welcome to our podcast. Today we're discussing a fascinating topic. Arjun, would you like to introduce it?",
        ),
        DialogueLine::new(
            "P2",
            "Absolutely, Priya. This topic is quite significant because it affects how we understand the world around us.",
        ),
        DialogueLine::new(
            "P1",
            "That's an excellent point. Aur ek important aspect yeh hai ki this has real-world applications.",
        ),
        DialogueLine::new(
            "P2",
            "Bilkul sahi, Priya. And if we look at the broader implications, we can see tremendous potential.",
        ),
        DialogueLine::new("P1", "Indeed. The research in this area has been groundbreaking."),
        DialogueLine::new(
            "P2",
            "Precisely. And bahut important hai that we understand both the benefits and challenges.",
        ),
        DialogueLine::new(
            "P1",
            "Well, that covers the key points. Thank you for that insightful discussion, Arjun.",
        ),
        DialogueLine::new("P2", "Thank you, Priya. It was a pleasure discussing this with you."),
    ]
}

/// Placeholder content for a URL that could not be fetched
pub fn url_fallback_content(url: &str) -> ContentResponse {
    ContentResponse {
        content: format!(
            "Content from: {}\n\nUnable to fetch content. Please check the URL and try again.",
            url
        ),
        source: url.to_string(),
    }
}

/// Placeholder content for a search the backend could not serve
pub fn search_fallback_content(query: &str) -> ContentResponse {
    ContentResponse {
        content: format!(
            "Search results for: {}\n\nThis content was compiled from web search results about \"{}\".",
            query, query
        ),
        source: format!("Search: {}", query),
    }
}

/// Synthetic generation response standing in for a dead TTS backend
pub fn fallback_audio_response() -> AudioGenerationResponse {
    AudioGenerationResponse {
        audio_segments: Vec::new(),
        combined_audio_url: None,
        combined_duration_seconds: Some(FALLBACK_DURATION_SECONDS),
        combined_size_mb: Some(FALLBACK_SIZE_MB),
    }
}

/// Build the next retained audio version from a generation response.
///
/// The version keeps canonical numeric duration/size; when the backend omits
/// a total size, a per-segment estimate stands in. The combined URL wins
/// over the first segment's URL when both are present.
pub fn audio_version_from_response(
    project_name: &str,
    version_number: usize,
    response: AudioGenerationResponse,
) -> AudioVersion {
    let audio_url = response
        .combined_audio_url
        .clone()
        .or_else(|| response.audio_segments.first().and_then(|s| s.audio_url.clone()));

    let size_mb = response
        .combined_size_mb
        .unwrap_or(response.audio_segments.len() as f64 * SEGMENT_SIZE_ESTIMATE_MB);

    AudioVersion {
        id: format!("v{}", version_number),
        name: format!("{}_v{}", project_name, version_number),
        duration_seconds: response.combined_duration_seconds.unwrap_or(0.0),
        size_mb,
        audio_url,
        segments: response.audio_segments,
    }
}

// ============================================================================
// FALLBACK WRAPPER
// ============================================================================

/// Wraps a backend so that every failure degrades to deterministic local
/// content instead of surfacing an error.
///
/// Calls through this wrapper never return `Err`; failed requests are
/// logged at `warn` and answered with the fallbacks above. Retry is
/// user-initiated, never automatic.
#[derive(Debug, Clone)]
pub struct FallbackBackend<B: PodcastBackend> {
    inner: B,
}

impl<B: PodcastBackend> FallbackBackend<B> {
    /// Wrap a backend
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: PodcastBackend> PodcastBackend for FallbackBackend<B> {
    async fn fetch_wikipedia(&self, article_title: &str) -> Result<ContentResponse, BackendError> {
        match self.inner.fetch_wikipedia(article_title).await {
            Ok(content) => Ok(content),
            Err(e) => {
                log::warn!("Wikipedia fetch failed, using fallback: {}", e);
                Ok(url_fallback_content(article_title))
            }
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<ContentResponse, BackendError> {
        match self.inner.fetch_url(url).await {
            Ok(content) => Ok(content),
            Err(e) => {
                log::warn!("URL fetch failed, using fallback: {}", e);
                Ok(url_fallback_content(url))
            }
        }
    }

    async fn search(&self, query: &str) -> Result<ContentResponse, BackendError> {
        match self.inner.search(query).await {
            Ok(content) => Ok(content),
            Err(e) => {
                log::warn!("Search failed, using fallback: {}", e);
                Ok(search_fallback_content(query))
            }
        }
    }

    async fn generate_script(&self, content: &str) -> Result<Vec<DialogueLine>, BackendError> {
        match self.inner.generate_script(content).await {
            Ok(script) => Ok(script),
            Err(e) => {
                log::warn!("Script generation failed, using fallback script: {}", e);
                Ok(mock_script())
            }
        }
    }

    async fn generate_audio(
        &self,
        script: &[DialogueLine],
        p1_voice: Option<&str>,
        p2_voice: Option<&str>,
    ) -> Result<AudioGenerationResponse, BackendError> {
        match self.inner.generate_audio(script, p1_voice, p2_voice).await {
            Ok(response) => Ok(response),
            Err(e) => {
                log::warn!("Audio generation failed, using fallback audio: {}", e);
                Ok(fallback_audio_response())
            }
        }
    }

    async fn preview_voice(&self, voice_id: &str) -> Result<PreviewResponse, BackendError> {
        match self.inner.preview_voice(voice_id).await {
            Ok(preview) => Ok(preview),
            Err(e) => {
                // No local audio to offer; an empty reference just resets
                // the preview button
                log::warn!("Voice preview failed: {}", e);
                Ok(PreviewResponse {
                    audio_url: String::new(),
                })
            }
        }
    }
}
