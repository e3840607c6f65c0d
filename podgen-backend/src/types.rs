//! Wire shapes for the Podgen backend service
//!
//! The backend is an opaque HTTP+JSON collaborator; these types document the
//! request and response bodies of the endpoints this client consumes.

use podgen_core::{AudioSegmentMeta, DialogueLine};
use serde::{Deserialize, Serialize};

/// `POST /api/content/wikipedia`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikipediaRequest {
    /// Article title or full Wikipedia URL
    pub article_title: String,
}

/// `POST /api/content/url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

/// `POST /api/content/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Response of all three content endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Fetched source text
    pub content: String,
    /// Human-readable description of where it came from
    pub source: String,
}

/// `POST /api/script/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub content: String,
}

/// Response of the script generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResponse {
    /// Dialogue lines in playback order
    pub script: Vec<DialogueLine>,
}

/// `POST /api/audio/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioRequest {
    /// Script to synthesize
    pub script: Vec<DialogueLine>,
    /// Voice id for the first host, backend default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p1_voice: Option<String>,
    /// Voice id for the second host, backend default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p2_voice: Option<String>,
}

/// Response of the audio generation endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioGenerationResponse {
    /// Per-line segment metadata, forwarded opaquely
    #[serde(default)]
    pub audio_segments: Vec<AudioSegmentMeta>,
    /// Reference to the combined audio resource
    #[serde(default)]
    pub combined_audio_url: Option<String>,
    /// Total duration in seconds
    #[serde(default)]
    pub combined_duration_seconds: Option<f64>,
    /// Total size in megabytes
    #[serde(default)]
    pub combined_size_mb: Option<f64>,
}

/// `POST /api/audio/preview`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub voice_id: String,
}

/// Response of the voice preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Reference to the preview clip, relative to the backend base URL
    pub audio_url: String,
}
