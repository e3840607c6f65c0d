//! Podgen backend client - HTTP boundary with deterministic fallbacks
//!
//! The backend service performs content fetching, script generation and
//! text-to-speech; this crate consumes it over HTTP+JSON and guarantees the
//! workflow keeps moving when it is unreachable:
//! - Typed request/response shapes for every endpoint
//! - A `reqwest`-based client behind the `PodcastBackend` trait
//! - A mock implementation for tests and offline use
//! - A fallback wrapper that answers failures with locally-synthesized
//!   content instead of errors

pub mod client;
pub mod config;
pub mod fallback;
pub mod types;

// Re-export the client surface
pub use client::{BackendError, HttpBackend, MockBackend, PodcastBackend};
pub use config::{get_env_or_value, BackendConfig};

// Re-export wire shapes
pub use types::{
    AudioGenerationResponse, AudioRequest, ContentResponse, PreviewRequest, PreviewResponse,
    ScriptRequest, ScriptResponse, SearchRequest, UrlRequest, WikipediaRequest,
};

// Re-export the fallback layer
pub use fallback::{
    audio_version_from_response, fallback_audio_response, loading_audio_version,
    loading_script_line, mock_script, search_fallback_content, url_fallback_content,
    FallbackBackend,
};
