//! Core data model for Podgen projects
//!
//! A project bundles everything a user produces while walking the three-step
//! wizard: the uploaded source content, the generated two-host dialogue
//! script, and the synthesized audio versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the project synthesized when storage is empty or corrupt
pub const DEFAULT_PROJECT_ID: &str = "project-1";

/// Name given to projects the user has not named yet
pub const DEFAULT_PROJECT_NAME: &str = "Untitled";

// ============================================================================
// SCRIPT
// ============================================================================

/// One line of the generated dialogue script
///
/// Lines are kept in playback order; the order of the containing `Vec` is
/// meaningful and must be preserved across persistence round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Speaker identifier (e.g. "P1", "P2")
    pub speaker: String,
    /// Spoken text
    pub text: String,
}

impl DialogueLine {
    /// Create a new dialogue line
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

// ============================================================================
// AUDIO VERSIONS
// ============================================================================

/// Backend-reported per-segment metadata, forwarded without interpretation.
///
/// Only `audio_url` and `duration_seconds` are given names here; whatever
/// else the backend reports rides along in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioSegmentMeta {
    /// Reference to the segment audio resource (owned by the backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Segment duration in seconds, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    /// Any additional backend fields, preserved opaquely
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A generated audio artifact
///
/// Duration and size are stored as canonical numbers; the formatted strings
/// shown in the UI are derived on demand so round-trips stay lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioVersion {
    /// Version tag, unique within a project (e.g. "v1", "v2")
    pub id: String,
    /// Editable label, defaulted to "<project>_v<n>"
    pub name: String,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Size in megabytes
    pub size_mb: f64,
    /// Reference to the combined audio resource (owned by the backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Backend-reported segment metadata, opaque to this crate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<AudioSegmentMeta>,
}

impl AudioVersion {
    /// Duration formatted for display, e.g. "2:30"
    pub fn duration_display(&self) -> String {
        let total = self.duration_seconds.max(0.0).floor() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }

    /// Size formatted for display, e.g. "4.5 MB"
    pub fn size_display(&self) -> String {
        format!("{:.1} MB", self.size_mb)
    }
}

// ============================================================================
// PROJECT
// ============================================================================

/// A user's saved unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque unique identifier, stable for the project's lifetime
    pub id: String,
    /// Human-readable label
    pub name: String,
    /// Raw source text the user uploaded or fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Generated dialogue script, in playback order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<DialogueLine>,
    /// Generated audio versions, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_versions: Vec<AudioVersion>,
    /// Timestamp of the last successful persistence of this project.
    /// Stays absent for a project that was never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl Project {
    /// Create an empty project with the given id and the default name
    pub fn untitled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: DEFAULT_PROJECT_NAME.to_string(),
            content: None,
            script: Vec::new(),
            audio_versions: Vec::new(),
            last_saved: Some(Utc::now()),
        }
    }

    /// Next audio version number for this project (1-based).
    ///
    /// Versions are retained across generation calls, so this is simply one
    /// past the number of existing "v"-tagged versions.
    pub fn next_version_number(&self) -> usize {
        self.audio_versions
            .iter()
            .filter(|v| v.id.starts_with('v'))
            .count()
            + 1
    }
}

// ============================================================================
// WIZARD
// ============================================================================

/// Position in the three-step wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WizardStep {
    /// Step 1: upload source content
    #[default]
    Upload,
    /// Step 2: generate and edit the dialogue script
    Script,
    /// Step 3: synthesize and play back audio
    Audio,
}

impl WizardStep {
    /// 1-based step number shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Upload => 1,
            WizardStep::Script => 2,
            WizardStep::Audio => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_display() {
        let version = AudioVersion {
            id: "v1".to_string(),
            name: "Untitled_v1".to_string(),
            duration_seconds: 150.0,
            size_mb: 4.5,
            audio_url: None,
            segments: Vec::new(),
        };

        assert_eq!(version.duration_display(), "2:30");
        assert_eq!(version.size_display(), "4.5 MB");
    }

    #[test]
    fn test_duration_display_pads_seconds() {
        let version = AudioVersion {
            id: "v1".to_string(),
            name: "x".to_string(),
            duration_seconds: 61.9,
            size_mb: 0.0,
            audio_url: None,
            segments: Vec::new(),
        };

        // Fractional seconds are floored, single digits are zero-padded
        assert_eq!(version.duration_display(), "1:01");
    }

    #[test]
    fn test_next_version_number_counts_tagged_versions() {
        let mut project = Project::untitled("project-1");
        assert_eq!(project.next_version_number(), 1);

        project.audio_versions.push(AudioVersion {
            id: "v1".to_string(),
            name: "Untitled_v1".to_string(),
            duration_seconds: 150.0,
            size_mb: 4.5,
            audio_url: None,
            segments: Vec::new(),
        });

        assert_eq!(project.next_version_number(), 2);
    }

    #[test]
    fn test_project_round_trip_preserves_script_order() {
        let mut project = Project::untitled("project-1");
        project.script = vec![
            DialogueLine::new("P1", "Welcome to our podcast."),
            DialogueLine::new("P2", "Great to be here."),
            DialogueLine::new("P1", "Let's begin."),
        ];

        let json = serde_json::to_string(&project).unwrap();
        let restored: Project = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, project);
        assert_eq!(restored.script[0].speaker, "P1");
        assert_eq!(restored.script[1].speaker, "P2");
    }

    #[test]
    fn test_segment_meta_preserves_unknown_fields() {
        let raw = r#"{"audio_url":"http://localhost:8000/audio/seg_0.mp3","duration_seconds":3.2,"voice":"en-IN-NeerjaNeural","index":0}"#;
        let meta: AudioSegmentMeta = serde_json::from_str(raw).unwrap();

        assert_eq!(
            meta.audio_url.as_deref(),
            Some("http://localhost:8000/audio/seg_0.mp3")
        );
        assert_eq!(meta.extra.get("voice").and_then(|v| v.as_str()), Some("en-IN-NeerjaNeural"));

        // Unknown fields survive a round-trip
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json.get("index").and_then(|v| v.as_i64()), Some(0));
    }
}
