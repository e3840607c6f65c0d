//! Session state and the draft mirror
//!
//! The draft mirror is the in-memory working copy of the active project's
//! mutable fields. It is the single source of truth while a project is
//! active; persistence never reads it directly — every write goes through
//! `ProjectStore::commit_draft`.

use chrono::{DateTime, Utc};

use crate::models::{AudioVersion, DialogueLine, Project, WizardStep};

/// Working copy of the active project's mutable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftMirror {
    /// Raw source text for the current project
    pub source_content: String,
    /// Dialogue script being edited
    pub script: Vec<DialogueLine>,
    /// Generated audio versions
    pub audio_versions: Vec<AudioVersion>,
    /// When the draft was last committed, if ever
    pub last_saved: Option<DateTime<Utc>>,
}

impl DraftMirror {
    /// Replace the mirror with the persisted fields of a project
    pub fn load_from(&mut self, project: &Project) {
        self.source_content = project.content.clone().unwrap_or_default();
        self.script = project.script.clone();
        self.audio_versions = project.audio_versions.clone();
        self.last_saved = project.last_saved;
    }

    /// Write the mirror's fields back into a project record
    pub fn apply_to(&self, project: &mut Project) {
        project.content = if self.source_content.is_empty() {
            None
        } else {
            Some(self.source_content.clone())
        };
        project.script = self.script.clone();
        project.audio_versions = self.audio_versions.clone();
        project.last_saved = self.last_saved;
    }

    /// Reset to the empty state used for a freshly created project
    pub fn clear(&mut self) {
        self.source_content.clear();
        self.script.clear();
        self.audio_versions.clear();
        self.last_saved = None;
    }

    /// Whether the draft holds anything worth autosaving.
    ///
    /// An untouched project (no source content, no script lines) is never
    /// autosaved by the periodic timer.
    pub fn has_content(&self) -> bool {
        !self.source_content.is_empty() || !self.script.is_empty()
    }
}

/// The single active selection of the session
///
/// Held explicitly and passed by reference rather than living in ambient
/// globals, so init and teardown are first-class.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Id of the currently active project; always resolves to a project in
    /// the collection while the collection is non-empty
    pub current_project_id: String,
    /// Position in the three-step wizard
    pub step: WizardStep,
    /// Working copy of the active project's fields
    pub draft: DraftMirror,
}

impl SessionState {
    /// Create a session focused on the given project
    pub fn new(project: &Project) -> Self {
        let mut draft = DraftMirror::default();
        draft.load_from(project);

        Self {
            current_project_id: project.id.clone(),
            step: WizardStep::default(),
            draft,
        }
    }
}
