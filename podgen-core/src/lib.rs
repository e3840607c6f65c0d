//! Podgen core - project persistence and autosave for a three-step
//! podcast generation workflow
//!
//! This crate owns the non-visual heart of Podgen:
//! - The project store: create, select, delete, duplicate and rename
//!   projects, and commit the active draft back into the collection
//! - The autosave coordinator: trailing-edge debounce plus a periodic
//!   timer, with manual save support
//! - Session bootstrap: reconstructing a valid store from whatever
//!   persistent storage holds, degrading to a default project on corruption
//! - The stopword heuristic that auto-names projects from uploaded content
//!
//! Rendering, file-format parsing and the backend HTTP service live
//! elsewhere; this crate only manages state.

pub mod autosave;
pub mod models;
pub mod naming;
pub mod session;
pub mod storage;
pub mod store;

// Re-export commonly used model types
pub use models::{
    AudioSegmentMeta, AudioVersion, DialogueLine, Project, WizardStep, DEFAULT_PROJECT_ID,
    DEFAULT_PROJECT_NAME,
};

// Re-export the store and session types
pub use session::{DraftMirror, SessionState};
pub use storage::{FileStateStore, MemoryStateStore, StateStore, ACTIVE_PROJECT_KEY, PROJECTS_KEY};
pub use store::{ProjectStore, StoreError};

// Re-export autosave types
pub use autosave::{
    AutosaveCoordinator, AutosaveDriver, AutosaveEvent, AutosaveHandle, CommitReason,
    AUTOSAVE_INTERVAL, DEBOUNCE_WINDOW,
};

pub use naming::suggest_project_name;
