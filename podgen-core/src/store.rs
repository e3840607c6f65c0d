//! Project store - authoritative collection of projects plus the active one
//!
//! The store owns the in-memory project list, the session state, and the
//! load/save boundary with persistent storage. It is the exclusive writer of
//! both persisted keys. All mutations happen on discrete, non-overlapping
//! turns (user input or timer callbacks), so no internal locking is needed.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Project, WizardStep, DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME};
use crate::models::{AudioVersion, DialogueLine};
use crate::naming::suggest_project_name;
use crate::session::SessionState;
use crate::storage::{StateStore, ACTIVE_PROJECT_KEY, PROJECTS_KEY};

/// Errors surfaced to the user by project operations.
///
/// Operations against a nonexistent id are tolerated races and stay silent;
/// only protected invariant violations become errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// At least one project must exist at all times
    #[error("Cannot delete the last project")]
    LastProject,
}

/// Authoritative in-memory project collection and session
pub struct ProjectStore<S: StateStore> {
    storage: S,
    projects: Vec<Project>,
    session: SessionState,
}

impl<S: StateStore> ProjectStore<S> {
    // ========================================================================
    // BOOTSTRAP
    // ========================================================================

    /// Reconstruct the store from persistent storage.
    ///
    /// Absent or unparseable state degrades to a single default project;
    /// bootstrap never fails the application startup.
    pub fn bootstrap(storage: S) -> Self {
        let projects = match storage.get(PROJECTS_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(parsed) if !parsed.is_empty() => {
                    log::info!("Loaded {} projects from storage", parsed.len());
                    parsed
                }
                Ok(_) => {
                    log::info!("Stored project list is empty, starting fresh");
                    vec![Project::untitled(DEFAULT_PROJECT_ID)]
                }
                Err(e) => {
                    log::warn!("Failed to parse stored projects: {}, starting fresh", e);
                    vec![Project::untitled(DEFAULT_PROJECT_ID)]
                }
            },
            None => vec![Project::untitled(DEFAULT_PROJECT_ID)],
        };

        let active = storage
            .get(ACTIVE_PROJECT_KEY)
            .filter(|id| projects.iter().any(|p| &p.id == id))
            .unwrap_or_else(|| projects[0].id.clone());

        let active_project = projects
            .iter()
            .find(|p| p.id == active)
            .expect("active id resolved against the collection");
        let session = SessionState::new(active_project);

        Self {
            storage,
            projects,
            session,
        }
    }

    // ========================================================================
    // PROJECT OPERATIONS
    // ========================================================================

    /// Create a new untitled project and make it active.
    ///
    /// Clears the draft mirror and resets the wizard to the upload step.
    pub fn create_project(&mut self) -> String {
        let id = format!("project-{}", Uuid::new_v4());
        let project = Project::untitled(id.clone());

        self.session.current_project_id = id.clone();
        self.session.draft.load_from(&project);
        self.session.step = WizardStep::Upload;
        self.projects.push(project);

        log::info!("Created project {}", id);
        self.persist();
        id
    }

    /// Switch the active project. Unknown ids are ignored.
    ///
    /// The draft mirror is replaced with the selected project's persisted
    /// fields; uncommitted edits to the previous project are lost.
    pub fn select_project(&mut self, id: &str) {
        let Some(project) = self.projects.iter().find(|p| p.id == id) else {
            log::debug!("select_project: unknown id {}", id);
            return;
        };

        self.session.current_project_id = project.id.clone();
        self.session.draft.load_from(project);
        self.storage.set(ACTIVE_PROJECT_KEY, id);
    }

    /// Delete a project.
    ///
    /// Deleting the last remaining project is rejected; deleting an unknown
    /// id is a silent no-op. When the active project is deleted, the first
    /// remaining project (collection order) becomes active.
    pub fn delete_project(&mut self, id: &str) -> Result<(), StoreError> {
        if self.projects.len() <= 1 {
            return Err(StoreError::LastProject);
        }
        if !self.projects.iter().any(|p| p.id == id) {
            log::debug!("delete_project: unknown id {}", id);
            return Ok(());
        }

        self.projects.retain(|p| p.id != id);
        log::info!("Deleted project {}", id);

        if self.session.current_project_id == id {
            let next = self.projects[0].clone();
            self.session.current_project_id = next.id.clone();
            self.session.draft.load_from(&next);
        }

        self.persist();
        Ok(())
    }

    /// Duplicate a project and make the copy active.
    ///
    /// The copy shares every field of the source except for a fresh id and a
    /// "<source> (Copy)" name. Unknown ids are ignored.
    pub fn duplicate_project(&mut self, id: &str) -> Option<String> {
        let source = self.projects.iter().find(|p| p.id == id)?.clone();

        let new_id = format!("project-{}", Uuid::new_v4());
        let copy = Project {
            id: new_id.clone(),
            name: format!("{} (Copy)", source.name),
            last_saved: Some(Utc::now()),
            ..source
        };

        self.session.current_project_id = new_id.clone();
        self.session.draft.load_from(&copy);
        self.projects.push(copy);

        log::info!("Duplicated project {} as {}", id, new_id);
        self.persist();
        Some(new_id)
    }

    /// Rename a project. Whitespace-only names fall back to "Untitled".
    /// Unknown ids are ignored.
    pub fn rename_project(&mut self, id: &str, new_name: &str) {
        let trimmed = new_name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_PROJECT_NAME
        } else {
            trimmed
        };

        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            log::debug!("rename_project: unknown id {}", id);
            return;
        };

        project.name = name.to_string();
        project.last_saved = Some(Utc::now());

        if self.session.current_project_id == id {
            self.session.draft.last_saved = project.last_saved;
        }

        self.persist();
    }

    // ========================================================================
    // DRAFT MIRROR
    // ========================================================================

    /// Replace the draft source content
    pub fn set_source_content(&mut self, content: impl Into<String>) {
        self.session.draft.source_content = content.into();
    }

    /// Record uploaded content and auto-name the active project from it.
    ///
    /// The name is only replaced when the heuristic finds something better
    /// than "Untitled".
    pub fn apply_upload(&mut self, content: &str) {
        self.session.draft.source_content = content.to_string();

        let suggestion = suggest_project_name(content);
        if suggestion != DEFAULT_PROJECT_NAME {
            let id = self.session.current_project_id.clone();
            self.rename_project(&id, &suggestion);
        }
    }

    /// Replace the draft script
    pub fn set_script(&mut self, script: Vec<DialogueLine>) {
        self.session.draft.script = script;
    }

    /// Replace the draft audio versions
    pub fn set_audio_versions(&mut self, versions: Vec<AudioVersion>) {
        self.session.draft.audio_versions = versions;
    }

    /// Append a generated audio version, retaining earlier versions
    pub fn push_audio_version(&mut self, version: AudioVersion) {
        self.session.draft.audio_versions.push(version);
    }

    /// Rename an audio version in the draft. Unknown ids are ignored.
    pub fn rename_audio_version(&mut self, audio_id: &str, new_name: &str) {
        if let Some(version) = self
            .session
            .draft
            .audio_versions
            .iter_mut()
            .find(|v| v.id == audio_id)
        {
            version.name = new_name.to_string();
        }
    }

    // ========================================================================
    // COMMIT
    // ========================================================================

    /// Commit the draft mirror into the active project and persist.
    pub fn commit_draft(&mut self) {
        self.commit_draft_at(Utc::now());
    }

    /// Commit with an explicit timestamp.
    ///
    /// Capture and serialization happen synchronously within the calling
    /// turn, so a commit never observes a project selection made after the
    /// decision to commit. Committing twice with the same timestamp and no
    /// intervening mutation produces identical serializations.
    pub fn commit_draft_at(&mut self, now: DateTime<Utc>) {
        self.session.draft.last_saved = Some(now);

        let active_id = self.session.current_project_id.clone();
        let draft = self.session.draft.clone();
        if let Some(project) = self.projects.iter_mut().find(|p| p.id == active_id) {
            draft.apply_to(project);
        }

        self.persist();
        log::debug!("Committed draft for {}", active_id);
    }

    fn persist(&mut self) {
        match serde_json::to_string_pretty(&self.projects) {
            Ok(json) => self.storage.set(PROJECTS_KEY, &json),
            Err(e) => log::warn!("Failed to serialize projects: {}", e),
        }
        self.storage
            .set(ACTIVE_PROJECT_KEY, &self.session.current_project_id);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// All projects, in collection order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// The active project record
    pub fn active_project(&self) -> &Project {
        self.projects
            .iter()
            .find(|p| p.id == self.session.current_project_id)
            .expect("active id always resolves while the collection is non-empty")
    }

    /// Name of the active project
    pub fn active_project_name(&self) -> &str {
        &self.active_project().name
    }

    /// The current session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether the draft holds anything worth autosaving
    pub fn draft_has_content(&self) -> bool {
        self.session.draft.has_content()
    }

    /// Move the wizard to a step
    pub fn set_step(&mut self, step: WizardStep) {
        self.session.step = step;
    }

    /// Consume the store, returning the storage handle
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStateStore;

    fn fresh_store() -> ProjectStore<MemoryStateStore> {
        let _ = env_logger::builder().is_test(true).try_init();
        ProjectStore::bootstrap(MemoryStateStore::new())
    }

    #[test]
    fn test_bootstrap_empty_storage_yields_default_project() {
        let store = fresh_store();

        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.projects()[0].id, DEFAULT_PROJECT_ID);
        assert_eq!(store.projects()[0].name, DEFAULT_PROJECT_NAME);
        assert_eq!(store.session().current_project_id, DEFAULT_PROJECT_ID);
    }

    #[test]
    fn test_bootstrap_corrupt_storage_yields_default_project() {
        let storage = MemoryStateStore::new();
        storage.seed(PROJECTS_KEY, "{not valid json!");

        let store = ProjectStore::bootstrap(storage);

        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.projects()[0].id, DEFAULT_PROJECT_ID);
        assert_eq!(store.projects()[0].name, DEFAULT_PROJECT_NAME);
    }

    #[test]
    fn test_bootstrap_round_trip() {
        let mut store = fresh_store();
        store.apply_upload("Quantum computing will change cryptography forever");
        store.set_script(vec![DialogueLine::new("P1", "Welcome to our podcast.")]);
        store.commit_draft();

        let storage = store.into_storage();
        let restored = ProjectStore::bootstrap(storage);

        assert_eq!(restored.projects().len(), 1);
        let project = &restored.projects()[0];
        assert_eq!(project.name, "Quantum Computing");
        assert_eq!(
            project.content.as_deref(),
            Some("Quantum computing will change cryptography forever")
        );
        assert_eq!(project.script.len(), 1);
        assert!(project.last_saved.is_some());
    }

    #[test]
    fn test_bootstrap_restores_active_project() {
        let mut store = fresh_store();
        let second = store.create_project();

        let storage = store.into_storage();
        let restored = ProjectStore::bootstrap(storage);
        assert_eq!(restored.session().current_project_id, second);
    }

    #[test]
    fn test_bootstrap_unknown_active_id_falls_back_to_first() {
        let mut store = fresh_store();
        store.commit_draft();
        let storage = store.into_storage();
        storage.seed(ACTIVE_PROJECT_KEY, "project-gone");

        let restored = ProjectStore::bootstrap(storage);
        assert_eq!(restored.session().current_project_id, DEFAULT_PROJECT_ID);
    }

    #[test]
    fn test_create_then_delete_down_to_last() {
        let mut store = fresh_store();
        let second = store.create_project();
        let third = store.create_project();

        assert_eq!(store.projects().len(), 3);
        // The last created project is active
        assert_eq!(store.session().current_project_id, third);

        assert_eq!(store.delete_project(DEFAULT_PROJECT_ID), Ok(()));
        assert_eq!(store.delete_project(&second), Ok(()));
        assert_eq!(store.projects().len(), 1);

        // The last remaining project is protected
        assert_eq!(store.delete_project(&third), Err(StoreError::LastProject));
        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.session().current_project_id, third);
    }

    #[test]
    fn test_delete_active_project_activates_first_remaining() {
        let mut store = fresh_store();
        let second = store.create_project();
        store.set_source_content("draft belonging to the second project");

        store.delete_project(&second).unwrap();

        assert_eq!(store.session().current_project_id, DEFAULT_PROJECT_ID);
        // Draft now mirrors the newly active project, not the deleted one
        assert_eq!(store.session().draft.source_content, "");
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut store = fresh_store();
        store.create_project();

        assert_eq!(store.delete_project("project-gone"), Ok(()));
        assert_eq!(store.projects().len(), 2);
    }

    #[test]
    fn test_rename_whitespace_falls_back_to_untitled() {
        let mut store = fresh_store();
        store.rename_project(DEFAULT_PROJECT_ID, "   ");

        assert_eq!(store.active_project_name(), DEFAULT_PROJECT_NAME);
        assert!(store.active_project().last_saved.is_some());
    }

    #[test]
    fn test_rename_trims_and_updates() {
        let mut store = fresh_store();
        store.rename_project(DEFAULT_PROJECT_ID, "  Interview  ");

        assert_eq!(store.active_project_name(), "Interview");
    }

    #[test]
    fn test_duplicate_project() {
        let mut store = fresh_store();
        store.rename_project(DEFAULT_PROJECT_ID, "Interview");
        store.set_source_content("Some interview notes");
        store.set_script(vec![DialogueLine::new("P1", "Welcome.")]);
        store.commit_draft();

        let copy_id = store.duplicate_project(DEFAULT_PROJECT_ID).unwrap();

        assert_ne!(copy_id, DEFAULT_PROJECT_ID);
        assert_eq!(store.projects().len(), 2);
        // The duplicate becomes active
        assert_eq!(store.session().current_project_id, copy_id);

        let copy = store.active_project();
        assert_eq!(copy.name, "Interview (Copy)");
        assert_eq!(copy.content.as_deref(), Some("Some interview notes"));
        assert_eq!(copy.script.len(), 1);
    }

    #[test]
    fn test_duplicate_unknown_id_is_noop() {
        let mut store = fresh_store();
        assert_eq!(store.duplicate_project("project-gone"), None);
        assert_eq!(store.projects().len(), 1);
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut store = fresh_store();
        store.set_source_content("keep me");

        store.select_project("project-gone");

        assert_eq!(store.session().current_project_id, DEFAULT_PROJECT_ID);
        assert_eq!(store.session().draft.source_content, "keep me");
    }

    #[test]
    fn test_select_replaces_draft_mirror() {
        let mut store = fresh_store();
        store.set_source_content("never committed");
        store.create_project();

        // Switching back discards the uncommitted draft of project-1
        store.select_project(DEFAULT_PROJECT_ID);
        assert_eq!(store.session().draft.source_content, "");
    }

    #[test]
    fn test_commit_is_idempotent() {
        let mut store = fresh_store();
        store.set_source_content("Some content");
        let now = Utc::now();

        store.commit_draft_at(now);
        let storage = store.into_storage();
        let first = storage.get(PROJECTS_KEY).unwrap();

        let mut store = ProjectStore::bootstrap(storage);
        store.commit_draft_at(now);
        let second = store.into_storage().get(PROJECTS_KEY).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_create_resets_wizard_step() {
        let mut store = fresh_store();
        store.set_step(WizardStep::Audio);

        store.create_project();
        assert_eq!(store.session().step, WizardStep::Upload);
        assert_eq!(store.session().step.number(), 1);
    }
}
