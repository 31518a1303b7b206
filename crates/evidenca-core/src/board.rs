// ── Project board view model ──
//
// Projects split into an active table and a closed one (Completed or
// Canceled). Editing touches priority, status and progress only.

use tracing::{debug, info, warn};

use evidenca_api::{NewProjectRecord, ProjectUpdateRecord};

use crate::backend::ProjectBackend;
use crate::error::CoreError;
use crate::model::{EntityId, Priority, Progress, Project, ProjectStatus};

/// Fields open for editing on an existing project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEditor {
    pub id: EntityId,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub progress: Progress,
}

pub struct ProjectBoard<B> {
    backend: B,
    projects: Vec<Project>,
    editor: Option<ProjectEditor>,
    last_error: Option<String>,
}

impl<B: ProjectBackend> ProjectBoard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            projects: Vec::new(),
            editor: None,
            last_error: None,
        }
    }

    /// Fetch all projects, replacing the cache.
    pub async fn load(&mut self) -> Result<usize, CoreError> {
        match self.backend.list_projects().await {
            Ok(records) => {
                self.projects = records.into_iter().map(Project::from).collect();
                self.last_error = None;
                debug!(count = self.projects.len(), "projects loaded");
                Ok(self.projects.len())
            }
            Err(e) => Err(self.fail("load projects", e)),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn active(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| !p.status.is_closed())
            .collect()
    }

    pub fn closed(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.status.is_closed())
            .collect()
    }

    pub fn find(&self, id: &EntityId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == *id)
    }

    /// Seed the editor from the cached project.
    pub fn open_editor(&mut self, id: &EntityId) -> bool {
        let editor = self.find(id).map(|project| ProjectEditor {
            id: project.id.clone(),
            priority: project.priority,
            status: project.status,
            progress: project.progress,
        });
        if editor.is_none() {
            return false;
        }
        self.editor = editor;
        true
    }

    pub fn editor(&self) -> Option<&ProjectEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut ProjectEditor> {
        self.editor.as_mut()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Send the editor's fields and merge them into the cached project.
    pub async fn save(&mut self) -> Result<Project, CoreError> {
        let Some(editor) = self.editor.clone() else {
            return Err(self.fail("save project", CoreError::NoSelection));
        };
        let body = ProjectUpdateRecord {
            priority: editor.priority.to_string(),
            status: editor.status.to_string(),
            progress: editor.progress.percent(),
        };
        if let Err(e) = self.backend.update_project(&editor.id, &body).await {
            return Err(self.fail("save project", e));
        }

        let Some(index) = self.projects.iter().position(|p| p.id == editor.id) else {
            return Err(self.fail(
                "save project",
                CoreError::NotFound {
                    entity_type: "Project".into(),
                    identifier: editor.id.to_string(),
                },
            ));
        };
        let project = &mut self.projects[index];
        project.priority = editor.priority;
        project.status = editor.status;
        project.progress = editor.progress;
        let saved = project.clone();

        info!(id = %editor.id, status = %editor.status, "project updated");
        self.editor = None;
        self.last_error = None;
        Ok(saved)
    }

    /// Create a project at 0% progress. Only Pending or In Progress are
    /// accepted as a starting status.
    pub async fn add_project(
        &mut self,
        name: &str,
        priority: Priority,
        status: ProjectStatus,
    ) -> Result<Project, CoreError> {
        if !status.is_initial() {
            let message = format!("a new project cannot start as {status}");
            return Err(self.fail("add project", CoreError::Validation { message }));
        }
        let body = NewProjectRecord {
            project_name: name.to_owned(),
            priority: priority.to_string(),
            status: status.to_string(),
            progress: 0,
        };
        let project = match self.backend.create_project(&body).await {
            Ok(record) => Project::from(record),
            Err(e) => return Err(self.fail("add project", e)),
        };
        info!(id = %project.id, name = %project.name, "project created");
        self.projects.push(project.clone());
        self.last_error = None;
        Ok(project)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn fail(&mut self, action: &str, err: CoreError) -> CoreError {
        warn!(error = %err, "{action} failed");
        self.last_error = Some(err.to_string());
        err
    }
}
