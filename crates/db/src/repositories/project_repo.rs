//! Repository for project records.

use agrega_core::error::CoreError;
use agrega_core::project::{CreateProject, Project, UpdateProject};
use agrega_core::types::{system_clock, Clock, ProjectId};
use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Storage seam for projects.
///
/// Implementations must keep ids unique and immutable, bump
/// `last_modified` on every mutation, and never physically remove a
/// record: delete is a status flip.
#[async_trait]
pub trait ProjectRepo: Send + Sync {
    /// Validate and insert a new active project, returning the created record.
    async fn create(&self, input: CreateProject) -> Result<Project, CoreError>;

    /// Find a project by id, whatever its status.
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, CoreError>;

    /// Apply a partial update. Returns `None` if no project has this id.
    async fn update(
        &self,
        id: ProjectId,
        input: UpdateProject,
    ) -> Result<Option<Project>, CoreError>;

    /// Mark a project deleted. Returns `true` if a project with this id exists.
    async fn soft_delete(&self, id: ProjectId) -> Result<bool, CoreError>;

    /// All projects in creation order, regardless of status.
    async fn list(&self) -> Result<Vec<Project>, CoreError>;
}

/// Process-local project store.
///
/// Thread-safe via interior `RwLock`; every mutation holds the write lock
/// for its whole read-modify-write, so concurrent requests are serialized.
/// Contents are lost on restart.
pub struct InMemoryProjectRepo {
    projects: RwLock<IndexMap<ProjectId, Project>>,
    clock: Clock,
}

impl InMemoryProjectRepo {
    /// Create an empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Create an empty store stamped by `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            projects: RwLock::new(IndexMap::new()),
            clock,
        }
    }

    /// Return the number of stored projects, deleted ones included.
    pub async fn len(&self) -> usize {
        self.projects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.read().await.is_empty()
    }
}

impl Default for InMemoryProjectRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectRepo for InMemoryProjectRepo {
    async fn create(&self, input: CreateProject) -> Result<Project, CoreError> {
        let mut projects = self.projects.write().await;

        let mut id = ProjectId::new_v4();
        while projects.contains_key(&id) {
            id = ProjectId::new_v4();
        }

        let project = Project::new(id, input, (self.clock)())?;
        projects.insert(id, project.clone());
        tracing::info!(project_id = %id, name = %project.name, "Project created");
        Ok(project)
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, CoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn update(
        &self,
        id: ProjectId,
        input: UpdateProject,
    ) -> Result<Option<Project>, CoreError> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        project.apply_update(input, (self.clock)())?;
        tracing::debug!(project_id = %id, status = %project.status, "Project updated");
        Ok(Some(project.clone()))
    }

    async fn soft_delete(&self, id: ProjectId) -> Result<bool, CoreError> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(false);
        };
        project.mark_deleted((self.clock)());
        tracing::info!(project_id = %id, "Project soft-deleted");
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.projects.read().await.values().cloned().collect())
    }
}
