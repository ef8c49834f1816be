//! Tracker use-case service.
//!
//! # Responsibility
//! - Single entry point for client/project/task CRUD, filters and earnings.
//! - Emit one metadata-only log event per mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Repository errors are returned unchanged.
//! - Earnings are recomputed from current rows on every call.

use crate::earnings::{project_earnings, total_earnings, ProjectEarnings};
use crate::model::client::{Client, ClientPatch, NewClient};
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::{ClientId, EntityKind, ProjectId, TaskId};
use crate::repo::client_repo::{ClientRepository, SqliteClientRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::{CascadeSummary, ListQuery, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{error, info, warn};
use rusqlite::Connection;

/// Tracker service over the default SQLite repositories.
pub type SqliteTrackerService<'conn> = TrackerService<
    SqliteClientRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteTaskRepository<'conn>,
>;

/// Use-case facade over the three entity repositories.
pub struct TrackerService<C, P, T> {
    clients: C,
    projects: P,
    tasks: T,
}

impl<'conn> SqliteTrackerService<'conn> {
    /// Builds the service on one migrated connection shared by all repositories.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteClientRepository::try_new(conn)?,
            SqliteProjectRepository::try_new(conn)?,
            SqliteTaskRepository::try_new(conn)?,
        ))
    }
}

impl<C, P, T> TrackerService<C, P, T>
where
    C: ClientRepository,
    P: ProjectRepository,
    T: TaskRepository,
{
    pub fn new(clients: C, projects: P, tasks: T) -> Self {
        Self {
            clients,
            projects,
            tasks,
        }
    }

    pub fn add_client(&self, client: &NewClient) -> RepoResult<Client> {
        let created = logged("client_create", self.clients.create_client(client))?;
        info!("event=client_create module=service status=ok id={}", created.id);
        Ok(created)
    }

    pub fn client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        self.clients.get_client(id)
    }

    pub fn clients(&self, query: &ListQuery) -> RepoResult<Vec<Client>> {
        self.clients.list_clients(query)
    }

    pub fn update_client(&self, id: ClientId, patch: &ClientPatch) -> RepoResult<Client> {
        let updated = logged("client_update", self.clients.update_client(id, patch))?;
        info!("event=client_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Deletes a client with all of its projects and their tasks.
    pub fn delete_client(&self, id: ClientId) -> RepoResult<CascadeSummary> {
        let summary = logged("client_delete", self.clients.delete_client(id))?;
        info!(
            "event=client_delete module=service status=ok id={} projects_removed={} tasks_removed={}",
            id, summary.projects_removed, summary.tasks_removed
        );
        Ok(summary)
    }

    pub fn add_project(&self, project: &NewProject) -> RepoResult<Project> {
        let created = logged("project_create", self.projects.create_project(project))?;
        info!(
            "event=project_create module=service status=ok id={} client_id={}",
            created.id, created.client_id
        );
        Ok(created)
    }

    pub fn project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.projects.get_project(id)
    }

    pub fn projects(&self, query: &ListQuery) -> RepoResult<Vec<Project>> {
        self.projects.list_projects(query)
    }

    pub fn projects_of_client(&self, client_id: ClientId) -> RepoResult<Vec<Project>> {
        self.projects.projects_of_client(client_id)
    }

    pub fn projects_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Project>> {
        self.projects.projects_by_deadline(deadline)
    }

    pub fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<Project> {
        let updated = logged("project_update", self.projects.update_project(id, patch))?;
        info!("event=project_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Deletes a project and its tasks.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<CascadeSummary> {
        let summary = logged("project_delete", self.projects.delete_project(id))?;
        info!(
            "event=project_delete module=service status=ok id={} tasks_removed={}",
            id, summary.tasks_removed
        );
        Ok(summary)
    }

    pub fn add_task(&self, task: &NewTask) -> RepoResult<Task> {
        let created = logged("task_create", self.tasks.create_task(task))?;
        info!(
            "event=task_create module=service status=ok id={} project_id={}",
            created.id, created.project_id
        );
        Ok(created)
    }

    pub fn task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.tasks.get_task(id)
    }

    pub fn tasks(&self, query: &ListQuery) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks(query)
    }

    pub fn tasks_of_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.tasks.tasks_of_project(project_id)
    }

    pub fn tasks_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Task>> {
        self.tasks.tasks_by_deadline(deadline)
    }

    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let updated = logged("task_update", self.tasks.update_task(id, patch))?;
        info!("event=task_update module=service status=ok id={id}");
        Ok(updated)
    }

    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        logged("task_delete", self.tasks.delete_task(id))?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Earnings for one project, summed over its current tasks.
    ///
    /// Returns `NotFound` when the project does not exist, so callers can
    /// tell "no such project" apart from "project with no billable work".
    pub fn project_earnings(&self, project_id: ProjectId) -> RepoResult<f64> {
        if self.projects.get_project(project_id)?.is_none() {
            return Err(RepoError::not_found(EntityKind::Project, project_id));
        }
        let tasks = self.tasks.tasks_of_project(project_id)?;
        Ok(project_earnings(&tasks))
    }

    /// Per-project earnings rows, in project id order.
    pub fn earnings_summary(&self) -> RepoResult<Vec<ProjectEarnings>> {
        self.projects
            .list_projects(&ListQuery::default())?
            .into_iter()
            .map(|project| {
                let tasks = self.tasks.tasks_of_project(project.id)?;
                Ok(ProjectEarnings::from_tasks(project, &tasks))
            })
            .collect()
    }

    /// Earnings across every project.
    pub fn total_earnings(&self) -> RepoResult<f64> {
        let rows = self.earnings_summary()?;
        Ok(total_earnings(rows.iter().map(|row| row.earnings)))
    }

    /// Row counts as `(clients, projects, tasks)`.
    pub fn counts(&self) -> RepoResult<(u64, u64, u64)> {
        Ok((
            self.clients.count_clients()?,
            self.projects.count_projects()?,
            self.tasks.count_tasks()?,
        ))
    }
}

fn logged<V>(event: &str, result: RepoResult<V>) -> RepoResult<V> {
    if let Err(err) = &result {
        match err {
            RepoError::NotFound { entity, id } => warn!(
                "event={event} module=service status=not_found entity={entity} id={id}"
            ),
            RepoError::Validation(_) => {
                warn!("event={event} module=service status=rejected error_code=validation")
            }
            other => error!(
                "event={event} module=service status=error error_code=storage error={other}"
            ),
        }
    }
    result
}
