//! Core domain logic for TackleTask Tracker.
//! Clients own projects, projects own billable tasks, and earnings are
//! derived from task hours and rates. This crate is the single source of
//! truth for those invariants; the CLI only prompts and renders.

pub mod db;
pub mod earnings;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use earnings::{project_earnings, task_earnings, total_earnings, ProjectEarnings};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, ClientPatch, NewClient};
pub use model::project::{NewProject, Project, ProjectPatch};
pub use model::status::WorkStatus;
pub use model::task::{NewTask, Task, TaskPatch};
pub use model::validation::{validate_email, ValidationError};
pub use model::{ClientId, EntityKind, ProjectId, TaskId};
pub use repo::client_repo::{ClientRepository, SqliteClientRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{CascadeSummary, ListQuery, RepoError, RepoResult};
pub use service::tracker_service::{SqliteTrackerService, TrackerService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
