//! Project records.
//!
//! # Invariants
//! - `client_id` references an existing client (enforced by the store).
//! - `deadline` is a calendar date with no time-of-day component.
//! - `project_earnings` is derived from tasks and never stored here.

use super::status::WorkStatus;
use super::validation::{validate_required, ValidationError};
use super::{ClientId, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub client_id: ClientId,
    pub project_status: WorkStatus,
}

impl Project {
    /// Overwrites the fields set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &ProjectPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = patch.project_status {
            self.project_status = status;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title)
    }
}

/// Input for creating a project; status defaults to `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub client_id: ClientId,
    pub project_status: WorkStatus,
}

impl NewProject {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDate,
        client_id: ClientId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
            client_id,
            project_status: WorkStatus::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title)
    }
}

/// Partial update for a project. The owning client cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub project_status: Option<WorkStatus>,
}
