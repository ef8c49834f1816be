//! Billable task records.
//!
//! # Invariants
//! - `project_id` references an existing project (enforced by the store).
//! - `hours_worked` and `rate_per_hour` are finite and non-negative when
//!   written through the store.

use super::status::WorkStatus;
use super::validation::{validate_amount, validate_required, ValidationError};
use super::{ProjectId, TaskId};
use crate::earnings::task_earnings;
use serde::{Deserialize, Serialize};

/// Persisted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub hours_worked: f64,
    pub rate_per_hour: f64,
    pub project_id: ProjectId,
    pub status: WorkStatus,
}

impl Task {
    /// Earnings computed from the current field values.
    pub fn earnings(&self) -> f64 {
        task_earnings(self)
    }

    /// Overwrites the fields set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(hours) = patch.hours_worked {
            self.hours_worked = hours;
        }
        if let Some(rate) = patch.rate_per_hour {
            self.rate_per_hour = rate;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_task_fields(&self.name, self.hours_worked, self.rate_per_hour)
    }
}

/// Input for creating a task; status defaults to `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub hours_worked: f64,
    pub rate_per_hour: f64,
    pub project_id: ProjectId,
    pub status: WorkStatus,
}

impl NewTask {
    pub fn new(
        name: impl Into<String>,
        hours_worked: f64,
        rate_per_hour: f64,
        project_id: ProjectId,
    ) -> Self {
        Self {
            name: name.into(),
            hours_worked,
            rate_per_hour,
            project_id,
            status: WorkStatus::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_task_fields(&self.name, self.hours_worked, self.rate_per_hour)
    }
}

/// Partial update for a task. The owning project cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub hours_worked: Option<f64>,
    pub rate_per_hour: Option<f64>,
    pub status: Option<WorkStatus>,
}

fn validate_task_fields(name: &str, hours: f64, rate: f64) -> Result<(), ValidationError> {
    validate_required("name", name)?;
    validate_amount("hours_worked", hours)?;
    validate_amount("rate_per_hour", rate)
}
