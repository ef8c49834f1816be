//! Domain model for clients, projects and billable tasks.
//!
//! # Responsibility
//! - Define the records persisted by the entity store.
//! - Define create inputs and partial-update patches for each record.
//! - Own field validation shared by repositories and the input boundary.
//!
//! # Invariants
//! - Ids are assigned by the store; records built in memory carry no id
//!   until persisted (`New*` types).
//! - Earnings are never fields on these records; see `crate::earnings`.

use std::fmt::{Display, Formatter};

pub mod client;
pub mod project;
pub mod status;
pub mod task;
pub mod validation;

pub type ClientId = i64;
pub type ProjectId = i64;
pub type TaskId = i64;

/// Names the entity type in not-found and logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Project,
    Task,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
