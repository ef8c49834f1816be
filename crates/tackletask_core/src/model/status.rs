//! Work status shared by projects and tasks.

use super::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Lifecycle state of a project or task.
///
/// Stored and displayed as `Pending`, `In Progress`, `Completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Canonical text used in the `project_status`/`status` columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl Display for WorkStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = ValidationError;

    /// Case-insensitive; accepts `In Progress`, `in_progress` and `in-progress`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError::InvalidStatus(value.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WorkStatus;
    use crate::model::validation::ValidationError;

    #[test]
    fn parses_canonical_and_loose_spellings() {
        assert_eq!("Pending".parse::<WorkStatus>(), Ok(WorkStatus::Pending));
        assert_eq!("in progress".parse::<WorkStatus>(), Ok(WorkStatus::InProgress));
        assert_eq!("IN_PROGRESS".parse::<WorkStatus>(), Ok(WorkStatus::InProgress));
        assert_eq!(" completed ".parse::<WorkStatus>(), Ok(WorkStatus::Completed));
    }

    #[test]
    fn rejects_unknown_text() {
        assert_eq!(
            "done".parse::<WorkStatus>(),
            Err(ValidationError::InvalidStatus("done".to_string()))
        );
    }

    #[test]
    fn display_matches_stored_text() {
        for status in WorkStatus::ALL {
            assert_eq!(status.to_string().parse::<WorkStatus>(), Ok(status));
        }
        assert_eq!(WorkStatus::InProgress.to_string(), "In Progress");
        assert_eq!(WorkStatus::default(), WorkStatus::Pending);
    }
}
