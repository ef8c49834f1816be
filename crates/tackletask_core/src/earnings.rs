//! Derived earnings.
//!
//! # Responsibility
//! - Compute task, project and cross-project earnings from stored values.
//!
//! # Invariants
//! - Pure functions of their inputs; results are never persisted.
//! - No rounding and no sign checks here; inputs are validated on write.
//! - Empty inputs sum to `0.0`.

use crate::model::project::Project;
use crate::model::task::Task;
use serde::Serialize;

/// `hours_worked * rate_per_hour`.
pub fn task_earnings(task: &Task) -> f64 {
    task.hours_worked * task.rate_per_hour
}

/// Sum of task earnings for one project's tasks.
pub fn project_earnings<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> f64 {
    sum(tasks.into_iter().map(task_earnings))
}

/// Sum of per-project earnings.
pub fn total_earnings(per_project: impl IntoIterator<Item = f64>) -> f64 {
    sum(per_project.into_iter())
}

// Float `Sum` may start from -0.0; fold from +0.0 so empty sets print as 0.
fn sum(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, value| acc + value)
}

/// One row of the earnings view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectEarnings {
    pub project: Project,
    pub task_count: usize,
    pub earnings: f64,
}

impl ProjectEarnings {
    pub fn from_tasks(project: Project, tasks: &[Task]) -> Self {
        Self {
            project,
            task_count: tasks.len(),
            earnings: project_earnings(tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{project_earnings, task_earnings, total_earnings, ProjectEarnings};
    use crate::model::project::Project;
    use crate::model::status::WorkStatus;
    use crate::model::task::Task;
    use chrono::NaiveDate;

    fn task(hours: f64, rate: f64) -> Task {
        Task {
            id: 1,
            name: "t".to_string(),
            hours_worked: hours,
            rate_per_hour: rate,
            project_id: 1,
            status: WorkStatus::Pending,
        }
    }

    #[test]
    fn task_earnings_is_hours_times_rate() {
        assert_eq!(task_earnings(&task(10.0, 50.0)), 500.0);
        assert_eq!(task_earnings(&task(1.5, 2.5)), 1.5 * 2.5);
    }

    #[test]
    fn zero_hours_or_rate_earns_nothing() {
        assert_eq!(task_earnings(&task(0.0, 80.0)), 0.0);
        assert_eq!(task_earnings(&task(8.0, 0.0)), 0.0);
    }

    #[test]
    fn project_earnings_sums_tasks_and_is_zero_when_empty() {
        let tasks = vec![task(10.0, 50.0), task(2.0, 25.0)];
        assert_eq!(project_earnings(&tasks), 550.0);

        let none: Vec<Task> = Vec::new();
        let empty = project_earnings(&none);
        assert_eq!(empty, 0.0);
        assert!(empty.is_sign_positive());
    }

    #[test]
    fn total_earnings_sums_projects() {
        assert_eq!(total_earnings([500.0, 300.0]), 800.0);
        assert_eq!(total_earnings(std::iter::empty()), 0.0);
    }

    #[test]
    fn summary_row_counts_tasks() {
        let project = Project {
            id: 1,
            title: "Website".to_string(),
            description: String::new(),
            deadline: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            client_id: 1,
            project_status: WorkStatus::Pending,
        };
        let row = ProjectEarnings::from_tasks(project, &[task(10.0, 50.0), task(4.0, 50.0)]);
        assert_eq!(row.task_count, 2);
        assert_eq!(row.earnings, 700.0);
    }
}
