//! Table rendering for shell output.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use tackletask_core::{CascadeSummary, Client, EntityKind, Project, ProjectEarnings, Task};

#[derive(Tabled)]
struct ClientRow<'a> {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Email")]
    email: &'a str,
    #[tabled(rename = "Phone")]
    phone: &'a str,
}

#[derive(Tabled)]
struct ProjectRow<'a> {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Description")]
    description: &'a str,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Client ID")]
    client_id: i64,
}

#[derive(Tabled)]
struct TaskRow<'a> {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "Hours")]
    hours: f64,
    #[tabled(rename = "Rate")]
    rate: f64,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Project ID")]
    project_id: i64,
    #[tabled(rename = "Earnings")]
    earnings: String,
}

#[derive(Tabled)]
struct EarningsRow<'a> {
    #[tabled(rename = "Project ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Tasks")]
    tasks: usize,
    #[tabled(rename = "Earnings")]
    earnings: String,
}

/// Formats an amount the way every earnings figure is shown.
pub fn money(amount: f64) -> String {
    format!("Ksh. {amount:.2}")
}

fn styled<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn clients_table(clients: &[Client]) -> String {
    styled(clients.iter().map(|client| ClientRow {
        id: client.id,
        name: &client.name,
        email: &client.email,
        phone: &client.phone,
    }))
}

pub fn projects_table(projects: &[Project]) -> String {
    styled(projects.iter().map(|project| ProjectRow {
        id: project.id,
        title: &project.title,
        description: &project.description,
        status: project.project_status.as_str(),
        deadline: project.deadline.to_string(),
        client_id: project.client_id,
    }))
}

pub fn tasks_table(tasks: &[Task]) -> String {
    styled(tasks.iter().map(|task| TaskRow {
        id: task.id,
        name: &task.name,
        hours: task.hours_worked,
        rate: task.rate_per_hour,
        status: task.status.as_str(),
        project_id: task.project_id,
        earnings: money(task.earnings()),
    }))
}

pub fn earnings_table(rows: &[ProjectEarnings]) -> String {
    styled(rows.iter().map(|row| EarningsRow {
        id: row.project.id,
        title: &row.project.title,
        tasks: row.task_count,
        earnings: money(row.earnings),
    }))
}

pub fn cascade_message(entity: EntityKind, summary: &CascadeSummary) -> String {
    match entity {
        EntityKind::Client => format!(
            "Client and all associated projects deleted ({} projects, {} tasks removed).",
            summary.projects_removed, summary.tasks_removed
        ),
        _ => format!(
            "Project and all associated tasks deleted ({} tasks removed).",
            summary.tasks_removed
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tackletask_core::WorkStatus;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(500.0), "Ksh. 500.00");
        assert_eq!(money(0.0), "Ksh. 0.00");
        assert_eq!(money(1234.5), "Ksh. 1234.50");
    }

    #[test]
    fn task_table_includes_derived_earnings() {
        let tasks = vec![Task {
            id: 1,
            name: "Design".to_string(),
            hours_worked: 10.0,
            rate_per_hour: 50.0,
            project_id: 2,
            status: WorkStatus::InProgress,
        }];
        let table = tasks_table(&tasks);
        assert!(table.contains("Design"));
        assert!(table.contains("In Progress"));
        assert!(table.contains("Ksh. 500.00"));
        assert!(table.contains("Project ID"));
    }

    #[test]
    fn project_table_shows_calendar_deadline() {
        let projects = vec![Project {
            id: 3,
            title: "Website".to_string(),
            description: "Landing".to_string(),
            deadline: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            client_id: 1,
            project_status: WorkStatus::Pending,
        }];
        let table = projects_table(&projects);
        assert!(table.contains("2025-01-15"));
        assert!(table.contains("Pending"));
    }
}
