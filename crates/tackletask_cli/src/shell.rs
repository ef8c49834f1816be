//! Interactive menu loop.
//!
//! # Responsibility
//! - Prompt for input, call the tracker service, render results.
//!
//! # Invariants
//! - Validation problems are resolved by re-prompting in `prompt`.
//! - Not-found results print a message and return to the main menu.
//! - Storage errors abort the current operation only; the loop continues.
//! - Closed input ends the session cleanly.

use crate::prompt::{
    parse_amount, parse_date, parse_email, parse_id, parse_optional, parse_required,
    parse_status, Prompter, DATE_FORMAT,
};
use crate::render;
use log::{error, info};
use std::io::{self, BufRead, Write};
use tackletask_core::{
    ClientPatch, EntityKind, ListQuery, NewClient, NewProject, NewTask, ProjectPatch, RepoError,
    SqliteTrackerService, TaskPatch,
};

const NO_DATA: &str = "Data not available! Add data first.";
const ENTITY_OPTIONS: [&str; 3] = ["Client", "Project", "Task"];

#[derive(Debug)]
enum ShellError {
    Input(io::Error),
    Store(RepoError),
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Input(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

type ShellResult<T> = Result<T, ShellError>;

/// One interactive session over one open store.
pub struct Shell<'conn, R, W> {
    service: SqliteTrackerService<'conn>,
    prompt: Prompter<R, W>,
}

impl<'conn, R: BufRead, W: Write> Shell<'conn, R, W> {
    pub fn new(service: SqliteTrackerService<'conn>, prompt: Prompter<R, W>) -> Self {
        Self { service, prompt }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Runs the main menu until the user exits or input closes.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.prompt.out(),
            "\n==================================\nHello,\nWelcome to TackleTask Tracker - your productivity partner.\n"
        )?;

        loop {
            let choice = match self.prompt.menu(
                &[
                    "Add (client, project, task...)",
                    "View (clients, projects, tasks, earnings...)",
                    "Update (clients, projects, tasks...)",
                    "Delete (clients, projects, tasks...)",
                ],
                "Exit",
            ) {
                Ok(choice) => choice,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err),
            };

            let outcome = match choice {
                1 => self.add_menu(),
                2 => self.view_menu(),
                3 => self.update_menu(),
                4 => self.delete_menu(),
                _ => break,
            };

            match outcome {
                Ok(()) => {}
                Err(ShellError::Input(err)) if err.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(ShellError::Input(err)) => return Err(err),
                Err(ShellError::Store(err)) if err.is_not_found() => {
                    info!("event=shell_not_found module=cli status=ok");
                    self.prompt.warn(&format!("{NO_DATA} ({err})"))?;
                }
                Err(ShellError::Store(err)) => {
                    error!("event=shell_operation module=cli status=error error={err}");
                    self.prompt
                        .warn(&format!("Operation failed: {err}. Nothing else was changed."))?;
                }
            }

            writeln!(
                self.prompt.out(),
                "\n----------------------------------\n\nHow else can I help you?"
            )?;
        }

        writeln!(
            self.prompt.out(),
            "\nThank you for using TackleTask Tracker.\nGoodbye!\n==================================\n"
        )
    }

    fn add_menu(&mut self) -> ShellResult<()> {
        writeln!(self.prompt.out(), "\n____Add____")?;
        match self.prompt.menu(&ENTITY_OPTIONS, "Go back")? {
            1 => self.add_client(),
            2 => self.add_project(),
            3 => self.add_task(),
            _ => Ok(()),
        }
    }

    fn add_client(&mut self) -> ShellResult<()> {
        let name = self.prompt.value("Client name", parse_required)?;
        let email = self.prompt.value("Client email", parse_email)?;
        let phone = self.prompt.value("Client phone", parse_optional)?;

        let client = self.service.add_client(&NewClient::new(name, email, phone))?;
        self.success("Client added successfully.")?;
        self.print(&render::clients_table(&[client]))
    }

    fn add_project(&mut self) -> ShellResult<()> {
        if self.service.counts()?.0 == 0 {
            return self.notice("Add a client first.");
        }
        let title = self.prompt.value("Project title", parse_required)?;
        let description = self.prompt.value("Project description", parse_optional)?;
        let deadline = self
            .prompt
            .value("Project deadline (YYYY-MM-DD)", parse_date)?;
        let client_id = self.prompt.value("Client ID", parse_id)?;

        let project = self
            .service
            .add_project(&NewProject::new(title, description, deadline, client_id))?;
        self.success("Project added successfully.")?;
        self.print(&render::projects_table(&[project]))
    }

    fn add_task(&mut self) -> ShellResult<()> {
        if self.service.counts()?.1 == 0 {
            return self.notice("Add a project first.");
        }
        let name = self.prompt.value("Task name", parse_required)?;
        let hours = self.prompt.value("Hours worked", parse_amount)?;
        let rate = self.prompt.value("Rate per hour", parse_amount)?;
        let project_id = self.prompt.value("Project ID", parse_id)?;

        let task = self
            .service
            .add_task(&NewTask::new(name, hours, rate, project_id))?;
        self.success("Task added successfully.")?;
        self.print(&render::tasks_table(&[task]))
    }

    fn view_menu(&mut self) -> ShellResult<()> {
        writeln!(self.prompt.out(), "\n____View____")?;
        match self
            .prompt
            .menu(&["Clients", "Projects", "Tasks", "Earnings"], "Go back")?
        {
            1 => self.view_clients(),
            2 => self.view_projects(),
            3 => self.view_tasks(),
            4 => self.view_earnings(),
            _ => Ok(()),
        }
    }

    fn view_clients(&mut self) -> ShellResult<()> {
        let clients = self.service.clients(&ListQuery::default())?;
        if clients.is_empty() {
            return self.notice(NO_DATA);
        }
        self.print(&render::clients_table(&clients))
    }

    fn view_projects(&mut self) -> ShellResult<()> {
        if self.service.counts()?.1 == 0 {
            return self.notice(NO_DATA);
        }
        writeln!(self.prompt.out(), "Filter by:")?;
        let projects = match self
            .prompt
            .menu(&["Client", "Deadline", "See All"], "Go back")?
        {
            1 => {
                let client_id = self.prompt.value("Enter Client ID", parse_id)?;
                self.service.projects_of_client(client_id)?
            }
            2 => {
                let deadline = self
                    .prompt
                    .value("Enter deadline (YYYY-MM-DD)", parse_date)?;
                self.service.projects_by_deadline(deadline)?
            }
            3 => self.service.projects(&ListQuery::default())?,
            _ => return Ok(()),
        };

        if projects.is_empty() {
            return self.notice("No projects match that filter.");
        }
        self.print(&render::projects_table(&projects))
    }

    fn view_tasks(&mut self) -> ShellResult<()> {
        if self.service.counts()?.2 == 0 {
            return self.notice(NO_DATA);
        }
        writeln!(self.prompt.out(), "Filter by:")?;
        let tasks = match self
            .prompt
            .menu(&["Project", "Deadline", "See All"], "Go back")?
        {
            1 => {
                let project_id = self.prompt.value("Enter Project ID", parse_id)?;
                self.service.tasks_of_project(project_id)?
            }
            2 => {
                let deadline = self
                    .prompt
                    .value("Enter deadline (YYYY-MM-DD)", parse_date)?;
                self.service.tasks_by_deadline(deadline)?
            }
            3 => self.service.tasks(&ListQuery::default())?,
            _ => return Ok(()),
        };

        if tasks.is_empty() {
            return self.notice("No tasks match that filter.");
        }
        self.print(&render::tasks_table(&tasks))
    }

    fn view_earnings(&mut self) -> ShellResult<()> {
        if self.service.counts()?.1 == 0 {
            return self.notice(NO_DATA);
        }
        let project_id = self.prompt.value(
            "\nEnter Project ID for earnings or 0 for total earnings",
            |answer| match answer {
                "0" => Ok(0),
                other => parse_id(other),
            },
        )?;

        if project_id == 0 {
            let rows = self.service.earnings_summary()?;
            let total = tackletask_core::total_earnings(rows.iter().map(|row| row.earnings));
            self.print(&render::earnings_table(&rows))?;
            writeln!(self.prompt.out(), "Total earnings: {}", render::money(total))?;
            return Ok(());
        }

        let earnings = self.service.project_earnings(project_id)?;
        writeln!(
            self.prompt.out(),
            "Earnings for Project {project_id}: {}",
            render::money(earnings)
        )?;
        Ok(())
    }

    fn update_menu(&mut self) -> ShellResult<()> {
        writeln!(self.prompt.out(), "\n____Update____")?;
        match self.prompt.menu(&ENTITY_OPTIONS, "Go back")? {
            1 => self.update_client(),
            2 => self.update_project(),
            3 => self.update_task(),
            _ => Ok(()),
        }
    }

    fn update_client(&mut self) -> ShellResult<()> {
        let id = self.prompt.value("Enter Client ID to update", parse_id)?;
        let client = self
            .service
            .client(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Client, id))?;

        let patch = ClientPatch {
            name: self.prompt.edit("New name", &client.name, parse_required)?,
            email: self.prompt.edit("New email", &client.email, parse_email)?,
            phone: self.prompt.edit("New phone (- to clear)", &client.phone, parse_optional)?,
        };
        if patch.is_empty() {
            return self.notice("Nothing changed.");
        }

        let updated = self.service.update_client(id, &patch)?;
        self.success("Client updated successfully.")?;
        self.print(&render::clients_table(&[updated]))
    }

    fn update_project(&mut self) -> ShellResult<()> {
        let id = self.prompt.value("Enter Project ID to update", parse_id)?;
        let project = self
            .service
            .project(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Project, id))?;

        let current_deadline = project.deadline.format(DATE_FORMAT).to_string();
        let patch = ProjectPatch {
            title: self.prompt.edit("New title", &project.title, parse_required)?,
            description: self
                .prompt
                .edit(
                    "New description (- to clear)",
                    &project.description,
                    parse_optional,
                )?,
            deadline: self.prompt.edit(
                "New deadline (YYYY-MM-DD)",
                &current_deadline,
                parse_date,
            )?,
            project_status: self.prompt.edit(
                "New status (1. Pending, 2. In Progress, 3. Completed)",
                project.project_status.as_str(),
                parse_status,
            )?,
        };

        let updated = self.service.update_project(id, &patch)?;
        self.success("Project updated successfully.")?;
        self.print(&render::projects_table(&[updated]))
    }

    fn update_task(&mut self) -> ShellResult<()> {
        let id = self.prompt.value("Enter Task ID to update", parse_id)?;
        let task = self
            .service
            .task(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Task, id))?;

        let patch = TaskPatch {
            name: self.prompt.edit("New name", &task.name, parse_required)?,
            hours_worked: self.prompt.edit(
                "New hours worked",
                &task.hours_worked.to_string(),
                parse_amount,
            )?,
            rate_per_hour: self.prompt.edit(
                "New rate per hour",
                &task.rate_per_hour.to_string(),
                parse_amount,
            )?,
            status: self.prompt.edit(
                "New status (1. Pending, 2. In Progress, 3. Completed)",
                task.status.as_str(),
                parse_status,
            )?,
        };

        let updated = self.service.update_task(id, &patch)?;
        self.success("Task updated successfully.")?;
        self.print(&render::tasks_table(&[updated]))
    }

    fn delete_menu(&mut self) -> ShellResult<()> {
        writeln!(self.prompt.out(), "\n____Delete____")?;
        match self.prompt.menu(&ENTITY_OPTIONS, "Go back")? {
            1 => {
                let id = self.prompt.value("Enter Client ID to delete", parse_id)?;
                let summary = self.service.delete_client(id)?;
                self.success(&render::cascade_message(EntityKind::Client, &summary))
            }
            2 => {
                let id = self.prompt.value("Enter Project ID to delete", parse_id)?;
                let summary = self.service.delete_project(id)?;
                self.success(&render::cascade_message(EntityKind::Project, &summary))
            }
            3 => {
                let id = self.prompt.value("Enter Task ID to delete", parse_id)?;
                self.service.delete_task(id)?;
                self.success("Task deleted.")
            }
            _ => Ok(()),
        }
    }

    fn success(&mut self, message: &str) -> ShellResult<()> {
        writeln!(self.prompt.out(), "\n✔️\n{message}\n")?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> ShellResult<()> {
        self.prompt.warn(message)?;
        Ok(())
    }

    fn print(&mut self, table: &str) -> ShellResult<()> {
        writeln!(self.prompt.out(), "{table}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use crate::prompt::Prompter;
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use std::io::Cursor;
    use tackletask_core::db::open_db_in_memory;
    use tackletask_core::{NewClient, NewProject, NewTask, SqliteTrackerService};

    fn run_script(conn: &Connection, script: &str) -> String {
        let service = SqliteTrackerService::open(conn).unwrap();
        let prompt = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(service, prompt);
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn seed(conn: &Connection) {
        let service = SqliteTrackerService::open(conn).unwrap();
        let client = service
            .add_client(&NewClient::new("Acme", "a@acme.com", "555-0100"))
            .unwrap();
        let project = service
            .add_project(&NewProject::new(
                "Website",
                "Marketing",
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                client.id,
            ))
            .unwrap();
        service
            .add_task(&NewTask::new("Design", 10.0, 50.0, project.id))
            .unwrap();
    }

    #[test]
    fn add_view_and_cascade_delete_through_menus() {
        let conn = open_db_in_memory().unwrap();
        let script = concat!(
            "1\n1\nAcme\nbad-email\na@acme.com\n555-0100\n",
            "1\n2\nWebsite\nMarketing\n2025-01-15\n1\n",
            "1\n3\nDesign\n10\n50\n1\n",
            "2\n4\n0\n",
            "2\n4\n1\n",
            "4\n1\n1\n",
            "0\n",
        );

        let output = run_script(&conn, script);

        assert!(output.contains("Invalid email format"));
        assert!(output.contains("Client added successfully."));
        assert!(output.contains("Task added successfully."));
        assert!(output.contains("Total earnings: Ksh. 500.00"));
        assert!(output.contains("Earnings for Project 1: Ksh. 500.00"));
        assert!(output.contains("1 projects, 1 tasks removed"));
        assert!(output.contains("Goodbye!"));

        let service = SqliteTrackerService::open(&conn).unwrap();
        assert_eq!(service.counts().unwrap(), (0, 0, 0));
    }

    #[test]
    fn update_keeps_fields_left_blank() {
        let conn = open_db_in_memory().unwrap();
        seed(&conn);

        let output = run_script(&conn, "3\n1\n1\n\nbilling@acme.com\n\n0\n");
        assert!(output.contains("New name [Acme]: "));
        assert!(output.contains("Client updated successfully."));

        let service = SqliteTrackerService::open(&conn).unwrap();
        let client = service.client(1).unwrap().unwrap();
        assert_eq!(client.name, "Acme");
        assert_eq!(client.email, "billing@acme.com");
        assert_eq!(client.phone, "555-0100");
    }

    #[test]
    fn task_status_update_accepts_menu_number() {
        let conn = open_db_in_memory().unwrap();
        seed(&conn);

        run_script(&conn, "3\n3\n1\n\n\n60\n3\n0\n");

        let service = SqliteTrackerService::open(&conn).unwrap();
        let task = service.task(1).unwrap().unwrap();
        assert_eq!(task.hours_worked, 10.0);
        assert_eq!(task.rate_per_hour, 60.0);
        assert_eq!(task.status, tackletask_core::WorkStatus::Completed);
        assert_eq!(task.earnings(), 600.0);
    }

    #[test]
    fn missing_ids_report_not_found_and_return_to_menu() {
        let conn = open_db_in_memory().unwrap();
        seed(&conn);

        let output = run_script(&conn, "3\n1\n42\n4\n3\n99\n0\n");
        assert!(output.contains("Data not available! Add data first. (client not found: 42)"));
        assert!(output.contains("(task not found: 99)"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn empty_filters_and_empty_store_are_reported() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "2\n1\n0\n");
        assert!(output.contains("Data not available! Add data first."));

        seed(&conn);
        let output = run_script(&conn, "2\n2\n2\n2030-01-01\n2\n3\n2\n2025-01-15\n0\n");
        assert!(output.contains("No projects match that filter."));
        assert!(output.contains("Design"));
    }

    #[test]
    fn update_clears_optional_fields_with_dash() {
        let conn = open_db_in_memory().unwrap();
        seed(&conn);

        run_script(&conn, "3\n1\n1\n\n\n-\n3\n2\n1\n\n-\n\n\n0\n");

        let service = SqliteTrackerService::open(&conn).unwrap();
        let client = service.client(1).unwrap().unwrap();
        assert_eq!(client.phone, "");
        assert_eq!(client.email, "a@acme.com");
        let project = service.project(1).unwrap().unwrap();
        assert_eq!(project.description, "");
        assert_eq!(project.title, "Website");
    }

    #[test]
    fn storage_failure_aborts_only_the_current_operation() {
        let conn = open_db_in_memory().unwrap();
        seed(&conn);

        let service = SqliteTrackerService::open(&conn).unwrap();
        conn.execute_batch("DROP TABLE tasks;").unwrap();
        let prompt = Prompter::new(Cursor::new(b"4\n1\n1\n2\n1\n0\n".to_vec()), Vec::new());
        let mut shell = Shell::new(service, prompt);
        shell.run().unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();

        assert!(output.contains("Operation failed: "));
        assert!(output.contains("no such table: tasks"));
        assert!(output.contains("a@acme.com"));
        assert!(output.contains("Goodbye!"));

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM clients;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[test]
    fn closed_input_ends_session_without_writing() {
        let conn = open_db_in_memory().unwrap();
        let output = run_script(&conn, "1\n1\nAcme\n");

        assert!(output.contains("Goodbye!"));
        let service = SqliteTrackerService::open(&conn).unwrap();
        assert_eq!(service.counts().unwrap(), (0, 0, 0));
    }
}
