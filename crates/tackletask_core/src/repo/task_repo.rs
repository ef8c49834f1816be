//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `tasks`, project and deadline filters.
//!
//! # Invariants
//! - A task can only be created for an existing project.
//! - `tasks_by_deadline` joins on the owning project's deadline; tasks have
//!   no deadline column of their own.

use super::{
    date_to_db, ensure_connection_ready, parse_status_column, push_order_and_page, row_exists,
    ListQuery, RepoError, RepoResult,
};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::{EntityKind, ProjectId, TaskId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    tasks.id AS id,
    tasks.name AS name,
    tasks.hours_worked AS hours_worked,
    tasks.rate_per_hour AS rate_per_hour,
    tasks.project_id AS project_id,
    tasks.status AS status
FROM tasks";

/// Repository interface for task records.
pub trait TaskRepository {
    fn create_task(&self, task: &NewTask) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &ListQuery) -> RepoResult<Vec<Task>>;
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    fn tasks_of_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
    fn tasks_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Task>>;
    fn count_tasks(&self) -> RepoResult<u64>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["clients", "projects", "tasks"])?;
        Ok(Self { conn })
    }

    fn query_tasks(
        &self,
        filter: &str,
        mut binds: Vec<Value>,
        query: &ListQuery,
    ) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL}{filter}");
        push_order_and_page(&mut sql, &mut binds, "tasks.id", query);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &NewTask) -> RepoResult<Task> {
        task.validate()?;
        if !row_exists(self.conn, "projects", task.project_id)? {
            return Err(RepoError::not_found(EntityKind::Project, task.project_id));
        }

        self.conn.execute(
            "INSERT INTO tasks (
                name,
                hours_worked,
                rate_per_hour,
                project_id,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.name,
                task.hours_worked,
                task.rate_per_hour,
                task.project_id,
                task.status.as_str(),
            ],
        )?;

        Ok(Task {
            id: self.conn.last_insert_rowid(),
            name: task.name.clone(),
            hours_worked: task.hours_worked,
            rate_per_hour: task.rate_per_hour,
            project_id: task.project_id,
            status: task.status,
        })
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_tasks(
            " WHERE tasks.id = ?",
            vec![Value::Integer(id)],
            &ListQuery::default(),
        )?;
        Ok(tasks.pop())
    }

    fn list_tasks(&self, query: &ListQuery) -> RepoResult<Vec<Task>> {
        self.query_tasks("", Vec::new(), query)
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let mut task = self
            .get_task(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Task, id))?;
        task.apply(patch);
        task.validate()?;

        self.conn.execute(
            "UPDATE tasks
             SET
                name = ?1,
                hours_worked = ?2,
                rate_per_hour = ?3,
                status = ?4
             WHERE id = ?5;",
            params![
                task.name,
                task.hours_worked,
                task.rate_per_hour,
                task.status.as_str(),
                id,
            ],
        )?;

        Ok(task)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Task, id));
        }
        Ok(())
    }

    fn tasks_of_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            " WHERE tasks.project_id = ?",
            vec![Value::Integer(project_id)],
            &ListQuery::default(),
        )
    }

    fn tasks_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            " JOIN projects ON projects.id = tasks.project_id WHERE projects.deadline = ?",
            vec![Value::Text(date_to_db(deadline))],
            &ListQuery::default(),
        )
    }

    fn count_tasks(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;

    Ok(Task {
        id: row.get("id")?,
        name: row.get("name")?,
        hours_worked: row.get("hours_worked")?,
        rate_per_hour: row.get("rate_per_hour")?,
        project_id: row.get("project_id")?,
        status: parse_status_column(&status_text, "tasks.status")?,
    })
}
