//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `projects`, client and deadline filters.
//! - Cascade delete of a project's tasks.
//!
//! # Invariants
//! - A project can only be created for an existing client.
//! - Deadlines are stored as `YYYY-MM-DD`, so equality filters compare
//!   calendar days.

use super::{
    date_to_db, ensure_connection_ready, parse_date_column, parse_status_column,
    push_order_and_page, row_exists, CascadeSummary, ListQuery, RepoError, RepoResult,
};
use crate::model::project::{NewProject, Project, ProjectPatch};
use crate::model::{ClientId, EntityKind, ProjectId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    deadline,
    client_id,
    project_status
FROM projects";

/// Repository interface for project records.
pub trait ProjectRepository {
    fn create_project(&self, project: &NewProject) -> RepoResult<Project>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self, query: &ListQuery) -> RepoResult<Vec<Project>>;
    fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<Project>;
    /// Deletes the project and its tasks.
    fn delete_project(&self, id: ProjectId) -> RepoResult<CascadeSummary>;
    fn projects_of_client(&self, client_id: ClientId) -> RepoResult<Vec<Project>>;
    fn projects_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Project>>;
    fn count_projects(&self) -> RepoResult<u64>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["clients", "projects", "tasks"])?;
        Ok(Self { conn })
    }

    fn query_projects(
        &self,
        filter: &str,
        mut binds: Vec<Value>,
        query: &ListQuery,
    ) -> RepoResult<Vec<Project>> {
        let mut sql = format!("{PROJECT_SELECT_SQL}{filter}");
        push_order_and_page(&mut sql, &mut binds, "id", query);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &NewProject) -> RepoResult<Project> {
        project.validate()?;
        if !row_exists(self.conn, "clients", project.client_id)? {
            return Err(RepoError::not_found(EntityKind::Client, project.client_id));
        }

        self.conn.execute(
            "INSERT INTO projects (
                title,
                description,
                deadline,
                client_id,
                project_status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.title,
                project.description,
                date_to_db(project.deadline),
                project.client_id,
                project.project_status.as_str(),
            ],
        )?;

        Ok(Project {
            id: self.conn.last_insert_rowid(),
            title: project.title.clone(),
            description: project.description.clone(),
            deadline: project.deadline,
            client_id: project.client_id,
            project_status: project.project_status,
        })
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list_projects(&self, query: &ListQuery) -> RepoResult<Vec<Project>> {
        self.query_projects("", Vec::new(), query)
    }

    fn update_project(&self, id: ProjectId, patch: &ProjectPatch) -> RepoResult<Project> {
        let mut project = self
            .get_project(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Project, id))?;
        project.apply(patch);
        project.validate()?;

        self.conn.execute(
            "UPDATE projects
             SET
                title = ?1,
                description = ?2,
                deadline = ?3,
                project_status = ?4
             WHERE id = ?5;",
            params![
                project.title,
                project.description,
                date_to_db(project.deadline),
                project.project_status.as_str(),
                id,
            ],
        )?;

        Ok(project)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<CascadeSummary> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let tasks_removed = tx.execute("DELETE FROM tasks WHERE project_id = ?1;", [id])?;
        let projects_removed = tx.execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        if projects_removed == 0 {
            return Err(RepoError::not_found(EntityKind::Project, id));
        }

        tx.commit()?;
        Ok(CascadeSummary {
            projects_removed,
            tasks_removed,
        })
    }

    fn projects_of_client(&self, client_id: ClientId) -> RepoResult<Vec<Project>> {
        self.query_projects(
            " WHERE client_id = ?",
            vec![Value::Integer(client_id)],
            &ListQuery::default(),
        )
    }

    fn projects_by_deadline(&self, deadline: NaiveDate) -> RepoResult<Vec<Project>> {
        self.query_projects(
            " WHERE deadline = ?",
            vec![Value::Text(date_to_db(deadline))],
            &ListQuery::default(),
        )
    }

    fn count_projects(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let deadline_text: String = row.get("deadline")?;
    let status_text: String = row.get("project_status")?;

    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        deadline: parse_date_column(&deadline_text, "projects.deadline")?,
        client_id: row.get("client_id")?,
        project_status: parse_status_column(&status_text, "projects.project_status")?,
    })
}
