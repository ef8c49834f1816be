//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - CRUD over `clients`.
//! - Cascade delete of a client's projects and their tasks.
//!
//! # Invariants
//! - Records are validated before insert/update.
//! - Delete removes tasks, then projects, then the client, in one
//!   immediate transaction; a missing client leaves the database untouched.

use super::{
    ensure_connection_ready, push_order_and_page, CascadeSummary, ListQuery, RepoError,
    RepoResult,
};
use crate::model::client::{Client, ClientPatch, NewClient};
use crate::model::{ClientId, EntityKind};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

const CLIENT_SELECT_SQL: &str = "SELECT id, name, email, phone FROM clients";

/// Repository interface for client records.
pub trait ClientRepository {
    fn create_client(&self, client: &NewClient) -> RepoResult<Client>;
    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>>;
    fn list_clients(&self, query: &ListQuery) -> RepoResult<Vec<Client>>;
    fn update_client(&self, id: ClientId, patch: &ClientPatch) -> RepoResult<Client>;
    /// Deletes the client and everything it owns.
    fn delete_client(&self, id: ClientId) -> RepoResult<CascadeSummary>;
    fn count_clients(&self) -> RepoResult<u64>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    /// Wraps a migrated connection; rejects connections without the schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["clients", "projects", "tasks"])?;
        Ok(Self { conn })
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(&self, client: &NewClient) -> RepoResult<Client> {
        client.validate()?;

        self.conn.execute(
            "INSERT INTO clients (name, email, phone) VALUES (?1, ?2, ?3);",
            params![client.name, client.email.trim(), client.phone],
        )?;

        Ok(Client {
            id: self.conn.last_insert_rowid(),
            name: client.name.clone(),
            email: client.email.trim().to_string(),
            phone: client.phone.clone(),
        })
    }

    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let client = self
            .conn
            .query_row(
                &format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_client_row,
            )
            .optional()?;
        Ok(client)
    }

    fn list_clients(&self, query: &ListQuery) -> RepoResult<Vec<Client>> {
        let mut sql = CLIENT_SELECT_SQL.to_string();
        let mut binds: Vec<Value> = Vec::new();
        push_order_and_page(&mut sql, &mut binds, "id", query);

        let mut stmt = self.conn.prepare(&sql)?;
        let clients = stmt
            .query_map(params_from_iter(binds), parse_client_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }

    fn update_client(&self, id: ClientId, patch: &ClientPatch) -> RepoResult<Client> {
        let mut client = self
            .get_client(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Client, id))?;
        client.apply(patch);
        client.validate()?;
        client.email = client.email.trim().to_string();

        self.conn.execute(
            "UPDATE clients SET name = ?1, email = ?2, phone = ?3 WHERE id = ?4;",
            params![client.name, client.email, client.phone, id],
        )?;

        Ok(client)
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<CascadeSummary> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let tasks_removed = tx.execute(
            "DELETE FROM tasks
             WHERE project_id IN (SELECT id FROM projects WHERE client_id = ?1);",
            [id],
        )?;
        let projects_removed = tx.execute("DELETE FROM projects WHERE client_id = ?1;", [id])?;
        let clients_removed = tx.execute("DELETE FROM clients WHERE id = ?1;", [id])?;

        if clients_removed == 0 {
            // Dropping `tx` rolls back; nothing can be owned by a missing client anyway.
            return Err(RepoError::not_found(EntityKind::Client, id));
        }

        tx.commit()?;
        Ok(CascadeSummary {
            projects_removed,
            tasks_removed,
        })
    }

    fn count_clients(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM clients;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_client_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    })
}
