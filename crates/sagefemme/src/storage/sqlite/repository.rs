//! SQLite repository implementation.
//!
//! Implements `TemplateRepository` from `sagefemme_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use sagefemme_core::storage::{RepositoryError, Result, TemplateRepository};
use sagefemme_core::template::Template;

use super::conversions::{format_datetime, row_to_template};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

/// Owned column values for an INSERT or UPDATE, in statement parameter order.
struct TemplateParams {
    id: String,
    name: String,
    category: String,
    template_type: &'static str,
    priority: &'static str,
    content: String,
    description: Option<String>,
    source: Option<String>,
    version: Option<String>,
    is_active: bool,
    is_system: bool,
    owner_id: Option<String>,
    timestamp: String,
}

impl TemplateParams {
    fn from_template(template: &Template) -> Self {
        Self {
            id: template.id.to_string(),
            name: template.name.clone(),
            category: template.category.clone(),
            template_type: template.template_type.as_str(),
            priority: template.priority.as_str(),
            content: template.content.clone(),
            description: template.description.clone(),
            source: template.source.clone(),
            version: template.version.clone(),
            is_active: template.is_active,
            is_system: template.is_system,
            owner_id: template.owner_id.map(|id| id.to_string()),
            timestamp: format_datetime(&Utc::now()),
        }
    }

    fn execute(&self, conn: &rusqlite::Connection, sql: &str) -> rusqlite::Result<usize> {
        conn.execute(
            sql,
            rusqlite::params![
                self.id,
                self.name,
                self.category,
                self.template_type,
                self.priority,
                self.content,
                self.description,
                self.source,
                self.version,
                self.is_active,
                self.is_system,
                self.owner_id,
                self.timestamp
            ],
        )
    }
}

#[async_trait]
impl TemplateRepository for SqliteRepository {
    async fn list_active_templates(&self) -> Result<Vec<Template>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ACTIVE_TEMPLATES)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_template).map_err(wrap_err)?;

                let mut templates = Vec::new();
                for row_result in rows {
                    templates.push(row_result.map_err(wrap_err)?);
                }
                Ok(templates)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn get_template(&self, id: Uuid) -> Result<Option<Template>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TEMPLATE_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_template) {
                    Ok(template) => Ok(Some(template)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }

    async fn create_template(&self, template: &Template) -> Result<()> {
        let params = TemplateParams::from_template(template);
        let template_id = template.id.to_string();

        self.conn
            .call(move |conn| {
                params
                    .execute(conn, schema::INSERT_TEMPLATE)
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, template_id))
    }

    async fn update_template(&self, template: &Template) -> Result<()> {
        let params = TemplateParams::from_template(template);
        let template_id = template.id.to_string();

        self.conn
            .call(move |conn| {
                let rows = params
                    .execute(conn, schema::UPDATE_TEMPLATE)
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, template_id))
    }

    async fn delete_template(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TEMPLATE, [&id_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }
}
