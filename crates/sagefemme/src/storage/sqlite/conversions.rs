//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use sagefemme_core::template::{Template, TemplatePriority, TemplateType};

/// Convert a SQLite row to a Template.
///
/// Expected columns: id, name, category, template_type, priority, content,
/// description, source, version, is_active, is_system, owner_id
pub fn row_to_template(row: &Row) -> rusqlite::Result<Template> {
    let id: String = row.get(0)?;
    let template_type: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let owner_id: Option<String> = row.get(11)?;

    Ok(Template {
        id: parse_uuid(0, &id)?,
        name: row.get(1)?,
        category: row.get(2)?,
        template_type: parse_enum::<TemplateType>(3, &template_type)?,
        priority: parse_enum::<TemplatePriority>(4, &priority)?,
        content: row.get(5)?,
        description: row.get(6)?,
        source: row.get(7)?,
        version: row.get(8)?,
        is_active: row.get(9)?,
        is_system: row.get(10)?,
        owner_id: owner_id.as_deref().map(|s| parse_uuid(11, s)).transpose()?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a UUID from string.
fn parse_uuid(column: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a stored enum tag (template type or priority).
fn parse_enum<T>(column: usize, s: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    T::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
