//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Templates table
CREATE TABLE IF NOT EXISTS templates (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    template_type TEXT NOT NULL,
    priority TEXT NOT NULL,
    content TEXT NOT NULL,
    description TEXT,
    source TEXT,
    version TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_system INTEGER NOT NULL DEFAULT 0,
    owner_id TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    CHECK ((is_system = 1 AND owner_id IS NULL) OR (is_system = 0 AND owner_id IS NOT NULL))
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_templates_active ON templates(is_active);
CREATE INDEX IF NOT EXISTS idx_templates_owner_id ON templates(owner_id);
"#;

#[cfg(test)]
const TEMPLATE_COLUMNS: &str = "id, name, category, template_type, priority, content, description, source, version, is_active, is_system, owner_id";

// Template queries
pub const INSERT_TEMPLATE: &str = r#"
INSERT INTO templates (id, name, category, template_type, priority, content, description, source, version, is_active, is_system, owner_id, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
"#;

pub const SELECT_TEMPLATE_BY_ID: &str = r#"
SELECT id, name, category, template_type, priority, content, description, source, version, is_active, is_system, owner_id
FROM templates
WHERE id = ?1
"#;

/// Rows come back in insertion order.
pub const SELECT_ACTIVE_TEMPLATES: &str = r#"
SELECT id, name, category, template_type, priority, content, description, source, version, is_active, is_system, owner_id
FROM templates
WHERE is_active = 1
ORDER BY rowid ASC
"#;

pub const UPDATE_TEMPLATE: &str = r#"
UPDATE templates
SET name = ?2, category = ?3, template_type = ?4, priority = ?5, content = ?6,
    description = ?7, source = ?8, version = ?9, is_active = ?10, is_system = ?11,
    owner_id = ?12, updated_at = ?13
WHERE id = ?1
"#;

pub const DELETE_TEMPLATE: &str = r#"
DELETE FROM templates
WHERE id = ?1
"#;
