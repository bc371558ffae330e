//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use sagefemme_core::storage::{RepositoryError, Result, TemplateRepository};
use sagefemme_core::template::Template;

/// In-memory storage backend for testing.
///
/// Templates are kept in a `Vec` so listing preserves insertion order, the
/// same order the SQLite backend returns.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    templates: Arc<RwLock<Vec<Template>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `templates`.
    #[cfg(test)]
    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self {
            templates: Arc::new(RwLock::new(templates)),
        }
    }
}

#[async_trait]
impl TemplateRepository for InMemoryRepository {
    async fn list_active_templates(&self) -> Result<Vec<Template>> {
        let templates = self.templates.read().await;
        Ok(templates.iter().filter(|t| t.is_active).cloned().collect())
    }

    async fn get_template(&self, id: Uuid) -> Result<Option<Template>> {
        let templates = self.templates.read().await;
        Ok(templates.iter().find(|t| t.id == id).cloned())
    }

    async fn create_template(&self, template: &Template) -> Result<()> {
        let mut templates = self.templates.write().await;
        if templates.iter().any(|t| t.id == template.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Template",
                id: template.id.to_string(),
            });
        }
        templates.push(template.clone());
        Ok(())
    }

    async fn update_template(&self, template: &Template) -> Result<()> {
        let mut templates = self.templates.write().await;
        let existing = templates
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or_else(|| RepositoryError::template_not_found(template.id))?;
        *existing = template.clone();
        Ok(())
    }

    async fn delete_template(&self, id: Uuid) -> Result<()> {
        let mut templates = self.templates.write().await;
        let position = templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| RepositoryError::template_not_found(id))?;
        templates.remove(position);
        Ok(())
    }
}
