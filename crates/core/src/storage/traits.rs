use async_trait::async_trait;
use uuid::Uuid;

use crate::template::Template;

use super::Result;

/// Repository for template records.
///
/// Any implementation that writes templates underneath a template cache must
/// have its writes followed by a cache invalidation; the server wires this
/// through a decorator.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Gets every template with `is_active = true`, system and user-owned alike.
    async fn list_active_templates(&self) -> Result<Vec<Template>>;

    /// Gets a template by its ID, active or not.
    async fn get_template(&self, id: Uuid) -> Result<Option<Template>>;

    /// Creates a new template.
    async fn create_template(&self, template: &Template) -> Result<()>;

    /// Updates an existing template.
    async fn update_template(&self, template: &Template) -> Result<()>;

    /// Deletes a template by its ID.
    async fn delete_template(&self, id: Uuid) -> Result<()>;
}
