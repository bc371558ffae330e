//! Cached template repository decorator.
//!
//! Wraps a `TemplateRepository` so that every successful write clears the
//! shared `TemplateCache`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use sagefemme_core::storage::{Result, TemplateRepository};
use sagefemme_core::template::Template;

use crate::cache::TemplateCache;

/// Template repository decorator that invalidates the template cache.
///
/// - **Reads**: Go straight to the underlying repository
/// - **Writes**: Persist to repository, then invalidate the cache
///
/// A failed write leaves the cache untouched.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
pub struct CachedTemplateRepository<R>
where
    R: TemplateRepository + ?Sized,
{
    repository: Arc<R>,
    cache: Arc<TemplateCache>,
}

impl<R> CachedTemplateRepository<R>
where
    R: TemplateRepository + ?Sized,
{
    /// Creates a new cached template repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository that performs writes
    /// * `cache` - The template cache to invalidate after each write
    pub fn new(repository: Arc<R>, cache: Arc<TemplateCache>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl<R> TemplateRepository for CachedTemplateRepository<R>
where
    R: TemplateRepository + ?Sized + 'static,
{
    async fn list_active_templates(&self) -> Result<Vec<Template>> {
        self.repository.list_active_templates().await
    }

    async fn get_template(&self, id: Uuid) -> Result<Option<Template>> {
        self.repository.get_template(id).await
    }

    async fn create_template(&self, template: &Template) -> Result<()> {
        self.repository.create_template(template).await?;
        self.cache.invalidate().await;

        tracing::debug!(template_id = %template.id, name = %template.name, "Template created");
        Ok(())
    }

    async fn update_template(&self, template: &Template) -> Result<()> {
        self.repository.update_template(template).await?;
        self.cache.invalidate().await;

        tracing::debug!(template_id = %template.id, name = %template.name, "Template updated");
        Ok(())
    }

    async fn delete_template(&self, id: Uuid) -> Result<()> {
        self.repository.delete_template(id).await?;
        self.cache.invalidate().await;

        tracing::debug!(template_id = %id, "Template deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use sagefemme_core::storage::RepositoryError;
    use sagefemme_core::template::TemplateType;
    use tokio::sync::RwLock;

    // Mock repository that tracks list calls and rejects unknown IDs on write
    struct MockTemplateRepository {
        templates: RwLock<Vec<Template>>,
        list_calls: AtomicUsize,
    }

    impl MockTemplateRepository {
        fn new() -> Self {
            Self {
                templates: RwLock::new(Vec::new()),
                list_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TemplateRepository for MockTemplateRepository {
        async fn list_active_templates(&self) -> Result<Vec<Template>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.templates.read().await.clone())
        }

        async fn get_template(&self, id: Uuid) -> Result<Option<Template>> {
            Ok(self
                .templates
                .read()
                .await
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn create_template(&self, template: &Template) -> Result<()> {
            self.templates.write().await.push(template.clone());
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
            let before = templates.len();
            templates.retain(|t| t.id != id);
            if templates.len() == before {
                return Err(RepositoryError::template_not_found(id));
            }
            Ok(())
        }
    }

    fn setup() -> (
        Arc<MockTemplateRepository>,
        Arc<TemplateCache>,
        CachedTemplateRepository<MockTemplateRepository>,
    ) {
        let repo = Arc::new(MockTemplateRepository::new());
        let cache = Arc::new(TemplateCache::new(repo.clone(), Duration::from_secs(300)));
        let cached = CachedTemplateRepository::new(repo.clone(), cache.clone());
        (repo, cache, cached)
    }

    fn create_test_template(name: &str) -> Template {
        Template::system(name, "Infections", TemplateType::Medication, "content")
    }

    #[tokio::test]
    async fn test_create_template_invalidates_cache() {
        let (repo, cache, cached) = setup();

        assert!(cache.load(None).await.is_empty());
        assert_eq!(repo.calls(), 1);

        cached
            .create_template(&create_test_template("Mycose Vaginale"))
            .await
            .unwrap();

        // Next read refetches and sees the new template
        let names: Vec<String> = cache.load(None).await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Mycose Vaginale"]);
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_update_template_invalidates_cache() {
        let (repo, cache, cached) = setup();
        let mut template = create_test_template("A");
        repo.create_template(&template).await.unwrap();
        cache.load(None).await;

        template.name = "B".to_string();
        cached.update_template(&template).await.unwrap();

        assert!(cache.find_by_name("B", None).await.is_some());
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_delete_template_invalidates_cache() {
        let (repo, cache, cached) = setup();
        let template = create_test_template("A");
        repo.create_template(&template).await.unwrap();
        assert_eq!(cache.load(None).await.len(), 1);

        cached.delete_template(template.id).await.unwrap();

        assert!(cache.load(None).await.is_empty());
        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cache() {
        let (repo, cache, cached) = setup();
        cache.load(None).await;

        let result = cached.update_template(&create_test_template("Ghost")).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
        assert!(cache.status().await.populated);
        cache.load(None).await;
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_reads_delegate_without_touching_cache() {
        let (repo, cache, cached) = setup();
        let template = create_test_template("A");
        repo.create_template(&template).await.unwrap();

        assert_eq!(cached.get_template(template.id).await.unwrap(), Some(template));
        assert_eq!(cached.list_active_templates().await.unwrap().len(), 1);
        assert!(!cache.status().await.populated);
    }
}
