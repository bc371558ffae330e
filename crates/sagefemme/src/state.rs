//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Reads go through the template cache; writes go through
//! a repository decorator that invalidates that cache.

use std::sync::Arc;
use std::time::Duration;

use sagefemme_core::storage::TemplateRepository;
use sagefemme_core::template::generate_system_templates;

use crate::cache::TemplateCache;
use crate::config::Config;
use crate::storage::CachedTemplateRepository;

/// Shared application state.
///
/// This is cloned for each request handler; every field is reference counted
/// so all clones share one cache.
#[derive(Clone)]
pub struct AppState {
    /// Template cache serving every template lookup.
    pub templates: Arc<TemplateCache>,
    /// Template repository for writes (invalidates `templates` on success).
    pub template_repo: Arc<dyn TemplateRepository>,
}

impl AppState {
    /// Creates a new AppState over the given storage backend.
    ///
    /// The cache reads from `repository` directly. Handlers write through a
    /// decorator around the same repository.
    pub fn build(repository: Arc<dyn TemplateRepository>, ttl: Duration) -> Self {
        let templates = Arc::new(TemplateCache::new(repository.clone(), ttl));
        let template_repo = Arc::new(CachedTemplateRepository::new(
            repository,
            templates.clone(),
        ));

        Self {
            templates,
            template_repo,
        }
    }

    /// Inserts the built-in system templates when the store has no active templates.
    ///
    /// Returns the number of templates inserted.
    pub async fn seed_if_empty(&self) -> anyhow::Result<usize> {
        let existing = self.template_repo.list_active_templates().await?;
        if !existing.is_empty() {
            tracing::debug!(
                template_count = existing.len(),
                "Templates already present, skipping seed"
            );
            return Ok(0);
        }

        let templates = generate_system_templates();
        for template in &templates {
            self.template_repo.create_template(template).await?;
        }

        tracing::info!(template_count = templates.len(), "Seeded system templates");
        Ok(templates.len())
    }
}

// ============================================================================
// Factory functions for different storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Opened SQLite template store");

            Ok(Self::build(sqlite_repo, config.cache_ttl()))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for demos without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());
            tracing::warn!("Using in-memory template store, data is lost on shutdown");

            Ok(Self::build(inmemory_repo, config.cache_ttl()))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
