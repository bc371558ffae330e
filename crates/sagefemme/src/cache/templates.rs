//! Read-through template cache with TTL and stale-data fallback.
//!
//! Holds a single snapshot of every active template. Each load serves the
//! snapshot while it is fresh, refetches it from storage once it is stale or
//! missing, and falls back to whatever it still holds when storage fails.
//! Storage errors never reach callers: template lists are reference data and
//! a stale list beats an error page.
//!
//! Locks are never held across the storage call. Two loads racing on a stale
//! snapshot may both fetch; the last one to finish wins. An `invalidate()`
//! issued while a fetch is in flight can be overwritten by that fetch.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use sagefemme_core::cache::{cache_status, CacheStatus, LoadSource, TemplateSnapshot};
use sagefemme_core::storage::TemplateRepository;
use sagefemme_core::template::{
    filter_by_category, filter_by_type, find_by_id, find_by_name, search_templates,
    visible_templates, Template, TemplateType,
};

/// Default time-to-live for the template snapshot.
pub const DEFAULT_TEMPLATE_TTL: Duration = Duration::from_secs(300);

/// Process-wide cache of active templates, shared through `AppState`.
pub struct TemplateCache {
    repository: Arc<dyn TemplateRepository>,
    ttl: Duration,
    snapshot: RwLock<Option<Arc<TemplateSnapshot>>>,
}

impl TemplateCache {
    /// Creates an empty cache reading from `repository`.
    ///
    /// # Arguments
    ///
    /// * `repository` - The backing store; must not be a decorator that reads through this cache
    /// * `ttl` - How long a fetched snapshot is served without refetching
    pub fn new(repository: Arc<dyn TemplateRepository>, ttl: Duration) -> Self {
        Self {
            repository,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the active templates visible to `requester`.
    ///
    /// `None` means system context: only system templates are returned.
    /// Never fails; an unreachable store yields stale data or an empty list.
    pub async fn load(&self, requester: Option<Uuid>) -> Vec<Template> {
        let (snapshot, source) = self.current_snapshot().await;
        let templates = snapshot
            .map(|s| visible_templates(&s.templates, requester))
            .unwrap_or_default();

        tracing::trace!(
            source = ?source,
            requester = ?requester,
            visible_count = templates.len(),
            "Templates loaded"
        );
        templates
    }

    /// Clears the snapshot so the next load refetches from storage.
    pub async fn invalidate(&self) {
        let previous = self.snapshot.write().await.take();
        tracing::debug!(
            had_snapshot = previous.is_some(),
            "Template cache invalidated"
        );
    }

    /// Finds the first visible template named exactly `name`.
    pub async fn find_by_name(&self, name: &str, requester: Option<Uuid>) -> Option<Template> {
        let templates = self.load(requester).await;
        find_by_name(&templates, name).cloned()
    }

    /// Finds a visible template by ID.
    pub async fn find_by_id(&self, id: Uuid, requester: Option<Uuid>) -> Option<Template> {
        let templates = self.load(requester).await;
        find_by_id(&templates, id).cloned()
    }

    /// Returns visible templates whose category matches, ignoring case.
    pub async fn find_by_category(
        &self,
        category: &str,
        requester: Option<Uuid>,
    ) -> Vec<Template> {
        let templates = self.load(requester).await;
        filter_by_category(&templates, category)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns visible templates of the given type.
    pub async fn find_by_type(
        &self,
        template_type: TemplateType,
        requester: Option<Uuid>,
    ) -> Vec<Template> {
        let templates = self.load(requester).await;
        filter_by_type(&templates, template_type)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Case-insensitive keyword search over name, description and category.
    pub async fn search(&self, keyword: &str, requester: Option<Uuid>) -> Vec<Template> {
        let templates = self.load(requester).await;
        search_templates(&templates, keyword)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Describes the current snapshot without fetching.
    pub async fn status(&self) -> CacheStatus {
        let snapshot = self.snapshot.read().await.clone();
        cache_status(snapshot.as_ref(), Utc::now(), self.ttl)
    }

    /// Returns a fresh snapshot, refetching or falling back as needed.
    async fn current_snapshot(&self) -> (Option<Arc<TemplateSnapshot>>, LoadSource) {
        let cached = self.snapshot.read().await.clone();

        if let Some(snapshot) = cached.as_ref() {
            if snapshot.is_fresh(Utc::now(), self.ttl) {
                tracing::trace!(
                    template_count = snapshot.templates.len(),
                    "Template cache hit"
                );
                return (cached, LoadSource::Cached);
            }
        }

        match self.repository.list_active_templates().await {
            Ok(templates) => {
                let snapshot = Arc::new(TemplateSnapshot::new(templates, Utc::now()));
                *self.snapshot.write().await = Some(snapshot.clone());
                tracing::debug!(
                    template_count = snapshot.templates.len(),
                    "Template cache refreshed"
                );
                (Some(snapshot), LoadSource::Refreshed)
            }
            Err(err) => {
                // Re-read: another load may have refreshed, or an invalidation cleared it.
                let fallback = self.snapshot.read().await.clone();
                match fallback {
                    Some(stale) => {
                        tracing::warn!(
                            error = %err,
                            age_seconds = stale.age(Utc::now()).as_secs(),
                            "Template refresh failed, serving stale templates"
                        );
                        (Some(stale), LoadSource::Stale)
                    }
                    None => {
                        tracing::warn!(
                            error = %err,
                            "Template refresh failed with nothing cached, serving no templates"
                        );
                        (None, LoadSource::Empty)
                    }
                }
            }
        }
    }
}
