//! Cached repository decorators.
//!
//! Writes go through the decorator, which persists to the underlying
//! repository and then invalidates the template cache. Reads are passed
//! through untouched; cached reads go through `TemplateCache` directly.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo: Arc<dyn TemplateRepository> = Arc::new(SqliteRepository::new("db.sqlite").await?);
//! let cache = Arc::new(TemplateCache::new(repo.clone(), Duration::from_secs(300)));
//!
//! let cached_repo = CachedTemplateRepository::new(repo, cache);
//! ```

mod template;

pub use template::CachedTemplateRepository;
