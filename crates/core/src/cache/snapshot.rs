//! The cached template snapshot and its freshness rules.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::template::Template;

/// An immutable copy of the active template list as fetched from storage.
///
/// Snapshots are replaced wholesale on refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSnapshot {
    /// Templates in storage order; the order carries no meaning.
    pub templates: Vec<Template>,
    /// Wall-clock time at which the templates were fetched.
    pub fetched_at: DateTime<Utc>,
}

impl TemplateSnapshot {
    /// Creates a snapshot fetched at `fetched_at`.
    pub fn new(templates: Vec<Template>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            templates,
            fetched_at,
        }
    }

    /// Returns how old this snapshot is at `now`.
    ///
    /// A `fetched_at` in the future (wall clock stepped back) counts as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns true if the snapshot is younger than `ttl` at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) < ttl
    }
}

/// Where the templates returned by a load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A fresh snapshot was already cached.
    Cached,
    /// Storage was queried and the snapshot replaced.
    Refreshed,
    /// Storage failed and a stale snapshot was served.
    Stale,
    /// Storage failed and there was nothing to fall back to.
    Empty,
}

/// Observable state of the template cache, reported by health probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub populated: bool,
    pub fresh: bool,
    pub template_count: usize,
    /// Age of the current snapshot in whole seconds.
    pub age_seconds: Option<u64>,
    pub ttl_seconds: u64,
}

/// Describes the cache state at `now` without touching storage.
pub fn cache_status(
    snapshot: Option<&Arc<TemplateSnapshot>>,
    now: DateTime<Utc>,
    ttl: Duration,
) -> CacheStatus {
    match snapshot {
        Some(s) => CacheStatus {
            populated: true,
            fresh: s.is_fresh(now, ttl),
            template_count: s.templates.len(),
            age_seconds: Some(s.age(now).as_secs()),
            ttl_seconds: ttl.as_secs(),
        },
        None => CacheStatus {
            populated: false,
            fresh: false,
            template_count: 0,
            age_seconds: None,
            ttl_seconds: ttl.as_secs(),
        },
    }
}
