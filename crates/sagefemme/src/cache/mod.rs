//! In-process caches.
//!
//! The template cache keeps one snapshot of every active template and
//! answers all template lookups from it. Pure snapshot logic lives in
//! `sagefemme_core::cache`; this module owns the lock and the storage call.

mod templates;

pub use templates::{TemplateCache, DEFAULT_TEMPLATE_TTL};
