mod snapshot;

pub use snapshot::{cache_status, CacheStatus, LoadSource, TemplateSnapshot};
