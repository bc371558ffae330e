mod error;
mod operations;
mod seed;
mod types;

pub use error::TemplateError;
pub use operations::{
    filter_by_category, filter_by_type, find_by_id, find_by_name, search_templates,
    validate_template, visible_templates,
};
pub use seed::generate_system_templates;
pub use types::{Template, TemplatePriority, TemplateType};
