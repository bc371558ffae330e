//! Pure lookup and validation functions over template lists.
//!
//! The cache holds one unfiltered snapshot shared by every requester, so
//! visibility is applied here on each call rather than stored per user.

use uuid::Uuid;

use super::error::TemplateError;
use super::types::{Template, TemplateType};

/// Returns the active templates visible to `requester`, in snapshot order.
pub fn visible_templates(templates: &[Template], requester: Option<Uuid>) -> Vec<Template> {
    templates
        .iter()
        .filter(|t| t.is_active && t.is_visible_to(requester))
        .cloned()
        .collect()
}

/// Finds the first template whose name matches exactly.
pub fn find_by_name<'a>(templates: &'a [Template], name: &str) -> Option<&'a Template> {
    templates.iter().find(|t| t.name == name)
}

/// Finds a template by ID.
pub fn find_by_id(templates: &[Template], id: Uuid) -> Option<&Template> {
    templates.iter().find(|t| t.id == id)
}

/// Filters templates whose category equals `category`, ignoring case.
pub fn filter_by_category<'a>(templates: &'a [Template], category: &str) -> Vec<&'a Template> {
    let wanted = category.to_lowercase();
    templates
        .iter()
        .filter(|t| t.category.to_lowercase() == wanted)
        .collect()
}

/// Filters templates of the given type.
pub fn filter_by_type(templates: &[Template], template_type: TemplateType) -> Vec<&Template> {
    templates
        .iter()
        .filter(|t| t.template_type == template_type)
        .collect()
}

/// Case-insensitive substring search over name, description and category.
pub fn search_templates<'a>(templates: &'a [Template], keyword: &str) -> Vec<&'a Template> {
    let needle = keyword.to_lowercase();
    templates
        .iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
                || t
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Validates a template before creation or update.
pub fn validate_template(template: &Template) -> Result<(), TemplateError> {
    if template.name.trim().is_empty() {
        return Err(TemplateError::EmptyName);
    }
    if template.name.chars().count() > 200 {
        return Err(TemplateError::NameTooLong);
    }
    if template.category.trim().is_empty() {
        return Err(TemplateError::EmptyCategory);
    }
    if template.category.chars().count() > 100 {
        return Err(TemplateError::CategoryTooLong);
    }
    if template.content.trim().is_empty() {
        return Err(TemplateError::EmptyContent);
    }

    match (template.is_system, template.owner_id) {
        (true, Some(_)) => Err(TemplateError::SystemTemplateWithOwner),
        (false, None) => Err(TemplateError::MissingOwner),
        _ => Ok(()),
    }
}
