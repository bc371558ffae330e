use serde::Deserialize;
use uuid::Uuid;

use sagefemme_core::serde::{
    deserialize_clearable_string, deserialize_optional_bool, deserialize_optional_parsed,
    deserialize_optional_string,
};
use sagefemme_core::template::{Template, TemplatePriority, TemplateType};

/// Request payload for creating a user template.
///
/// Empty optional form fields are treated as absent.
#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub category: String,
    pub template_type: TemplateType,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub priority: Option<TemplatePriority>,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub version: Option<String>,
}

impl CreateTemplate {
    /// Converts the create request into a template owned by `owner_id`.
    pub fn into_template(self, owner_id: Uuid) -> Template {
        let mut template = Template::owned_by(
            owner_id,
            self.name.trim(),
            self.category.trim(),
            self.template_type,
            self.content,
        )
        .with_priority(self.priority.unwrap_or_default());
        template.description = self.description;
        template.source = self.source;
        template.version = self.version;
        template
    }
}

/// Request payload for a partial template update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplate {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub template_type: Option<TemplateType>,
    #[serde(default, deserialize_with = "deserialize_optional_parsed")]
    pub priority: Option<TemplatePriority>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub content: Option<String>,
    /// Absent leaves it unchanged, blank clears it.
    #[serde(default, deserialize_with = "deserialize_clearable_string")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_clearable_string")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_clearable_string")]
    pub version: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
}

impl UpdateTemplate {
    /// Applies the update to an existing template. Ownership is never changed.
    pub fn apply_to(self, template: &mut Template) {
        if let Some(name) = self.name {
            template.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            template.category = category.trim().to_string();
        }
        if let Some(template_type) = self.template_type {
            template.template_type = template_type;
        }
        if let Some(priority) = self.priority {
            template.priority = priority;
        }
        if let Some(content) = self.content {
            template.content = content;
        }
        if let Some(description) = self.description {
            template.description = description;
        }
        if let Some(source) = self.source {
            template.source = source;
        }
        if let Some(version) = self.version {
            template.version = version;
        }
        if let Some(is_active) = self.is_active {
            template.is_active = is_active;
        }
    }
}
