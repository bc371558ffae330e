use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TemplateError;

/// What a template prescribes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// A medication prescription.
    Medication,
    /// A laboratory/biology work-up.
    LabBiology,
    /// An imaging request (ultrasound, X-ray, ...).
    Imaging,
    Other,
}

impl TemplateType {
    /// Returns the wire/storage name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Medication => "medication",
            TemplateType::LabBiology => "lab_biology",
            TemplateType::Imaging => "imaging",
            TemplateType::Other => "other",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medication" => Ok(TemplateType::Medication),
            "lab_biology" => Ok(TemplateType::LabBiology),
            "imaging" => Ok(TemplateType::Imaging),
            "other" => Ok(TemplateType::Other),
            _ => Err(TemplateError::UnknownType(s.to_string())),
        }
    }
}

/// How pressing the prescription is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatePriority {
    Urgent,
    #[default]
    Recommended,
    Optional,
}

impl TemplatePriority {
    /// Returns the wire/storage name of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplatePriority::Urgent => "urgent",
            TemplatePriority::Recommended => "recommended",
            TemplatePriority::Optional => "optional",
        }
    }
}

impl fmt::Display for TemplatePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplatePriority {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(TemplatePriority::Urgent),
            "recommended" => Ok(TemplatePriority::Recommended),
            "optional" => Ok(TemplatePriority::Optional),
            _ => Err(TemplateError::UnknownPriority(s.to_string())),
        }
    }
}

/// A reusable prescription or document pattern.
///
/// System templates (`is_system`) are shared by every practitioner and have
/// no owner. User templates belong to exactly one practitioner and are only
/// visible to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub template_type: TemplateType,
    pub priority: TemplatePriority,
    /// Free-text body inserted into the generated document.
    pub content: String,
    pub description: Option<String>,
    /// Literature or guideline the content comes from.
    pub source: Option<String>,
    pub version: Option<String>,
    pub is_active: bool,
    pub is_system: bool,
    pub owner_id: Option<Uuid>,
}

impl Template {
    /// Creates a new active system template.
    pub fn system(
        name: impl Into<String>,
        category: impl Into<String>,
        template_type: TemplateType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            template_type,
            priority: TemplatePriority::default(),
            content: content.into(),
            description: None,
            source: None,
            version: None,
            is_active: true,
            is_system: true,
            owner_id: None,
        }
    }

    /// Creates a new active template owned by `owner_id`.
    pub fn owned_by(
        owner_id: Uuid,
        name: impl Into<String>,
        category: impl Into<String>,
        template_type: TemplateType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            is_system: false,
            owner_id: Some(owner_id),
            ..Self::system(name, category, template_type, content)
        }
    }

    /// Sets the priority for this template.
    pub fn with_priority(mut self, priority: TemplatePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the description for this template.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the source and version metadata for this template.
    pub fn with_source(mut self, source: impl Into<String>, version: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self.version = Some(version.into());
        self
    }

    /// Marks this template as inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Sets a specific ID for this template (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns true if `requester` may see this template.
    ///
    /// Without a requester only system templates are visible.
    pub fn is_visible_to(&self, requester: Option<Uuid>) -> bool {
        self.is_system || (requester.is_some() && self.owner_id == requester)
    }

    /// Returns true if `user_id` owns this template and may modify it.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        !self.is_system && self.owner_id == Some(user_id)
    }
}
