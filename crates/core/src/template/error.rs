use thiserror::Error;

/// Errors that can occur when validating or parsing templates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template name cannot be empty")]
    EmptyName,
    #[error("Template name too long (max 200 characters)")]
    NameTooLong,
    #[error("Template category cannot be empty")]
    EmptyCategory,
    #[error("Template category too long (max 100 characters)")]
    CategoryTooLong,
    #[error("Template content cannot be empty")]
    EmptyContent,
    #[error("System templates cannot have an owner")]
    SystemTemplateWithOwner,
    #[error("User templates must have an owner")]
    MissingOwner,
    #[error("Unknown template type: {0}")]
    UnknownType(String),
    #[error("Unknown template priority: {0}")]
    UnknownPriority(String),
}
