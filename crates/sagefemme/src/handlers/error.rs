use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use sagefemme_core::storage::{
    repository_error_to_status_code, template_error_to_status_code, RepositoryError,
};
use sagefemme_core::template::TemplateError;

/// Request-level failures raised by the handlers themselves.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to parse form: {0}")]
    InvalidForm(String),
    #[error("A requesting practitioner is required")]
    Unauthenticated,
    #[error("System template {0} is read-only")]
    SystemTemplate(Uuid),
    #[error("Template {0} belongs to another practitioner")]
    NotOwner(Uuid),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::SystemTemplate(_) | ApiError::NotOwner(_) => StatusCode::FORBIDDEN,
        }
    }
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(api_error) = self.0.downcast_ref::<ApiError>() {
            return api_error.status_code();
        }

        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(template_error) = self.0.downcast_ref::<TemplateError>() {
            template_error_to_status_code(template_error)
        } else {
            500
        };

        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "API error");
        } else {
            tracing::warn!(status = %status_code, message = %self.0, "API error");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
