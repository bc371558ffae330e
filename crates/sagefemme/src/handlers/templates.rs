//! Template handlers.
//!
//! Reads are served by the template cache with the requester's visibility
//! applied. Writes go through the repository decorator, which invalidates
//! the cache once the write succeeds.

use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use sagefemme_core::serde::{deserialize_optional_parsed, deserialize_optional_string};
use sagefemme_core::storage::RepositoryError;
use sagefemme_core::template::{validate_template, Template, TemplateType};

use crate::{
    context::RequestContext,
    handlers::{error::ApiError, AppError},
    models::{CreateTemplate, UpdateTemplate},
    state::AppState,
};

/// Query parameters for listing templates.
///
/// Filters are exclusive: `q` wins over `type`, which wins over `category`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTemplatesQuery {
    /// Keyword searched in name, description and category
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub q: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "deserialize_optional_parsed"
    )]
    pub template_type: Option<TemplateType>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

/// List visible templates (GET /api/templates).
pub async fn list_templates(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ListTemplatesQuery>,
) -> Json<Vec<Template>> {
    let cache = &state.templates;
    let requester = ctx.requester;

    let templates = if let Some(keyword) = query.q {
        cache.search(&keyword, requester).await
    } else if let Some(template_type) = query.template_type {
        cache.find_by_type(template_type, requester).await
    } else if let Some(category) = query.category {
        cache.find_by_category(&category, requester).await
    } else {
        cache.load(requester).await
    };

    tracing::debug!(
        request_id = %ctx.request_id,
        template_count = templates.len(),
        "Listed templates"
    );

    Json(templates)
}

/// Get a visible template by exact name (GET /api/templates/by-name/{name}).
pub async fn get_template_by_name(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(name): Path<String>,
) -> Result<Json<Template>, StatusCode> {
    state
        .templates
        .find_by_name(&name, ctx.requester)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Get a visible template by ID (GET /api/templates/{id}).
pub async fn get_template(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, StatusCode> {
    state
        .templates
        .find_by_id(id, ctx.requester)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Create a user template owned by the requester (POST /api/templates).
pub async fn create_template(
    State(state): State<AppState>,
    ctx: RequestContext,
    form_result: Result<Form<CreateTemplate>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = ctx.requester.ok_or(ApiError::Unauthenticated)?;
    let Form(payload) = form_result.map_err(|e| ApiError::InvalidForm(e.to_string()))?;

    let template = payload.into_template(owner_id);
    validate_template(&template)?;

    state.template_repo.create_template(&template).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        template_id = %template.id,
        name = %template.name,
        "Created new template"
    );

    Ok((StatusCode::CREATED, Json(template)))
}

/// Partially update a template (PUT /api/templates/{id}).
pub async fn update_template(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    form_result: Result<Form<UpdateTemplate>, FormRejection>,
) -> Result<Json<Template>, AppError> {
    let requester = ctx.requester.ok_or(ApiError::Unauthenticated)?;
    let Form(payload) = form_result.map_err(|e| ApiError::InvalidForm(e.to_string()))?;

    let mut template = load_owned_template(&state, id, requester).await?;
    payload.apply_to(&mut template);
    validate_template(&template)?;

    state.template_repo.update_template(&template).await?;

    tracing::info!(request_id = %ctx.request_id, template_id = %id, "Updated template");

    Ok(Json(template))
}

/// Delete a template (DELETE /api/templates/{id}).
pub async fn delete_template(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let requester = ctx.requester.ok_or(ApiError::Unauthenticated)?;

    load_owned_template(&state, id, requester).await?;
    state.template_repo.delete_template(id).await?;

    tracing::info!(request_id = %ctx.request_id, template_id = %id, "Deleted template");

    Ok(StatusCode::OK)
}

/// Drop the cached templates so the next read refetches (POST /api/templates/refresh).
pub async fn refresh_templates(State(state): State<AppState>, ctx: RequestContext) -> StatusCode {
    state.templates.invalidate().await;

    tracing::info!(request_id = %ctx.request_id, "Template cache refresh requested");

    StatusCode::NO_CONTENT
}

/// Fetches a template from storage and checks the requester may modify it.
///
/// Reads storage rather than the cache so inactive templates can be
/// reactivated by their owner.
async fn load_owned_template(
    state: &AppState,
    id: Uuid,
    requester: Uuid,
) -> Result<Template, AppError> {
    let template = state
        .template_repo
        .get_template(id)
        .await?
        .ok_or_else(|| RepositoryError::template_not_found(id))?;

    if template.is_system {
        return Err(ApiError::SystemTemplate(id).into());
    }
    if !template.is_owned_by(requester) {
        return Err(ApiError::NotOwner(id).into());
    }

    Ok(template)
}
