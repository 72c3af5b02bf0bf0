use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::template::{NewTemplate, TemplateRow};
use crate::state::AppState;

/// GET /api/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    Ok(Json(state.store.list_templates().await?))
}

/// GET /api/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<TemplateRow>, AppError> {
    state
        .store
        .get_template(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
}

/// POST /api/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewTemplate>,
) -> Result<(StatusCode, Json<TemplateRow>), AppError> {
    Ok((StatusCode::CREATED, Json(state.store.create_template(req).await?)))
}
