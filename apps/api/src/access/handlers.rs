//! Access passes and the audit trail.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::access::{AuditLogFilter, AuditLogRow, NewAuditLog, NewPass, PassRow};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub user_id: Option<String>,
}

/// GET /api/passes?userId=
pub async fn handle_list_passes(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<UserFilter>,
) -> Result<Json<Vec<PassRow>>, AppError> {
    Ok(Json(state.store.list_passes(filter.user_id.as_deref()).await?))
}

/// GET /api/passes/:id
pub async fn handle_get_pass(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PassRow>, AppError> {
    state
        .store
        .get_pass(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Pass not found".to_string()))
}

/// POST /api/passes
pub async fn handle_create_pass(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewPass>,
) -> Result<(StatusCode, Json<PassRow>), AppError> {
    if matches!(req.max_uses, Some(n) if n < 1) {
        return Err(AppError::Validation("maxUses must be at least 1".to_string()));
    }
    let created = state.store.create_pass(req).await?;
    info!(id = %created.id, user_id = %created.user_id, kind = %created.kind, "pass issued");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/audit-logs?entityType=&entityId=
pub async fn handle_list_audit_logs(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<AuditLogFilter>,
) -> Result<Json<Vec<AuditLogRow>>, AppError> {
    Ok(Json(state.store.list_audit_logs(filter).await?))
}

/// POST /api/audit-logs
pub async fn handle_create_audit_log(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewAuditLog>,
) -> Result<(StatusCode, Json<AuditLogRow>), AppError> {
    Ok((StatusCode::CREATED, Json(state.store.create_audit_log(req).await?)))
}
