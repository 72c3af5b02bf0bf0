use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::{CurrentUser, EmployeeFilter};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::ess::{EssRequestPatch, EssRequestRow, NewEssRequest};
use crate::state::AppState;

/// GET /api/ess?employeeId=
pub async fn handle_list_ess(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppQuery(filter): AppQuery<EmployeeFilter>,
) -> Result<Json<Vec<EssRequestRow>>, AppError> {
    let employee_id = user.resolve_employee(filter.employee_id);
    Ok(Json(state.store.list_ess_requests(Some(employee_id.as_str())).await?))
}

/// POST /api/ess
pub async fn handle_create_ess(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(mut req): AppJson<NewEssRequest>,
) -> Result<(StatusCode, Json<EssRequestRow>), AppError> {
    if req.kind.trim().is_empty() {
        return Err(AppError::Validation("Request type is required".to_string()));
    }
    let employee_id = user.resolve_employee(req.employee_id.take());
    let created = state.store.create_ess_request(req, employee_id).await?;
    info!(id = %created.id, kind = %created.kind, employee_id = %created.employee_id, "ESS request submitted");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/ess/:id
pub async fn handle_update_ess(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<EssRequestPatch>,
) -> Result<Json<EssRequestRow>, AppError> {
    state
        .store
        .update_ess_request(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("ESS request not found".to_string()))
}
