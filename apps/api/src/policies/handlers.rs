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
use crate::models::policy::{NewPolicy, NewPolicyAck, PolicyAckRow, PolicyPatch, PolicyRow};
use crate::state::AppState;

/// GET /api/policies
pub async fn handle_list_policies(
    State(state): State<AppState>,
) -> Result<Json<Vec<PolicyRow>>, AppError> {
    Ok(Json(state.store.list_policies().await?))
}

/// GET /api/policies/:id
pub async fn handle_get_policy(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<PolicyRow>, AppError> {
    state
        .store
        .get_policy(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Policy not found".to_string()))
}

/// POST /api/policies
pub async fn handle_create_policy(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewPolicy>,
) -> Result<(StatusCode, Json<PolicyRow>), AppError> {
    let created = state.store.create_policy(req).await?;
    info!(id = %created.id, title = %created.title, status = %created.status, "policy created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/policies/:id
pub async fn handle_update_policy(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<PolicyPatch>,
) -> Result<Json<PolicyRow>, AppError> {
    state
        .store
        .update_policy(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Policy not found".to_string()))
}

/// GET /api/policy-acks?employeeId=
pub async fn handle_list_acks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppQuery(filter): AppQuery<EmployeeFilter>,
) -> Result<Json<Vec<PolicyAckRow>>, AppError> {
    let employee_id = user.resolve_employee(filter.employee_id);
    Ok(Json(state.store.list_policy_acks(Some(employee_id.as_str())).await?))
}

/// POST /api/policy-acks
///
/// Every call inserts a row; repeated acknowledgments are not collapsed.
pub async fn handle_create_ack(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppJson(mut req): AppJson<NewPolicyAck>,
) -> Result<(StatusCode, Json<PolicyAckRow>), AppError> {
    let employee_id = user.resolve_employee(req.employee_id.take());
    let created = state.store.create_policy_ack(req, employee_id).await?;
    info!(policy_id = ?created.policy_id, employee_id = %created.employee_id, "policy acknowledged");
    Ok((StatusCode::CREATED, Json(created)))
}
