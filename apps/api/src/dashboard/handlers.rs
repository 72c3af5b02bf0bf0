use axum::{extract::State, Json};
use chrono::Local;

use crate::dashboard::summary::{summarize, DashboardSummary};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let candidates = state.store.list_candidates(None).await?;
    let requests = state.store.list_recruitment_requests().await?;
    let attendance = state.store.list_attendance_logs(None).await?;
    let policies = state.store.list_policies().await?;

    Ok(Json(summarize(
        candidates,
        requests,
        &attendance,
        &policies,
        Local::now().date_naive(),
    )))
}
