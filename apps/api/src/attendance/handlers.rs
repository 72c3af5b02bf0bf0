use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use chrono::{Local, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::attendance::clock::{check_clock_in, clock_out_patch, total_hours};
use crate::auth::{CurrentUser, EmployeeFilter};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery, OptionalJson};
use crate::models::attendance::{AttendanceLogPatch, AttendanceLogRow, NewAttendanceLog};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockRequest {
    pub employee_id: Option<String>,
}

/// GET /api/attendance?employeeId=
pub async fn handle_list_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    AppQuery(filter): AppQuery<EmployeeFilter>,
) -> Result<Json<Vec<AttendanceLogRow>>, AppError> {
    let employee_id = user.resolve_employee(filter.employee_id);
    Ok(Json(
        state.store.list_attendance_logs(Some(employee_id.as_str())).await?,
    ))
}

/// GET /api/attendance/:id
pub async fn handle_get_attendance(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<AttendanceLogRow>, AppError> {
    state
        .store
        .get_attendance_log(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Attendance log not found".to_string()))
}

/// POST /api/attendance
///
/// Manual entry. Hours are filled in when both times are given without them.
pub async fn handle_create_attendance(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<NewAttendanceLog>,
) -> Result<(StatusCode, Json<AttendanceLogRow>), AppError> {
    if let (Some(time_in), Some(time_out), None) = (req.time_in, req.time_out, req.total_hours) {
        req.total_hours = Some(total_hours(time_in, time_out));
    }
    let created = state.store.create_attendance_log(req).await?;
    info!(
        id = %created.id,
        employee_id = %created.employee_id,
        date = %created.date,
        "attendance recorded"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/attendance/:id
pub async fn handle_update_attendance(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<AttendanceLogPatch>,
) -> Result<Json<AttendanceLogRow>, AppError> {
    state
        .store
        .update_attendance_log(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Attendance log not found".to_string()))
}

/// POST /api/attendance/clock-in
///
/// The body is optional; without one the caller is clocked in.
pub async fn handle_clock_in(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OptionalJson(body): OptionalJson<ClockRequest>,
) -> Result<(StatusCode, Json<AttendanceLogRow>), AppError> {
    let employee_id = user.resolve_employee(body.and_then(|b| b.employee_id));
    let today = Local::now().date_naive();

    let existing = state
        .store
        .find_attendance_by_date(&employee_id, today)
        .await?;
    check_clock_in(existing.as_ref())?;

    let created = state
        .store
        .create_attendance_log(NewAttendanceLog::clock_in(employee_id, today, Utc::now()))
        .await?;
    info!(employee_id = %created.employee_id, date = %today, "clocked in");
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/attendance/clock-out
pub async fn handle_clock_out(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    OptionalJson(body): OptionalJson<ClockRequest>,
) -> Result<Json<AttendanceLogRow>, AppError> {
    let employee_id = user.resolve_employee(body.and_then(|b| b.employee_id));
    let today = Local::now().date_naive();

    let existing = state
        .store
        .find_attendance_by_date(&employee_id, today)
        .await?;
    let (id, patch) = clock_out_patch(existing.as_ref(), Utc::now())?;
    let total = patch.total_hours;

    let updated = state
        .store
        .update_attendance_log(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Attendance log not found".to_string()))?;
    info!(employee_id = %employee_id, date = %today, total_hours = ?total, "clocked out");
    Ok(Json(updated))
}
