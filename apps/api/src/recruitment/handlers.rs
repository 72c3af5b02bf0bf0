//! Axum route handlers for recruitment: requests, candidates, the pipeline
//! board, interviewer availability and interviews.

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
use crate::models::recruitment::{
    AvailabilitySlotRow, CandidateRow, InterviewPatch, InterviewRow, NewAvailabilitySlot,
    NewCandidate, NewInterview, NewRecruitmentRequest, RecruitmentRequestPatch,
    RecruitmentRequestRow, StageUpdate,
};
use crate::recruitment::pipeline::{build_board, PipelineColumn, PipelineStage};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrFilter {
    pub rr_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Recruitment requests
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/recruitment-requests
pub async fn handle_list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecruitmentRequestRow>>, AppError> {
    Ok(Json(state.store.list_recruitment_requests().await?))
}

/// GET /api/recruitment-requests/:id
pub async fn handle_get_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<RecruitmentRequestRow>, AppError> {
    state
        .store
        .get_recruitment_request(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Recruitment request not found".to_string()))
}

/// POST /api/recruitment-requests
pub async fn handle_create_request(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewRecruitmentRequest>,
) -> Result<(StatusCode, Json<RecruitmentRequestRow>), AppError> {
    let created = state.store.create_recruitment_request(req).await?;
    info!(id = %created.id, title = %created.title, "recruitment request created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/recruitment-requests/:id
pub async fn handle_update_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<RecruitmentRequestPatch>,
) -> Result<Json<RecruitmentRequestRow>, AppError> {
    state
        .store
        .update_recruitment_request(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Recruitment request not found".to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/candidates?rrId=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<RrFilter>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    Ok(Json(state.store.list_candidates(filter.rr_id).await?))
}

/// GET /api/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    state
        .store
        .get_candidate(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))
}

/// POST /api/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewCandidate>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    let stage = match req.current_stage.as_deref() {
        Some(raw) => raw.parse::<PipelineStage>()?,
        None => PipelineStage::default(),
    };
    let created = state.store.create_candidate(req, stage).await?;
    info!(id = %created.id, stage = %created.current_stage, "candidate created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/candidates/:id/stage
///
/// Overwrites the stage unconditionally; any stage may follow any other.
pub async fn handle_update_stage(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(req): AppJson<StageUpdate>,
) -> Result<Json<CandidateRow>, AppError> {
    let stage: PipelineStage = req.stage.parse()?;
    let updated = state
        .store
        .update_candidate_stage(id, stage)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;
    info!(id = %id, stage = %stage, "candidate stage updated");
    Ok(Json(updated))
}

/// GET /api/pipeline?rrId=
pub async fn handle_pipeline_board(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<RrFilter>,
) -> Result<Json<Vec<PipelineColumn>>, AppError> {
    let candidates = state.store.list_candidates(filter.rr_id).await?;
    Ok(Json(build_board(candidates)))
}

// ────────────────────────────────────────────────────────────────────────────
// Availability slots
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/availability-slots?rrId=
pub async fn handle_list_slots(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<RrFilter>,
) -> Result<Json<Vec<AvailabilitySlotRow>>, AppError> {
    Ok(Json(state.store.list_availability_slots(filter.rr_id).await?))
}

/// POST /api/availability-slots
pub async fn handle_create_slot(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewAvailabilitySlot>,
) -> Result<(StatusCode, Json<AvailabilitySlotRow>), AppError> {
    let created = state.store.create_availability_slot(req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ────────────────────────────────────────────────────────────────────────────
// Interviews
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/interviews
pub async fn handle_list_interviews(
    State(state): State<AppState>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    Ok(Json(state.store.list_interviews().await?))
}

/// GET /api/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    state
        .store
        .get_interview(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))
}

/// POST /api/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewInterview>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    let created = state.store.create_interview(req).await?;
    info!(id = %created.id, "interview scheduled");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/interviews/:id
pub async fn handle_update_interview(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(patch): AppJson<InterviewPatch>,
) -> Result<Json<InterviewRow>, AppError> {
    state
        .store
        .update_interview(id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))
}
