use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::recruitment::pipeline::PipelineStage;

pub const DEFAULT_REQUEST_STATUS: &str = "open";
pub const DEFAULT_SLOT_STATUS: &str = "open";
pub const DEFAULT_INTERVIEW_STATUS: &str = "scheduled";
pub const DEFAULT_DURATION_MINUTES: i32 = 30;

// ────────────────────────────────────────────────────────────────────────────
// Recruitment requests
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentRequestRow {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: Option<String>,
    pub level: Option<String>,
    pub salary_range: Option<String>,
    pub jd_url: Option<String>,
    pub status: String,
    pub hiring_manager_id: Option<String>,
    pub agency_ids: Option<Json<Vec<String>>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecruitmentRequest {
    pub title: String,
    pub department: String,
    pub location: Option<String>,
    pub level: Option<String>,
    pub salary_range: Option<String>,
    pub jd_url: Option<String>,
    pub status: Option<String>,
    pub hiring_manager_id: Option<String>,
    pub agency_ids: Option<Vec<String>>,
}

impl NewRecruitmentRequest {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> RecruitmentRequestRow {
        RecruitmentRequestRow {
            id,
            title: self.title,
            department: self.department,
            location: self.location,
            level: self.level,
            salary_range: self.salary_range,
            jd_url: self.jd_url,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_REQUEST_STATUS.to_string()),
            hiring_manager_id: self.hiring_manager_id,
            agency_ids: self.agency_ids.map(Json),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruitmentRequestPatch {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub level: Option<String>,
    pub salary_range: Option<String>,
    pub jd_url: Option<String>,
    pub status: Option<String>,
    pub hiring_manager_id: Option<String>,
    pub agency_ids: Option<Vec<String>>,
}

impl RecruitmentRequestPatch {
    pub fn apply_to(self, row: &mut RecruitmentRequestRow) {
        if let Some(v) = self.title {
            row.title = v;
        }
        if let Some(v) = self.department {
            row.department = v;
        }
        if let Some(v) = self.location {
            row.location = Some(v);
        }
        if let Some(v) = self.level {
            row.level = Some(v);
        }
        if let Some(v) = self.salary_range {
            row.salary_range = Some(v);
        }
        if let Some(v) = self.jd_url {
            row.jd_url = Some(v);
        }
        if let Some(v) = self.status {
            row.status = v;
        }
        if let Some(v) = self.hiring_manager_id {
            row.hiring_manager_id = Some(v);
        }
        if let Some(v) = self.agency_ids {
            row.agency_ids = Some(Json(v));
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateNote {
    pub text: String,
    pub date: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRow {
    pub id: Uuid,
    pub rr_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub source: Option<String>,
    pub current_stage: PipelineStage,
    pub notes: Option<Json<Vec<CandidateNote>>>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/candidates`. The stage arrives as a raw string so that
/// an unknown value can be reported as a validation error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    pub rr_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub source: Option<String>,
    pub current_stage: Option<String>,
    pub notes: Option<Vec<CandidateNote>>,
}

impl NewCandidate {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>, stage: PipelineStage) -> CandidateRow {
        CandidateRow {
            id,
            rr_id: self.rr_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            resume_url: self.resume_url,
            source: self.source,
            current_stage: stage,
            notes: self.notes.map(Json),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageUpdate {
    pub stage: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Availability slots
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlotRow {
    pub id: Uuid,
    pub rr_id: Option<Uuid>,
    pub interviewer_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub mode: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAvailabilitySlot {
    pub rr_id: Option<Uuid>,
    pub interviewer_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub mode: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl NewAvailabilitySlot {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> AvailabilitySlotRow {
        AvailabilitySlotRow {
            id,
            rr_id: self.rr_id,
            interviewer_id: self.interviewer_id,
            start_time: self.start_time,
            duration_minutes: self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            mode: self.mode,
            location: self.location,
            status: self.status.unwrap_or_else(|| DEFAULT_SLOT_STATUS.to_string()),
            created_at: now,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interviews
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub rating: f64,
    pub notes: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRow {
    pub id: Uuid,
    pub candidate_id: Option<Uuid>,
    pub rr_id: Option<Uuid>,
    pub interviewer_id: Option<String>,
    pub availability_slot_id: Option<Uuid>,
    pub slot_time: Option<DateTime<Utc>>,
    pub duration_minutes: i32,
    pub mode: Option<String>,
    pub status: String,
    pub feedback: Option<Json<InterviewFeedback>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub candidate_id: Option<Uuid>,
    pub rr_id: Option<Uuid>,
    pub interviewer_id: Option<String>,
    pub availability_slot_id: Option<Uuid>,
    pub slot_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub feedback: Option<InterviewFeedback>,
}

impl NewInterview {
    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> InterviewRow {
        InterviewRow {
            id,
            candidate_id: self.candidate_id,
            rr_id: self.rr_id,
            interviewer_id: self.interviewer_id,
            availability_slot_id: self.availability_slot_id,
            slot_time: self.slot_time,
            duration_minutes: self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            mode: self.mode,
            status: self
                .status
                .unwrap_or_else(|| DEFAULT_INTERVIEW_STATUS.to_string()),
            feedback: self.feedback.map(Json),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPatch {
    pub candidate_id: Option<Uuid>,
    pub rr_id: Option<Uuid>,
    pub interviewer_id: Option<String>,
    pub availability_slot_id: Option<Uuid>,
    pub slot_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub mode: Option<String>,
    pub status: Option<String>,
    pub feedback: Option<InterviewFeedback>,
}

impl InterviewPatch {
    pub fn apply_to(self, row: &mut InterviewRow) {
        if let Some(v) = self.candidate_id {
            row.candidate_id = Some(v);
        }
        if let Some(v) = self.rr_id {
            row.rr_id = Some(v);
        }
        if let Some(v) = self.interviewer_id {
            row.interviewer_id = Some(v);
        }
        if let Some(v) = self.availability_slot_id {
            row.availability_slot_id = Some(v);
        }
        if let Some(v) = self.slot_time {
            row.slot_time = Some(v);
        }
        if let Some(v) = self.duration_minutes {
            row.duration_minutes = v;
        }
        if let Some(v) = self.mode {
            row.mode = Some(v);
        }
        if let Some(v) = self.status {
            row.status = v;
        }
        if let Some(v) = self.feedback {
            row.feedback = Some(Json(v));
        }
    }
}
