//! Persistence seam. Every operation is a single create/read/update against
//! one table; updates return `None` when the id does not exist.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::access::{AuditLogFilter, AuditLogRow, NewAuditLog, NewPass, PassRow};
use crate::models::attendance::{AttendanceLogPatch, AttendanceLogRow, NewAttendanceLog};
use crate::models::ess::{EssRequestPatch, EssRequestRow, NewEssRequest};
use crate::models::policy::{NewPolicy, NewPolicyAck, PolicyAckRow, PolicyPatch, PolicyRow};
use crate::models::recruitment::{
    AvailabilitySlotRow, CandidateRow, InterviewPatch, InterviewRow, NewAvailabilitySlot,
    NewCandidate, NewInterview, NewRecruitmentRequest, RecruitmentRequestPatch,
    RecruitmentRequestRow,
};
use crate::models::template::{NewTemplate, TemplateRow};
use crate::recruitment::pipeline::PipelineStage;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    // Recruitment requests (newest first)
    async fn list_recruitment_requests(&self) -> StoreResult<Vec<RecruitmentRequestRow>>;
    async fn get_recruitment_request(&self, id: Uuid)
        -> StoreResult<Option<RecruitmentRequestRow>>;
    async fn create_recruitment_request(
        &self,
        new: NewRecruitmentRequest,
    ) -> StoreResult<RecruitmentRequestRow>;
    async fn update_recruitment_request(
        &self,
        id: Uuid,
        patch: RecruitmentRequestPatch,
    ) -> StoreResult<Option<RecruitmentRequestRow>>;

    // Candidates (newest first)
    async fn list_candidates(&self, rr_id: Option<Uuid>) -> StoreResult<Vec<CandidateRow>>;
    async fn get_candidate(&self, id: Uuid) -> StoreResult<Option<CandidateRow>>;
    async fn create_candidate(
        &self,
        new: NewCandidate,
        stage: PipelineStage,
    ) -> StoreResult<CandidateRow>;
    async fn update_candidate_stage(
        &self,
        id: Uuid,
        stage: PipelineStage,
    ) -> StoreResult<Option<CandidateRow>>;

    // Availability slots (earliest start first)
    async fn list_availability_slots(
        &self,
        rr_id: Option<Uuid>,
    ) -> StoreResult<Vec<AvailabilitySlotRow>>;
    async fn create_availability_slot(
        &self,
        new: NewAvailabilitySlot,
    ) -> StoreResult<AvailabilitySlotRow>;

    // Interviews (latest slot first, unscheduled last)
    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>>;
    async fn get_interview(&self, id: Uuid) -> StoreResult<Option<InterviewRow>>;
    async fn create_interview(&self, new: NewInterview) -> StoreResult<InterviewRow>;
    async fn update_interview(
        &self,
        id: Uuid,
        patch: InterviewPatch,
    ) -> StoreResult<Option<InterviewRow>>;

    // Attendance (latest date first)
    async fn list_attendance_logs(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<AttendanceLogRow>>;
    async fn get_attendance_log(&self, id: Uuid) -> StoreResult<Option<AttendanceLogRow>>;
    async fn find_attendance_by_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceLogRow>>;
    async fn create_attendance_log(&self, new: NewAttendanceLog) -> StoreResult<AttendanceLogRow>;
    async fn update_attendance_log(
        &self,
        id: Uuid,
        patch: AttendanceLogPatch,
    ) -> StoreResult<Option<AttendanceLogRow>>;

    // ESS requests (newest first)
    async fn list_ess_requests(&self, employee_id: Option<&str>)
        -> StoreResult<Vec<EssRequestRow>>;
    async fn create_ess_request(
        &self,
        new: NewEssRequest,
        employee_id: String,
    ) -> StoreResult<EssRequestRow>;
    async fn update_ess_request(
        &self,
        id: Uuid,
        patch: EssRequestPatch,
    ) -> StoreResult<Option<EssRequestRow>>;

    // Policies (newest first)
    async fn list_policies(&self) -> StoreResult<Vec<PolicyRow>>;
    async fn get_policy(&self, id: Uuid) -> StoreResult<Option<PolicyRow>>;
    async fn create_policy(&self, new: NewPolicy) -> StoreResult<PolicyRow>;
    async fn update_policy(&self, id: Uuid, patch: PolicyPatch)
        -> StoreResult<Option<PolicyRow>>;

    // Policy acknowledgments (latest first; not deduplicated)
    async fn list_policy_acks(&self, employee_id: Option<&str>)
        -> StoreResult<Vec<PolicyAckRow>>;
    async fn create_policy_ack(
        &self,
        new: NewPolicyAck,
        employee_id: String,
    ) -> StoreResult<PolicyAckRow>;

    // Templates (most recently updated first)
    async fn list_templates(&self) -> StoreResult<Vec<TemplateRow>>;
    async fn get_template(&self, id: Uuid) -> StoreResult<Option<TemplateRow>>;
    async fn create_template(&self, new: NewTemplate) -> StoreResult<TemplateRow>;

    // Passes (newest first)
    async fn list_passes(&self, user_id: Option<&str>) -> StoreResult<Vec<PassRow>>;
    async fn get_pass(&self, id: Uuid) -> StoreResult<Option<PassRow>>;
    async fn create_pass(&self, new: NewPass) -> StoreResult<PassRow>;

    // Audit logs (newest first)
    async fn list_audit_logs(&self, filter: AuditLogFilter) -> StoreResult<Vec<AuditLogRow>>;
    async fn create_audit_log(&self, new: NewAuditLog) -> StoreResult<AuditLogRow>;
}
