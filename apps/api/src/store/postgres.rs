use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
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

use super::{Store, StoreResult};

/// PostgreSQL-backed store. Partial updates use `COALESCE`, so a field that is
/// absent from a patch keeps its stored value.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    // ── Recruitment requests ────────────────────────────────────────────────

    async fn list_recruitment_requests(&self) -> StoreResult<Vec<RecruitmentRequestRow>> {
        Ok(sqlx::query_as::<_, RecruitmentRequestRow>(
            "SELECT * FROM recruitment_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_recruitment_request(
        &self,
        id: Uuid,
    ) -> StoreResult<Option<RecruitmentRequestRow>> {
        Ok(sqlx::query_as::<_, RecruitmentRequestRow>(
            "SELECT * FROM recruitment_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_recruitment_request(
        &self,
        new: NewRecruitmentRequest,
    ) -> StoreResult<RecruitmentRequestRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        let created = sqlx::query_as::<_, RecruitmentRequestRow>(
            r#"
            INSERT INTO recruitment_requests
                (id, title, department, location, level, salary_range, jd_url,
                 status, hiring_manager_id, agency_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.department)
        .bind(row.location)
        .bind(row.level)
        .bind(row.salary_range)
        .bind(row.jd_url)
        .bind(row.status)
        .bind(row.hiring_manager_id)
        .bind(row.agency_ids)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = %created.id, "recruitment request inserted");
        Ok(created)
    }

    async fn update_recruitment_request(
        &self,
        id: Uuid,
        patch: RecruitmentRequestPatch,
    ) -> StoreResult<Option<RecruitmentRequestRow>> {
        Ok(sqlx::query_as::<_, RecruitmentRequestRow>(
            r#"
            UPDATE recruitment_requests SET
                title = COALESCE($2, title),
                department = COALESCE($3, department),
                location = COALESCE($4, location),
                level = COALESCE($5, level),
                salary_range = COALESCE($6, salary_range),
                jd_url = COALESCE($7, jd_url),
                status = COALESCE($8, status),
                hiring_manager_id = COALESCE($9, hiring_manager_id),
                agency_ids = COALESCE($10, agency_ids)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.department)
        .bind(patch.location)
        .bind(patch.level)
        .bind(patch.salary_range)
        .bind(patch.jd_url)
        .bind(patch.status)
        .bind(patch.hiring_manager_id)
        .bind(patch.agency_ids.map(Json))
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── Candidates ──────────────────────────────────────────────────────────

    async fn list_candidates(&self, rr_id: Option<Uuid>) -> StoreResult<Vec<CandidateRow>> {
        let rows = match rr_id {
            Some(rr_id) => {
                sqlx::query_as::<_, CandidateRow>(
                    "SELECT * FROM candidates WHERE rr_id = $1 ORDER BY created_at DESC",
                )
                .bind(rr_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CandidateRow>(
                    "SELECT * FROM candidates ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn get_candidate(&self, id: Uuid) -> StoreResult<Option<CandidateRow>> {
        Ok(
            sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_candidate(
        &self,
        new: NewCandidate,
        stage: PipelineStage,
    ) -> StoreResult<CandidateRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), stage);
        Ok(sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates
                (id, rr_id, name, email, phone, resume_url, source,
                 current_stage, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.rr_id)
        .bind(row.name)
        .bind(row.email)
        .bind(row.phone)
        .bind(row.resume_url)
        .bind(row.source)
        .bind(row.current_stage)
        .bind(row.notes)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_candidate_stage(
        &self,
        id: Uuid,
        stage: PipelineStage,
    ) -> StoreResult<Option<CandidateRow>> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "UPDATE candidates SET current_stage = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(stage)
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── Availability slots ──────────────────────────────────────────────────

    async fn list_availability_slots(
        &self,
        rr_id: Option<Uuid>,
    ) -> StoreResult<Vec<AvailabilitySlotRow>> {
        let rows = match rr_id {
            Some(rr_id) => {
                sqlx::query_as::<_, AvailabilitySlotRow>(
                    "SELECT * FROM availability_slots WHERE rr_id = $1 ORDER BY start_time ASC",
                )
                .bind(rr_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AvailabilitySlotRow>(
                    "SELECT * FROM availability_slots ORDER BY start_time ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn create_availability_slot(
        &self,
        new: NewAvailabilitySlot,
    ) -> StoreResult<AvailabilitySlotRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, AvailabilitySlotRow>(
            r#"
            INSERT INTO availability_slots
                (id, rr_id, interviewer_id, start_time, duration_minutes,
                 mode, location, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.rr_id)
        .bind(row.interviewer_id)
        .bind(row.start_time)
        .bind(row.duration_minutes)
        .bind(row.mode)
        .bind(row.location)
        .bind(row.status)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    // ── Interviews ──────────────────────────────────────────────────────────

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>> {
        Ok(sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews ORDER BY slot_time DESC NULLS LAST",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_interview(&self, id: Uuid) -> StoreResult<Option<InterviewRow>> {
        Ok(
            sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_interview(&self, new: NewInterview) -> StoreResult<InterviewRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (id, candidate_id, rr_id, interviewer_id, availability_slot_id,
                 slot_time, duration_minutes, mode, status, feedback, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.candidate_id)
        .bind(row.rr_id)
        .bind(row.interviewer_id)
        .bind(row.availability_slot_id)
        .bind(row.slot_time)
        .bind(row.duration_minutes)
        .bind(row.mode)
        .bind(row.status)
        .bind(row.feedback)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_interview(
        &self,
        id: Uuid,
        patch: InterviewPatch,
    ) -> StoreResult<Option<InterviewRow>> {
        Ok(sqlx::query_as::<_, InterviewRow>(
            r#"
            UPDATE interviews SET
                candidate_id = COALESCE($2, candidate_id),
                rr_id = COALESCE($3, rr_id),
                interviewer_id = COALESCE($4, interviewer_id),
                availability_slot_id = COALESCE($5, availability_slot_id),
                slot_time = COALESCE($6, slot_time),
                duration_minutes = COALESCE($7, duration_minutes),
                mode = COALESCE($8, mode),
                status = COALESCE($9, status),
                feedback = COALESCE($10, feedback)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.candidate_id)
        .bind(patch.rr_id)
        .bind(patch.interviewer_id)
        .bind(patch.availability_slot_id)
        .bind(patch.slot_time)
        .bind(patch.duration_minutes)
        .bind(patch.mode)
        .bind(patch.status)
        .bind(patch.feedback.map(Json))
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── Attendance ──────────────────────────────────────────────────────────

    async fn list_attendance_logs(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<AttendanceLogRow>> {
        let rows = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, AttendanceLogRow>(
                    "SELECT * FROM attendance_logs WHERE employee_id = $1 ORDER BY date DESC",
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceLogRow>(
                    "SELECT * FROM attendance_logs ORDER BY date DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn get_attendance_log(&self, id: Uuid) -> StoreResult<Option<AttendanceLogRow>> {
        Ok(
            sqlx::query_as::<_, AttendanceLogRow>("SELECT * FROM attendance_logs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_attendance_by_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceLogRow>> {
        Ok(sqlx::query_as::<_, AttendanceLogRow>(
            r#"
            SELECT * FROM attendance_logs
            WHERE employee_id = $1 AND date = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_attendance_log(&self, new: NewAttendanceLog) -> StoreResult<AttendanceLogRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, AttendanceLogRow>(
            r#"
            INSERT INTO attendance_logs
                (id, employee_id, date, time_in, time_out, total_hours, geo_in, geo_out,
                 is_working_day, work_mode, wfh_status, approver_id, approval_time,
                 approval_notes, meal_allowance, extra_hours, notes, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.employee_id)
        .bind(row.date)
        .bind(row.time_in)
        .bind(row.time_out)
        .bind(row.total_hours)
        .bind(row.geo_in)
        .bind(row.geo_out)
        .bind(row.is_working_day)
        .bind(row.work_mode)
        .bind(row.wfh_status)
        .bind(row.approver_id)
        .bind(row.approval_time)
        .bind(row.approval_notes)
        .bind(row.meal_allowance)
        .bind(row.extra_hours)
        .bind(row.notes)
        .bind(row.status)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_attendance_log(
        &self,
        id: Uuid,
        patch: AttendanceLogPatch,
    ) -> StoreResult<Option<AttendanceLogRow>> {
        Ok(sqlx::query_as::<_, AttendanceLogRow>(
            r#"
            UPDATE attendance_logs SET
                date = COALESCE($2, date),
                time_in = COALESCE($3, time_in),
                time_out = COALESCE($4, time_out),
                total_hours = COALESCE($5, total_hours),
                geo_in = COALESCE($6, geo_in),
                geo_out = COALESCE($7, geo_out),
                is_working_day = COALESCE($8, is_working_day),
                work_mode = COALESCE($9, work_mode),
                wfh_status = COALESCE($10, wfh_status),
                approver_id = COALESCE($11, approver_id),
                approval_time = COALESCE($12, approval_time),
                approval_notes = COALESCE($13, approval_notes),
                meal_allowance = COALESCE($14, meal_allowance),
                extra_hours = COALESCE($15, extra_hours),
                notes = COALESCE($16, notes),
                status = COALESCE($17, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.date)
        .bind(patch.time_in)
        .bind(patch.time_out)
        .bind(patch.total_hours)
        .bind(patch.geo_in.map(Json))
        .bind(patch.geo_out.map(Json))
        .bind(patch.is_working_day)
        .bind(patch.work_mode)
        .bind(patch.wfh_status)
        .bind(patch.approver_id)
        .bind(patch.approval_time)
        .bind(patch.approval_notes)
        .bind(patch.meal_allowance)
        .bind(patch.extra_hours)
        .bind(patch.notes.map(Json))
        .bind(patch.status)
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── ESS requests ────────────────────────────────────────────────────────

    async fn list_ess_requests(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<EssRequestRow>> {
        let rows = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, EssRequestRow>(
                    "SELECT * FROM ess_requests WHERE employee_id = $1 ORDER BY created_at DESC",
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EssRequestRow>(
                    "SELECT * FROM ess_requests ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    async fn create_ess_request(
        &self,
        new: NewEssRequest,
        employee_id: String,
    ) -> StoreResult<EssRequestRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), employee_id);
        Ok(sqlx::query_as::<_, EssRequestRow>(
            r#"
            INSERT INTO ess_requests
                (id, employee_id, type, status, payload, attachments, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.employee_id)
        .bind(row.kind)
        .bind(row.status)
        .bind(row.payload)
        .bind(row.attachments)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_ess_request(
        &self,
        id: Uuid,
        patch: EssRequestPatch,
    ) -> StoreResult<Option<EssRequestRow>> {
        Ok(sqlx::query_as::<_, EssRequestRow>(
            r#"
            UPDATE ess_requests SET
                type = COALESCE($2, type),
                status = COALESCE($3, status),
                payload = COALESCE($4, payload),
                attachments = COALESCE($5, attachments)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.kind)
        .bind(patch.status)
        .bind(patch.payload)
        .bind(patch.attachments.map(Json))
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── Policies ────────────────────────────────────────────────────────────

    async fn list_policies(&self) -> StoreResult<Vec<PolicyRow>> {
        Ok(
            sqlx::query_as::<_, PolicyRow>("SELECT * FROM policies ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_policy(&self, id: Uuid) -> StoreResult<Option<PolicyRow>> {
        Ok(
            sqlx::query_as::<_, PolicyRow>("SELECT * FROM policies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_policy(&self, new: NewPolicy) -> StoreResult<PolicyRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, PolicyRow>(
            r#"
            INSERT INTO policies
                (id, title, version, category, status, owner, effective_date,
                 file_url, summary, tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.version)
        .bind(row.category)
        .bind(row.status)
        .bind(row.owner)
        .bind(row.effective_date)
        .bind(row.file_url)
        .bind(row.summary)
        .bind(row.tags)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_policy(
        &self,
        id: Uuid,
        patch: PolicyPatch,
    ) -> StoreResult<Option<PolicyRow>> {
        Ok(sqlx::query_as::<_, PolicyRow>(
            r#"
            UPDATE policies SET
                title = COALESCE($2, title),
                version = COALESCE($3, version),
                category = COALESCE($4, category),
                status = COALESCE($5, status),
                owner = COALESCE($6, owner),
                effective_date = COALESCE($7, effective_date),
                file_url = COALESCE($8, file_url),
                summary = COALESCE($9, summary),
                tags = COALESCE($10, tags)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.version)
        .bind(patch.category)
        .bind(patch.status)
        .bind(patch.owner)
        .bind(patch.effective_date)
        .bind(patch.file_url)
        .bind(patch.summary)
        .bind(patch.tags.map(Json))
        .fetch_optional(&self.pool)
        .await?)
    }

    // ── Policy acknowledgments ──────────────────────────────────────────────

    async fn list_policy_acks(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<PolicyAckRow>> {
        let rows = match employee_id {
            Some(employee_id) => {
                sqlx::query_as::<_, PolicyAckRow>(
                    "SELECT * FROM policy_acks WHERE employee_id = $1 ORDER BY ack_at DESC",
                )
                .bind(employee_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PolicyAckRow>("SELECT * FROM policy_acks ORDER BY ack_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn create_policy_ack(
        &self,
        new: NewPolicyAck,
        employee_id: String,
    ) -> StoreResult<PolicyAckRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), employee_id);
        Ok(sqlx::query_as::<_, PolicyAckRow>(
            r#"
            INSERT INTO policy_acks (id, policy_id, employee_id, version, ack_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.policy_id)
        .bind(row.employee_id)
        .bind(row.version)
        .bind(row.ack_at)
        .fetch_one(&self.pool)
        .await?)
    }

    // ── Templates ───────────────────────────────────────────────────────────

    async fn list_templates(&self) -> StoreResult<Vec<TemplateRow>> {
        Ok(
            sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<TemplateRow>> {
        Ok(
            sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_template(&self, new: NewTemplate) -> StoreResult<TemplateRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO templates (id, title, category, file_url, description, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.title)
        .bind(row.category)
        .bind(row.file_url)
        .bind(row.description)
        .bind(row.updated_at)
        .fetch_one(&self.pool)
        .await?)
    }

    // ── Passes ──────────────────────────────────────────────────────────────

    async fn list_passes(&self, user_id: Option<&str>) -> StoreResult<Vec<PassRow>> {
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, PassRow>(
                    "SELECT * FROM passes WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PassRow>("SELECT * FROM passes ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    async fn get_pass(&self, id: Uuid) -> StoreResult<Option<PassRow>> {
        Ok(
            sqlx::query_as::<_, PassRow>("SELECT * FROM passes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_pass(&self, new: NewPass) -> StoreResult<PassRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, PassRow>(
            r#"
            INSERT INTO passes
                (id, user_id, type, scope, expires_at, max_uses, used_count,
                 status, meta, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.kind)
        .bind(row.scope)
        .bind(row.expires_at)
        .bind(row.max_uses)
        .bind(row.used_count)
        .bind(row.status)
        .bind(row.meta)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }

    // ── Audit logs ──────────────────────────────────────────────────────────

    async fn list_audit_logs(&self, filter: AuditLogFilter) -> StoreResult<Vec<AuditLogRow>> {
        Ok(sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT * FROM audit_logs
            WHERE ($1::text IS NULL OR entity_type = $1)
              AND ($2::text IS NULL OR entity_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.entity_type)
        .bind(filter.entity_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_audit_log(&self, new: NewAuditLog) -> StoreResult<AuditLogRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        Ok(sqlx::query_as::<_, AuditLogRow>(
            r#"
            INSERT INTO audit_logs
                (id, actor, action, entity_type, entity_id, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(row.actor)
        .bind(row.action)
        .bind(row.entity_type)
        .bind(row.entity_id)
        .bind(row.metadata)
        .bind(row.created_at)
        .fetch_one(&self.pool)
        .await?)
    }
}
