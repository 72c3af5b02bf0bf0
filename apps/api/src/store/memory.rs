use std::cmp::Reverse;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
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

use super::{Store, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    recruitment_requests: Vec<RecruitmentRequestRow>,
    candidates: Vec<CandidateRow>,
    availability_slots: Vec<AvailabilitySlotRow>,
    interviews: Vec<InterviewRow>,
    attendance_logs: Vec<AttendanceLogRow>,
    ess_requests: Vec<EssRequestRow>,
    policies: Vec<PolicyRow>,
    policy_acks: Vec<PolicyAckRow>,
    templates: Vec<TemplateRow>,
    passes: Vec<PassRow>,
    audit_logs: Vec<AuditLogRow>,
}

/// In-process store used when no database is configured, and by tests.
///
/// Rows are kept in insertion order. Reads sort the way the SQL store does;
/// rows with equal sort keys come back newest-inserted first.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))
    }
}

/// Newest-inserted first, then a stable sort on the key.
fn sorted_by<T: Clone, K: Ord>(
    rows: &[T],
    filter: impl Fn(&T) -> bool,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().filter(|r| filter(*r)).cloned().collect();
    out.sort_by_key(|r| key(r));
    out
}

fn update_where<T: Clone>(
    rows: &mut [T],
    is_target: impl Fn(&T) -> bool,
    f: impl FnOnce(&mut T),
) -> Option<T> {
    let row = rows.iter_mut().find(|r| is_target(r))?;
    f(row);
    Some(row.clone())
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_recruitment_requests(&self) -> StoreResult<Vec<RecruitmentRequestRow>> {
        let t = self.tables()?;
        Ok(sorted_by(&t.recruitment_requests, |_| true, |r| Reverse(r.created_at)))
    }

    async fn get_recruitment_request(
        &self,
        id: Uuid,
    ) -> StoreResult<Option<RecruitmentRequestRow>> {
        let t = self.tables()?;
        Ok(t.recruitment_requests.iter().find(|r| r.id == id).cloned())
    }

    async fn create_recruitment_request(
        &self,
        new: NewRecruitmentRequest,
    ) -> StoreResult<RecruitmentRequestRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.recruitment_requests.push(row.clone());
        Ok(row)
    }

    async fn update_recruitment_request(
        &self,
        id: Uuid,
        patch: RecruitmentRequestPatch,
    ) -> StoreResult<Option<RecruitmentRequestRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.recruitment_requests, |r| r.id == id, |r| {
            patch.apply_to(r)
        }))
    }

    async fn list_candidates(&self, rr_id: Option<Uuid>) -> StoreResult<Vec<CandidateRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.candidates,
            |c| rr_id.map_or(true, |rr| c.rr_id == Some(rr)),
            |c| Reverse(c.created_at),
        ))
    }

    async fn get_candidate(&self, id: Uuid) -> StoreResult<Option<CandidateRow>> {
        let t = self.tables()?;
        Ok(t.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn create_candidate(
        &self,
        new: NewCandidate,
        stage: PipelineStage,
    ) -> StoreResult<CandidateRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), stage);
        self.tables()?.candidates.push(row.clone());
        Ok(row)
    }

    async fn update_candidate_stage(
        &self,
        id: Uuid,
        stage: PipelineStage,
    ) -> StoreResult<Option<CandidateRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.candidates, |c| c.id == id, |c| {
            c.current_stage = stage
        }))
    }

    async fn list_availability_slots(
        &self,
        rr_id: Option<Uuid>,
    ) -> StoreResult<Vec<AvailabilitySlotRow>> {
        let t = self.tables()?;
        let mut rows: Vec<_> = t
            .availability_slots
            .iter()
            .filter(|s| rr_id.map_or(true, |rr| s.rr_id == Some(rr)))
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.start_time);
        Ok(rows)
    }

    async fn create_availability_slot(
        &self,
        new: NewAvailabilitySlot,
    ) -> StoreResult<AvailabilitySlotRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.availability_slots.push(row.clone());
        Ok(row)
    }

    async fn list_interviews(&self) -> StoreResult<Vec<InterviewRow>> {
        let t = self.tables()?;
        // `Option` orders `None` first, so reversing puts unscheduled last.
        Ok(sorted_by(&t.interviews, |_| true, |i| Reverse(i.slot_time)))
    }

    async fn get_interview(&self, id: Uuid) -> StoreResult<Option<InterviewRow>> {
        let t = self.tables()?;
        Ok(t.interviews.iter().find(|i| i.id == id).cloned())
    }

    async fn create_interview(&self, new: NewInterview) -> StoreResult<InterviewRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.interviews.push(row.clone());
        Ok(row)
    }

    async fn update_interview(
        &self,
        id: Uuid,
        patch: InterviewPatch,
    ) -> StoreResult<Option<InterviewRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.interviews, |i| i.id == id, |i| {
            patch.apply_to(i)
        }))
    }

    async fn list_attendance_logs(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<AttendanceLogRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.attendance_logs,
            |a| employee_id.map_or(true, |e| a.employee_id == e),
            |a| Reverse(a.date),
        ))
    }

    async fn get_attendance_log(&self, id: Uuid) -> StoreResult<Option<AttendanceLogRow>> {
        let t = self.tables()?;
        Ok(t.attendance_logs.iter().find(|a| a.id == id).cloned())
    }

    async fn find_attendance_by_date(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceLogRow>> {
        let t = self.tables()?;
        Ok(t
            .attendance_logs
            .iter()
            .find(|a| a.employee_id == employee_id && a.date == date)
            .cloned())
    }

    async fn create_attendance_log(&self, new: NewAttendanceLog) -> StoreResult<AttendanceLogRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.attendance_logs.push(row.clone());
        Ok(row)
    }

    async fn update_attendance_log(
        &self,
        id: Uuid,
        patch: AttendanceLogPatch,
    ) -> StoreResult<Option<AttendanceLogRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.attendance_logs, |a| a.id == id, |a| {
            patch.apply_to(a)
        }))
    }

    async fn list_ess_requests(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<EssRequestRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.ess_requests,
            |r| employee_id.map_or(true, |e| r.employee_id == e),
            |r| Reverse(r.created_at),
        ))
    }

    async fn create_ess_request(
        &self,
        new: NewEssRequest,
        employee_id: String,
    ) -> StoreResult<EssRequestRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), employee_id);
        self.tables()?.ess_requests.push(row.clone());
        Ok(row)
    }

    async fn update_ess_request(
        &self,
        id: Uuid,
        patch: EssRequestPatch,
    ) -> StoreResult<Option<EssRequestRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.ess_requests, |r| r.id == id, |r| {
            patch.apply_to(r)
        }))
    }

    async fn list_policies(&self) -> StoreResult<Vec<PolicyRow>> {
        let t = self.tables()?;
        Ok(sorted_by(&t.policies, |_| true, |p| Reverse(p.created_at)))
    }

    async fn get_policy(&self, id: Uuid) -> StoreResult<Option<PolicyRow>> {
        let t = self.tables()?;
        Ok(t.policies.iter().find(|p| p.id == id).cloned())
    }

    async fn create_policy(&self, new: NewPolicy) -> StoreResult<PolicyRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.policies.push(row.clone());
        Ok(row)
    }

    async fn update_policy(
        &self,
        id: Uuid,
        patch: PolicyPatch,
    ) -> StoreResult<Option<PolicyRow>> {
        let mut t = self.tables()?;
        Ok(update_where(&mut t.policies, |p| p.id == id, |p| {
            patch.apply_to(p)
        }))
    }

    async fn list_policy_acks(
        &self,
        employee_id: Option<&str>,
    ) -> StoreResult<Vec<PolicyAckRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.policy_acks,
            |a| employee_id.map_or(true, |e| a.employee_id == e),
            |a| Reverse(a.ack_at),
        ))
    }

    async fn create_policy_ack(
        &self,
        new: NewPolicyAck,
        employee_id: String,
    ) -> StoreResult<PolicyAckRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now(), employee_id);
        self.tables()?.policy_acks.push(row.clone());
        Ok(row)
    }

    async fn list_templates(&self) -> StoreResult<Vec<TemplateRow>> {
        let t = self.tables()?;
        Ok(sorted_by(&t.templates, |_| true, |tpl| Reverse(tpl.updated_at)))
    }

    async fn get_template(&self, id: Uuid) -> StoreResult<Option<TemplateRow>> {
        let t = self.tables()?;
        Ok(t.templates.iter().find(|tpl| tpl.id == id).cloned())
    }

    async fn create_template(&self, new: NewTemplate) -> StoreResult<TemplateRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.templates.push(row.clone());
        Ok(row)
    }

    async fn list_passes(&self, user_id: Option<&str>) -> StoreResult<Vec<PassRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.passes,
            |p| user_id.map_or(true, |u| p.user_id == u),
            |p| Reverse(p.created_at),
        ))
    }

    async fn get_pass(&self, id: Uuid) -> StoreResult<Option<PassRow>> {
        let t = self.tables()?;
        Ok(t.passes.iter().find(|p| p.id == id).cloned())
    }

    async fn create_pass(&self, new: NewPass) -> StoreResult<PassRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.passes.push(row.clone());
        Ok(row)
    }

    async fn list_audit_logs(&self, filter: AuditLogFilter) -> StoreResult<Vec<AuditLogRow>> {
        let t = self.tables()?;
        Ok(sorted_by(
            &t.audit_logs,
            |a| filter.matches(a),
            |a| Reverse(a.created_at),
        ))
    }

    async fn create_audit_log(&self, new: NewAuditLog) -> StoreResult<AuditLogRow> {
        let row = new.into_row(Uuid::new_v4(), Utc::now());
        self.tables()?.audit_logs.push(row.clone());
        Ok(row)
    }
}
