//! Landing-page counters, computed from already-loaded rows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::attendance::AttendanceLogRow;
use crate::models::policy::{PolicyRow, STATUS_PUBLISHED};
use crate::models::recruitment::{CandidateRow, RecruitmentRequestRow, DEFAULT_REQUEST_STATUS};

const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub active_candidates: usize,
    pub open_positions: usize,
    pub todays_attendance: usize,
    pub published_policies: usize,
    pub recent_candidates: Vec<CandidateRow>,
    pub open_requests: Vec<RecruitmentRequestRow>,
}

/// Inputs are expected newest first, the order the store lists them in.
pub fn summarize(
    candidates: Vec<CandidateRow>,
    requests: Vec<RecruitmentRequestRow>,
    attendance: &[AttendanceLogRow],
    policies: &[PolicyRow],
    today: NaiveDate,
) -> DashboardSummary {
    let active_candidates = candidates
        .iter()
        .filter(|c| c.current_stage.is_active())
        .count();
    let open: Vec<RecruitmentRequestRow> = requests
        .into_iter()
        .filter(|r| r.status == DEFAULT_REQUEST_STATUS)
        .collect();

    DashboardSummary {
        active_candidates,
        open_positions: open.len(),
        todays_attendance: attendance.iter().filter(|a| a.date == today).count(),
        published_policies: policies
            .iter()
            .filter(|p| p.status == STATUS_PUBLISHED)
            .count(),
        recent_candidates: candidates.into_iter().take(RECENT_LIMIT).collect(),
        open_requests: open.into_iter().take(RECENT_LIMIT).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::NewAttendanceLog;
    use crate::models::policy::NewPolicy;
    use crate::models::recruitment::{NewCandidate, NewRecruitmentRequest};
    use crate::recruitment::pipeline::PipelineStage;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn candidate(name: &str, stage: PipelineStage) -> CandidateRow {
        NewCandidate {
            rr_id: None,
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: None,
            resume_url: None,
            source: None,
            current_stage: None,
            notes: None,
        }
        .into_row(Uuid::new_v4(), Utc::now(), stage)
    }

    fn request(title: &str, status: &str) -> RecruitmentRequestRow {
        NewRecruitmentRequest {
            title: title.to_string(),
            department: "Engineering".to_string(),
            location: None,
            level: None,
            salary_range: None,
            jd_url: None,
            status: Some(status.to_string()),
            hiring_manager_id: None,
            agency_ids: None,
        }
        .into_row(Uuid::new_v4(), Utc::now())
    }

    fn policy(status: &str) -> PolicyRow {
        NewPolicy {
            title: "Leave".to_string(),
            version: None,
            category: None,
            status: Some(status.to_string()),
            owner: None,
            effective_date: None,
            file_url: None,
            summary: None,
            tags: None,
        }
        .into_row(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_counts_only_active_and_open() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 14).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 4, 13).unwrap();
        let time_in = Utc.with_ymd_and_hms(2026, 4, 14, 9, 0, 0).unwrap();
        let log = |emp: &str, date| {
            NewAttendanceLog::clock_in(emp.to_string(), date, time_in)
                .into_row(Uuid::new_v4(), time_in)
        };

        let summary = summarize(
            vec![
                candidate("a", PipelineStage::Applied),
                candidate("b", PipelineStage::Offer),
                candidate("c", PipelineStage::Hired),
                candidate("d", PipelineStage::Rejected),
            ],
            vec![request("SRE", "open"), request("PM", "closed")],
            &[log("emp-1", today), log("emp-2", today), log("emp-1", yesterday)],
            &[policy("published"), policy("draft")],
            today,
        );

        assert_eq!(summary.active_candidates, 2);
        assert_eq!(summary.open_positions, 1);
        assert_eq!(summary.todays_attendance, 2);
        assert_eq!(summary.published_policies, 1);
        assert_eq!(summary.open_requests[0].title, "SRE");
    }

    #[test]
    fn test_recent_lists_are_capped() {
        let candidates: Vec<_> = (0..8)
            .map(|i| candidate(&format!("c{i}"), PipelineStage::Screen))
            .collect();
        let requests: Vec<_> = (0..7).map(|i| request(&format!("r{i}"), "open")).collect();
        let today = NaiveDate::from_ymd_opt(2026, 4, 14).unwrap();

        let summary = summarize(candidates, requests, &[], &[], today);

        assert_eq!(summary.recent_candidates.len(), 5);
        assert_eq!(summary.recent_candidates[0].name, "c0");
        assert_eq!(summary.open_requests.len(), 5);
        assert_eq!(summary.open_positions, 7);
    }
}
