use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_WORK_MODE: &str = "office";
pub const DEFAULT_WFH_STATUS: &str = "n/a";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLogRow {
    pub id: Uuid,
    pub employee_id: String,
    pub date: NaiveDate,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub total_hours: Option<f32>,
    pub geo_in: Option<Json<GeoPoint>>,
    pub geo_out: Option<Json<GeoPoint>>,
    pub is_working_day: bool,
    pub work_mode: String,
    pub wfh_status: String,
    pub approver_id: Option<String>,
    pub approval_time: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub meal_allowance: i32,
    pub extra_hours: f32,
    pub notes: Option<Json<Vec<String>>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceLog {
    pub employee_id: String,
    pub date: NaiveDate,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub total_hours: Option<f32>,
    pub geo_in: Option<GeoPoint>,
    pub geo_out: Option<GeoPoint>,
    pub is_working_day: Option<bool>,
    pub work_mode: Option<String>,
    pub wfh_status: Option<String>,
    pub approver_id: Option<String>,
    pub approval_time: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub meal_allowance: Option<i32>,
    pub extra_hours: Option<f32>,
    pub notes: Option<Vec<String>>,
    pub status: Option<String>,
}

impl NewAttendanceLog {
    /// A bare clock-in record for `employee_id` on `date`.
    pub fn clock_in(employee_id: String, date: NaiveDate, time_in: DateTime<Utc>) -> Self {
        Self {
            employee_id,
            date,
            time_in: Some(time_in),
            time_out: None,
            total_hours: None,
            geo_in: None,
            geo_out: None,
            is_working_day: None,
            work_mode: Some(DEFAULT_WORK_MODE.to_string()),
            wfh_status: None,
            approver_id: None,
            approval_time: None,
            approval_notes: None,
            meal_allowance: None,
            extra_hours: None,
            notes: None,
            status: Some(STATUS_PENDING.to_string()),
        }
    }

    pub fn into_row(self, id: Uuid, now: DateTime<Utc>) -> AttendanceLogRow {
        AttendanceLogRow {
            id,
            employee_id: self.employee_id,
            date: self.date,
            time_in: self.time_in,
            time_out: self.time_out,
            total_hours: self.total_hours,
            geo_in: self.geo_in.map(Json),
            geo_out: self.geo_out.map(Json),
            is_working_day: self.is_working_day.unwrap_or(true),
            work_mode: self
                .work_mode
                .unwrap_or_else(|| DEFAULT_WORK_MODE.to_string()),
            wfh_status: self
                .wfh_status
                .unwrap_or_else(|| DEFAULT_WFH_STATUS.to_string()),
            approver_id: self.approver_id,
            approval_time: self.approval_time,
            approval_notes: self.approval_notes,
            meal_allowance: self.meal_allowance.unwrap_or(0),
            extra_hours: self.extra_hours.unwrap_or(0.0),
            notes: self.notes.map(Json),
            status: self.status.unwrap_or_else(|| STATUS_PENDING.to_string()),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLogPatch {
    pub date: Option<NaiveDate>,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub total_hours: Option<f32>,
    pub geo_in: Option<GeoPoint>,
    pub geo_out: Option<GeoPoint>,
    pub is_working_day: Option<bool>,
    pub work_mode: Option<String>,
    pub wfh_status: Option<String>,
    pub approver_id: Option<String>,
    pub approval_time: Option<DateTime<Utc>>,
    pub approval_notes: Option<String>,
    pub meal_allowance: Option<i32>,
    pub extra_hours: Option<f32>,
    pub notes: Option<Vec<String>>,
    pub status: Option<String>,
}

impl AttendanceLogPatch {
    pub fn apply_to(self, row: &mut AttendanceLogRow) {
        if let Some(v) = self.date {
            row.date = v;
        }
        if let Some(v) = self.time_in {
            row.time_in = Some(v);
        }
        if let Some(v) = self.time_out {
            row.time_out = Some(v);
        }
        if let Some(v) = self.total_hours {
            row.total_hours = Some(v);
        }
        if let Some(v) = self.geo_in {
            row.geo_in = Some(Json(v));
        }
        if let Some(v) = self.geo_out {
            row.geo_out = Some(Json(v));
        }
        if let Some(v) = self.is_working_day {
            row.is_working_day = v;
        }
        if let Some(v) = self.work_mode {
            row.work_mode = v;
        }
        if let Some(v) = self.wfh_status {
            row.wfh_status = v;
        }
        if let Some(v) = self.approver_id {
            row.approver_id = Some(v);
        }
        if let Some(v) = self.approval_time {
            row.approval_time = Some(v);
        }
        if let Some(v) = self.approval_notes {
            row.approval_notes = Some(v);
        }
        if let Some(v) = self.meal_allowance {
            row.meal_allowance = v;
        }
        if let Some(v) = self.extra_hours {
            row.extra_hours = v;
        }
        if let Some(v) = self.notes {
            row.notes = Some(Json(v));
        }
        if let Some(v) = self.status {
            row.status = v;
        }
    }
}
