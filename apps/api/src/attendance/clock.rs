//! Clock-in / clock-out rules. Pure functions over the existing record for
//! (employee, today), so the handlers only do the reads and writes.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::attendance::{AttendanceLogPatch, AttendanceLogRow, STATUS_APPROVED};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("Already clocked in today")]
    AlreadyClockedIn,

    #[error("No clock-in record found for today")]
    NotClockedIn,

    #[error("Already clocked out today")]
    AlreadyClockedOut,

    #[error("Today's record has no clock-in time")]
    MissingTimeIn,
}

/// Elapsed time between two instants in hours, rounded to two decimals.
pub fn total_hours(time_in: DateTime<Utc>, time_out: DateTime<Utc>) -> f32 {
    let hours = (time_out - time_in).num_milliseconds() as f64 / 3_600_000.0;
    ((hours * 100.0).round() / 100.0) as f32
}

/// A day can be clocked into only once.
pub fn check_clock_in(existing: Option<&AttendanceLogRow>) -> Result<(), ClockError> {
    match existing {
        Some(_) => Err(ClockError::AlreadyClockedIn),
        None => Ok(()),
    }
}

/// Builds the update that closes today's record at `now`, returning the id of
/// the record it applies to.
pub fn clock_out_patch(
    existing: Option<&AttendanceLogRow>,
    now: DateTime<Utc>,
) -> Result<(Uuid, AttendanceLogPatch), ClockError> {
    let record = existing.ok_or(ClockError::NotClockedIn)?;
    if record.time_out.is_some() {
        return Err(ClockError::AlreadyClockedOut);
    }
    let time_in = record.time_in.ok_or(ClockError::MissingTimeIn)?;

    let patch = AttendanceLogPatch {
        time_out: Some(now),
        total_hours: Some(total_hours(time_in, now)),
        status: Some(STATUS_APPROVED.to_string()),
        ..Default::default()
    };
    Ok((record.id, patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::NewAttendanceLog;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 14, h, m, s).unwrap()
    }

    fn clocked_in(time_in: DateTime<Utc>) -> AttendanceLogRow {
        let day = NaiveDate::from_ymd_opt(2026, 4, 14).unwrap();
        NewAttendanceLog::clock_in("emp-1".to_string(), day, time_in)
            .into_row(Uuid::new_v4(), time_in)
    }

    #[test]
    fn test_total_hours_whole_and_fractional() {
        assert_eq!(total_hours(at(9, 0, 0), at(17, 30, 0)), 8.5);
        assert_eq!(total_hours(at(9, 0, 0), at(9, 15, 0)), 0.25);
        assert_eq!(total_hours(at(9, 0, 0), at(9, 0, 0)), 0.0);
    }

    #[test]
    fn test_total_hours_rounds_to_two_decimals() {
        // 20 minutes = 0.3333.. hours
        assert_eq!(total_hours(at(9, 0, 0), at(9, 20, 0)), 0.33);
        // 40 minutes = 0.6666.. hours
        assert_eq!(total_hours(at(9, 0, 0), at(9, 40, 0)), 0.67);
        // 1h 59m 59s rounds up to a whole two hours
        assert_eq!(total_hours(at(9, 0, 0), at(10, 59, 59)), 2.0);
    }

    #[test]
    fn test_clock_in_rejected_when_record_exists() {
        let record = clocked_in(at(9, 0, 0));
        assert_eq!(check_clock_in(Some(&record)), Err(ClockError::AlreadyClockedIn));
        assert_eq!(check_clock_in(None), Ok(()));
    }

    #[test]
    fn test_clock_out_requires_clock_in() {
        let err = clock_out_patch(None, at(17, 0, 0)).unwrap_err();
        assert_eq!(err, ClockError::NotClockedIn);
    }

    #[test]
    fn test_clock_out_rejected_when_already_out() {
        let mut record = clocked_in(at(9, 0, 0));
        record.time_out = Some(at(12, 0, 0));
        let err = clock_out_patch(Some(&record), at(17, 0, 0)).unwrap_err();
        assert_eq!(err, ClockError::AlreadyClockedOut);
    }

    #[test]
    fn test_clock_out_rejected_without_time_in() {
        let mut record = clocked_in(at(9, 0, 0));
        record.time_in = None;
        let err = clock_out_patch(Some(&record), at(17, 0, 0)).unwrap_err();
        assert_eq!(err, ClockError::MissingTimeIn);
    }

    #[test]
    fn test_clock_out_patch_sets_hours_and_approves() {
        let time_in = at(8, 45, 0);
        let record = clocked_in(time_in);
        let now = time_in + Duration::minutes(7 * 60 + 50);
        let (id, patch) = clock_out_patch(Some(&record), now).unwrap();
        assert_eq!(id, record.id);
        assert_eq!(patch.time_out, Some(now));
        assert_eq!(patch.total_hours, Some(7.83));
        assert_eq!(patch.status.as_deref(), Some("approved"));
        assert!(patch.time_in.is_none(), "clock-out must not touch time_in");
    }
}
