//! Daily check-in/check-out. One record per employee per calendar day,
//! moving `active -> completed` exactly once. The duplicate test and the
//! insert happen under the same write guard, so two racing check-ins
//! cannot both succeed.
//!
//! Check-in/out locations are recorded but not fenced; geofence
//! verification applies to work updates only.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Actor, Attendance, AttendanceStatus, GeoPoint};
use crate::store::Store;

const MS_PER_HOUR: f64 = 3_600_000.0;

pub fn check_in(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    location: GeoPoint,
    task_id: Option<u64>,
) -> Result<Attendance> {
    if !actor.is_employee() {
        return Err(Error::Authorization("only employees check in".into()));
    }
    if !location.is_valid() {
        return Err(Error::Validation(format!(
            "invalid coordinates ({}, {})",
            location.latitude, location.longitude
        )));
    }

    let date = now.date_naive();
    let mut col = store.write();
    if col.attendance_for(actor.user_id, date).is_some() {
        return Err(Error::Conflict(format!(
            "employee {} already checked in on {date}",
            actor.user_id
        )));
    }

    let record = Attendance {
        id: col.next_id(),
        employee_id: actor.user_id,
        task_id,
        check_in_time: now,
        check_in_location: location,
        check_out_time: None,
        check_out_location: None,
        total_hours: 0.0,
        date,
        status: AttendanceStatus::Active,
    };
    col.attendance.insert(record.id, record.clone());
    info!(employee_id = actor.user_id, %date, "checked in");
    Ok(record)
}

pub fn check_out(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    location: GeoPoint,
) -> Result<Attendance> {
    if !actor.is_employee() {
        return Err(Error::Authorization("only employees check out".into()));
    }
    if !location.is_valid() {
        return Err(Error::Validation(format!(
            "invalid coordinates ({}, {})",
            location.latitude, location.longitude
        )));
    }

    let date = now.date_naive();
    let mut col = store.write();
    let record = col
        .attendance
        .values_mut()
        .find(|a| a.employee_id == actor.user_id && a.date == date)
        .filter(|a| a.status == AttendanceStatus::Active)
        .ok_or_else(|| {
            Error::State(format!(
                "no active check-in for employee {} on {date}",
                actor.user_id
            ))
        })?;

    record.check_out_time = Some(now);
    record.check_out_location = Some(location);
    record.status = AttendanceStatus::Completed;
    record.total_hours =
        (now - record.check_in_time).num_milliseconds() as f64 / MS_PER_HOUR;
    info!(
        employee_id = actor.user_id,
        hours = record.total_hours,
        "checked out"
    );
    Ok(record.clone())
}

/// The employee's still-open record for `date`, if any. Callers must not
/// assume absence; they ask.
pub fn find_active(store: &Store, employee_id: u64, date: NaiveDate) -> Option<Attendance> {
    store
        .read()
        .attendance_for(employee_id, date)
        .filter(|a| a.status == AttendanceStatus::Active)
        .cloned()
}
