use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::location::GeoPoint;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Active,
    Completed,
}

/// One check-in/check-out record. At most one exists per employee per
/// calendar day; once completed it is never re-opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub id: u64,
    pub employee_id: u64,
    pub task_id: Option<u64>,
    pub check_in_time: DateTime<Utc>,
    pub check_in_location: GeoPoint,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_out_location: Option<GeoPoint>,
    /// Derived at check-out; fractional hours, unrounded.
    pub total_hours: f64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
