//! Derived views over the three collections. Everything here holds a read
//! guard only and never mutates.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::model::{Attendance, AttendanceStatus, TaskStatus, UpdateStatus, WorkUpdate};
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub active_employees: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded percentage; 0 when there are no tasks at all.
    pub completion_rate: u32,
    pub pending_updates: usize,
    pub todays_attendance: Vec<Attendance>,
}

pub fn dashboard(store: &Store, as_of: NaiveDate) -> Dashboard {
    let col = store.read();

    let active_employees = col
        .attendance
        .values()
        .filter(|a| a.date == as_of && a.status == AttendanceStatus::Active)
        .count();

    let total_tasks = col.tasks.len();
    let completed_tasks = col
        .tasks
        .values()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let completion_rate = if total_tasks > 0 {
        (completed_tasks as f64 / total_tasks as f64 * 100.0).round() as u32
    } else {
        0
    };

    let pending_updates = col
        .updates
        .values()
        .filter(|u| u.status == UpdateStatus::Pending)
        .count();

    let mut todays_attendance: Vec<Attendance> = col
        .attendance
        .values()
        .filter(|a| a.date == as_of)
        .cloned()
        .collect();
    todays_attendance.sort_by_key(|a| a.id);

    Dashboard {
        active_employees,
        total_tasks,
        completed_tasks,
        completion_rate,
        pending_updates,
        todays_attendance,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub employee_id: u64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_updates: usize,
    pub geo_verified_updates: usize,
    pub approved_updates: usize,
    pub on_time_updates: usize,
    /// Percentages, rounded; all 0 when no updates fall in the window.
    pub geo_verification_rate: u32,
    pub approval_rate: u32,
    pub on_time_rate: u32,
    /// 0-5 stars: the three percentages summed (max 300) over 60.
    pub performance_score: u8,
}

pub fn performance(
    store: &Store,
    employee_id: u64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> PerformanceReport {
    let col = store.read();
    // Selection runs on event time, so back-dated field reports land in
    // the window they describe.
    let updates: Vec<&WorkUpdate> = col
        .updates
        .values()
        .filter(|u| u.employee_id == employee_id && u.timestamp >= start && u.timestamp <= end)
        .collect();

    let total = updates.len();
    let geo_verified = updates.iter().filter(|u| u.is_geo_verified).count();
    let approved = updates
        .iter()
        .filter(|u| u.status == UpdateStatus::Approved)
        .count();
    // Coarse proxy for "on time": at least half done.
    let on_time = updates
        .iter()
        .filter(|u| u.completion_percentage >= 50)
        .count();

    let rate = |n: usize| {
        if total > 0 {
            n as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    };
    let geo_rate = rate(geo_verified);
    let approval_rate = rate(approved);
    let on_time_rate = rate(on_time);
    // Sum of three percentages (max 300) over 60 gives a 0-5 scale.
    let score = ((geo_rate + approval_rate + on_time_rate) / 60.0).round();
    let score = score.clamp(0.0, 5.0) as u8;

    PerformanceReport {
        employee_id,
        start,
        end,
        total_updates: total,
        geo_verified_updates: geo_verified,
        approved_updates: approved,
        on_time_updates: on_time,
        geo_verification_rate: geo_rate.round() as u32,
        approval_rate: approval_rate.round() as u32,
        on_time_rate: on_time_rate.round() as u32,
        performance_score: score,
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub period_type: PeriodType,
    /// Inclusive start day and exclusive end day of the period.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_employees: usize,
    /// Summed hours, rounded to 2 decimals for presentation.
    pub total_hours: f64,
    pub total_updates: usize,
    pub approved_updates: usize,
    pub approval_rate: u32,
}

/// Daily period is the reference day; weekly runs Monday through the next
/// Monday exclusive, ISO-style (a Sunday reference starts 6 days back).
pub fn summary(store: &Store, period_type: PeriodType, reference: NaiveDate) -> SummaryReport {
    let start = match period_type {
        PeriodType::Daily => reference,
        PeriodType::Weekly => {
            reference - Days::new(reference.weekday().num_days_from_monday() as u64)
        }
    };
    let end = match period_type {
        PeriodType::Daily => start + Days::new(1),
        PeriodType::Weekly => start + Days::new(7),
    };

    let col = store.read();
    let in_period: Vec<&Attendance> = col
        .attendance
        .values()
        .filter(|a| a.date >= start && a.date < end)
        .collect();

    let total_employees = in_period
        .iter()
        .map(|a| a.employee_id)
        .collect::<HashSet<_>>()
        .len();
    let total_hours: f64 = in_period.iter().map(|a| a.total_hours).sum();

    let updates: Vec<&WorkUpdate> = col
        .updates
        .values()
        .filter(|u| {
            let day = u.timestamp.date_naive();
            day >= start && day < end
        })
        .collect();
    let total_updates = updates.len();
    let approved_updates = updates
        .iter()
        .filter(|u| u.status == UpdateStatus::Approved)
        .count();
    let approval_rate = if total_updates > 0 {
        (approved_updates as f64 / total_updates as f64 * 100.0).round() as u32
    } else {
        0
    };

    SummaryReport {
        period_type,
        start,
        end,
        total_employees,
        total_hours: (total_hours * 100.0).round() / 100.0,
        total_updates,
        approved_updates,
        approval_rate,
    }
}
