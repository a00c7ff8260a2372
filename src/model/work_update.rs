use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::location::GeoPoint;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UpdateStatus {
    Pending,
    Approved,
    Rejected,
}

/// A manager's verdict on a submitted update.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub fn as_status(self) -> UpdateStatus {
        match self {
            Decision::Approved => UpdateStatus::Approved,
            Decision::Rejected => UpdateStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decided_by: u64,
    pub decision: Decision,
    pub comments: Option<String>,
    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkUpdate {
    pub id: u64,
    pub task_id: u64,
    pub employee_id: u64,
    pub description: String,
    pub completion_percentage: u8,
    pub location: GeoPoint,
    /// Fence result computed once at submission; later edits to the task
    /// or its fence never touch this flag.
    pub is_geo_verified: bool,
    pub status: UpdateStatus,
    pub manager_comments: Option<String>,
    /// Opaque references; upload handling lives outside the core.
    pub proof_images: Vec<String>,
    /// Event time as reported by the field device; may trail `created_at`.
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Every decision ever taken, oldest first. The latest entry matches
    /// `status` and `manager_comments`.
    pub decision_history: Vec<DecisionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitUpdate {
    pub task_id: u64,
    pub description: String,
    pub completion_percentage: u8,
    pub location: GeoPoint,
    #[serde(default)]
    pub proof_images: Vec<String>,
    /// Event time; defaults to submission time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}
