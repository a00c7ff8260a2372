use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::location::GeoPoint;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Unassigned tasks are allowed.
    pub assigned_to: Option<u64>,
    pub assigned_by: u64,
    pub location: GeoPoint,
    /// Meters; always finite and > 0.
    pub geo_fence_radius: f64,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completion_percentage: u8,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub assigned_to: Option<u64>,
    pub location: GeoPoint,
    pub geo_fence_radius: f64,
    pub priority: TaskPriority,
    pub deadline: Option<DateTime<Utc>>,
}

/// Allow-listed mutable fields for a task update. Absent fields are left
/// untouched; which fields a caller may set depends on their role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the assignee.
    #[serde(default, with = "double_option")]
    pub assigned_to: Option<Option<u64>>,
    pub location: Option<GeoPoint>,
    pub geo_fence_radius: Option<f64>,
    pub priority: Option<TaskPriority>,
    #[serde(default, with = "double_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// True if any field beyond `status` is set.
    pub fn touches_manager_fields(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.assigned_to.is_some()
            || self.location.is_some()
            || self.geo_fence_radius.is_some()
            || self.priority.is_some()
            || self.deadline.is_some()
    }
}

/// Distinguishes "field absent" from "field set to null" on patches.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}
