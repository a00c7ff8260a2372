pub mod attendance;
pub mod location;
pub mod task;
pub mod user;
pub mod work_update;

pub use attendance::{Attendance, AttendanceStatus};
pub use location::GeoPoint;
pub use task::{CreateTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::{Actor, Role};
pub use work_update::{Decision, DecisionRecord, SubmitUpdate, UpdateStatus, WorkUpdate};
