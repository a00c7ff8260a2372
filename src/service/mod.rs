pub mod attendance;
pub mod reports;
pub mod task;
pub mod work_update;
