//! Task lifecycle: creation, (re)assignment, allow-listed patching,
//! progress propagation and deletion.
//!
//! Status flow is `pending -> in_progress -> completed`, with no way back
//! out of `completed`. Reaching 100% forces `completed`; partial progress
//! deliberately does NOT force `in_progress` — that transition belongs to
//! an explicit status patch.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{Actor, CreateTask, GeoPoint, Task, TaskPatch, TaskStatus};
use crate::store::Store;

pub fn create(store: &Store, actor: &Actor, now: DateTime<Utc>, req: CreateTask) -> Result<Task> {
    if !actor.is_manager() {
        return Err(Error::Validation(
            "tasks can only be created by a manager".into(),
        ));
    }
    validate_text("title", &req.title)?;
    validate_text("description", &req.description)?;
    validate_fence(req.location, req.geo_fence_radius)?;

    let mut col = store.write();
    let task = Task {
        id: col.next_id(),
        title: req.title,
        description: req.description,
        assigned_to: req.assigned_to,
        assigned_by: actor.user_id,
        location: req.location,
        geo_fence_radius: req.geo_fence_radius,
        status: TaskStatus::Pending,
        priority: req.priority,
        completion_percentage: 0,
        deadline: req.deadline,
        created_at: now,
        updated_at: now,
    };
    col.tasks.insert(task.id, task.clone());
    info!(task_id = task.id, manager_id = actor.user_id, "task created");
    Ok(task)
}

/// Assign or reassign a task; `None` unassigns.
pub fn assign(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    task_id: u64,
    employee_id: Option<u64>,
) -> Result<Task> {
    if !actor.is_manager() {
        return Err(Error::Authorization("only managers may assign tasks".into()));
    }
    let mut col = store.write();
    let task = col
        .tasks
        .get_mut(&task_id)
        .ok_or(Error::not_found("task", task_id))?;
    task.assigned_to = employee_id;
    task.updated_at = now;
    info!(task_id, ?employee_id, "task assignment changed");
    Ok(task.clone())
}

/// Apply an explicit allow-listed patch. Managers may touch every mutable
/// field; the assigned employee may only move `status`. Anything else in
/// the patch from an employee is rejected outright.
pub fn apply_patch(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    task_id: u64,
    patch: TaskPatch,
) -> Result<Task> {
    if let Some(title) = &patch.title {
        validate_text("title", title)?;
    }
    if let Some(description) = &patch.description {
        validate_text("description", description)?;
    }

    let mut col = store.write();
    let task = col
        .tasks
        .get_mut(&task_id)
        .ok_or(Error::not_found("task", task_id))?;

    if !actor.is_manager() {
        if task.assigned_to != Some(actor.user_id) {
            return Err(Error::Authorization(
                "task is not assigned to this employee".into(),
            ));
        }
        if patch.touches_manager_fields() {
            return Err(Error::Authorization(
                "employees may only update task status".into(),
            ));
        }
    }

    let location = patch.location.unwrap_or(task.location);
    let radius = patch.geo_fence_radius.unwrap_or(task.geo_fence_radius);
    validate_fence(location, radius)?;

    if let Some(status) = patch.status {
        if task.status == TaskStatus::Completed && status != TaskStatus::Completed {
            return Err(Error::State("a completed task cannot be re-opened".into()));
        }
        task.status = status;
    }
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(assigned_to) = patch.assigned_to {
        task.assigned_to = assigned_to;
    }
    if let Some(deadline) = patch.deadline {
        task.deadline = deadline;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    task.location = location;
    task.geo_fence_radius = radius;
    task.updated_at = now;

    info!(task_id, user_id = actor.user_id, "task updated");
    Ok(task.clone())
}

/// Record an employee-reported completion percentage. No clamping: out of
/// range fails. 100% forces the task into `completed`.
pub fn record_progress(
    store: &Store,
    now: DateTime<Utc>,
    task_id: u64,
    percentage: u8,
) -> Result<Task> {
    let mut col = store.write();
    progress_locked(&mut col, now, task_id, percentage)
}

/// Same as [`record_progress`] but against an already-held write guard, so
/// work-update submission can pair it with the update insert atomically.
pub(crate) fn progress_locked(
    col: &mut crate::store::Collections,
    now: DateTime<Utc>,
    task_id: u64,
    percentage: u8,
) -> Result<Task> {
    if percentage > 100 {
        return Err(Error::Validation(format!(
            "completion percentage {percentage} is out of range (0-100)"
        )));
    }
    let task = col
        .tasks
        .get_mut(&task_id)
        .ok_or(Error::not_found("task", task_id))?;
    task.completion_percentage = percentage;
    if percentage == 100 {
        task.status = TaskStatus::Completed;
        info!(task_id, "task reached 100%, marked completed");
    }
    task.updated_at = now;
    Ok(task.clone())
}

/// Hard delete. Work updates referencing the task are left in place and
/// become orphans.
pub fn delete(store: &Store, actor: &Actor, task_id: u64) -> Result<()> {
    if !actor.is_manager() {
        return Err(Error::Authorization("only managers may delete tasks".into()));
    }
    let mut col = store.write();
    col.tasks
        .remove(&task_id)
        .ok_or(Error::not_found("task", task_id))?;
    info!(task_id, manager_id = actor.user_id, "task deleted");
    Ok(())
}

pub fn get(store: &Store, actor: &Actor, task_id: u64) -> Result<Task> {
    let col = store.read();
    let task = col
        .tasks
        .get(&task_id)
        .ok_or(Error::not_found("task", task_id))?;
    if !actor.is_manager() && task.assigned_to != Some(actor.user_id) {
        return Err(Error::Authorization(
            "task is not assigned to this employee".into(),
        ));
    }
    Ok(task.clone())
}

/// Managers see every task; employees see their own assignments.
pub fn list_for(store: &Store, actor: &Actor) -> Vec<Task> {
    let col = store.read();
    let mut tasks: Vec<Task> = col
        .tasks
        .values()
        .filter(|t| actor.is_manager() || t.assigned_to == Some(actor.user_id))
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.id);
    tasks
}

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_fence(location: GeoPoint, radius: f64) -> Result<()> {
    if !location.is_valid() {
        return Err(Error::Validation(format!(
            "invalid coordinates ({}, {})",
            location.latitude, location.longitude
        )));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::Validation(format!(
            "geofence radius must be a positive number of meters, got {radius}"
        )));
    }
    Ok(())
}
