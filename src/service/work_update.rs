//! Progress submissions from the field. `submit` is the one cross-entity
//! operation in the system: it verifies the reported location against the
//! task's fence, records the update, and pushes the percentage into the
//! task — all under a single store write guard, so the pair lands
//! atomically or not at all.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::geo;
use crate::model::{
    Actor, Decision, DecisionRecord, SubmitUpdate, UpdateStatus, WorkUpdate,
};
use crate::service::task;
use crate::store::Store;

pub fn submit(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    req: SubmitUpdate,
) -> Result<WorkUpdate> {
    if !actor.is_employee() {
        return Err(Error::Authorization(
            "only employees submit work updates".into(),
        ));
    }
    if req.description.trim().is_empty() {
        return Err(Error::Validation("description must not be empty".into()));
    }
    if req.completion_percentage > 100 {
        return Err(Error::Validation(format!(
            "completion percentage {} is out of range (0-100)",
            req.completion_percentage
        )));
    }
    if !req.location.is_valid() {
        return Err(Error::Validation(format!(
            "invalid coordinates ({}, {})",
            req.location.latitude, req.location.longitude
        )));
    }

    let mut col = store.write();
    let parent = col
        .tasks
        .get(&req.task_id)
        .ok_or(Error::not_found("task", req.task_id))?;
    if parent.assigned_to != Some(actor.user_id) {
        return Err(Error::Authorization(
            "task is not assigned to this employee".into(),
        ));
    }

    // Verified exactly once, against the fence as it stands right now.
    // Later edits to the task or its radius never revisit this flag.
    let is_geo_verified =
        geo::within_fence(req.location, parent.location, parent.geo_fence_radius);
    if is_geo_verified {
        info!(task_id = req.task_id, employee_id = actor.user_id, "update inside fence");
    } else {
        // Record-but-warn: an out-of-fence submission is kept, just flagged.
        warn!(
            task_id = req.task_id,
            employee_id = actor.user_id,
            distance_m = geo::distance(req.location, parent.location),
            "update outside fence"
        );
    }

    let update = WorkUpdate {
        id: col.next_id(),
        task_id: req.task_id,
        employee_id: actor.user_id,
        description: req.description,
        completion_percentage: req.completion_percentage,
        location: req.location,
        is_geo_verified,
        status: UpdateStatus::Pending,
        manager_comments: None,
        proof_images: req.proof_images,
        timestamp: req.timestamp.unwrap_or(now),
        created_at: now,
        decision_history: Vec::new(),
    };

    // Both halves of the unit of work, under the one guard. Progress was
    // validated above, so it cannot fail after the insert.
    col.updates.insert(update.id, update.clone());
    task::progress_locked(&mut col, now, req.task_id, req.completion_percentage)?;

    Ok(update)
}

/// Approve or reject. Re-deciding an already-decided update is permitted;
/// every verdict is appended to the audit trail and the latest one wins.
pub fn decide(
    store: &Store,
    actor: &Actor,
    now: DateTime<Utc>,
    update_id: u64,
    decision: Decision,
    comments: Option<String>,
) -> Result<WorkUpdate> {
    if !actor.is_manager() {
        return Err(Error::Authorization(
            "only managers decide on work updates".into(),
        ));
    }
    let mut col = store.write();
    let update = col
        .updates
        .get_mut(&update_id)
        .ok_or(Error::not_found("work update", update_id))?;

    update.decision_history.push(DecisionRecord {
        decided_by: actor.user_id,
        decision,
        comments: comments.clone(),
        decided_at: now,
    });
    update.status = decision.as_status();
    if comments.is_some() {
        update.manager_comments = comments;
    }
    info!(update_id, manager_id = actor.user_id, %decision, "update decided");
    Ok(update.clone())
}

/// Managers see every update; employees see their own.
pub fn list_for(store: &Store, actor: &Actor) -> Vec<WorkUpdate> {
    let col = store.read();
    let mut updates: Vec<WorkUpdate> = col
        .updates
        .values()
        .filter(|u| actor.is_manager() || u.employee_id == actor.user_id)
        .cloned()
        .collect();
    updates.sort_by_key(|u| u.id);
    updates
}
