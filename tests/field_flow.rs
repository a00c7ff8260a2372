//! End-to-end flow through the public API: task creation, attendance,
//! fenced submissions, manager decisions and the derived reports.

use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};

use fieldtrack::model::{
    Actor, CreateTask, Decision, GeoPoint, SubmitUpdate, TaskPriority, TaskStatus, UpdateStatus,
};
use fieldtrack::service::{attendance, reports, task, work_update};
use fieldtrack::{Error, Store};

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

#[test]
fn field_day_from_assignment_to_weekly_summary() {
    let store = Store::new();
    let manager = Actor::manager(1);
    let employee = Actor::employee(7);
    let hq = GeoPoint::new(40.7128, -74.0060);

    let t = task::create(
        &store,
        &manager,
        at("2025-03-10T07:00:00Z"),
        CreateTask {
            title: "Downtown cabinet repair".into(),
            description: "Replace the corroded junction cabinet".into(),
            assigned_to: Some(employee.user_id),
            location: hq,
            geo_fence_radius: 100.0,
            priority: TaskPriority::High,
            deadline: None,
        },
    )
    .unwrap();

    attendance::check_in(
        &store,
        &employee,
        at("2025-03-10T08:00:00Z"),
        GeoPoint::new(40.7130, -74.0058),
        Some(t.id),
    )
    .unwrap();

    // ~8.6 m from the task location: inside the 100 m fence.
    let verified = work_update::submit(
        &store,
        &employee,
        at("2025-03-10T11:00:00Z"),
        SubmitUpdate {
            task_id: t.id,
            description: "Cabinet opened, corrosion documented".into(),
            completion_percentage: 40,
            location: GeoPoint::new(40.7128, -74.0061),
            proof_images: vec!["img/cabinet-before.jpg".into()],
            timestamp: None,
        },
    )
    .unwrap();
    assert!(verified.is_geo_verified);

    // ~800 m away: outside the fence, but the submission still goes in.
    let unverified = work_update::submit(
        &store,
        &employee,
        at("2025-03-10T15:00:00Z"),
        SubmitUpdate {
            task_id: t.id,
            description: "Parts pickup on the way back".into(),
            completion_percentage: 70,
            location: GeoPoint::new(40.7200, -74.0060),
            proof_images: Vec::new(),
            timestamp: None,
        },
    )
    .unwrap();
    assert!(!unverified.is_geo_verified);
    assert_eq!(unverified.status, UpdateStatus::Pending);

    // Progress propagated; partial progress never auto-completes.
    let t_now = store.task(t.id).unwrap();
    assert_eq!(t_now.completion_percentage, 70);
    assert_ne!(t_now.status, TaskStatus::Completed);

    work_update::decide(
        &store,
        &manager,
        at("2025-03-10T16:00:00Z"),
        verified.id,
        Decision::Approved,
        None,
    )
    .unwrap();

    // Final report from the site closes the task out.
    work_update::submit(
        &store,
        &employee,
        at("2025-03-10T17:30:00Z"),
        SubmitUpdate {
            task_id: t.id,
            description: "New cabinet installed and sealed".into(),
            completion_percentage: 100,
            location: hq,
            proof_images: vec!["img/cabinet-after.jpg".into()],
            timestamp: None,
        },
    )
    .unwrap();
    assert_eq!(store.task(t.id).unwrap().status, TaskStatus::Completed);

    attendance::check_out(
        &store,
        &employee,
        at("2025-03-10T18:00:00Z"),
        GeoPoint::new(40.7130, -74.0058),
    )
    .unwrap();

    let d = reports::dashboard(&store, "2025-03-10".parse().unwrap());
    assert_eq!(d.total_tasks, 1);
    assert_eq!(d.completed_tasks, 1);
    assert_eq!(d.completion_rate, 100);
    assert_eq!(d.active_employees, 0);
    assert_eq!(d.todays_attendance.len(), 1);

    let p = reports::performance(
        &store,
        employee.user_id,
        at("2025-03-01T00:00:00Z"),
        at("2025-03-31T00:00:00Z"),
    );
    assert_eq!(p.total_updates, 3);
    assert_eq!(p.geo_verified_updates, 2);
    assert_eq!(p.approved_updates, 1);
    assert_eq!(p.on_time_updates, 2);

    // Wednesday reference: the weekly window starts the preceding Monday.
    let s = reports::summary(
        &store,
        reports::PeriodType::Weekly,
        "2025-03-12".parse().unwrap(),
    );
    assert_eq!(s.start, "2025-03-10".parse().unwrap());
    assert_eq!(s.total_employees, 1);
    assert!((s.total_hours - 10.0).abs() < 1e-9);
    assert_eq!(s.total_updates, 3);
    assert_eq!(s.approved_updates, 1);
}

#[test]
fn racing_check_ins_produce_exactly_one_record() {
    let store = Arc::new(Store::new());
    let when = at("2025-03-10T08:00:00Z");
    let spot = GeoPoint::new(23.8103, 90.4125);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                attendance::check_in(&store, &Actor::employee(7), when, spot, None).is_ok()
            })
        })
        .collect();

    let wins = handles
        .into_iter()
        .map(|h| h.join())
        .filter(|r| matches!(r, Ok(true)))
        .count();
    assert_eq!(wins, 1);
    assert!(attendance::find_active(&store, 7, when.date_naive()).is_some());
}

#[test]
fn deleting_a_task_orphans_its_updates_but_keeps_them_readable() {
    let store = Store::new();
    let manager = Actor::manager(1);
    let employee = Actor::employee(7);

    let t = task::create(
        &store,
        &manager,
        at("2025-03-10T07:00:00Z"),
        CreateTask {
            title: "Fence post count".into(),
            description: "Count posts on the north boundary".into(),
            assigned_to: Some(employee.user_id),
            location: GeoPoint::new(51.5074, -0.1278),
            geo_fence_radius: 500.0,
            priority: TaskPriority::Low,
            deadline: None,
        },
    )
    .unwrap();

    let up = work_update::submit(
        &store,
        &employee,
        at("2025-03-10T10:00:00Z"),
        SubmitUpdate {
            task_id: t.id,
            description: "Counted 40 of ~120 posts".into(),
            completion_percentage: 30,
            location: GeoPoint::new(51.5074, -0.1278),
            proof_images: Vec::new(),
            timestamp: None,
        },
    )
    .unwrap();

    task::delete(&store, &manager, t.id).unwrap();
    assert!(store.task(t.id).is_none());
    // The update survives as an orphan.
    assert!(store.work_update(up.id).is_some());
    // But no further submissions can target the deleted task.
    let err = work_update::submit(
        &store,
        &employee,
        at("2025-03-10T11:00:00Z"),
        SubmitUpdate {
            task_id: t.id,
            description: "More posts".into(),
            completion_percentage: 40,
            location: GeoPoint::new(51.5074, -0.1278),
            proof_images: Vec::new(),
            timestamp: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
