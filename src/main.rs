use anyhow::Result;
use chrono::{Duration, Utc};
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use fieldtrack::model::{Actor, CreateTask, Decision, GeoPoint, SubmitUpdate, TaskPriority};
use fieldtrack::service::{attendance, reports, task, work_update};
use fieldtrack::{Config, Store};

/// Seeds a small field-work scenario through the public services and
/// prints the derived reports, as a smoke run of the whole core.
fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "fieldtrack.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!("seeding demo scenario");

    let store = Store::new();
    let manager = Actor::manager(1);
    let alice = Actor::employee(7);
    let bikash = Actor::employee(8);
    let now = Utc::now();

    let site_a = GeoPoint::new(40.7128, -74.0060);
    let site_b = GeoPoint::new(40.7306, -73.9866);

    let rooftop = task::create(
        &store,
        &manager,
        now,
        CreateTask {
            title: "Rooftop antenna survey".into(),
            description: "Check mounting bolts and cabling on building 12".into(),
            assigned_to: Some(alice.user_id),
            location: site_a,
            geo_fence_radius: 100.0,
            priority: TaskPriority::High,
            deadline: Some(now + Duration::days(2)),
        },
    )?;
    let meters = task::create(
        &store,
        &manager,
        now,
        CreateTask {
            title: "Meter reading round".into(),
            description: "Read the block 4 meters and log anomalies".into(),
            assigned_to: Some(bikash.user_id),
            location: site_b,
            geo_fence_radius: 200.0,
            priority: TaskPriority::Medium,
            deadline: None,
        },
    )?;

    attendance::check_in(&store, &alice, now, site_a, Some(rooftop.id))?;
    attendance::check_in(&store, &bikash, now, site_b, Some(meters.id))?;

    // Alice reports from inside the fence, Bikash from well outside it.
    let inside = work_update::submit(
        &store,
        &alice,
        now + Duration::hours(2),
        SubmitUpdate {
            task_id: rooftop.id,
            description: "Bolts torqued, two cables rerouted".into(),
            completion_percentage: 60,
            location: GeoPoint::new(40.7128, -74.0061),
            proof_images: vec!["img/rooftop-01.jpg".into()],
            timestamp: None,
        },
    )?;
    work_update::submit(
        &store,
        &bikash,
        now + Duration::hours(3),
        SubmitUpdate {
            task_id: meters.id,
            description: "Half the block read".into(),
            completion_percentage: 50,
            location: GeoPoint::new(40.7400, -73.9866),
            proof_images: Vec::new(),
            timestamp: None,
        },
    )?;
    work_update::decide(
        &store,
        &manager,
        now + Duration::hours(4),
        inside.id,
        Decision::Approved,
        Some("Good photos".into()),
    )?;

    attendance::check_out(&store, &bikash, now + Duration::hours(8), site_b)?;

    let today = now.date_naive();
    let dashboard = reports::dashboard(&store, today);
    let window = Duration::days(config.report_window_days);
    let perf = reports::performance(&store, alice.user_id, now - window, now + Duration::days(1));
    let weekly = reports::summary(&store, reports::PeriodType::Weekly, today);

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    println!("{}", serde_json::to_string_pretty(&perf)?);
    println!("{}", serde_json::to_string_pretty(&weekly)?);

    info!("demo scenario complete");
    Ok(())
}
