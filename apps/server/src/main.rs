use std::sync::Arc;

use anyhow::Context;
use attendance_backend_api::jobs::repeated_absences::{self, RepeatedAbsenceAggregator};
use attendance_backend_api::{build_router, AppState};
use attendance_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use attendance_config::load as load_config;
use attendance_database::{AttendanceRepository, SessionRepository, UserRepository};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "attendance-backend")]
#[command(about = "Attendance backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Insert the demo session and users
    SeedData,
    /// Print sessions, users and attendances
    DumpData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
        Commands::DumpData => dump_data().await,
    }
}

async fn initialise() -> anyhow::Result<(attendance_config::AppConfig, BackendServices)> {
    let config = load_config().context("failed to load configuration")?;
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;
    Ok((config, services))
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting attendance backend");

    let (config, services) = initialise().await?;
    info!(push_mode = ?services.push_mode, "backend services ready");

    let aggregator = Arc::new(RepeatedAbsenceAggregator::new());
    let job = repeated_absences::spawn(&config.aggregator, aggregator);

    let state = AppState::new(services.db_pool, services.push_sender);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error");

    if let Some(job) = job {
        job.abort();
    }

    served?;
    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    info!("seeding database with demo data");

    let (_, services) = initialise().await?;
    let sessions = SessionRepository::new(services.db_pool.clone());
    let users = UserRepository::new(services.db_pool.clone());

    sessions
        .upsert("S1", Some("4821"))
        .await
        .context("failed to seed session S1")?;
    users
        .upsert("u1", Some("tok1"))
        .await
        .context("failed to seed user u1")?;
    users
        .upsert("u2", None)
        .await
        .context("failed to seed user u2")?;

    println!("Seeded session S1 (code 4821), user u1 (token tok1), user u2 (no token)");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    info!("dumping attendance data from database");

    let (_, services) = initialise().await?;
    let pool = services.db_pool;

    let sessions = SessionRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch sessions")?;

    println!("=== SESSIONS ===");
    if sessions.is_empty() {
        println!("No sessions found in database");
    } else {
        println!("{:<20} {:<12} {:<25}", "ID", "Code", "Created At");
        println!("{}", "-".repeat(60));
        for session in sessions {
            println!(
                "{:<20} {:<12} {:<25}",
                session.id,
                session.code.as_deref().unwrap_or("NULL"),
                session.created_at
            );
        }
    }

    let users = UserRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch users")?;

    println!("\n=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
    } else {
        println!("{:<20} {:<30} {:<25}", "ID", "FCM Token", "Updated At");
        println!("{}", "-".repeat(78));
        for user in users {
            println!(
                "{:<20} {:<30} {:<25}",
                user.id,
                user.fcm_token.as_deref().unwrap_or("NULL"),
                user.updated_at
            );
        }
    }

    let attendances = AttendanceRepository::new(pool)
        .list()
        .await
        .context("failed to fetch attendances")?;

    println!("\n=== ATTENDANCES ===");
    if attendances.is_empty() {
        println!("No attendances found in database");
    } else {
        println!(
            "{:<20} {:<20} {:<10} {:<20} {:<25}",
            "ID", "Student ID", "Status", "Session ID", "Created At"
        );
        println!("{}", "-".repeat(98));
        for attendance in attendances {
            println!(
                "{:<20} {:<20} {:<10} {:<20} {:<25}",
                attendance.id,
                attendance.student_id.as_deref().unwrap_or("NULL"),
                attendance
                    .status
                    .as_ref()
                    .map(|status| status.as_str())
                    .unwrap_or("NULL"),
                attendance.session_id.as_deref().unwrap_or("NULL"),
                attendance.created_at
            );
        }
    }

    Ok(())
}
