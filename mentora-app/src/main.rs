use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentora_booking::BookingDesk;
use mentora_catalog::TutorDirectory;
use mentora_client::{Config, RestBackend};
use mentora_core::{SessionProvider, StaticSessionProvider};
use mentora_shared::{SessionUser, TutorQuery, UserRole};
use mentora_slots::SlotBoard;

/// Identity from MENTORA_USER_ID / MENTORA_USER_ROLE, if both are set.
/// Cookie-based sign-in is handled by the backend; this is only for pointing
/// the console at a known account.
fn session_from_env() -> Option<SessionUser> {
    let id = std::env::var("MENTORA_USER_ID").ok()?;
    let role = match std::env::var("MENTORA_USER_ROLE").ok()?.as_str() {
        "STUDENT" => UserRole::Student,
        "TUTOR" => UserRole::Tutor,
        "ADMIN" => UserRole::Admin,
        other => {
            tracing::warn!(role = other, "unrecognized role, ignoring session");
            return None;
        }
    };
    Some(SessionUser { id, role })
}

/// Small console front end over the marketplace backend: lists tutors and
/// shows each one's bookable availability.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentora=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("failed to load config")?;
    tracing::info!("Using backend at {}", config.backend.base_url);

    let backend = Arc::new(RestBackend::new(&config.backend)?);
    let directory = TutorDirectory::new(backend.clone());

    let tutors = directory
        .browse(&TutorQuery::default())
        .await
        .context("failed to list tutors")?;
    if tutors.is_empty() {
        println!("No tutors are listed right now.");
        return Ok(());
    }

    let now = Utc::now();
    for tutor in &tutors {
        println!("{} ({})", tutor.name, tutor.id);
        if let Some(rate) = tutor.hourly_rate {
            println!("  {rate:.2}/hour");
        }

        let board = SlotBoard::new(backend.clone());
        if board.load_slots(&tutor.id).await.is_err() {
            for notice in board.drain_notices() {
                println!("  ! {}", notice.message);
            }
            continue;
        }
        for slot in board.visible_slots(now) {
            let marker = if slot.is_bookable(now) { "open" } else { "taken" };
            println!("  {} - {} [{marker}]", slot.start_time, slot.end_time);
        }
    }

    let provider = match session_from_env() {
        Some(user) => StaticSessionProvider::signed_in(user),
        None => StaticSessionProvider::signed_out(),
    };
    if let Some(user) = provider.current_user().await? {
        let desk = BookingDesk::new(backend.clone());
        desk.load_bookings(&user).await?;

        println!("\nBookings for {} ({:?}):", user.id, user.role);
        for booking in desk.bookings() {
            println!("  {} [{}]", booking.id, booking.status.label());
            for action in desk.actions_for(&user, &booking.id, now) {
                println!("    -> {action:?}");
            }
        }
        let stats = desk.local_stats(now);
        println!(
            "  {} total, {} upcoming, {} completed",
            stats.total_bookings, stats.upcoming_bookings, stats.completed_bookings
        );
    }

    Ok(())
}
