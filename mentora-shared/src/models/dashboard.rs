use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse booking phase used only by the dashboard listing; distinct from
/// the lifecycle status because the backend folds PENDING/CONFIRMED into
/// a single "upcoming" bucket for this view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingPhase {
    Upcoming,
    Completed,
    Cancelled,
}

/// Per-role counters shown at the top of the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: u32,
    pub upcoming_bookings: u32,
    pub completed_bookings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_earnings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_students: Option<u32>,
}

/// One row of the dashboard's booking listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub tutor_name: Option<String>,
    pub status: BookingPhase,
}

/// Response of `GET /bookings/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    #[serde(default)]
    pub upcoming_bookings: Vec<BookingItem>,
    #[serde(default)]
    pub past_bookings: Vec<BookingItem>,
}
